pub mod host;

pub use host::{DocumentHost, InMemoryHost};
