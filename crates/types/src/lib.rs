pub mod color;
pub mod geometry;
pub mod image;

pub use color::Color;
pub use geometry::{Emu, Extent, EMU_PER_PIXEL};
pub use image::ImageKind;
