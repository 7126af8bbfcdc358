//! wordforge renders rich-text document templates by mutating the
//! document tree in place: `{{key}}` placeholders are replaced with
//! caller-supplied values, table rows repeat over record lists, and
//! inline and block-level conditionals keep or drop content.
//!
//! The byte-level container format is not this crate's business: a
//! collaborator opens the template into a [`DocumentTree`], implements
//! [`DocumentHost`] for relationship and part bookkeeping, and
//! serializes the mutated tree afterwards.
//!
//! # Example
//!
//! ```
//! use wordforge::{render, RenderConfig, TagMap};
//! use wordforge::doctree::{BlockNode, Container, DocumentTree, Paragraph};
//! use wordforge::InMemoryHost;
//!
//! let mut tree = DocumentTree {
//!     body: Container::new(vec![BlockNode::Paragraph(Paragraph::of_text(
//!         "Hello {{name}}!",
//!     ))]),
//!     ..DocumentTree::default()
//! };
//!
//! let mut tags = TagMap::new();
//! tags.insert("name", "Ada");
//! let mut host = InMemoryHost::new();
//!
//! render(&mut tree, &tags, &mut host, &RenderConfig::default())?;
//! assert_eq!(tree.body.inner_text(), "Hello Ada!");
//! # Ok::<(), wordforge::RenderError>(())
//! ```

pub use wordforge_doctree as doctree;
pub use wordforge_engine as engine;
pub use wordforge_traits as traits;
pub use wordforge_types as types;

pub use wordforge_doctree::DocumentTree;
pub use wordforge_engine::{
    Directive, Link, Picture, PictureSource, Record, RenderConfig, RenderError, Scalar,
    StyledText, TagMap, Value,
};
pub use wordforge_traits::{DocumentHost, InMemoryHost};
pub use wordforge_types::{Color, ImageKind};

/// Render a full document tree against a data context.
///
/// Header and footer parts are rendered before the body, each container
/// independently; a failure in any container aborts the whole render.
pub fn render(
    tree: &mut DocumentTree,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    for (i, header) in tree.headers.iter_mut().enumerate() {
        log::debug!("rendering header part {}", i);
        engine::generate(header, tags, host, config)?;
    }
    for (i, footer) in tree.footers.iter_mut().enumerate() {
        log::debug!("rendering footer part {}", i);
        engine::generate(footer, tags, host, config)?;
    }
    log::debug!("rendering document body");
    engine::generate(&mut tree.body, tags, host, config)
}
