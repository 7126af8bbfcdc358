//! Pluggable content instructions rendered into a target run.
//!
//! Every directive kind implements the same two operations: render one
//! instance, and render a homogeneous batch. The batch form exists so a
//! kind can emit cross-item layout (the styled-text block shares one
//! formatting block across items). Heterogeneous batches are rejected
//! by the substitution dispatcher before any tree mutation.

mod link;
mod picture;
mod styled;

pub use link::Link;
pub use picture::{Picture, PictureSource};
pub use styled::StyledText;

use wordforge_doctree::Run;
use wordforge_traits::DocumentHost;

use crate::error::RenderError;

/// Rendering contract shared by all directive kinds.
pub(crate) trait DirectiveContent: Sized {
    /// Render a homogeneous batch into the run.
    fn render_batch(
        items: &[&Self],
        run: &mut Run,
        host: &mut dyn DocumentHost,
    ) -> Result<(), RenderError>;

    /// Render a single instance; a batch of one unless overridden.
    fn render(&self, run: &mut Run, host: &mut dyn DocumentHost) -> Result<(), RenderError> {
        Self::render_batch(&[self], run, host)
    }
}

/// A single pluggable content instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Link(Link),
    Picture(Picture),
    StyledText(StyledText),
}

impl Directive {
    /// Stable kind tag used for batch homogeneity checks.
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Link(_) => "link",
            Directive::Picture(_) => "picture",
            Directive::StyledText(_) => "styled-text",
        }
    }

    pub(crate) fn render(
        &self,
        run: &mut Run,
        host: &mut dyn DocumentHost,
    ) -> Result<(), RenderError> {
        match self {
            Directive::Link(link) => link.render(run, host),
            Directive::Picture(picture) => picture.render(run, host),
            Directive::StyledText(styled) => styled.render(run, host),
        }
    }

    /// Render a batch. Callers must have verified homogeneity; items of
    /// other kinds are ignored here.
    pub(crate) fn render_batch(
        list: &[Directive],
        run: &mut Run,
        host: &mut dyn DocumentHost,
    ) -> Result<(), RenderError> {
        match list.first() {
            None => Ok(()),
            Some(Directive::Link(_)) => {
                let links: Vec<&Link> = list
                    .iter()
                    .filter_map(|d| match d {
                        Directive::Link(l) => Some(l),
                        _ => None,
                    })
                    .collect();
                Link::render_batch(&links, run, host)
            }
            Some(Directive::Picture(_)) => {
                let pictures: Vec<&Picture> = list
                    .iter()
                    .filter_map(|d| match d {
                        Directive::Picture(p) => Some(p),
                        _ => None,
                    })
                    .collect();
                Picture::render_batch(&pictures, run, host)
            }
            Some(Directive::StyledText(_)) => {
                let styled: Vec<&StyledText> = list
                    .iter()
                    .filter_map(|d| match d {
                        Directive::StyledText(s) => Some(s),
                        _ => None,
                    })
                    .collect();
                StyledText::render_batch(&styled, run, host)
            }
        }
    }
}

impl From<Link> for Directive {
    fn from(v: Link) -> Self {
        Directive::Link(v)
    }
}

impl From<Picture> for Directive {
    fn from(v: Picture) -> Self {
        Directive::Picture(v)
    }
}

impl From<StyledText> for Directive {
    fn from(v: StyledText) -> Self {
        Directive::StyledText(v)
    }
}
