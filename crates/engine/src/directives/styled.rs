use wordforge_doctree::{Run, RunChild, StyledBlock, StyledFragment};
use wordforge_traits::DocumentHost;
use wordforge_types::Color;

use super::DirectiveContent;
use crate::error::RenderError;

/// A styled text fragment with optional foreground and highlight
/// colors. A batch renders every fragment into one shared formatting
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    pub text: String,
    pub color: Option<Color>,
    pub highlight: Option<Color>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            highlight: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_highlight(mut self, highlight: Color) -> Self {
        self.highlight = Some(highlight);
        self
    }
}

impl DirectiveContent for StyledText {
    fn render_batch(
        items: &[&Self],
        run: &mut Run,
        _host: &mut dyn DocumentHost,
    ) -> Result<(), RenderError> {
        let fragments = items
            .iter()
            .map(|s| StyledFragment {
                text: s.text.clone(),
                color: s.color,
                highlight: s.highlight,
            })
            .collect();
        run.children
            .push(RunChild::StyledBlock(StyledBlock { fragments }));
        Ok(())
    }
}
