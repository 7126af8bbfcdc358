use wordforge_doctree::{HyperlinkNode, Run, RunChild, TargetFrame, UnderlineStyle};
use wordforge_traits::DocumentHost;

use super::DirectiveContent;
use crate::error::RenderError;

/// A clickable span. The URL is registered with the container's
/// relationship table through the host; the rendered node only carries
/// the returned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub text: String,
    pub underline: UnderlineStyle,
    pub target_frame: TargetFrame,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            underline: UnderlineStyle::default(),
            target_frame: TargetFrame::default(),
        }
    }

    pub fn with_underline(mut self, underline: UnderlineStyle) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_target_frame(mut self, target_frame: TargetFrame) -> Self {
        self.target_frame = target_frame;
        self
    }
}

impl DirectiveContent for Link {
    fn render_batch(
        items: &[&Self],
        run: &mut Run,
        host: &mut dyn DocumentHost,
    ) -> Result<(), RenderError> {
        for link in items {
            let rel_id = host.add_hyperlink(&link.url);
            run.children.push(RunChild::Hyperlink(HyperlinkNode {
                rel_id,
                url: link.url.clone(),
                text: link.text.clone(),
                underline: link.underline,
                target_frame: link.target_frame,
            }));
            run.children.push(RunChild::Break);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordforge_traits::InMemoryHost;

    #[test]
    fn each_link_renders_a_span_and_a_break() {
        let mut run = Run::default();
        let mut host = InMemoryHost::new();
        let a = Link::new("https://a.example", "a");
        let b = Link::new("https://b.example", "b").with_target_frame(TargetFrame::Top);
        Link::render_batch(&[&a, &b], &mut run, &mut host).unwrap();

        assert_eq!(run.children.len(), 4);
        assert!(matches!(run.children[1], RunChild::Break));
        let RunChild::Hyperlink(node) = &run.children[2] else {
            panic!("expected hyperlink node");
        };
        assert_eq!(node.rel_id, "rId2");
        assert_eq!(node.target_frame.as_str(), "_top");
        assert_eq!(host.hyperlinks, ["https://a.example", "https://b.example"]);
    }
}
