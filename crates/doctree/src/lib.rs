//! In-memory representation of a word-processing document's structure
//! and content between container open and container save.
//!
//! The tree is owned by a single render call and mutated in place:
//! containers hold ordered child lists, and every edit is an insertion,
//! removal, or payload rewrite on one of those lists.

use std::sync::Arc;

use wordforge_types::{Color, Extent, ImageKind};

pub mod path;

pub use path::{
    for_each_paragraph_mut, paragraph_at, paragraph_at_mut, paragraph_paths, remove_paragraph,
    table_at_mut, table_paths_within, NodePath, PathStep,
};

/// A string type for document text content.
pub type TextStr = String;

/// A reference-counted container for shared, immutable data like images.
pub type SharedData = Arc<Vec<u8>>;

/// Opaque formatting payload attached to structural nodes.
///
/// The container layer owns its meaning; rendering only carries it
/// along when nodes are cloned, never rebuilds it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formatting {
    pub raw: Option<TextStr>,
}

/// A full document: one body plus any header and footer parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentTree {
    pub body: Container,
    pub headers: Vec<Container>,
    pub footers: Vec<Container>,
}

/// A block-level container: the body, a header, a footer, or a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    pub children: Vec<BlockNode>,
}

impl Container {
    pub fn new(children: Vec<BlockNode>) -> Self {
        Self { children }
    }

    /// Concatenated text of every descendant leaf, in document order.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    Paragraph(Paragraph),
    Table(Table),
}

impl BlockNode {
    fn collect_text(&self, out: &mut String) {
        match self {
            BlockNode::Paragraph(p) => p.collect_text(out),
            BlockNode::Table(t) => {
                for row in &t.rows {
                    row.collect_text(out);
                }
            }
        }
    }
}

/// A paragraph: runs interleaved with transparent bookmark markers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub props: Formatting,
    pub children: Vec<ParagraphChild>,
}

impl Paragraph {
    /// A paragraph holding one run with one text leaf.
    pub fn of_text(text: impl Into<TextStr>) -> Self {
        Self {
            props: Formatting::default(),
            children: vec![ParagraphChild::Run(Run::of_text(text))],
        }
    }

    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            if let ParagraphChild::Run(run) = child {
                run.collect_text(out);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphChild {
    Run(Run),
    /// Bookmark markers survive rendering untouched and are skipped by
    /// every text pass.
    BookmarkStart {
        name: TextStr,
    },
    BookmarkEnd,
}

/// A formatting span grouping leaves and breaks sharing one style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub props: Formatting,
    pub children: Vec<RunChild>,
}

impl Run {
    pub fn of_text(text: impl Into<TextStr>) -> Self {
        Self {
            props: Formatting::default(),
            children: vec![RunChild::Text(text.into())],
        }
    }

    /// True when the run holds nothing but text leaves. Only such runs
    /// participate in token reassembly.
    pub fn is_text_only(&self) -> bool {
        self.children
            .iter()
            .all(|c| matches!(c, RunChild::Text(_)))
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                RunChild::Text(t) => out.push_str(t),
                RunChild::Hyperlink(h) => out.push_str(&h.text),
                RunChild::StyledBlock(b) => {
                    for fragment in &b.fragments {
                        out.push_str(&fragment.text);
                    }
                }
                RunChild::Break | RunChild::Picture(_) => {}
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunChild {
    /// A literal text leaf, the only node placeholders may appear in.
    Text(TextStr),
    /// A hard line break.
    Break,
    /// A rendered clickable span.
    Hyperlink(HyperlinkNode),
    /// A rendered embedded image.
    Picture(PictureNode),
    /// A rendered block of styled text fragments.
    StyledBlock(StyledBlock),
}

/// A clickable span pointing at an externally registered relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperlinkNode {
    pub rel_id: TextStr,
    pub url: TextStr,
    pub text: TextStr,
    pub underline: UnderlineStyle,
    pub target_frame: TargetFrame,
}

/// An embedded image pointing at an externally stored image part.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureNode {
    pub rel_id: TextStr,
    pub kind: ImageKind,
    pub extent: Extent,
}

/// One shared formatting block holding one record per styled fragment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledBlock {
    pub fragments: Vec<StyledFragment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledFragment {
    pub text: TextStr,
    pub color: Option<Color>,
    pub highlight: Option<Color>,
}

/// Underline styles for rendered hyperlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    #[default]
    Single,
    Double,
    Thick,
    Dotted,
    Dash,
    Wave,
    None,
}

impl UnderlineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnderlineStyle::Single => "single",
            UnderlineStyle::Double => "double",
            UnderlineStyle::Thick => "thick",
            UnderlineStyle::Dotted => "dotted",
            UnderlineStyle::Dash => "dash",
            UnderlineStyle::Wave => "wave",
            UnderlineStyle::None => "none",
        }
    }
}

/// Browse-target hint for rendered hyperlinks. `Current` serializes as
/// `_self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFrame {
    #[default]
    Blank,
    Top,
    Parent,
    Current,
}

impl TargetFrame {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetFrame::Blank => "_blank",
            TargetFrame::Top => "_top",
            TargetFrame::Parent => "_parent",
            TargetFrame::Current => "_self",
        }
    }
}

// --- Table structures ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub props: Formatting,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub props: Formatting,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for cell in &self.cells {
            for child in &cell.children {
                child.collect_text(out);
            }
        }
    }

    /// Visit every paragraph below this row, nested tables included.
    pub fn for_each_paragraph_mut(&mut self, f: &mut dyn FnMut(&mut Paragraph)) {
        for cell in &mut self.cells {
            path::for_each_paragraph_mut(&mut cell.children, f);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub props: Formatting,
    pub children: Vec<BlockNode>,
}

impl TableCell {
    pub fn of_text(text: impl Into<TextStr>) -> Self {
        Self {
            props: Formatting::default(),
            children: vec![BlockNode::Paragraph(Paragraph::of_text(text))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_text_concatenates_leaves_in_document_order() {
        let row = TableRow {
            props: Formatting::default(),
            cells: vec![TableCell::of_text("left"), TableCell::of_text("right")],
        };
        assert_eq!(row.inner_text(), "leftright");
    }

    #[test]
    fn inner_text_includes_rendered_spans() {
        let mut run = Run::of_text("see ");
        run.children.push(RunChild::Hyperlink(HyperlinkNode {
            rel_id: "rId1".into(),
            url: "https://example.com".into(),
            text: "docs".into(),
            underline: UnderlineStyle::default(),
            target_frame: TargetFrame::default(),
        }));
        let p = Paragraph {
            props: Formatting::default(),
            children: vec![ParagraphChild::Run(run)],
        };
        assert_eq!(p.inner_text(), "see docs");
    }

    #[test]
    fn text_only_run_detection() {
        let mut run = Run::of_text("plain");
        assert!(run.is_text_only());
        run.children.push(RunChild::Break);
        assert!(!run.is_text_only());
    }

    #[test]
    fn row_clone_preserves_formatting_payload() {
        let row = TableRow {
            props: Formatting { raw: Some("shaded".into()) },
            cells: vec![TableCell::of_text("x")],
        };
        let clone = row.clone();
        assert_eq!(clone.props.raw.as_deref(), Some("shaded"));
    }
}
