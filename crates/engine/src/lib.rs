//! The rendering engine: placeholder substitution, table-row expansion
//! and conditional resolution over a mutable document tree.
//!
//! One render is a fixed sequence of passes per container (body,
//! header, footer), each consuming and producing the same tree:
//!
//! 1. token reassembly ([`reassemble`]) repairs placeholders that
//!    editing tools fragmented across leaves;
//! 2. table-row expansion ([`tables`]) clones loop rows from
//!    record-list data, resolving each clone against its own record;
//! 3. block conditionals ([`statements`]) keep or drop paragraph
//!    ranges;
//! 4. substitution ([`substitute`]) dispatches context values into
//!    tree mutations, evaluating inline conditionals ([`inline`]) as
//!    it rewrites each leaf.
//!
//! All passes mutate in place; nothing is copied out of the tree.

pub mod compare;
pub mod config;
pub mod directives;
pub mod error;
pub mod inline;
pub mod reassemble;
pub mod statements;
pub mod substitute;
pub mod tables;
pub mod value;

pub use config::RenderConfig;
pub use directives::{Directive, Link, Picture, PictureSource, StyledText};
pub use error::RenderError;
pub use value::{Record, Scalar, TagMap, Value};

use wordforge_doctree::Container;
use wordforge_traits::DocumentHost;

/// Run the full pipeline over one container.
pub fn generate(
    container: &mut Container,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    reassemble::merge_fragmented_tags(container);
    tables::expand_table_rows(&mut container.children, tags, host, config)?;
    statements::resolve_block_conditionals(&mut container.children, tags, config);
    substitute::replace_tags(&mut container.children, tags, host, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordforge_doctree::{BlockNode, Paragraph, ParagraphChild, Run, RunChild};
    use wordforge_traits::InMemoryHost;

    #[test]
    fn pipeline_merges_then_substitutes() {
        let paragraph = Paragraph {
            props: Default::default(),
            children: vec![
                ParagraphChild::Run(Run::of_text("Dear {{na")),
                ParagraphChild::Run(Run::of_text("me}}!")),
            ],
        };
        let mut container = Container::new(vec![BlockNode::Paragraph(paragraph)]);
        let mut tags = TagMap::new();
        tags.insert("name", "Ada");
        let mut host = InMemoryHost::new();

        generate(&mut container, &tags, &mut host, &RenderConfig::default()).unwrap();
        assert_eq!(container.inner_text(), "Dear Ada!");
    }

    #[test]
    fn pipeline_resolves_conditionals_after_expansion() {
        let mut container = Container::new(vec![
            BlockNode::Paragraph(Paragraph::of_text("@if ready")),
            BlockNode::Paragraph(Paragraph::of_text("{{greeting}}")),
            BlockNode::Paragraph(Paragraph::of_text("@endif")),
        ]);
        let mut tags = TagMap::new();
        tags.insert("ready", true);
        tags.insert("greeting", "hello");
        let mut host = InMemoryHost::new();

        generate(&mut container, &tags, &mut host, &RenderConfig::default()).unwrap();
        assert_eq!(container.inner_text(), "hello");
    }

    #[test]
    fn pipeline_leaves_leaf_structure_well_formed() {
        let mut container = Container::new(vec![BlockNode::Paragraph(Paragraph::of_text(
            "{{lines}}",
        ))]);
        let mut tags = TagMap::new();
        tags.insert(
            "lines",
            Value::ScalarList(vec![Scalar::from("one"), Scalar::from("two")]),
        );
        let mut host = InMemoryHost::new();

        generate(&mut container, &tags, &mut host, &RenderConfig::default()).unwrap();
        let BlockNode::Paragraph(p) = &container.children[0] else {
            panic!("fixture changed");
        };
        let ParagraphChild::Run(run) = &p.children[0] else {
            panic!("fixture changed");
        };
        assert!(matches!(run.children[0], RunChild::Text(_)));
        assert!(matches!(run.children[1], RunChild::Break));
        assert!(matches!(run.children[2], RunChild::Text(_)));
    }
}
