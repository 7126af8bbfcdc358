//! Paragraph-level `@if key [op literal]` / `@else` / `@endif` blocks.
//!
//! Resolution is global and order-dependent: each pass locates the
//! *last* paragraph containing `@if` and the *first* paragraph
//! containing `@else` anywhere in the scope, pairs them with the first
//! `@endif` at or after the if-marker, and deletes the losing branch
//! together with both markers. The scan repeats until no `@if` remains.

use wordforge_doctree::{
    paragraph_paths, remove_paragraph, BlockNode, NodePath, Paragraph, TableRow,
};

use crate::compare;
use crate::config::RenderConfig;
use crate::value::{Scalar, TagMap};

pub fn resolve_block_conditionals(
    blocks: &mut Vec<BlockNode>,
    tags: &TagMap,
    config: &RenderConfig,
) {
    resolve(&mut BlockScope { blocks }, tags, config);
}

/// Row-scoped variant used on cloned table rows: the paragraphs of all
/// cells form one ordered list.
pub fn resolve_in_row(row: &mut TableRow, tags: &TagMap, config: &RenderConfig) {
    resolve(&mut RowScope { row }, tags, config);
}

/// The set of paragraphs one resolution pass works over.
trait ParagraphScope {
    type Loc;

    fn snapshot(&self) -> Vec<(Self::Loc, String)>;
    fn remove(&mut self, loc: Self::Loc);
}

struct BlockScope<'a> {
    blocks: &'a mut Vec<BlockNode>,
}

impl ParagraphScope for BlockScope<'_> {
    type Loc = NodePath;

    fn snapshot(&self) -> Vec<(NodePath, String)> {
        paragraph_paths(self.blocks)
            .into_iter()
            .map(|path| {
                let text = wordforge_doctree::paragraph_at(self.blocks, &path)
                    .map(Paragraph::inner_text)
                    .unwrap_or_default();
                (path, text)
            })
            .collect()
    }

    fn remove(&mut self, loc: NodePath) {
        remove_paragraph(self.blocks, &loc);
    }
}

struct RowScope<'a> {
    row: &'a mut TableRow,
}

impl ParagraphScope for RowScope<'_> {
    type Loc = (usize, NodePath);

    fn snapshot(&self) -> Vec<((usize, NodePath), String)> {
        let mut out = Vec::new();
        for (ci, cell) in self.row.cells.iter().enumerate() {
            for path in paragraph_paths(&cell.children) {
                let text = wordforge_doctree::paragraph_at(&cell.children, &path)
                    .map(Paragraph::inner_text)
                    .unwrap_or_default();
                out.push(((ci, path), text));
            }
        }
        out
    }

    fn remove(&mut self, (ci, path): (usize, NodePath)) {
        if let Some(cell) = self.row.cells.get_mut(ci) {
            remove_paragraph(&mut cell.children, &path);
        }
    }
}

fn resolve<S: ParagraphScope>(scope: &mut S, tags: &TagMap, config: &RenderConfig) {
    loop {
        let paragraphs = scope.snapshot();
        let Some(if_pos) = paragraphs.iter().rposition(|(_, t)| t.contains("@if")) else {
            break;
        };
        let else_pos = paragraphs.iter().position(|(_, t)| t.contains("@else"));
        let Some(endif_pos) = paragraphs[if_pos..]
            .iter()
            .position(|(_, t)| t.contains("@endif"))
            .map(|p| p + if_pos)
        else {
            log::warn!("@if marker without @endif, leaving block unresolved");
            break;
        };

        let marker = &paragraphs[if_pos].1;
        let tokens: Vec<&str> = marker.split_whitespace().collect();
        let verdict = match tokens.as_slice() {
            [_, key, op, literal] => {
                let lhs = match tags.scalar(key) {
                    Some(s) => s.to_string(),
                    None => {
                        miss(config, key);
                        "NULL".to_string()
                    }
                };
                compare::evaluate(&lhs, op, literal)
            }
            [_, key, ..] => tags.scalar(key).map(Scalar::is_truthy).unwrap_or_else(|| {
                miss(config, key);
                false
            }),
            _ => false,
        };
        log::trace!("block conditional '{}' -> {}", marker.trim(), verdict);

        let mut kill = vec![if_pos, endif_pos];
        let in_range_else = else_pos.filter(|&e| e < endif_pos);
        if verdict {
            if let Some(e) = in_range_else {
                kill.extend(e..endif_pos);
            }
        } else if let Some(e) = in_range_else {
            kill.extend(if_pos + 1..e);
            kill.push(e);
        } else {
            kill.extend(if_pos + 1..endif_pos);
        }
        kill.sort_unstable();
        kill.dedup();

        let mut paragraphs = paragraphs;
        for idx in kill.into_iter().rev() {
            let (loc, _) = paragraphs.swap_remove(idx);
            scope.remove(loc);
        }
    }
}

fn miss(config: &RenderConfig, key: &str) {
    if config.strict {
        log::warn!("condition key '{}' missing from context", key);
    } else {
        log::trace!("condition key '{}' missing from context", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordforge_doctree::Container;

    fn container_of(texts: &[&str]) -> Container {
        Container::new(
            texts
                .iter()
                .map(|t| BlockNode::Paragraph(Paragraph::of_text(*t)))
                .collect(),
        )
    }

    fn texts(container: &Container) -> Vec<String> {
        container
            .children
            .iter()
            .filter_map(|b| match b {
                BlockNode::Paragraph(p) => Some(p.inner_text()),
                BlockNode::Table(_) => None,
            })
            .collect()
    }

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn unary_true_keeps_the_body() {
        let mut doc = container_of(&["@if show", "body", "@endif", "tail"]);
        let mut map = TagMap::new();
        map.insert("show", true);
        resolve_block_conditionals(&mut doc.children, &map, &RenderConfig::default());
        assert_eq!(texts(&doc), ["body", "tail"]);
    }

    #[test]
    fn unary_false_removes_the_whole_block() {
        let mut doc = container_of(&["head", "@if show", "body", "@endif"]);
        let mut map = TagMap::new();
        map.insert("show", false);
        resolve_block_conditionals(&mut doc.children, &map, &RenderConfig::default());
        assert_eq!(texts(&doc), ["head"]);
    }

    #[test]
    fn missing_unary_key_is_not_truthy() {
        let mut doc = container_of(&["@if ghost", "body", "@endif"]);
        resolve_block_conditionals(&mut doc.children, &TagMap::new(), &RenderConfig::default());
        assert_eq!(texts(&doc), Vec::<String>::new());
    }

    #[test]
    fn binary_comparison_selects_if_branch() {
        let mut doc = container_of(&["@if count > 2", "many", "@else", "few", "@endif"]);
        resolve_block_conditionals(
            &mut doc.children,
            &tags(&[("count", "5")]),
            &RenderConfig::default(),
        );
        assert_eq!(texts(&doc), ["many"]);
    }

    #[test]
    fn binary_comparison_selects_else_branch() {
        let mut doc = container_of(&["@if count > 2", "many", "@else", "few", "@endif"]);
        resolve_block_conditionals(
            &mut doc.children,
            &tags(&[("count", "1")]),
            &RenderConfig::default(),
        );
        assert_eq!(texts(&doc), ["few"]);
    }

    #[test]
    fn missing_binary_key_compares_as_null_string() {
        let mut doc = container_of(&["@if status == NULL", "absent", "@else", "present", "@endif"]);
        resolve_block_conditionals(&mut doc.children, &TagMap::new(), &RenderConfig::default());
        assert_eq!(texts(&doc), ["absent"]);
    }

    #[test]
    fn resolves_repeatedly_until_no_if_remains() {
        let mut doc = container_of(&[
            "@if a", "A", "@endif", "mid", "@if b", "B", "@endif",
        ]);
        let mut map = TagMap::new();
        map.insert("a", true);
        map.insert("b", false);
        resolve_block_conditionals(&mut doc.children, &map, &RenderConfig::default());
        assert_eq!(texts(&doc), ["A", "mid"]);
    }

    #[test]
    fn conditional_inside_a_table_cell_is_resolved() {
        use wordforge_doctree::{Formatting, Table, TableCell};
        let cell = TableCell {
            props: Formatting::default(),
            children: container_of(&["@if flag", "kept", "@endif"]).children,
        };
        let table = Table {
            props: Formatting::default(),
            rows: vec![TableRow {
                props: Formatting::default(),
                cells: vec![cell],
            }],
        };
        let mut doc = Container::new(vec![BlockNode::Table(table)]);
        let mut map = TagMap::new();
        map.insert("flag", true);
        resolve_block_conditionals(&mut doc.children, &map, &RenderConfig::default());
        assert_eq!(doc.inner_text(), "kept");
    }
}
