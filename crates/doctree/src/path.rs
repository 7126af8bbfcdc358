//! Stable addressing for nodes nested below a block list.
//!
//! Paths alternate `Child` and `Cell` steps: `Child(i)` indexes a block
//! list, `Cell { row, cell }` descends from the table selected by the
//! preceding step into one cell's block list. A paragraph path ends on
//! a `Child` step; paths collected from one snapshot stay valid as long
//! as removals are applied in reverse document order.

use crate::{BlockNode, Paragraph, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Index into a block list.
    Child(usize),
    /// Descend from a table into the block list of one cell.
    Cell { row: usize, cell: usize },
}

pub type NodePath = Vec<PathStep>;

/// Paths of every paragraph below `blocks`, nested tables included,
/// in document order.
pub fn paragraph_paths(blocks: &[BlockNode]) -> Vec<NodePath> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    collect_paragraphs(blocks, &mut prefix, &mut out);
    out
}

fn collect_paragraphs(blocks: &[BlockNode], prefix: &mut NodePath, out: &mut Vec<NodePath>) {
    for (i, block) in blocks.iter().enumerate() {
        match block {
            BlockNode::Paragraph(_) => {
                prefix.push(PathStep::Child(i));
                out.push(prefix.clone());
                prefix.pop();
            }
            BlockNode::Table(table) => {
                for (r, row) in table.rows.iter().enumerate() {
                    for (c, cell) in row.cells.iter().enumerate() {
                        prefix.push(PathStep::Child(i));
                        prefix.push(PathStep::Cell { row: r, cell: c });
                        collect_paragraphs(&cell.children, prefix, out);
                        prefix.pop();
                        prefix.pop();
                    }
                }
            }
        }
    }
}

/// Resolve the block list holding the node a path's last step indexes.
fn child_list<'a>(mut blocks: &'a [BlockNode], steps: &[PathStep]) -> Option<&'a [BlockNode]> {
    let mut table: Option<&Table> = None;
    for step in steps {
        match *step {
            PathStep::Child(i) => match blocks.get(i)? {
                BlockNode::Table(t) => table = Some(t),
                BlockNode::Paragraph(_) => return None,
            },
            PathStep::Cell { row, cell } => {
                blocks = &table.take()?.rows.get(row)?.cells.get(cell)?.children;
            }
        }
    }
    Some(blocks)
}

fn child_list_mut<'a>(
    mut blocks: &'a mut Vec<BlockNode>,
    steps: &[PathStep],
) -> Option<&'a mut Vec<BlockNode>> {
    let mut i = 0;
    while i < steps.len() {
        let PathStep::Child(b) = steps[i] else { return None };
        let PathStep::Cell { row, cell } = *steps.get(i + 1)? else { return None };
        match blocks.get_mut(b)? {
            BlockNode::Table(t) => {
                blocks = &mut t.rows.get_mut(row)?.cells.get_mut(cell)?.children;
            }
            BlockNode::Paragraph(_) => return None,
        }
        i += 2;
    }
    Some(blocks)
}

pub fn paragraph_at<'a>(blocks: &'a [BlockNode], path: &NodePath) -> Option<&'a Paragraph> {
    let (last, prefix) = path.split_last()?;
    let PathStep::Child(i) = *last else { return None };
    match child_list(blocks, prefix)?.get(i)? {
        BlockNode::Paragraph(p) => Some(p),
        BlockNode::Table(_) => None,
    }
}

pub fn paragraph_at_mut<'a>(
    blocks: &'a mut Vec<BlockNode>,
    path: &NodePath,
) -> Option<&'a mut Paragraph> {
    let (last, prefix) = path.split_last()?;
    let PathStep::Child(i) = *last else { return None };
    match child_list_mut(blocks, prefix)?.get_mut(i)? {
        BlockNode::Paragraph(p) => Some(p),
        BlockNode::Table(_) => None,
    }
}

/// Remove the paragraph a path points at. Returns false when the path
/// no longer resolves.
pub fn remove_paragraph(blocks: &mut Vec<BlockNode>, path: &NodePath) -> bool {
    let Some((last, prefix)) = path.split_last() else { return false };
    let PathStep::Child(i) = *last else { return false };
    let Some(list) = child_list_mut(blocks, prefix) else { return false };
    if matches!(list.get(i), Some(BlockNode::Paragraph(_))) {
        list.remove(i);
        true
    } else {
        false
    }
}

/// Visit every paragraph below `blocks` in document order, nested
/// tables included.
pub fn for_each_paragraph_mut(blocks: &mut [BlockNode], f: &mut dyn FnMut(&mut Paragraph)) {
    for block in blocks {
        match block {
            BlockNode::Paragraph(p) => f(p),
            BlockNode::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        for_each_paragraph_mut(&mut cell.children, f);
                    }
                }
            }
        }
    }
}

/// Paths of every table nested below `table`'s own cells, all depths,
/// in document order. Paths start with a `Cell` step relative to the
/// given table.
pub fn table_paths_within(table: &Table) -> Vec<NodePath> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    collect_tables(table, &mut prefix, &mut out);
    out
}

fn collect_tables(table: &Table, prefix: &mut NodePath, out: &mut Vec<NodePath>) {
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            for (i, block) in cell.children.iter().enumerate() {
                if let BlockNode::Table(inner) = block {
                    prefix.push(PathStep::Cell { row: r, cell: c });
                    prefix.push(PathStep::Child(i));
                    out.push(prefix.clone());
                    collect_tables(inner, prefix, out);
                    prefix.pop();
                    prefix.pop();
                }
            }
        }
    }
}

/// Resolve a path produced by [`table_paths_within`] against its root
/// table.
pub fn table_at_mut<'a>(table: &'a mut Table, path: &NodePath) -> Option<&'a mut Table> {
    let mut current = table;
    let mut i = 0;
    while i < path.len() {
        let PathStep::Cell { row, cell } = path[i] else { return None };
        let PathStep::Child(b) = *path.get(i + 1)? else { return None };
        let list = &mut current.rows.get_mut(row)?.cells.get_mut(cell)?.children;
        match list.get_mut(b)? {
            BlockNode::Table(t) => current = t,
            BlockNode::Paragraph(_) => return None,
        }
        i += 2;
    }
    Some(current)
}
