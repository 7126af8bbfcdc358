//! Token reassembly: repair placeholders fragmented across text leaves.
//!
//! Editing tools routinely split a `{{key}}` into several leaves
//! (`{`, `{ke`, `y}}` ...). This pass merges each balanced token back
//! into a single leaf so the later stages can match it with plain
//! substring search. Merging rewrites leaf text only; node counts and
//! formatting stay untouched.

use wordforge_doctree::{
    for_each_paragraph_mut, Container, Paragraph, ParagraphChild, RunChild,
};

/// Tokens whose reassembled source text would exceed this many
/// characters are left unmerged, and therefore unmatched.
const MAX_TAG_LEN: usize = 1000;

/// Position of a text leaf inside a paragraph: run child index, then
/// leaf index within the run.
type LeafRef = (usize, usize);

pub fn merge_fragmented_tags(container: &mut Container) {
    for_each_paragraph_mut(&mut container.children, &mut merge_in_paragraph);
}

fn merge_in_paragraph(paragraph: &mut Paragraph) {
    // Continuous groups of text-only runs; bookmarks are transparent,
    // anything else bounds a group.
    let mut group: Vec<usize> = Vec::new();
    for idx in 0..paragraph.children.len() {
        match &paragraph.children[idx] {
            ParagraphChild::Run(run) if run.is_text_only() => group.push(idx),
            ParagraphChild::BookmarkStart { .. } | ParagraphChild::BookmarkEnd => {}
            _ => {
                merge_group(paragraph, &group);
                group.clear();
            }
        }
    }
    merge_group(paragraph, &group);
}

fn merge_group(paragraph: &mut Paragraph, runs: &[usize]) {
    let mut i = 0;
    let mut buffer = String::new();
    let mut pool: Vec<LeafRef> = Vec::new();
    let mut pending = false;

    loop {
        let leaves = leaves_of(paragraph, runs);
        if i >= leaves.len() {
            break;
        }

        let text = leaf_text(paragraph, leaves[i]).to_string();
        let mut clear = false;

        if !pending {
            if text.starts_with("{{") {
                pending = true;
            } else if (i + 1 < leaves.len()
                && text.ends_with('{')
                && leaf_text(paragraph, leaves[i + 1]).starts_with('{'))
                || text.contains("{{")
            {
                if let Some(pos) = text.find('{') {
                    if pos > 0 {
                        // Split so the tag-opening half begins a fresh leaf.
                        split_leaf(paragraph, leaves[i], pos);
                        i += 1;
                    }
                }
                pending = true;
            }
        }

        if pending {
            let leaves = leaves_of(paragraph, runs);
            let current = leaves[i];
            buffer.push_str(leaf_text(paragraph, current));
            pool.push(current);

            let foreach_balanced =
                count_occurrences(&buffer, "{{foreach") == count_occurrences(&buffer, "endforeach}}");
            let if_balanced =
                count_occurrences(&buffer, "{{if") == count_occurrences(&buffer, "endif}}");
            let has_tag = buffer.starts_with("{{") && buffer.contains("}}");

            if foreach_balanced && if_balanced && has_tag {
                if buffer.chars().count() <= MAX_TAG_LEN {
                    let mut pool_iter = pool.iter();
                    if let Some(&first) = pool_iter.next() {
                        set_leaf_text(paragraph, first, buffer.clone());
                    }
                    for &rest in pool_iter {
                        set_leaf_text(paragraph, rest, String::new());
                    }
                } else {
                    log::debug!(
                        "leaving oversized tag unmerged ({} chars)",
                        buffer.chars().count()
                    );
                }
                clear = true;
            }
        }

        if clear {
            buffer.clear();
            pool.clear();
            pending = false;
        }
        i += 1;
    }
}

fn leaves_of(paragraph: &Paragraph, runs: &[usize]) -> Vec<LeafRef> {
    let mut out = Vec::new();
    for &ri in runs {
        if let ParagraphChild::Run(run) = &paragraph.children[ri] {
            for (ci, child) in run.children.iter().enumerate() {
                if matches!(child, RunChild::Text(_)) {
                    out.push((ri, ci));
                }
            }
        }
    }
    out
}

fn leaf_text(paragraph: &Paragraph, (ri, ci): LeafRef) -> &str {
    if let ParagraphChild::Run(run) = &paragraph.children[ri] {
        if let Some(RunChild::Text(t)) = run.children.get(ci) {
            return t;
        }
    }
    ""
}

fn set_leaf_text(paragraph: &mut Paragraph, (ri, ci): LeafRef, text: String) {
    if let ParagraphChild::Run(run) = &mut paragraph.children[ri] {
        if let Some(RunChild::Text(t)) = run.children.get_mut(ci) {
            *t = text;
        }
    }
}

/// Split one leaf at a byte position into two siblings in the same run.
fn split_leaf(paragraph: &mut Paragraph, (ri, ci): LeafRef, pos: usize) {
    if let ParagraphChild::Run(run) = &mut paragraph.children[ri] {
        if let Some(RunChild::Text(t)) = run.children.get_mut(ci) {
            let suffix = t.split_off(pos);
            let prefix = std::mem::replace(t, suffix);
            run.children.insert(ci, RunChild::Text(prefix));
        }
    }
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
