//! Placeholder substitution over every leaf of a scope.
//!
//! Each context key is dispatched per value variant: scalars rewrite
//! the leaf in place, lists clone the leaf per element, record lists
//! render one joined leaf, directives hand the run to their executor.
//! Generated nodes are appended to the owning run and never re-scanned.

use std::sync::LazyLock;

use regex::Regex;

use wordforge_doctree::{BlockNode, Paragraph, ParagraphChild, Run, RunChild, TableRow};
use wordforge_traits::DocumentHost;

use crate::config::RenderConfig;
use crate::directives::Directive;
use crate::error::RenderError;
use crate::inline;
use crate::value::{TagMap, Value};

/// Literal newlines and raw inline markup both act as break hints when
/// a substituted leaf is split.
static BREAK_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:<[a-zA-Z/].*?>|\n)").expect("BUG: invalid BREAK_HINT_RE regex literal")
});

pub fn replace_tags(
    blocks: &mut [BlockNode],
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    for block in blocks {
        match block {
            BlockNode::Paragraph(p) => replace_in_paragraph(p, tags, host, config)?,
            BlockNode::Table(table) => {
                for row in &mut table.rows {
                    replace_in_row(row, tags, host, config)?;
                }
            }
        }
    }
    Ok(())
}

pub fn replace_in_row(
    row: &mut TableRow,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    for cell in &mut row.cells {
        replace_tags(&mut cell.children, tags, host, config)?;
    }
    Ok(())
}

fn replace_in_paragraph(
    paragraph: &mut Paragraph,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    for child in &mut paragraph.children {
        if let ParagraphChild::Run(run) = child {
            replace_in_run(run, tags, host, config)?;
        }
    }
    Ok(())
}

fn replace_in_run(
    run: &mut Run,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    // Snapshot the original leaves; generated children are appended
    // behind them and stay out of this pass.
    let leaf_positions: Vec<usize> = run
        .children
        .iter()
        .enumerate()
        .filter_map(|(i, c)| matches!(c, RunChild::Text(_)).then_some(i))
        .collect();

    let mut removed = 0;
    for original_idx in leaf_positions {
        let idx = original_idx - removed;
        let mut text = match &run.children[idx] {
            RunChild::Text(t) => t.clone(),
            _ => continue,
        };

        let mut leaf_removed = false;
        for (key, value) in tags.iter() {
            let token = format!("{{{{{key}}}}}");
            let matched = text.contains(&token) || matches_record_fields(&text, key, value);
            if !matched {
                continue;
            }

            match value {
                Value::ScalarList(items) => {
                    for (j, item) in items.iter().enumerate() {
                        let rendered =
                            inline::evaluate_inline(&text.replace(&token, &item.to_string()), tags);
                        if j > 0 {
                            run.children.push(RunChild::Break);
                        }
                        run.children.push(RunChild::Text(rendered));
                    }
                    run.children.remove(idx);
                    removed += 1;
                    leaf_removed = true;
                    break;
                }
                Value::RecordList(records) => {
                    let base = text.replace("{{foreach", "").replace("endforeach}}", "");
                    let mut rendered: Vec<(usize, String)> = Vec::new();
                    for (j, record) in records.iter().enumerate() {
                        let mut item = base.clone();
                        for (field, value) in record.fields() {
                            item = item
                                .replace(&format!("{{{{{key}.{field}}}}}"), &value.to_string());
                        }
                        let item = inline::evaluate_inline(&item, tags);
                        if !item.is_empty() {
                            rendered.push((j, item));
                        }
                    }

                    // Join survivors with each record's own separator;
                    // the last survivor gets none.
                    let mut joined = String::new();
                    for (pos, (j, item)) in rendered.iter().enumerate() {
                        joined.push_str(item);
                        if pos + 1 != rendered.len() {
                            if let Some(separator) = records[*j].separator() {
                                joined.push_str(separator);
                            }
                        }
                    }
                    run.children.push(RunChild::Text(joined));
                    run.children.remove(idx);
                    removed += 1;
                    leaf_removed = true;
                    break;
                }
                Value::Directive(directive) => {
                    directive.render(run, host)?;
                    run.children.remove(idx);
                    removed += 1;
                    leaf_removed = true;
                    break;
                }
                Value::DirectiveList(list) => {
                    if let Some(first) = list.first() {
                        if list.iter().any(|d| d.kind() != first.kind()) {
                            return Err(RenderError::MixedDirectiveList(key.to_string()));
                        }
                        Directive::render_batch(list, run, host)?;
                    }
                    run.children.remove(idx);
                    removed += 1;
                    leaf_removed = true;
                    break;
                }
                Value::Scalar(scalar) => {
                    text = text.replace(&token, &scalar.to_string());
                }
            }
        }
        if leaf_removed {
            continue;
        }

        let text = inline::evaluate_inline(&text, tags);
        let parts: Vec<&str> = BREAK_HINT_RE.split(&text).collect();
        if parts.len() > 1 {
            for (j, part) in parts.iter().enumerate() {
                if j > 0 {
                    run.children.push(RunChild::Break);
                }
                run.children.push(RunChild::Text((*part).to_string()));
            }
            run.children.remove(idx);
            removed += 1;
        } else {
            if text.contains("{{") {
                leftover(config, &text);
            }
            if let Some(RunChild::Text(slot)) = run.children.get_mut(idx) {
                *slot = text;
            }
        }
    }
    Ok(())
}

fn matches_record_fields(text: &str, key: &str, value: &Value) -> bool {
    let Value::RecordList(records) = value else {
        return false;
    };
    records.iter().any(|record| {
        record
            .fields()
            .any(|(field, _)| text.contains(&format!("{{{{{key}.{field}}}}}")))
    })
}

fn leftover(config: &RenderConfig, text: &str) {
    if config.strict {
        log::warn!("leaf still contains unresolved tokens: {:?}", text);
    } else {
        log::trace!("leaf still contains unresolved tokens: {:?}", text);
    }
}
