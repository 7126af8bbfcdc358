//! Table-row expansion driven by record-list data.
//!
//! A row whose text references `{{listKey.field}}` tokens is a loop
//! template: it is cloned once per record, each clone is resolved
//! against a sub-context holding only that record's fields, and the
//! clones replace the template row in place. Rows of nested tables have
//! no sibling anchor in the table under iteration, so their clones are
//! appended to it instead.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use wordforge_doctree::{table_at_mut, table_paths_within, BlockNode, Table, TableRow};
use wordforge_traits::DocumentHost;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::value::{Record, TagMap, Value};
use crate::{statements, substitute};

static LIST_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(.+?\..+?)\}\}").expect("BUG: invalid LIST_TOKEN_RE regex literal")
});

/// Directive wrapper text stripped before key discovery; it never
/// contributes list namespaces of its own.
const WRAPPERS: [&str; 6] = [
    "{{foreach",
    "endforeach}}",
    "{{if(",
    "}}else{{",
    ")if",
    "endif}}",
];

pub fn expand_table_rows(
    blocks: &mut Vec<BlockNode>,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    for block in blocks.iter_mut() {
        if let BlockNode::Table(table) = block {
            expand_table(table, tags, host, config)?;
        }
    }
    Ok(())
}

fn expand_table(
    table: &mut Table,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    expand_nested_rows(table, tags, host, config)?;
    expand_direct_rows(table, tags, host, config)
}

/// Template rows of tables nested below this one. Their clones are
/// appended to this table's row list, the originals removed in place.
fn expand_nested_rows(
    table: &mut Table,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    for inner_path in table_paths_within(table) {
        let mut i = 0;
        loop {
            let action = {
                let Some(inner) = table_at_mut(table, &inner_path) else {
                    break;
                };
                if i >= inner.rows.len() {
                    break;
                }
                match loop_key(&inner.rows[i], tags)? {
                    Some(key) => {
                        let template = inner.rows.remove(i);
                        Some((key, template))
                    }
                    None => None,
                }
            };
            match action {
                Some((key, template)) => {
                    let clones = expand_row(&template, &key, tags, host, config)?;
                    table.rows.extend(clones);
                }
                None => i += 1,
            }
        }
    }
    Ok(())
}

fn expand_direct_rows(
    table: &mut Table,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let mut i = 0;
    while i < table.rows.len() {
        match loop_key(&table.rows[i], tags)? {
            Some(key) => {
                let template = table.rows[i].clone();
                let clones = expand_row(&template, &key, tags, host, config)?;
                let inserted = clones.len();
                // Clones take the template row's position; they are not
                // re-scanned.
                table.rows.splice(i..=i, clones);
                i += inserted;
            }
            None => i += 1,
        }
    }
    Ok(())
}

/// The record-list key a row loops over, if any.
///
/// Key discovery strips directive wrapper text, collects distinct
/// dotted tokens and takes everything before the last dot as the list
/// namespace. More than two namespaces in one row is a configuration
/// error; only the first one drives the expansion.
fn loop_key(row: &TableRow, tags: &TagMap) -> Result<Option<String>, RenderError> {
    let mut text = row.inner_text();
    for wrapper in WRAPPERS {
        text = text.replace(wrapper, "");
    }

    let namespaces: Vec<&str> = LIST_TOKEN_RE
        .captures_iter(&text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unique()
        .filter_map(|token| token.rfind('.').map(|dot| &token[..dot]))
        .unique()
        .collect();

    if namespaces.len() > 2 {
        return Err(RenderError::TooManyListKeys(namespaces.len()));
    }

    match namespaces.first() {
        Some(&key) if matches!(tags.get(key), Some(Value::RecordList(_))) => {
            Ok(Some(key.to_string()))
        }
        Some(&key) => {
            log::trace!("row references '{}' which is not a record list", key);
            Ok(None)
        }
        None => Ok(None),
    }
}

fn expand_row(
    template: &TableRow,
    key: &str,
    tags: &TagMap,
    host: &mut dyn DocumentHost,
    config: &RenderConfig,
) -> Result<Vec<TableRow>, RenderError> {
    let Some(Value::RecordList(records)) = tags.get(key) else {
        return Ok(Vec::new());
    };

    let mut clones = Vec::with_capacity(records.len());
    for record in records {
        let sub = sub_context(key, record);
        let mut row = template.clone();
        statements::resolve_in_row(&mut row, &sub, config);
        substitute::replace_in_row(&mut row, &sub, host, config)?;
        clones.push(row);
    }
    log::debug!("expanded {} rows for list '{}'", clones.len(), key);
    Ok(clones)
}

/// The per-clone context: `key.field` entries for one record only.
fn sub_context(key: &str, record: &Record) -> TagMap {
    let mut sub = TagMap::new();
    for (field, value) in record.fields() {
        sub.insert(format!("{key}.{field}"), Value::Scalar(value.clone()));
    }
    sub
}
