//! Inline conditional evaluation over already-substituted leaf text.
//!
//! Grammar: `{{if(lhs,op,rhs)if body }}else{{ alt endif}}`, the else
//! branch optional. Constructs are resolved rightmost-first, so a
//! nested inner conditional is decided before its enclosing one.

use crate::compare;
use crate::value::TagMap;

const IF_START: &str = "{{if(";
const IF_END: &str = ")if";
const ELSE: &str = "}}else{{";
const ENDIF: &str = "endif}}";

/// Resolve every inline conditional in `text`. Malformed constructs
/// (missing `)if`, missing `endif}}`) are left in place.
pub fn evaluate_inline(text: &str, tags: &TagMap) -> String {
    let mut text = text.to_string();

    while let Some(if_idx) = text.rfind(IF_START) {
        let Some(cond_end) = find_from(&text, IF_END, if_idx) else {
            break;
        };
        let condition = &text[if_idx + IF_START.len()..cond_end];
        let fields: Vec<&str> = condition.split(',').collect();
        if fields.len() != 3 {
            break;
        }

        // The left side resolves through the context when the key
        // exists; otherwise the raw text stands for itself.
        let lhs = tags
            .scalar(fields[0])
            .map(|s| s.to_string())
            .unwrap_or_else(|| fields[0].to_string());
        let verdict = compare::evaluate(&lhs, fields[1], fields[2]);

        if verdict {
            text.replace_range(if_idx..cond_end + IF_END.len(), "");
            let else_idx = find_from(&text, ELSE, if_idx);
            let endif_idx = find_from(&text, ENDIF, if_idx);
            match (else_idx, endif_idx) {
                (Some(e), Some(n)) if e < n => {
                    text.replace_range(e..n + ENDIF.len(), "");
                }
                (_, Some(n)) => {
                    text.replace_range(n..n + ENDIF.len(), "");
                }
                _ => break,
            }
        } else {
            let else_idx = find_from(&text, ELSE, cond_end);
            let endif_idx = find_from(&text, ENDIF, cond_end);
            match (else_idx, endif_idx) {
                (Some(e), Some(n)) if e < n => {
                    let removed = e - if_idx + ELSE.len();
                    text.replace_range(if_idx..e + ELSE.len(), "");
                    let n = n - removed;
                    text.replace_range(n..n + ENDIF.len(), "");
                }
                (_, Some(n)) => {
                    text.replace_range(if_idx..n + ENDIF.len(), "");
                }
                _ => break,
            }
        }
    }

    text
}

fn find_from(text: &str, needle: &str, start: usize) -> Option<usize> {
    text.get(start..)
        .and_then(|tail| tail.find(needle))
        .map(|pos| pos + start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TagMap;

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn keeps_if_body_when_condition_holds() {
        let t = tags(&[("a", "1")]);
        assert_eq!(
            evaluate_inline("{{if(a,==,1)if yes}}else{{no endif}}", &t),
            " yes"
        );
    }

    #[test]
    fn keeps_else_body_when_condition_fails() {
        let t = tags(&[("a", "2")]);
        assert_eq!(
            evaluate_inline("{{if(a,==,1)if yes}}else{{no endif}}", &t),
            "no "
        );
    }

    #[test]
    fn missing_key_compares_as_raw_text() {
        let t = TagMap::new();
        assert_eq!(
            evaluate_inline("{{if(a,==,1)if yes}}else{{no endif}}", &t),
            "no "
        );
        assert_eq!(evaluate_inline("{{if(a,==,a)if same endif}}", &t), " same ");
    }

    #[test]
    fn drops_whole_construct_without_else_on_false() {
        let t = tags(&[("a", "2")]);
        assert_eq!(
            evaluate_inline("before {{if(a,==,1)if yes endif}}after", &t),
            "before after"
        );
    }

    #[test]
    fn inner_conditional_resolves_before_outer() {
        let t = tags(&[("a", "1"), ("b", "2")]);
        let text = "{{if(a,==,1)if A{{if(b,==,2)if B endif}} endif}}";
        assert_eq!(evaluate_inline(text, &t), " A B  ");
    }

    #[test]
    fn surrounding_text_survives() {
        let t = tags(&[("n", "5")]);
        assert_eq!(
            evaluate_inline("x {{if(n,>,3)if big}}else{{small endif}} y", &t),
            "x  big y"
        );
    }

    #[test]
    fn malformed_construct_is_left_verbatim() {
        let t = TagMap::new();
        assert_eq!(
            evaluate_inline("{{if(a,==,1)if dangling", &t),
            "{{if(a,==,1)if dangling"
        );
    }
}
