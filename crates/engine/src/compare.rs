//! Comparison semantics shared by the block-level and inline
//! conditional resolvers.
//!
//! The left side picks the operand type by trial parsing: number, then
//! date, then boolean, then text. The right side must parse under that
//! same type or the comparison is false. Text supports only the
//! equality operators, and boolean equality is the XOR of both sides.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

enum Operand {
    Number(f64),
    Date(NaiveDateTime),
    Bool(bool),
    Text,
}

fn classify(raw: &str) -> Operand {
    if let Ok(n) = raw.parse::<f64>() {
        return Operand::Number(n);
    }
    if let Some(dt) = parse_date_time(raw) {
        return Operand::Date(dt);
    }
    if let Some(b) = parse_bool(raw) {
        return Operand::Bool(b);
    }
    Operand::Text
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Accepted date-time spellings, tried in order. A bare date reads as
/// midnight.
pub(crate) fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Evaluate `lhs op rhs`. Unknown operators and right sides that do not
/// parse under the left side's type yield false.
pub fn evaluate(lhs: &str, op: &str, rhs: &str) -> bool {
    match classify(lhs) {
        Operand::Number(l) => match rhs.parse::<f64>() {
            Ok(r) => match op {
                "==" | "=" => l == r,
                "!=" | "<>" => l != r,
                ">" => l > r,
                "<" => l < r,
                ">=" => l >= r,
                "<=" => l <= r,
                _ => false,
            },
            Err(_) => false,
        },
        Operand::Date(l) => match parse_date_time(rhs) {
            Some(r) => match op {
                "==" | "=" => l == r,
                "!=" | "<>" => l != r,
                ">" => l > r,
                "<" => l < r,
                ">=" => l >= r,
                "<=" => l <= r,
                _ => false,
            },
            None => false,
        },
        Operand::Bool(l) => match parse_bool(rhs) {
            // Boolean equality is the XOR of the two sides.
            Some(r) => match op {
                "==" | "=" => l != r,
                "!=" | "<>" => l == r,
                _ => false,
            },
            None => false,
        },
        Operand::Text => match op {
            "==" | "=" => lhs == rhs,
            "!=" | "<>" => lhs != rhs,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_comparisons() {
        assert!(evaluate("1", "==", "1"));
        assert!(evaluate("1", "=", "1.0"));
        assert!(evaluate("2", ">", "1"));
        assert!(evaluate("2", ">=", "2"));
        assert!(evaluate("1", "<>", "2"));
        assert!(!evaluate("1", "==", "2"));
    }

    #[test]
    fn numeric_left_with_unparsable_right_is_false() {
        assert!(!evaluate("1", "==", "one"));
        assert!(!evaluate("1", "!=", "one"));
    }

    #[test]
    fn date_comparisons() {
        assert!(evaluate("2024-01-02", ">", "2024-01-01"));
        assert!(evaluate("2024-01-01 10:00:00", "==", "2024-01-01T10:00:00"));
        assert!(!evaluate("2024-01-01", ">", "not a date"));
    }

    #[test]
    fn boolean_equality_is_xor() {
        assert!(!evaluate("true", "==", "true"));
        assert!(evaluate("true", "==", "false"));
        assert!(evaluate("true", "!=", "true"));
        assert!(!evaluate("TRUE", "!=", "false"));
    }

    #[test]
    fn text_supports_only_equality() {
        assert!(evaluate("abc", "==", "abc"));
        assert!(evaluate("abc", "<>", "abd"));
        assert!(!evaluate("abc", "<", "abd"));
        assert!(!evaluate("NULL", "==", "1"));
    }
}
