//! The caller-facing data model: scalar values, lists, records and
//! directive instructions bound to template keys.

use std::fmt;

use chrono::NaiveDateTime;

use crate::directives::Directive;

/// A single scalar datum supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Scalar {
    /// Truthiness for unary block conditionals. Only booleans and
    /// boolean-shaped strings are ever true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Text(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    /// Date-times use the fixed `YYYY-MM-DD hh:mm:ss` output form; the
    /// rest render naturally.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(v: NaiveDateTime) -> Self {
        Scalar::DateTime(v)
    }
}

/// One row of data within a record list: a flat field map plus an
/// optional separator used when records are joined inline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
    separator: Option<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            separator: Some(separator.into()),
        }
    }

    /// Builder-style field insertion, preserving insertion order.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }
}

/// A caller-supplied value bound to a template key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// Rendered as repeated inline text separated by hard line breaks.
    ScalarList(Vec<Scalar>),
    /// Drives table-row expansion, or inline joining outside tables.
    RecordList(Vec<Record>),
    Directive(Directive),
    /// Must be homogeneous in directive kind.
    DirectiveList(Vec<Directive>),
}

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(v: Vec<Scalar>) -> Self {
        Value::ScalarList(v)
    }
}

impl From<Vec<Record>> for Value {
    fn from(v: Vec<Record>) -> Self {
        Value::RecordList(v)
    }
}

impl From<Directive> for Value {
    fn from(v: Directive) -> Self {
        Value::Directive(v)
    }
}

impl From<Vec<Directive>> for Value {
    fn from(v: Vec<Directive>) -> Self {
        Value::DirectiveList(v)
    }
}

/// The data context: an insertion-ordered key → value map.
///
/// Substitution visits keys in the order the caller inserted them, so
/// the order is part of the map's contract.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    entries: Vec<(String, Value)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The scalar bound to a key, if the key holds one.
    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        match self.get(key) {
            Some(Value::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TagMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TagMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn date_time_renders_in_fixed_format() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        assert_eq!(Scalar::from(dt).to_string(), "2024-03-09 07:05:03");
    }

    #[test]
    fn truthiness_covers_booleans_and_boolean_strings() {
        assert!(Scalar::Bool(true).is_truthy());
        assert!(Scalar::from("True").is_truthy());
        assert!(!Scalar::from("yes").is_truthy());
        assert!(!Scalar::Int(1).is_truthy());
    }

    #[test]
    fn tag_map_preserves_insertion_order() {
        let mut tags = TagMap::new();
        tags.insert("zeta", "1");
        tags.insert("alpha", "2");
        tags.insert("zeta", "3");
        let keys: Vec<&str> = tags.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(tags.scalar("zeta"), Some(&Scalar::from("3")));
    }

    #[test]
    fn record_fields_keep_order_and_replace_in_place() {
        let rec = Record::with_separator(", ")
            .field("name", "a")
            .field("qty", 2i64)
            .field("name", "b");
        let names: Vec<&str> = rec.fields().map(|(k, _)| k).collect();
        assert_eq!(names, ["name", "qty"]);
        assert_eq!(rec.get("name"), Some(&Scalar::from("b")));
        assert_eq!(rec.separator(), Some(", "));
    }
}
