//! Document model: the untyped value tree being mapped.
//!
//! The document is a single ordered container kind whose keys are either
//! integers or strings, covering both sequences and mappings. Sequences are
//! stored with keys `0..n`; mappings keep their decode order. Iteration order
//! is document order, which the map-key validation rules depend on.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A container key: documents distinguish integer keys from string keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Int(i64),
    Str(String),
}

// A string key must hash exactly like the bare `str` it holds so that
// `Equivalent`-based lookups by property name land in the same bucket.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Int(i) => i.hash(state),
            Key::Str(s) => s.hash(state),
        }
    }
}

/// The top-level container shape every document (and every nested container)
/// has: an insertion-ordered `Key → Value` map.
pub type Document = IndexMap<Key, Value>;

/// An untyped document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Document),
}

/// The physical kind of a document value, independent of any schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
}

impl ValueKind {
    /// The kind name as it appears in declared type signatures and errors.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Classify a value into its physical kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_array(&self) -> Option<&Document> {
        match self {
            Value::Array(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Document> {
        match self {
            Value::Array(entries) => Some(entries),
            _ => None,
        }
    }
}

impl Key {
    pub fn kind(&self) -> ValueKind {
        match self {
            Key::Int(_) => ValueKind::Int,
            Key::Str(_) => ValueKind::String,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

// Lets schema property names (plain `&str`) look up document entries without
// allocating a Key per lookup. Never matches an integer key.
impl indexmap::Equivalent<Key> for str {
    fn equivalent(&self, key: &Key) -> bool {
        matches!(key, Key::Str(s) if s == self)
    }
}

// ------------------------- JSON interop ---------------------------------- //

/// True if `s` is the canonical decimal form of an integer: "0", "7", "-42";
/// no sign-only, no leading zeros, no "-0".
fn is_canonical_int(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return false;
    }
    s != "-0"
}

/// An object key in canonical integer form becomes an integer key, mirroring
/// the decode semantics this engine inherits from its source documents.
fn object_key(s: String) -> Key {
    if is_canonical_int(&s) {
        if let Ok(i) = s.parse::<i64>() {
            return Key::Int(i);
        }
    }
    Key::Str(s)
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64::MAX and proper floats both land here
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Key::Int(i as i64), Value::from(v)))
                    .collect(),
            ),
            serde_json::Value::Object(entries) => Value::Array(
                entries
                    .into_iter()
                    .map(|(k, v)| (object_key(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// ------------------------- Serialization --------------------------------- //

/// A container whose keys are exactly `0..n` serializes as a sequence; any
/// other key set serializes as a map with stringified keys. An empty
/// container counts as a sequence.
fn is_list(entries: &Document) -> bool {
    entries
        .keys()
        .enumerate()
        .all(|(i, key)| matches!(key, Key::Int(n) if *n == i as i64))
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(entries) => {
                if is_list(entries) {
                    let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                    for value in entries.values() {
                        seq.serialize_element(value)?;
                    }
                    seq.end()
                } else {
                    let mut map = serializer.serialize_map(Some(entries.len()))?;
                    for (key, value) in entries {
                        map.serialize_entry(&key.to_string(), value)?;
                    }
                    map.end()
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => Err(fmt::Error),
        }
    }
}

// ------------------------- Tests ----------------------------------------- //
