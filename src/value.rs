//! Dynamically typed MessagePack value.
//!
//! Every wire type is represented as a Rust enum variant.  Value owns
//! its data — Str and Bin payloads are `Vec<u8>`, containers hold owned
//! children.  The packer borrows via `&Value`.
//!
//! Str is an opaque byte sequence.  The wire format says str payloads
//! are UTF-8 by convention, but the codec preserves the bytes verbatim
//! either way; UTF-8 validation happens only at the JSON boundary.
//!
//! Map entries are stored as `Vec<(Value, Value)>` rather than a
//! HashMap to preserve insertion order and duplicate keys — both are
//! significant on the wire and for equality.

use std::fmt;

/// Shared referent for accessors that return "no element here".
static NIL: Value = Value::Nil;

/// Discriminant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Nil,
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Bin,
    Array,
    Map,
}

/// A self-describing MessagePack value.
///
/// Int and UInt are distinct variants: a signed-family payload decodes
/// to Int, an unsigned-family payload (including positive fixint) to
/// UInt, and the two are never equal even when they hold the same
/// number.  Float is always binary64; a binary32 on the wire is widened
/// on decode.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Vec<u8>),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

// ── Factories ────────────────────────────────────────────────

impl Value {
    pub fn nil() -> Self {
        Value::Nil
    }

    pub fn from_bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn from_int(v: i64) -> Self {
        Value::Int(v)
    }

    pub fn from_uint(v: u64) -> Self {
        Value::UInt(v)
    }

    pub fn from_float(v: f64) -> Self {
        Value::Float(v)
    }

    /// Widens to binary64; the widening is exact.
    pub fn from_float32(v: f32) -> Self {
        Value::Float(v as f64)
    }

    pub fn from_string(s: impl Into<Vec<u8>>) -> Self {
        Value::Str(s.into())
    }

    pub fn from_bin(b: impl Into<Vec<u8>>) -> Self {
        Value::Bin(b.into())
    }

    pub fn from_array(items: impl Into<Vec<Value>>) -> Self {
        Value::Array(items.into())
    }

    pub fn from_map(entries: impl Into<Vec<(Value, Value)>>) -> Self {
        Value::Map(entries.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into_bytes())
    }
}

// ── Tag queries ──────────────────────────────────────────────

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Nil => Tag::Nil,
            Value::Bool(_) => Tag::Bool,
            Value::Int(_) => Tag::Int,
            Value::UInt(_) => Tag::UInt,
            Value::Float(_) => Tag::Float,
            Value::Str(_) => Tag::Str,
            Value::Bin(_) => Tag::Bin,
            Value::Array(_) => Tag::Array,
            Value::Map(_) => Tag::Map,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_uint(&self) -> bool {
        matches!(self, Value::UInt(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_bin(&self) -> bool {
        matches!(self, Value::Bin(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Int or UInt.
    pub fn is_integer(&self) -> bool {
        self.is_int() || self.is_uint()
    }

    /// Int, UInt, or Float.
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }
}

// ── Accessors ────────────────────────────────────────────────
// Accessors never fail: a mismatched tag yields the zero/empty value of
// the return shape.  Numeric accessors coerce between the integer
// variants as documented on each method.

impl Value {
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => false,
        }
    }

    /// UInt payloads are reinterpreted as two's complement: a payload
    /// of 2^63 or more wraps negative.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(v) => *v,
            Value::UInt(v) => *v as i64,
            _ => 0,
        }
    }

    /// Negative Int payloads clamp to 0.
    pub fn as_uint(&self) -> u64 {
        match self {
            Value::UInt(v) => *v,
            Value::Int(v) if *v >= 0 => *v as u64,
            _ => 0,
        }
    }

    /// Int and UInt widen to binary64.
    pub fn as_float(&self) -> f64 {
        match self {
            Value::Float(v) => *v,
            Value::Int(v) => *v as f64,
            Value::UInt(v) => *v as f64,
            _ => 0.0,
        }
    }

    pub fn as_str(&self) -> &[u8] {
        match self {
            Value::Str(b) => b,
            _ => &[],
        }
    }

    pub fn as_bin(&self) -> &[u8] {
        match self {
            Value::Bin(b) => b,
            _ => &[],
        }
    }

    pub fn as_array(&self) -> &[Value] {
        match self {
            Value::Array(items) => items,
            _ => &[],
        }
    }

    pub fn as_map(&self) -> &[(Value, Value)] {
        match self {
            Value::Map(entries) => entries,
            _ => &[],
        }
    }

    /// Element count for Array/Map, byte count for Str/Bin, 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Value::Str(b) | Value::Bin(b) => b.len(),
            Value::Array(items) => items.len(),
            Value::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The i-th array element, or Nil when out of range (or not an array).
    pub fn get(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(index).unwrap_or(&NIL),
            _ => &NIL,
        }
    }

    /// The value of the first map entry whose key is a Str equal to
    /// `key`, or Nil when absent.  Linear scan; the entry list keeps
    /// insertion order and duplicates, so "first" is well-defined.
    pub fn lookup(&self, key: &str) -> &Value {
        match self {
            Value::Map(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, Value::Str(b) if b == key.as_bytes()))
                .map(|(_, v)| v)
                .unwrap_or(&NIL),
            _ => &NIL,
        }
    }
}

// ── Diagnostic form ──────────────────────────────────────────

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(b) => write!(f, "\"{}\"", String::from_utf8_lossy(b)),
            Value::Bin(b) => write!(f, "<binary:{} bytes>", b.len()),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}
