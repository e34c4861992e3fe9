//! # mpack — self-describing MessagePack value codec
//!
//! Serialize and deserialize dynamically typed values in the
//! MessagePack wire format.  The packer always emits the shortest legal
//! encoding for a value; the unpacker decodes one value per call and
//! streams through buffers of concatenated values.
//!
//! ```
//! use mpack::{pack, unpack, Value};
//!
//! let order = Value::from_map(vec![
//!     (Value::from("name"), Value::from("Alice")),
//!     (Value::from("age"), Value::from_uint(30)),
//! ]);
//! let bytes = pack(&order);
//! let decoded = unpack(&bytes).unwrap();
//! assert_eq!(decoded.lookup("age").as_uint(), 30);
//! ```
//!
//! Round-tripping preserves semantic value, not byte identity: the
//! packer re-chooses the shortest encoding, and a non-negative Int
//! comes back as UInt.  Extension types are skipped on decode (they
//! become Nil) and never emitted.

pub mod constants;
pub mod errors;
pub mod json_adapter;
pub mod pack;
pub mod unpack;
pub mod value;

pub use errors::{
    MpackError, ERR_DEPTH, ERR_DUP_KEY, ERR_JSON, ERR_KEY, ERR_NUMBER, ERR_RESERVED,
    ERR_TRAILING, ERR_TRUNCATED, ERR_UNKNOWN, ERR_UTF8,
};
pub use pack::Packer;
pub use unpack::Unpacker;
pub use value::{Tag, Value};

// ── One-shot packing ─────────────────────────────────────────

/// Encode one value into a fresh byte vector.
pub fn pack(value: &Value) -> Vec<u8> {
    pack::pack(value)
}

pub fn pack_nil() -> Vec<u8> {
    pack(&Value::Nil)
}

pub fn pack_bool(b: bool) -> Vec<u8> {
    pack(&Value::Bool(b))
}

pub fn pack_int(v: i64) -> Vec<u8> {
    pack(&Value::Int(v))
}

pub fn pack_uint(v: u64) -> Vec<u8> {
    pack(&Value::UInt(v))
}

pub fn pack_float(v: f64) -> Vec<u8> {
    pack(&Value::Float(v))
}

pub fn pack_str(s: impl AsRef<[u8]>) -> Vec<u8> {
    pack(&Value::Str(s.as_ref().to_vec()))
}

pub fn pack_bin(b: impl AsRef<[u8]>) -> Vec<u8> {
    pack(&Value::Bin(b.as_ref().to_vec()))
}

// ── One-shot unpacking ───────────────────────────────────────

/// Decode the first value in `bytes`.  Trailing bytes are ignored; use
/// [`unpack_exact`] to reject them or [`unpack_all`] to decode them.
pub fn unpack(bytes: &[u8]) -> Result<Value, MpackError> {
    Unpacker::new(bytes).unpack()
}

/// Decode exactly one value and fail with [`ERR_TRAILING`] if any input
/// remains after it.
pub fn unpack_exact(bytes: &[u8]) -> Result<Value, MpackError> {
    let mut unpacker = Unpacker::new(bytes);
    let value = unpacker.unpack()?;
    if !unpacker.is_complete() {
        return Err(MpackError::new(
            ERR_TRAILING,
            format!("{} trailing bytes after value", unpacker.remaining()),
        ));
    }
    Ok(value)
}

/// Decode concatenated values until the buffer is exhausted.  The first
/// failure aborts the whole call; partial results are discarded.
pub fn unpack_all(bytes: &[u8]) -> Result<Vec<Value>, MpackError> {
    let mut unpacker = Unpacker::new(bytes);
    let mut values = Vec::new();
    while !unpacker.is_complete() {
        values.push(unpacker.unpack()?);
    }
    Ok(values)
}

/// Decode the first value in `bytes`, or Nil on any failure.
pub fn try_unpack(bytes: &[u8]) -> Value {
    unpack(bytes).unwrap_or(Value::Nil)
}
