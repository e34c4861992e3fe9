//! Packer — encodes a [`Value`] tree into MessagePack bytes.
//!
//! The packer always selects the shortest legal encoding for a value:
//! integers drop into the fix ranges when they fit, lengths use the
//! narrowest length field that holds them.  Every multi-byte field is
//! big-endian.  Packing never fails.
//!
//! Re-serializing does not preserve the original encoding — a value
//! decoded from a wide form (say `0xcd 0x00 0x05`) packs back to the
//! shortest form (`0x05`).  A non-negative Int packs through the
//! unsigned encoder, so it collapses to UInt on the next decode.

use crate::constants::*;
use crate::value::Value;

/// Reusable packer owning a growing output buffer.
///
/// One instance may pack many values back to back; the encodings are
/// concatenated in call order, which is exactly the streaming input
/// shape the unpacker consumes.
#[derive(Debug, Default)]
pub struct Packer {
    out: Vec<u8>,
}

impl Packer {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    /// Drop all bytes packed so far, keeping the allocation.
    pub fn clear(&mut self) {
        self.out.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }

    /// Append the encoding of one value.
    pub fn pack_value(&mut self, value: &Value) {
        match value {
            Value::Nil => self.pack_nil(),
            Value::Bool(b) => self.pack_bool(*b),
            Value::Int(v) => self.pack_int(*v),
            Value::UInt(v) => self.pack_uint(*v),
            Value::Float(v) => self.pack_float(*v),
            Value::Str(b) => self.pack_str(b),
            Value::Bin(b) => self.pack_bin(b),
            Value::Array(items) => self.pack_array(items),
            Value::Map(entries) => self.pack_map(entries),
        }
    }

    pub fn pack_nil(&mut self) {
        self.out.push(NIL);
    }

    pub fn pack_bool(&mut self, b: bool) {
        self.out.push(if b { TRUE } else { FALSE });
    }

    /// Signed integers: non-negative values forward to the unsigned
    /// encoder (which owns the positive fixint range), negatives pick
    /// the narrowest signed family that holds them.
    pub fn pack_int(&mut self, v: i64) {
        if v >= 0 {
            self.pack_uint(v as u64);
        } else if v >= NEG_FIXINT_MIN {
            // −32..−1: the two's complement byte IS the marker.
            self.out.push(v as u8);
        } else if v >= i8::MIN as i64 {
            self.out.push(INT8);
            self.out.push(v as u8);
        } else if v >= i16::MIN as i64 {
            self.out.push(INT16);
            self.out.extend_from_slice(&(v as i16).to_be_bytes());
        } else if v >= i32::MIN as i64 {
            self.out.push(INT32);
            self.out.extend_from_slice(&(v as i32).to_be_bytes());
        } else {
            self.out.push(INT64);
            self.out.extend_from_slice(&v.to_be_bytes());
        }
    }

    pub fn pack_uint(&mut self, v: u64) {
        if v <= POS_FIXINT_MAX {
            self.out.push(v as u8);
        } else if v <= u8::MAX as u64 {
            self.out.push(UINT8);
            self.out.push(v as u8);
        } else if v <= u16::MAX as u64 {
            self.out.push(UINT16);
            self.out.extend_from_slice(&(v as u16).to_be_bytes());
        } else if v <= u32::MAX as u64 {
            self.out.push(UINT32);
            self.out.extend_from_slice(&(v as u32).to_be_bytes());
        } else {
            self.out.push(UINT64);
            self.out.extend_from_slice(&v.to_be_bytes());
        }
    }

    /// Always binary64; the IEEE bit pattern is written big-endian.
    pub fn pack_float(&mut self, v: f64) {
        self.out.push(FLOAT64);
        self.out.extend_from_slice(&v.to_bits().to_be_bytes());
    }

    pub fn pack_str(&mut self, bytes: &[u8]) {
        let len = bytes.len();
        if len <= FIXSTR_MAX_LEN {
            self.out.push(FIXSTR | len as u8);
        } else if len <= u8::MAX as usize {
            self.out.push(STR8);
            self.out.push(len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(STR16);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(STR32);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
        self.out.extend_from_slice(bytes);
    }

    pub fn pack_bin(&mut self, bytes: &[u8]) {
        let len = bytes.len();
        if len <= u8::MAX as usize {
            self.out.push(BIN8);
            self.out.push(len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(BIN16);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(BIN32);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
        self.out.extend_from_slice(bytes);
    }

    fn pack_array(&mut self, items: &[Value]) {
        let len = items.len();
        if len <= FIXARRAY_MAX_LEN {
            self.out.push(FIXARRAY | len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(ARRAY16);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(ARRAY32);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
        for item in items {
            self.pack_value(item);
        }
    }

    fn pack_map(&mut self, entries: &[(Value, Value)]) {
        let len = entries.len();
        if len <= FIXMAP_MAX_LEN {
            self.out.push(FIXMAP | len as u8);
        } else if len <= u16::MAX as usize {
            self.out.push(MAP16);
            self.out.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            self.out.push(MAP32);
            self.out.extend_from_slice(&(len as u32).to_be_bytes());
        }
        for (key, val) in entries {
            self.pack_value(key);
            self.pack_value(val);
        }
    }
}

/// Encode one value into a fresh byte vector.
pub fn pack(value: &Value) -> Vec<u8> {
    let mut packer = Packer::new();
    packer.pack_value(value);
    packer.into_bytes()
}
