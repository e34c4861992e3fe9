//! Unpacker — decodes MessagePack bytes back into [`Value`] trees.
//!
//! The unpacker owns an immutable input buffer and a monotonically
//! advancing cursor.  Each `unpack` call consumes exactly one value, so
//! repeated calls walk a buffer of concatenated values in wire order.
//!
//! Every declared length is checked against the remaining buffer before
//! any allocation — a `0xdb ff ff ff ff` header on a five-byte input
//! fails as truncated instead of provoking a 4 GiB allocation.
//!
//! Extension values (ext/fixext) are recognized only to be skipped: the
//! payload is stepped over and the decoded value is Nil, which keeps
//! the cursor correct for streaming.

use crate::constants::*;
use crate::errors::*;
use crate::value::Value;

/// Streaming decoder over an owned byte buffer.
#[derive(Debug)]
pub struct Unpacker {
    buf: Vec<u8>,
    pos: usize,
}

impl Unpacker {
    /// Take ownership of `buf` and position the cursor at 0.
    pub fn new(buf: impl Into<Vec<u8>>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Replace the buffer and rewind the cursor to 0.
    pub fn reset(&mut self, buf: impl Into<Vec<u8>>) {
        self.buf = buf.into();
        self.pos = 0;
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True once the cursor has consumed the whole buffer.
    pub fn is_complete(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Decode exactly one value and advance the cursor past it.
    ///
    /// On failure the cursor position is unspecified; callers that want
    /// to continue must `reset`.
    pub fn unpack(&mut self) -> Result<Value, MpackError> {
        self.unpack_value(0)
    }

    // ── Dispatch ─────────────────────────────────────────────

    /// Decode one value at the given container depth.  Containers
    /// recurse with depth + 1; `MAX_DEPTH` bounds the descent.
    fn unpack_value(&mut self, depth: u32) -> Result<Value, MpackError> {
        let marker = self.read_u8()?;
        match marker {
            // positive fixint: the byte is the payload
            0x00..=0x7f => Ok(Value::UInt(marker as u64)),
            0x80..=0x8f => self.unpack_map((marker & 0x0f) as usize, depth),
            0x90..=0x9f => self.unpack_array((marker & 0x0f) as usize, depth),
            0xa0..=0xbf => {
                let len = (marker & 0x1f) as usize;
                Ok(Value::Str(self.take_bytes(len)?))
            }

            NIL => Ok(Value::Nil),
            RESERVED => Err(MpackError::new(ERR_RESERVED, "reserved marker 0xc1")),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),

            BIN8 => {
                let len = self.read_u8()? as usize;
                Ok(Value::Bin(self.take_bytes(len)?))
            }
            BIN16 => {
                let len = self.read_u16be()? as usize;
                Ok(Value::Bin(self.take_bytes(len)?))
            }
            BIN32 => {
                let len = self.read_u32be()? as usize;
                Ok(Value::Bin(self.take_bytes(len)?))
            }

            EXT8 => {
                let len = self.read_u8()? as usize;
                self.skip_ext(len)
            }
            EXT16 => {
                let len = self.read_u16be()? as usize;
                self.skip_ext(len)
            }
            EXT32 => {
                let len = self.read_u32be()? as usize;
                self.skip_ext(len)
            }

            FLOAT32 => {
                // binary32 on the wire widens to binary64 in the model
                let bits = self.read_u32be()?;
                Ok(Value::Float(f32::from_bits(bits) as f64))
            }
            FLOAT64 => {
                let bits = self.read_u64be()?;
                Ok(Value::Float(f64::from_bits(bits)))
            }

            UINT8 => Ok(Value::UInt(self.read_u8()? as u64)),
            UINT16 => Ok(Value::UInt(self.read_u16be()? as u64)),
            UINT32 => Ok(Value::UInt(self.read_u32be()? as u64)),
            UINT64 => Ok(Value::UInt(self.read_u64be()?)),

            INT8 => Ok(Value::Int(self.read_u8()? as i8 as i64)),
            INT16 => Ok(Value::Int(self.read_u16be()? as i16 as i64)),
            INT32 => Ok(Value::Int(self.read_u32be()? as i32 as i64)),
            INT64 => Ok(Value::Int(self.read_u64be()? as i64)),

            FIXEXT1 => self.skip_ext(1),
            FIXEXT2 => self.skip_ext(2),
            FIXEXT4 => self.skip_ext(4),
            FIXEXT8 => self.skip_ext(8),
            FIXEXT16 => self.skip_ext(16),

            STR8 => {
                let len = self.read_u8()? as usize;
                Ok(Value::Str(self.take_bytes(len)?))
            }
            STR16 => {
                let len = self.read_u16be()? as usize;
                Ok(Value::Str(self.take_bytes(len)?))
            }
            STR32 => {
                let len = self.read_u32be()? as usize;
                Ok(Value::Str(self.take_bytes(len)?))
            }

            ARRAY16 => {
                let count = self.read_u16be()? as usize;
                self.unpack_array(count, depth)
            }
            ARRAY32 => {
                let count = self.read_u32be()? as usize;
                self.unpack_array(count, depth)
            }

            MAP16 => {
                let count = self.read_u16be()? as usize;
                self.unpack_map(count, depth)
            }
            MAP32 => {
                let count = self.read_u32be()? as usize;
                self.unpack_map(count, depth)
            }

            // negative fixint: sign-extend the marker byte itself
            m if m >= NEG_FIXINT => Ok(Value::Int(m as i8 as i64)),

            // Unreachable while the arms above cover 0x00–0xff.
            _ => Err(MpackError::new(
                ERR_UNKNOWN,
                format!("unknown marker 0x{:02x}", marker),
            )),
        }
    }

    // ── Containers ───────────────────────────────────────────

    fn unpack_array(&mut self, count: usize, depth: u32) -> Result<Value, MpackError> {
        if depth + 1 > MAX_DEPTH {
            return Err(MpackError::new(ERR_DEPTH, "nesting exceeds MAX_DEPTH"));
        }
        // Each element takes at least one byte, so a count beyond the
        // remaining bytes can never decode.  Checking here bounds the
        // allocation below.
        if count > self.remaining() {
            return Err(MpackError::new(
                ERR_TRUNCATED,
                format!("array count {} exceeds remaining input", count),
            ));
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.unpack_value(depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn unpack_map(&mut self, count: usize, depth: u32) -> Result<Value, MpackError> {
        if depth + 1 > MAX_DEPTH {
            return Err(MpackError::new(ERR_DEPTH, "nesting exceeds MAX_DEPTH"));
        }
        // Two values per entry, at least one byte each.
        if count > self.remaining() / 2 {
            return Err(MpackError::new(
                ERR_TRUNCATED,
                format!("map count {} exceeds remaining input", count),
            ));
        }
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.unpack_value(depth + 1)?;
            let val = self.unpack_value(depth + 1)?;
            entries.push((key, val));
        }
        Ok(Value::Map(entries))
    }

    /// Step over an extension payload: one type byte plus `len` data
    /// bytes.  The decoded value is Nil.
    fn skip_ext(&mut self, len: usize) -> Result<Value, MpackError> {
        if self.remaining() < 1 + len {
            return Err(MpackError::new(ERR_TRUNCATED, "truncated ext payload"));
        }
        self.pos += 1 + len;
        Ok(Value::Nil)
    }

    // ── Cursor primitives ────────────────────────────────────

    fn read_u8(&mut self) -> Result<u8, MpackError> {
        if self.pos >= self.buf.len() {
            return Err(MpackError::new(ERR_TRUNCATED, "unexpected end of input"));
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn read_u16be(&mut self) -> Result<u16, MpackError> {
        if self.remaining() < 2 {
            return Err(MpackError::new(ERR_TRUNCATED, "truncated u16 field"));
        }
        let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    fn read_u32be(&mut self) -> Result<u32, MpackError> {
        if self.remaining() < 4 {
            return Err(MpackError::new(ERR_TRUNCATED, "truncated u32 field"));
        }
        let v = u32::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    fn read_u64be(&mut self) -> Result<u64, MpackError> {
        if self.remaining() < 8 {
            return Err(MpackError::new(ERR_TRUNCATED, "truncated u64 field"));
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
        self.pos += 8;
        Ok(u64::from_be_bytes(raw))
    }

    /// Copy out `len` payload bytes, bounds-checked before allocation.
    fn take_bytes(&mut self, len: usize) -> Result<Vec<u8>, MpackError> {
        if self.remaining() < len {
            return Err(MpackError::new(
                ERR_TRUNCATED,
                format!("payload of {} bytes exceeds remaining input", len),
            ));
        }
        let bytes = self.buf[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }
}
