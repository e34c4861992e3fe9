//! MessagePack wire-format constants — marker bytes, fix-family ranges,
//! and safety limits.
//!
//! Every multi-byte field in the format is big-endian.  The single-byte
//! markers below are the first byte of every encoded value; the four
//! "fix" families pack a small payload or length into the marker byte
//! itself.

// ── Fix families ─────────────────────────────────────────────
// positive fixint: 0x00–0x7f encodes 0–127 directly
// fixmap:          0x80–0x8f, entry count in the low 4 bits
// fixarray:        0x90–0x9f, element count in the low 4 bits
// fixstr:          0xa0–0xbf, byte length in the low 5 bits
// negative fixint: 0xe0–0xff encodes −32–−1 as two's complement

pub const POS_FIXINT_MAX: u64 = 0x7f;
pub const NEG_FIXINT_MIN: i64 = -32;

pub const FIXMAP: u8 = 0x80;
pub const FIXARRAY: u8 = 0x90;
pub const FIXSTR: u8 = 0xa0;
pub const NEG_FIXINT: u8 = 0xe0;

pub const FIXMAP_MAX_LEN: usize = 0x0f;
pub const FIXARRAY_MAX_LEN: usize = 0x0f;
pub const FIXSTR_MAX_LEN: usize = 0x1f;

// ── Single-byte markers (0xc0–0xdf) ──────────────────────────

pub const NIL: u8 = 0xc0;
/// Never valid as a format byte; decoding it is an error.
pub const RESERVED: u8 = 0xc1;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;

pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;

pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;

pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;

pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;

pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;

pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

// ── Safety limits ────────────────────────────────────────────
// The format itself has no nesting limit; the unpacker enforces one to
// keep recursion depth bounded on adversarial input.

/// Maximum depth of nested array/map containers the unpacker accepts.
pub const MAX_DEPTH: u32 = 128;
