//! Error codes and error type for the codec and its JSON boundary.
//!
//! Packing never fails; every error here comes from decoding bytes or
//! from crossing the JSON boundary.  The `code` field is a stable
//! machine-comparable constant; `message` is human-readable context.

use std::fmt;

// ── Decode error codes ───────────────────────────────────────
// Names are stable for cross-language grep-ability and test assertions.

/// The cursor or a declared length would read past the end of the buffer.
pub const ERR_TRUNCATED: &str = "ERR_TRUNCATED";
/// The reserved format byte 0xc1 appeared where a marker was expected.
pub const ERR_RESERVED: &str = "ERR_RESERVED";
/// Defensive catch-all; unreachable while the dispatch table is complete.
pub const ERR_UNKNOWN: &str = "ERR_UNKNOWN";
/// Container nesting exceeded MAX_DEPTH.
pub const ERR_DEPTH: &str = "ERR_DEPTH";
/// Strict single-value decode found bytes after the first value.
pub const ERR_TRAILING: &str = "ERR_TRAILING";

// ── JSON boundary error codes ────────────────────────────────

/// The input was not parseable JSON text.
pub const ERR_JSON: &str = "ERR_JSON";
/// A Str payload was not valid UTF-8 where text was required.
pub const ERR_UTF8: &str = "ERR_UTF8";
/// A map key was not a Str, so it has no JSON object representation.
pub const ERR_KEY: &str = "ERR_KEY";
/// A map carried the same key twice; JSON objects cannot express that.
pub const ERR_DUP_KEY: &str = "ERR_DUP_KEY";
/// A non-finite float (NaN or infinity) has no JSON number form.
pub const ERR_NUMBER: &str = "ERR_NUMBER";

/// Codec processing error.
///
/// The `code` field is one of the `ERR_*` constants and is what tests
/// compare against.  The `message` field is human-readable context.
#[derive(Debug, Clone)]
pub struct MpackError {
    pub code: &'static str,
    pub message: String,
}

impl MpackError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for MpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MpackError {}
