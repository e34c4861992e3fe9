//! JSON adapter — bridges [`Value`] trees and JSON text.
//!
//! Type mapping, JSON → Value:
//!   null    → Nil
//!   boolean → Bool
//!   integer → Int (signed source) or UInt (unsigned source)
//!   float   → Float
//!   string  → Str
//!   array   → Array
//!   object  → Map with Str keys
//!
//! Value → JSON is the reverse, with two lossy edges: Bin has no JSON
//! type and is emitted as a base64 string, and Float loses the
//! Int/UInt/Float distinction a reader can't recover.  Map keys must be
//! Str (and valid UTF-8) to become object keys; anything else is an
//! error rather than a silent stringification.
//!
//! Parsing goes through a custom deserialization visitor rather than
//! `serde_json::Value`: the stock value type silently deduplicates
//! object keys and (without `preserve_order`) re-sorts them, while the
//! Map model here keeps both duplicates and insertion order.  The
//! visitor hands every key/value pair straight to `Value::Map`.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

use base64::Engine;

use crate::errors::*;
use crate::value::Value;

// ── JSON → Value ─────────────────────────────────────────────

/// Newtype so the custom Deserialize impl doesn't collide with
/// anything a downstream crate might derive for Value.
struct JsonValue(Value);

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::UInt(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::Str(v.as_bytes().to_vec())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::Str(v.into_bytes())))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue(Value::Nil))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
        let mut items = Vec::new();
        while let Some(JsonValue(item)) = seq.next_element::<JsonValue>()? {
            items.push(item);
        }
        Ok(JsonValue(Value::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonValue, A::Error> {
        // Collect every pair in source order, duplicates included — the
        // Map model preserves both, so nothing is dropped here.
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let JsonValue(val) = map.next_value::<JsonValue>()?;
            entries.push((Value::Str(key.into_bytes()), val));
        }
        Ok(JsonValue(Value::Map(entries)))
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

/// Parse JSON text into a [`Value`], preserving object key order and
/// duplicate keys.
pub fn from_json_slice(raw: &[u8]) -> Result<Value, MpackError> {
    let JsonValue(value) = serde_json::from_slice(raw)
        .map_err(|e| MpackError::new(ERR_JSON, format!("JSON parse error: {}", e)))?;
    Ok(value)
}

/// Convenience over [`from_json_slice`] for string input.
pub fn from_json_str(raw: &str) -> Result<Value, MpackError> {
    from_json_slice(raw.as_bytes())
}

// ── Value → JSON ─────────────────────────────────────────────

/// Render a [`Value`] as a `serde_json::Value`.
///
/// Fails on the shapes JSON cannot express: non-finite floats, Str
/// payloads that are not UTF-8, and maps whose keys are not Str or are
/// duplicated.  Bin payloads become base64 strings.
pub fn value_to_json(value: &Value) -> Result<serde_json::Value, MpackError> {
    match value {
        Value::Nil => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Int(v) => Ok(serde_json::Value::from(*v)),
        Value::UInt(v) => Ok(serde_json::Value::from(*v)),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                MpackError::new(ERR_NUMBER, format!("non-finite float {} has no JSON form", v))
            }),
        Value::Str(b) => {
            let text = std::str::from_utf8(b)
                .map_err(|_| MpackError::new(ERR_UTF8, "Str payload is not valid UTF-8"))?;
            Ok(serde_json::Value::String(text.to_string()))
        }
        Value::Bin(b) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(b);
            Ok(serde_json::Value::String(encoded))
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(value_to_json(item)?);
            }
            Ok(serde_json::Value::Array(out))
        }
        Value::Map(entries) => {
            let mut object = serde_json::Map::with_capacity(entries.len());
            for (key, val) in entries {
                let key_bytes = match key {
                    Value::Str(b) => b,
                    other => {
                        return Err(MpackError::new(
                            ERR_KEY,
                            format!("map key {} is not a string", other),
                        ));
                    }
                };
                let key_text = std::str::from_utf8(key_bytes)
                    .map_err(|_| MpackError::new(ERR_UTF8, "map key is not valid UTF-8"))?;
                if object.contains_key(key_text) {
                    return Err(MpackError::new(
                        ERR_DUP_KEY,
                        format!("duplicate map key \"{}\"", key_text),
                    ));
                }
                object.insert(key_text.to_string(), value_to_json(val)?);
            }
            Ok(serde_json::Value::Object(object))
        }
    }
}

/// Render a [`Value`] as compact JSON text.
pub fn to_json_string(value: &Value) -> Result<String, MpackError> {
    let json = value_to_json(value)?;
    serde_json::to_string(&json)
        .map_err(|e| MpackError::new(ERR_JSON, format!("JSON serialize error: {}", e)))
}
