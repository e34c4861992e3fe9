//! Wire-level vector suite.
//!
//! Each case pins a value to its exact shortest encoding, then decodes
//! the bytes back and compares against the canonical decoded form
//! (non-negative Int collapses to UInt on the way through the wire —
//! the unsigned families own those payloads).  Length-boundary cases
//! whose payloads are too large to inline check the header bytes and
//! total length programmatically.

use mpack::{pack, unpack, unpack_all, Value};

/// What a value decodes back to: the packer routes non-negative Int
/// through the unsigned encoder, so those come back as UInt.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Int(v) if *v >= 0 => Value::UInt(*v as u64),
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (canonical(k), canonical(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

macro_rules! wire_case {
    ($name:ident, $value:expr, $bytes:expr) => {
        #[test]
        fn $name() {
            let value: Value = $value;
            let bytes: Vec<u8> = $bytes.to_vec();
            assert_eq!(pack(&value), bytes, "encoding mismatch");
            let decoded = unpack(&bytes).expect("decode failed");
            assert_eq!(decoded, canonical(&value), "decode mismatch");
        }
    };
}

// ── Scalars ─────────────────────────────────────────────────

wire_case!(nil, Value::Nil, [0xc0]);
wire_case!(bool_false, Value::Bool(false), [0xc2]);
wire_case!(bool_true, Value::Bool(true), [0xc3]);

// ── Unsigned integer family boundaries ──────────────────────

wire_case!(uint_0, Value::UInt(0), [0x00]);
wire_case!(uint_127, Value::UInt(127), [0x7f]);
wire_case!(uint_128, Value::UInt(128), [0xcc, 0x80]);
wire_case!(uint_255, Value::UInt(255), [0xcc, 0xff]);
wire_case!(uint_256, Value::UInt(256), [0xcd, 0x01, 0x00]);
wire_case!(uint_65535, Value::UInt(65_535), [0xcd, 0xff, 0xff]);
wire_case!(uint_65536, Value::UInt(65_536), [0xce, 0x00, 0x01, 0x00, 0x00]);
wire_case!(
    uint_u32_max,
    Value::UInt(4_294_967_295),
    [0xce, 0xff, 0xff, 0xff, 0xff]
);
wire_case!(
    uint_u32_max_plus_1,
    Value::UInt(4_294_967_296),
    [0xcf, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
);
wire_case!(
    uint_u64_max,
    Value::UInt(u64::MAX),
    [0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
);

// ── Signed integer family boundaries ────────────────────────

wire_case!(int_0_collapses, Value::Int(0), [0x00]);
wire_case!(int_127_collapses, Value::Int(127), [0x7f]);
wire_case!(int_neg_1, Value::Int(-1), [0xff]);
wire_case!(int_neg_32, Value::Int(-32), [0xe0]);
wire_case!(int_neg_33, Value::Int(-33), [0xd0, 0xdf]);
wire_case!(int_neg_128, Value::Int(-128), [0xd0, 0x80]);
wire_case!(int_neg_129, Value::Int(-129), [0xd1, 0xff, 0x7f]);
wire_case!(int_neg_32768, Value::Int(-32_768), [0xd1, 0x80, 0x00]);
wire_case!(
    int_neg_32769,
    Value::Int(-32_769),
    [0xd2, 0xff, 0xff, 0x7f, 0xff]
);
wire_case!(
    int_i32_min,
    Value::Int(-2_147_483_648),
    [0xd2, 0x80, 0x00, 0x00, 0x00]
);
wire_case!(
    int_i32_min_minus_1,
    Value::Int(-2_147_483_649),
    [0xd3, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xff, 0xff, 0xff]
);
wire_case!(
    int_i64_min,
    Value::Int(i64::MIN),
    [0xd3, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
);

// ── Floats ──────────────────────────────────────────────────

wire_case!(
    float_zero,
    Value::Float(0.0),
    [0xcb, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
);
wire_case!(
    float_1_5,
    Value::Float(1.5),
    [0xcb, 0x3f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
);
wire_case!(
    float_neg_2_5,
    Value::Float(-2.5),
    [0xcb, 0xc0, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
);

// ── Str / Bin (inline sizes) ────────────────────────────────

wire_case!(str_empty, Value::from_string(""), [0xa0]);
wire_case!(
    str_hello,
    Value::from_string("hello"),
    [0xa5, 0x68, 0x65, 0x6c, 0x6c, 0x6f]
);
wire_case!(bin_empty, Value::from_bin(Vec::new()), [0xc4, 0x00]);
wire_case!(
    bin_three_bytes,
    Value::from_bin(vec![0x00, 0x01, 0xfe]),
    [0xc4, 0x03, 0x00, 0x01, 0xfe]
);

// ── Containers (inline sizes) ───────────────────────────────

wire_case!(array_empty, Value::from_array(Vec::new()), [0x90]);
wire_case!(
    array_1_2_3,
    Value::from_array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
    [0x93, 0x01, 0x02, 0x03]
);
wire_case!(map_empty, Value::from_map(Vec::new()), [0x80]);
wire_case!(
    map_name_age,
    Value::from_map(vec![
        (Value::from("name"), Value::from("Alice")),
        (Value::from("age"), Value::UInt(30)),
    ]),
    [
        0x82, 0xa4, 0x6e, 0x61, 0x6d, 0x65, 0xa5, 0x41, 0x6c, 0x69, 0x63, 0x65, 0xa3, 0x61,
        0x67, 0x65, 0x1e
    ]
);
wire_case!(
    nested_containers,
    Value::from_array(vec![
        Value::from_map(vec![(Value::from("k"), Value::Nil)]),
        Value::from_array(vec![Value::Bool(true)]),
    ]),
    [0x92, 0x81, 0xa1, 0x6b, 0xc0, 0x91, 0xc3]
);

// ── Length boundaries (programmatic payloads) ───────────────

/// Round-trip a Str of the given length and check its header bytes.
fn check_str_boundary(len: usize, header: &[u8]) {
    let value = Value::Str(vec![b'a'; len]);
    let bytes = pack(&value);
    assert_eq!(&bytes[..header.len()], header, "str({}) header", len);
    assert_eq!(bytes.len(), header.len() + len, "str({}) total length", len);
    assert_eq!(unpack(&bytes).unwrap(), value);
}

#[test]
fn str_length_boundaries() {
    check_str_boundary(31, &[0xbf]);
    check_str_boundary(32, &[0xd9, 0x20]);
    check_str_boundary(255, &[0xd9, 0xff]);
    check_str_boundary(256, &[0xda, 0x01, 0x00]);
    check_str_boundary(65_535, &[0xda, 0xff, 0xff]);
    check_str_boundary(65_536, &[0xdb, 0x00, 0x01, 0x00, 0x00]);
}

fn check_bin_boundary(len: usize, header: &[u8]) {
    let value = Value::Bin(vec![0xab; len]);
    let bytes = pack(&value);
    assert_eq!(&bytes[..header.len()], header, "bin({}) header", len);
    assert_eq!(bytes.len(), header.len() + len, "bin({}) total length", len);
    assert_eq!(unpack(&bytes).unwrap(), value);
}

#[test]
fn bin_length_boundaries() {
    check_bin_boundary(255, &[0xc4, 0xff]);
    check_bin_boundary(256, &[0xc5, 0x01, 0x00]);
    check_bin_boundary(65_535, &[0xc5, 0xff, 0xff]);
    check_bin_boundary(65_536, &[0xc6, 0x00, 0x01, 0x00, 0x00]);
}

fn check_array_boundary(len: usize, header: &[u8]) {
    let value = Value::Array(vec![Value::Nil; len]);
    let bytes = pack(&value);
    assert_eq!(&bytes[..header.len()], header, "array({}) header", len);
    assert_eq!(bytes.len(), header.len() + len, "array({}) total length", len);
    assert_eq!(unpack(&bytes).unwrap(), value);
}

#[test]
fn array_length_boundaries() {
    check_array_boundary(15, &[0x9f]);
    check_array_boundary(16, &[0xdc, 0x00, 0x10]);
    check_array_boundary(65_535, &[0xdc, 0xff, 0xff]);
    check_array_boundary(65_536, &[0xdd, 0x00, 0x01, 0x00, 0x00]);
}

fn check_map_boundary(len: usize, header: &[u8]) {
    let value = Value::Map(vec![(Value::Nil, Value::Nil); len]);
    let bytes = pack(&value);
    assert_eq!(&bytes[..header.len()], header, "map({}) header", len);
    assert_eq!(
        bytes.len(),
        header.len() + 2 * len,
        "map({}) total length",
        len
    );
    assert_eq!(unpack(&bytes).unwrap(), value);
}

#[test]
fn map_length_boundaries() {
    check_map_boundary(15, &[0x8f]);
    check_map_boundary(16, &[0xde, 0x00, 0x10]);
    check_map_boundary(65_535, &[0xde, 0xff, 0xff]);
    check_map_boundary(65_536, &[0xdf, 0x00, 0x01, 0x00, 0x00]);
}

// ── Decode-only vectors ─────────────────────────────────────
// Wide encodings the packer never emits must still decode; the wire
// accepts any legal width for a payload.

#[test]
fn wide_encodings_decode() {
    assert_eq!(unpack(&[0xcc, 0x05]).unwrap(), Value::UInt(5));
    assert_eq!(unpack(&[0xcd, 0x00, 0x05]).unwrap(), Value::UInt(5));
    assert_eq!(
        unpack(&[0xce, 0x00, 0x00, 0x00, 0x05]).unwrap(),
        Value::UInt(5)
    );
    assert_eq!(unpack(&[0xd0, 0x05]).unwrap(), Value::Int(5));
    assert_eq!(unpack(&[0xd1, 0xff, 0xff]).unwrap(), Value::Int(-1));
    assert_eq!(
        unpack(&[0xd9, 0x02, 0x68, 0x69]).unwrap(),
        Value::from_string("hi")
    );
    assert_eq!(unpack(&[0xdc, 0x00, 0x00]).unwrap(), Value::Array(Vec::new()));
    assert_eq!(unpack(&[0xde, 0x00, 0x00]).unwrap(), Value::Map(Vec::new()));
}

#[test]
fn signed_families_keep_int_tag() {
    // A signed-family payload decodes to Int even when non-negative.
    let decoded = unpack(&[0xd3, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07]).unwrap();
    assert_eq!(decoded, Value::Int(7));
    assert_ne!(decoded, Value::UInt(7));
}

#[test]
fn float32_widening_is_exact() {
    // binary32 -0.5 widens to binary64 -0.5
    assert_eq!(
        unpack(&[0xca, 0xbf, 0x00, 0x00, 0x00]).unwrap(),
        Value::Float(-0.5)
    );
}

// ── Prefix completeness ─────────────────────────────────────
// For every first byte except the reserved 0xc1 there is an input that
// decodes.  The suffixes below are the minimal completion per family.

#[test]
fn every_marker_except_reserved_can_lead_a_value() {
    for marker in 0u16..=255 {
        let marker = marker as u8;
        if marker == 0xc1 {
            assert!(unpack(&[marker]).is_err());
            continue;
        }
        let input = minimal_input_for(marker);
        assert!(
            unpack(&input).is_ok(),
            "marker 0x{:02x} failed on {:02x?}",
            marker,
            input
        );
    }
}

/// Smallest complete encoding whose first byte is `marker`.
fn minimal_input_for(marker: u8) -> Vec<u8> {
    let mut input = vec![marker];
    match marker {
        // fixmap: two nils per declared entry
        0x80..=0x8f => input.extend(vec![0xc0; 2 * (marker & 0x0f) as usize]),
        // fixarray: one nil per declared element
        0x90..=0x9f => input.extend(vec![0xc0; (marker & 0x0f) as usize]),
        // fixstr: declared payload bytes
        0xa0..=0xbf => input.extend(vec![b'a'; (marker & 0x1f) as usize]),
        // bin/str/array/map with zeroed length fields
        0xc4 | 0xd9 => input.push(0x00),
        0xc5 | 0xda | 0xdc | 0xde => input.extend([0x00, 0x00]),
        0xc6 | 0xdb | 0xdd | 0xdf => input.extend([0x00; 4]),
        // ext with zero-length payload still carries a type byte
        0xc7 => input.extend([0x00, 0x01]),
        0xc8 => input.extend([0x00, 0x00, 0x01]),
        0xc9 => input.extend([0x00, 0x00, 0x00, 0x00, 0x01]),
        // fixed-width scalar payloads
        0xca => input.extend([0x00; 4]),
        0xcb => input.extend([0x00; 8]),
        0xcc | 0xd0 => input.push(0x00),
        0xcd | 0xd1 => input.extend([0x00; 2]),
        0xce | 0xd2 => input.extend([0x00; 4]),
        0xcf | 0xd3 => input.extend([0x00; 8]),
        // fixext: type byte plus 1/2/4/8/16 data bytes
        0xd4 => input.extend([0x01, 0x00]),
        0xd5 => input.extend([0x01; 3]),
        0xd6 => input.extend([0x01; 5]),
        0xd7 => input.extend([0x01; 9]),
        0xd8 => input.extend([0x01; 17]),
        // single-byte values need nothing more
        _ => {}
    }
    input
}

// ── Streaming over mixed vectors ────────────────────────────

#[test]
fn streaming_decodes_back_to_back_vectors() {
    let values = [
        Value::Nil,
        Value::UInt(65_536),
        Value::Int(-32_769),
        Value::from_string("hello"),
        Value::from_array(vec![Value::Bool(false)]),
    ];
    let mut stream = Vec::new();
    for value in &values {
        stream.extend(pack(value));
    }
    let decoded = unpack_all(&stream).unwrap();
    assert_eq!(decoded.len(), values.len());
    for (got, want) in decoded.iter().zip(values.iter()) {
        assert_eq!(got, &canonical(want));
    }
}
