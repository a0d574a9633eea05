//! Tests for the identifier encoding.

use crate::ident::{encoded_len, from_identifier, to_identifier};

fn roundtrip(bytes: &[u8]) {
    let encoded = to_identifier(bytes);
    assert_eq!(encoded.len(), encoded_len(bytes), "length contract for {bytes:?}");
    assert_eq!(from_identifier(&encoded), bytes, "roundtrip for {bytes:?}");
}

#[test]
fn identifier_bytes_pass_through() {
    assert_eq!(to_identifier(b"abc_09"), "abc_09");
    assert_eq!(to_identifier(b"Zz"), "Zz");
    assert_eq!(to_identifier(b""), "");
}

#[test]
fn escape_marker_is_escaped() {
    assert_eq!(to_identifier(b"_X"), "_X_");
    assert_eq!(to_identifier(b"k_X"), "k_X_");
    assert_eq!(to_identifier(b"_X_X"), "_X__X_");
}

#[test]
fn other_bytes_become_hex_escapes() {
    assert_eq!(to_identifier(b"v?"), "v_X3F");
    assert_eq!(to_identifier(b"a b"), "a_X20b");
    assert_eq!(to_identifier(b"\xde\xad"), "_XDE_XAD");
    assert_eq!(to_identifier(b"."), "_X2E");
}

#[test]
fn underscore_not_followed_by_x_is_literal() {
    assert_eq!(to_identifier(b"_"), "_");
    assert_eq!(to_identifier(b"_Y"), "_Y");
    assert_eq!(to_identifier(b"_x"), "_x");
    assert_eq!(to_identifier(b"a_"), "a_");
}

#[test]
fn every_byte_roundtrips() {
    for b in 0..=255u8 {
        roundtrip(&[b]);
        roundtrip(&[b'_', b]);
        roundtrip(&[b, b'X']);
    }
}

#[test]
fn mixed_strings_roundtrip() {
    roundtrip(b"hello world");
    roundtrip(b"_X");
    roundtrip(b"_X_");
    roundtrip(b"__XX__");
    roundtrip(b"init?");
    roundtrip(b"\x00\x01\xff");
    roundtrip("données".as_bytes());
}

#[test]
fn concatenation_boundaries_are_unambiguous() {
    let pairs: [(&[u8], &[u8]); 5] = [
        (b"_", b"X"),
        (b"a_", b"Xb"),
        (b"_X", b"_"),
        (b"\xff", b"00"),
        (b"k", b"_X"),
    ];
    for (a, b) in pairs {
        let joined = format!("{}{}", to_identifier(a), to_identifier(b));
        let mut expected = a.to_vec();
        expected.extend_from_slice(b);
        assert_eq!(from_identifier(&joined), expected, "boundary {a:?} | {b:?}");
    }
}

#[test]
fn encoded_len_matches_for_long_input() {
    let input: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
    roundtrip(&input);
}
