use alloc::{string::String, vec, vec::Vec};

use rstest::rstest;

use crate::{
    DecodeOptions, chunk_utils::produce_prefixes, decode_utf8, decode_utf8_lazy, decode_utf16,
    decode_utf16_units, decode_utf16be, decode_utf16le, decode_utf32, decode_utf32be,
    decode_utf32le, encode_utf8, encode_utf8_units, encode_utf16, encode_utf16_units,
    encode_utf16be, encode_utf16le, encode_utf32, encode_utf32_units, encode_utf32be,
    encode_utf32le, has_utf8_bom, has_utf16_bom, has_utf16be_bom, has_utf16le_bom, has_utf32_bom,
    has_utf32be_bom, has_utf32le_bom,
};

const SAMPLE: &str = "In û vain — 𝕷orem 日本語 👋\u{10FFFF}";

#[rstest]
#[case("")]
#[case("ascii only")]
#[case("déjà vu")]
#[case(SAMPLE)]
fn utf8_round_trip(#[case] text: &str) {
    let bytes = encode_utf8(text);
    assert_eq!(bytes, text.as_bytes());
    assert_eq!(decode_utf8(&bytes, DecodeOptions::default()).unwrap(), text);
    assert_eq!(decode_utf8(&bytes, DecodeOptions::strict()).unwrap(), text);
}

#[rstest]
#[case("")]
#[case("payload")]
#[case(SAMPLE)]
fn utf16_round_trip_all_forms(#[case] text: &str) {
    let opts = DecodeOptions::default();
    assert_eq!(decode_utf16(&encode_utf16(text), opts).unwrap(), text);
    assert_eq!(decode_utf16be(&encode_utf16be(text, true), opts).unwrap(), text);
    assert_eq!(decode_utf16be(&encode_utf16be(text, false), opts).unwrap(), text);
    assert_eq!(decode_utf16le(&encode_utf16le(text, true), opts).unwrap(), text);
    assert_eq!(decode_utf16le(&encode_utf16le(text, false), opts).unwrap(), text);
    // An LE stream with its BOM is also recognized by the sniffing decoder.
    assert_eq!(decode_utf16(&encode_utf16le(text, true), opts).unwrap(), text);
}

#[rstest]
#[case("")]
#[case("payload")]
#[case(SAMPLE)]
fn utf32_round_trip_all_forms(#[case] text: &str) {
    let opts = DecodeOptions::default();
    assert_eq!(decode_utf32(&encode_utf32(text), opts).unwrap(), text);
    assert_eq!(decode_utf32be(&encode_utf32be(text, true), opts).unwrap(), text);
    assert_eq!(decode_utf32be(&encode_utf32be(text, false), opts).unwrap(), text);
    assert_eq!(decode_utf32le(&encode_utf32le(text, true), opts).unwrap(), text);
    assert_eq!(decode_utf32le(&encode_utf32le(text, false), opts).unwrap(), text);
    assert_eq!(decode_utf32(&encode_utf32le(text, true), opts).unwrap(), text);
}

/// Decoding with and without a written BOM agree: the explicit-endianness
/// decoders strip their own mark.
#[test]
fn bom_stripping_is_idempotent() {
    let opts = DecodeOptions::default();
    let with_bom = decode_utf16be(&encode_utf16be(SAMPLE, true), opts).unwrap();
    let without_bom = decode_utf16be(&encode_utf16be(SAMPLE, false), opts).unwrap();
    assert_eq!(with_bom, without_bom);

    // Opting out keeps the mark as a leading U+FEFF.
    let kept = decode_utf16be(
        &encode_utf16be(SAMPLE, true),
        DecodeOptions {
            strip_bom: false,
            ..DecodeOptions::default()
        },
    )
    .unwrap();
    assert_eq!(kept.chars().next(), Some('\u{FEFF}'));
    assert_eq!(&kept[3..], SAMPLE);
}

#[test]
fn no_bom_defaults_to_big_endian() {
    let bytes = encode_utf16be("AB", false);
    assert_eq!(bytes, [0x00, 0x41, 0x00, 0x42]);
    assert_eq!(decode_utf16(&bytes, DecodeOptions::default()).unwrap(), "AB");

    let bytes = encode_utf32be("A", false);
    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x41]);
    assert_eq!(decode_utf32(&bytes, DecodeOptions::default()).unwrap(), "A");
}

#[test]
fn surrogate_pairing_bridge() {
    assert_eq!(encode_utf16_units("\u{1D537}"), vec![0xD835, 0xDD37]);
    assert_eq!(
        decode_utf16_units(&[0xD835, 0xDD37], DecodeOptions::default()).unwrap(),
        "\u{1D537}"
    );
    assert_eq!(
        decode_utf16_units(&encode_utf16_units(SAMPLE), DecodeOptions::strict()).unwrap(),
        SAMPLE
    );
}

#[test]
fn unit_entry_points_use_the_bridge() {
    let units = encode_utf16_units(SAMPLE);
    assert_eq!(encode_utf8_units(&units), encode_utf8(SAMPLE));
    assert_eq!(encode_utf32_units(&units), encode_utf32be(SAMPLE, false));
}

#[test]
fn lazy_decode_is_restartable() {
    let bytes = encode_utf8(SAMPLE);
    let first: String = decode_utf8_lazy(&bytes, DecodeOptions::default())
        .map(Result::unwrap)
        .collect();
    let second: String = decode_utf8_lazy(&bytes, DecodeOptions::default())
        .map(Result::unwrap)
        .collect();
    assert_eq!(first, SAMPLE);
    assert_eq!(second, SAMPLE);

    // Clones traverse independently.
    let mut a = decode_utf8_lazy(&bytes, DecodeOptions::default());
    let mut b = a.clone();
    assert_eq!(a.next().unwrap().unwrap(), 'I');
    assert_eq!(a.next().unwrap().unwrap(), 'n');
    assert_eq!(b.next().unwrap().unwrap(), 'I');
}

#[rstest]
#[case::empty(&[])]
#[case::bom_only_prefix(&[0xFE])]
fn empty_and_trivial_inputs(#[case] bytes: &[u8]) {
    if bytes.is_empty() {
        assert_eq!(decode_utf8(bytes, DecodeOptions::strict()).unwrap(), "");
        assert_eq!(decode_utf16(bytes, DecodeOptions::strict()).unwrap(), "");
        assert_eq!(decode_utf32(bytes, DecodeOptions::strict()).unwrap(), "");
    }
    assert!(!has_utf16_bom(bytes));
    assert!(!has_utf32_bom(bytes));
    assert!(!has_utf8_bom(bytes));
}

#[test]
fn bom_probes() {
    assert!(has_utf8_bom(&[0xEF, 0xBB, 0xBF, 0x41]));
    assert!(has_utf16be_bom(&[0xFE, 0xFF]));
    assert!(has_utf16le_bom(&[0xFF, 0xFE]));
    assert!(has_utf32be_bom(&[0x00, 0x00, 0xFE, 0xFF]));
    assert!(has_utf32le_bom(&[0xFF, 0xFE, 0x00, 0x00]));
    assert!(!has_utf32be_bom(&[0x00, 0x00, 0xFE, 0xFE]));
    assert!(!has_utf16be_bom(&[0xFF, 0xFF]));
}

/// A probe never reports a BOM it cannot see in full, even when every
/// available byte matches the prefix of one.
#[test]
fn bom_probe_respects_window_boundary() {
    let payload: &[u8] = &[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x00, 0x41];
    for prefix in produce_prefixes(payload, payload.len()) {
        assert_eq!(has_utf32be_bom(prefix), prefix.len() >= 4);
    }
    let le: Vec<u8> = encode_utf32le("x", true);
    for prefix in produce_prefixes(&le, le.len()) {
        assert_eq!(has_utf32le_bom(prefix), prefix.len() >= 4);
    }
}
