//! UTF-32 decode/encode.
//!
//! Four bytes per scalar value in the selected order. The format's raw range
//! is a full 32 bits, but decoded values above 0x10FFFF or inside the
//! surrogate range are rejected. BOM handling mirrors the UTF-16 engine with
//! 4-byte marks.

use alloc::{string::String, vec::Vec};

use crate::{
    cursor::Cursor,
    error::CodecError,
    options::DecodeOptions,
    scalar::{REPLACEMENT_CHAR, is_scalar_value},
    utf16::{self, UnitSequence},
};

const BOM_BE: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
const BOM_LE: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];

/// Lazy UTF-32 decoder over a complete byte buffer.
///
/// Constructed by [`decode_utf32_lazy`] and its BE/LE variants; each
/// construction decodes from the start, and clones traverse independently.
#[derive(Debug, Clone)]
pub struct Utf32Chars<'a> {
    cursor: Cursor<'a, u8>,
    big_endian: bool,
    options: DecodeOptions,
    done: bool,
}

impl Iterator for Utf32Chars<'_> {
    type Item = Result<char, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let at = self.cursor.position();
        if self.cursor.remaining() == 0 {
            self.done = true;
            return None;
        }
        if self.cursor.remaining() < 4 {
            // Fewer than four bytes left: one truncated unit ends the input.
            self.done = true;
            return match self.options.replacement {
                Some(replacement) => Some(Ok(replacement)),
                None => Some(Err(CodecError::TruncatedInput { position: at })),
            };
        }

        let mut quad = [0u8; 4];
        for slot in &mut quad {
            // remaining() >= 4 guarantees these reads succeed
            match self.cursor.next() {
                Some(byte) => *slot = byte,
                None => return None,
            }
        }
        let value = if self.big_endian {
            u32::from_be_bytes(quad)
        } else {
            u32::from_le_bytes(quad)
        };

        if let Some(c) = char::from_u32(value).filter(|_| is_scalar_value(value)) {
            return Some(Ok(c));
        }
        match self.options.replacement {
            Some(replacement) => Some(Ok(replacement)),
            None => {
                self.done = true;
                Some(Err(CodecError::InvalidEncoding { position: at }))
            }
        }
    }
}

fn utf32_chars(
    bytes: &[u8],
    big_endian: bool,
    bom_len: usize,
    options: DecodeOptions,
) -> Utf32Chars<'_> {
    let mut cursor = Cursor::new(bytes);
    // The probe guaranteed the BOM bytes are present.
    let _ = cursor.skip(bom_len);
    Utf32Chars {
        cursor,
        big_endian,
        options,
        done: false,
    }
}

/// Lazily decodes UTF-32 `bytes`, selecting endianness from a leading BOM
/// (stripped when present) and defaulting to big-endian.
#[must_use]
pub fn decode_utf32_lazy(bytes: &[u8], options: DecodeOptions) -> Utf32Chars<'_> {
    if has_utf32le_bom(bytes) {
        utf32_chars(bytes, false, 4, options)
    } else {
        let bom = if has_utf32be_bom(bytes) { 4 } else { 0 };
        utf32_chars(bytes, true, bom, options)
    }
}

/// Lazily decodes big-endian UTF-32 `bytes`, stripping a leading BE BOM
/// unless `options.strip_bom` is `false`.
#[must_use]
pub fn decode_utf32be_lazy(bytes: &[u8], options: DecodeOptions) -> Utf32Chars<'_> {
    let bom = if options.strip_bom && has_utf32be_bom(bytes) {
        4
    } else {
        0
    };
    utf32_chars(bytes, true, bom, options)
}

/// Lazily decodes little-endian UTF-32 `bytes`, stripping a leading LE BOM
/// unless `options.strip_bom` is `false`.
#[must_use]
pub fn decode_utf32le_lazy(bytes: &[u8], options: DecodeOptions) -> Utf32Chars<'_> {
    let bom = if options.strip_bom && has_utf32le_bom(bytes) {
        4
    } else {
        0
    };
    utf32_chars(bytes, false, bom, options)
}

fn collect_chars(chars: Utf32Chars<'_>, capacity: usize) -> Result<String, CodecError> {
    let mut out = String::with_capacity(capacity);
    for c in chars {
        out.push(c?);
    }
    Ok(out)
}

/// Decodes UTF-32 `bytes` in one shot, selecting endianness from a leading
/// BOM (stripped when present) and defaulting to big-endian.
///
/// # Errors
///
/// In strict mode, the first malformed or truncated sequence fails the call
/// with its byte position.
pub fn decode_utf32(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    collect_chars(decode_utf32_lazy(bytes, options), bytes.len() / 4)
}

/// Decodes big-endian UTF-32 `bytes` in one shot.
///
/// # Errors
///
/// See [`decode_utf32`].
pub fn decode_utf32be(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    collect_chars(decode_utf32be_lazy(bytes, options), bytes.len() / 4)
}

/// Decodes little-endian UTF-32 `bytes` in one shot.
///
/// # Errors
///
/// See [`decode_utf32`].
pub fn decode_utf32le(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    collect_chars(decode_utf32le_lazy(bytes, options), bytes.len() / 4)
}

fn push_value(out: &mut Vec<u8>, value: u32, big_endian: bool) {
    let bytes = if big_endian {
        value.to_be_bytes()
    } else {
        value.to_le_bytes()
    };
    out.extend_from_slice(&bytes);
}

fn encode_utf32_with(text: &str, big_endian: bool, write_bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 4 + 4);
    if write_bom {
        push_value(&mut out, 0xFEFF, big_endian);
    }
    for c in text.chars() {
        push_value(&mut out, c as u32, big_endian);
    }
    out
}

/// Encodes `text` as big-endian UTF-32 bytes with a leading BOM.
#[must_use]
pub fn encode_utf32(text: &str) -> Vec<u8> {
    encode_utf32_with(text, true, true)
}

/// Encodes `text` as big-endian UTF-32 bytes, optionally with a BOM.
#[must_use]
pub fn encode_utf32be(text: &str, write_bom: bool) -> Vec<u8> {
    encode_utf32_with(text, true, write_bom)
}

/// Encodes `text` as little-endian UTF-32 bytes, optionally with a BOM.
#[must_use]
pub fn encode_utf32le(text: &str, write_bom: bool) -> Vec<u8> {
    encode_utf32_with(text, false, write_bom)
}

/// Encodes a 16-bit code-unit string as big-endian UTF-32 bytes, combining
/// surrogate pairs through the UTF-16 pairing bridge. Unpaired surrogates
/// encode as U+FFFD; no BOM is written, matching
/// [`encode_utf8_units`](crate::encode_utf8_units).
#[must_use]
pub fn encode_utf32_units(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len() * 4);
    let mut cursor = Cursor::new(units);
    while let Some(step) = utf16::decode_unit_sequence(&mut cursor) {
        let c = match step {
            UnitSequence::Scalar(c) => c,
            UnitSequence::Unpaired | UnitSequence::Truncated => REPLACEMENT_CHAR,
        };
        push_value(&mut out, c as u32, true);
    }
    out
}

/// Returns `true` if `bytes` starts with a UTF-32 BOM in either byte order.
#[must_use]
pub fn has_utf32_bom(bytes: &[u8]) -> bool {
    has_utf32be_bom(bytes) || has_utf32le_bom(bytes)
}

/// Returns `true` if `bytes` starts with the big-endian UTF-32 BOM
/// (00 00 FE FF). Always `false` with fewer than four bytes available.
#[must_use]
pub fn has_utf32be_bom(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == BOM_BE
}

/// Returns `true` if `bytes` starts with the little-endian UTF-32 BOM
/// (FF FE 00 00). Always `false` with fewer than four bytes available.
#[must_use]
pub fn has_utf32le_bom(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == BOM_LE
}
