//! UTF-16 decode/encode and the code-unit ↔ scalar-value bridge.
//!
//! Byte-order handling: a leading BOM selects endianness for the sniffing
//! entry points; absent a BOM the decoders default to big-endian. The
//! surrogate-pairing routines here are also the bridge the UTF-8 and UTF-32
//! engines use to encode from 16-bit code-unit strings.

use alloc::{string::String, vec::Vec};

use crate::{
    cursor::Cursor,
    error::CodecError,
    options::DecodeOptions,
    scalar::{
        LEAD_SURROGATE_START, REPLACEMENT_CHAR, SURROGATE_PLANE_BASE, TRAIL_SURROGATE_START,
        combine_surrogates, is_lead_surrogate, is_trail_surrogate,
    },
};

const BOM_UNIT: u16 = 0xFEFF;

// ------------------------------------------------------------------------
// Code-unit bridge
// ------------------------------------------------------------------------

/// Outcome of pairing one code-unit sequence at the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitSequence {
    /// A BMP unit or a complete surrogate pair.
    Scalar(char),
    /// A lone surrogate; any following non-trail unit was backed up so it
    /// is reprocessed as its own sequence.
    Unpaired,
    /// A lead surrogate at the end of the input.
    Truncated,
}

/// Decodes one scalar value's worth of code units, pairing surrogates.
/// Returns `None` when the cursor is exhausted.
pub(crate) fn decode_unit_sequence(cursor: &mut Cursor<'_, u16>) -> Option<UnitSequence> {
    let unit = cursor.next()?;
    if is_lead_surrogate(unit) {
        let resync = cursor.position();
        return Some(match cursor.next() {
            Some(trail) if is_trail_surrogate(trail) => {
                UnitSequence::Scalar(combine_surrogates(unit, trail))
            }
            Some(_) => {
                cursor.rewind_to(resync);
                UnitSequence::Unpaired
            }
            None => UnitSequence::Truncated,
        });
    }
    if is_trail_surrogate(unit) {
        return Some(UnitSequence::Unpaired);
    }
    // Non-surrogate BMP units are always valid scalar values.
    Some(UnitSequence::Scalar(
        char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHAR),
    ))
}

/// Decodes a 16-bit code-unit string into text, pairing surrogates.
///
/// # Errors
///
/// In strict mode, [`CodecError::InvalidEncoding`] for a lone surrogate or
/// [`CodecError::TruncatedInput`] for a lead surrogate ending the input,
/// naming the unit index.
pub fn decode_utf16_units(units: &[u16], options: DecodeOptions) -> Result<String, CodecError> {
    let mut out = String::with_capacity(units.len());
    let mut cursor = Cursor::new(units);
    loop {
        let at = cursor.position();
        match decode_unit_sequence(&mut cursor) {
            None => return Ok(out),
            Some(UnitSequence::Scalar(c)) => out.push(c),
            Some(UnitSequence::Unpaired) => match options.replacement {
                Some(replacement) => out.push(replacement),
                None => return Err(CodecError::InvalidEncoding { position: at }),
            },
            Some(UnitSequence::Truncated) => match options.replacement {
                Some(replacement) => out.push(replacement),
                None => return Err(CodecError::TruncatedInput { position: at }),
            },
        }
    }
}

/// Encodes `text` into 16-bit code units, emitting a surrogate pair for
/// every scalar value at or above U+10000.
#[must_use]
pub fn encode_utf16_units(text: &str) -> Vec<u16> {
    let mut units = Vec::with_capacity(text.len());
    for c in text.chars() {
        push_scalar_units(c, &mut units);
    }
    units
}

#[expect(clippy::cast_possible_truncation)]
fn push_scalar_units(c: char, units: &mut Vec<u16>) {
    let value = c as u32;
    if value < SURROGATE_PLANE_BASE {
        units.push(value as u16);
    } else {
        let value = value - SURROGATE_PLANE_BASE;
        units.push(LEAD_SURROGATE_START + (value >> 10) as u16);
        units.push(TRAIL_SURROGATE_START + (value & 0x3FF) as u16);
    }
}

// ------------------------------------------------------------------------
// Byte-level decode
// ------------------------------------------------------------------------

/// Reads one code unit (two bytes) in the selected order. `Err` carries the
/// position of a lone trailing byte, which is consumed so iteration ends.
fn next_unit(cursor: &mut Cursor<'_, u8>, big_endian: bool) -> Option<Result<u16, usize>> {
    let at = cursor.position();
    let first = cursor.next()?;
    let Some(second) = cursor.next() else {
        return Some(Err(at));
    };
    let unit = if big_endian {
        u16::from_be_bytes([first, second])
    } else {
        u16::from_le_bytes([first, second])
    };
    Some(Ok(unit))
}

/// Lazy UTF-16 decoder over a complete byte buffer.
///
/// Constructed by [`decode_utf16_lazy`] and its BE/LE variants; each
/// construction decodes from the start, and clones traverse independently.
#[derive(Debug, Clone)]
pub struct Utf16Chars<'a> {
    cursor: Cursor<'a, u8>,
    big_endian: bool,
    options: DecodeOptions,
    done: bool,
}

impl Utf16Chars<'_> {
    fn recover(&mut self, err: CodecError) -> Option<Result<char, CodecError>> {
        match self.options.replacement {
            Some(replacement) => Some(Ok(replacement)),
            None => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl Iterator for Utf16Chars<'_> {
    type Item = Result<char, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let at = self.cursor.position();
        let unit = match next_unit(&mut self.cursor, self.big_endian) {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(odd)) => {
                return self.recover(CodecError::TruncatedInput { position: odd });
            }
            Some(Ok(unit)) => unit,
        };

        if is_lead_surrogate(unit) {
            let resync = self.cursor.position();
            return match next_unit(&mut self.cursor, self.big_endian) {
                None => self.recover(CodecError::TruncatedInput { position: at }),
                Some(Err(_)) => {
                    // Lead surrogate followed by a lone byte: the lead is
                    // unpaired, and the byte becomes an odd tail next round.
                    self.cursor.rewind_to(resync);
                    self.recover(CodecError::InvalidEncoding { position: at })
                }
                Some(Ok(trail)) if is_trail_surrogate(trail) => {
                    Some(Ok(combine_surrogates(unit, trail)))
                }
                Some(Ok(_)) => {
                    self.cursor.rewind_to(resync);
                    self.recover(CodecError::InvalidEncoding { position: at })
                }
            };
        }
        if is_trail_surrogate(unit) {
            return self.recover(CodecError::InvalidEncoding { position: at });
        }
        Some(Ok(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHAR)))
    }
}

fn utf16_chars(
    bytes: &[u8],
    big_endian: bool,
    bom_len: usize,
    options: DecodeOptions,
) -> Utf16Chars<'_> {
    let mut cursor = Cursor::new(bytes);
    // The probe guaranteed the BOM bytes are present.
    let _ = cursor.skip(bom_len);
    Utf16Chars {
        cursor,
        big_endian,
        options,
        done: false,
    }
}

/// Lazily decodes UTF-16 `bytes`, selecting endianness from a leading BOM
/// (stripped when present) and defaulting to big-endian.
#[must_use]
pub fn decode_utf16_lazy(bytes: &[u8], options: DecodeOptions) -> Utf16Chars<'_> {
    if has_utf16le_bom(bytes) {
        utf16_chars(bytes, false, 2, options)
    } else {
        let bom = if has_utf16be_bom(bytes) { 2 } else { 0 };
        utf16_chars(bytes, true, bom, options)
    }
}

/// Lazily decodes big-endian UTF-16 `bytes`, stripping a leading BE BOM
/// unless `options.strip_bom` is `false`.
#[must_use]
pub fn decode_utf16be_lazy(bytes: &[u8], options: DecodeOptions) -> Utf16Chars<'_> {
    let bom = if options.strip_bom && has_utf16be_bom(bytes) {
        2
    } else {
        0
    };
    utf16_chars(bytes, true, bom, options)
}

/// Lazily decodes little-endian UTF-16 `bytes`, stripping a leading LE BOM
/// unless `options.strip_bom` is `false`.
#[must_use]
pub fn decode_utf16le_lazy(bytes: &[u8], options: DecodeOptions) -> Utf16Chars<'_> {
    let bom = if options.strip_bom && has_utf16le_bom(bytes) {
        2
    } else {
        0
    };
    utf16_chars(bytes, false, bom, options)
}

fn collect_chars(chars: Utf16Chars<'_>, capacity: usize) -> Result<String, CodecError> {
    let mut out = String::with_capacity(capacity);
    for c in chars {
        out.push(c?);
    }
    Ok(out)
}

/// Decodes UTF-16 `bytes` in one shot, selecting endianness from a leading
/// BOM (stripped when present) and defaulting to big-endian.
///
/// # Errors
///
/// In strict mode, the first malformed or truncated sequence fails the call
/// with its byte position.
///
/// # Examples
///
/// ```rust
/// use utfmodem::{DecodeOptions, decode_utf16, encode_utf16};
///
/// let bytes = encode_utf16("híg");
/// assert_eq!(decode_utf16(&bytes, DecodeOptions::default()).unwrap(), "híg");
/// ```
pub fn decode_utf16(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    collect_chars(decode_utf16_lazy(bytes, options), bytes.len() / 2)
}

/// Decodes big-endian UTF-16 `bytes` in one shot.
///
/// # Errors
///
/// See [`decode_utf16`].
pub fn decode_utf16be(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    collect_chars(decode_utf16be_lazy(bytes, options), bytes.len() / 2)
}

/// Decodes little-endian UTF-16 `bytes` in one shot.
///
/// # Errors
///
/// See [`decode_utf16`].
pub fn decode_utf16le(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    collect_chars(decode_utf16le_lazy(bytes, options), bytes.len() / 2)
}

// ------------------------------------------------------------------------
// Encode
// ------------------------------------------------------------------------

fn push_unit(out: &mut Vec<u8>, unit: u16, big_endian: bool) {
    let bytes = if big_endian {
        unit.to_be_bytes()
    } else {
        unit.to_le_bytes()
    };
    out.extend_from_slice(&bytes);
}

fn encode_utf16_with(text: &str, big_endian: bool, write_bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2 + 2);
    if write_bom {
        push_unit(&mut out, BOM_UNIT, big_endian);
    }
    for unit in encode_utf16_units(text) {
        push_unit(&mut out, unit, big_endian);
    }
    out
}

/// Encodes `text` as big-endian UTF-16 bytes with a leading BOM.
#[must_use]
pub fn encode_utf16(text: &str) -> Vec<u8> {
    encode_utf16_with(text, true, true)
}

/// Encodes `text` as big-endian UTF-16 bytes, optionally with a BOM.
#[must_use]
pub fn encode_utf16be(text: &str, write_bom: bool) -> Vec<u8> {
    encode_utf16_with(text, true, write_bom)
}

/// Encodes `text` as little-endian UTF-16 bytes, optionally with a BOM.
#[must_use]
pub fn encode_utf16le(text: &str, write_bom: bool) -> Vec<u8> {
    encode_utf16_with(text, false, write_bom)
}

// ------------------------------------------------------------------------
// BOM probes
// ------------------------------------------------------------------------

/// Returns `true` if `bytes` starts with a UTF-16 BOM in either byte order.
#[must_use]
pub fn has_utf16_bom(bytes: &[u8]) -> bool {
    has_utf16be_bom(bytes) || has_utf16le_bom(bytes)
}

/// Returns `true` if `bytes` starts with the big-endian UTF-16 BOM (FE FF).
#[must_use]
pub fn has_utf16be_bom(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF
}

/// Returns `true` if `bytes` starts with the little-endian UTF-16 BOM
/// (FF FE).
#[must_use]
pub fn has_utf16le_bom(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xFE
}
