//! UTF-8 decode/encode.
//!
//! Decoding is built on a single-sequence primitive ([`decode_sequence`])
//! that the one-shot entry points, the lazy iterator and the streaming
//! adapter all share. The primitive reports exactly one of three outcomes
//! per attempt: a decoded scalar, "needs more input" (nothing consumed), or
//! "malformed" (the offending unit consumed, cursor resynchronized).

use alloc::{string::String, vec::Vec};

use crate::{
    cursor::Cursor,
    error::CodecError,
    options::DecodeOptions,
    scalar::{REPLACEMENT_CHAR, is_scalar_value},
    utf16,
};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Outcome of one attempt to decode a sequence at the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sequence {
    /// A complete, valid sequence was consumed.
    Scalar(char),
    /// The sequence extends past the available input; the cursor was
    /// restored to the sequence start and nothing was consumed.
    NeedMore,
    /// An invalid unit was consumed. Any byte that is not a continuation
    /// byte has been backed up so it is reprocessed as the start of the
    /// next sequence.
    Malformed,
}

/// Decodes one UTF-8 sequence starting at the cursor's current position.
pub(crate) fn decode_sequence(cursor: &mut Cursor<'_, u8>) -> Sequence {
    let start = cursor.position();
    let Some(lead) = cursor.next() else {
        return Sequence::NeedMore;
    };
    if lead < 0x80 {
        return Sequence::Scalar(char::from(lead));
    }
    let (extra, min) = match lead {
        0xC0..=0xDF => (1u32, 0x80u32),
        0xE0..=0xEF => (2, 0x800),
        0xF0..=0xF7 => (3, 0x1_0000),
        // Legacy 5- and 6-byte lead forms (pre-2003). Consumed as one unit
        // for resynchronization; their values never pass the range check.
        0xF8..=0xFB => (4, 0x20_0000),
        0xFC..=0xFD => (5, 0x400_0000),
        // Stray continuation byte, or 0xFE/0xFF.
        _ => return Sequence::Malformed,
    };

    let mut value = u32::from(lead) & (0x7F >> (extra + 1));
    for _ in 0..extra {
        let Some(byte) = cursor.next() else {
            cursor.rewind_to(start);
            return Sequence::NeedMore;
        };
        if byte & 0xC0 != 0x80 {
            // Not a continuation byte: back up so it starts the next
            // sequence instead of being absorbed into this failed one.
            cursor.rewind_to(cursor.position() - 1);
            return Sequence::Malformed;
        }
        value = (value << 6) | u32::from(byte & 0x3F);
    }

    if value < min || !is_scalar_value(value) {
        return Sequence::Malformed;
    }
    char::from_u32(value).map_or(Sequence::Malformed, Sequence::Scalar)
}

/// Lazy UTF-8 decoder over a complete byte buffer.
///
/// Yields one `Result<char, CodecError>` per decoded sequence. Constructed
/// by [`decode_utf8_lazy`]; each construction decodes from the start, and
/// clones traverse independently.
#[derive(Debug, Clone)]
pub struct Utf8Chars<'a> {
    cursor: Cursor<'a, u8>,
    options: DecodeOptions,
    done: bool,
}

impl Iterator for Utf8Chars<'_> {
    type Item = Result<char, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.remaining() == 0 {
            self.done = true;
            return None;
        }
        let at = self.cursor.position();
        match decode_sequence(&mut self.cursor) {
            Sequence::Scalar(c) => Some(Ok(c)),
            Sequence::NeedMore => {
                // The buffer is complete, so a sequence that wants more
                // bytes is a truncated tail: one invalid unit, then the end.
                self.done = true;
                match self.options.replacement {
                    Some(replacement) => Some(Ok(replacement)),
                    None => Some(Err(CodecError::TruncatedInput { position: at })),
                }
            }
            Sequence::Malformed => match self.options.replacement {
                Some(replacement) => Some(Ok(replacement)),
                None => {
                    self.done = true;
                    Some(Err(CodecError::InvalidEncoding { position: at }))
                }
            },
        }
    }
}

/// Lazily decodes UTF-8 `bytes` into characters.
///
/// The returned iterator is restartable in the sense that every call to this
/// function builds a fresh decoder over the same bytes; no state is shared
/// between traversals.
#[must_use]
pub fn decode_utf8_lazy(bytes: &[u8], options: DecodeOptions) -> Utf8Chars<'_> {
    Utf8Chars {
        cursor: Cursor::new(bytes),
        options,
        done: false,
    }
}

/// Decodes UTF-8 `bytes` into a `String` in one shot.
///
/// Malformed sequences become the configured replacement character, or fail
/// the call in strict mode. A truncated sequence at the end of the input
/// shortens the result by becoming a single replacement.
///
/// # Errors
///
/// In strict mode, [`CodecError::InvalidEncoding`] or
/// [`CodecError::TruncatedInput`] naming the byte position of the first
/// malformed sequence.
///
/// # Examples
///
/// ```rust
/// use utfmodem::{DecodeOptions, decode_utf8};
///
/// let text = decode_utf8(&[0x68, 0x69, 0xE2, 0x9C, 0x93], DecodeOptions::default()).unwrap();
/// assert_eq!(text, "hi✓");
/// ```
pub fn decode_utf8(bytes: &[u8], options: DecodeOptions) -> Result<String, CodecError> {
    let mut out = String::with_capacity(bytes.len());
    for c in decode_utf8_lazy(bytes, options) {
        out.push(c?);
    }
    Ok(out)
}

/// Encodes one scalar value as 1–4 bytes. Values a scalar cannot hold
/// (surrogates, out of range) encode as U+FFFD; encoders have no strict
/// mode.
#[expect(clippy::cast_possible_truncation)]
fn encode_scalar(value: u32, out: &mut Vec<u8>) {
    let value = if is_scalar_value(value) {
        value
    } else {
        REPLACEMENT_CHAR as u32
    };
    if value <= 0x7F {
        out.push(value as u8);
    } else if value <= 0x7FF {
        out.push(0xC0 | (value >> 6) as u8);
        out.push(0x80 | (value & 0x3F) as u8);
    } else if value <= 0xFFFF {
        out.push(0xE0 | (value >> 12) as u8);
        out.push(0x80 | ((value >> 6) & 0x3F) as u8);
        out.push(0x80 | (value & 0x3F) as u8);
    } else {
        out.push(0xF0 | (value >> 18) as u8);
        out.push(0x80 | ((value >> 12) & 0x3F) as u8);
        out.push(0x80 | ((value >> 6) & 0x3F) as u8);
        out.push(0x80 | (value & 0x3F) as u8);
    }
}

/// Encodes `text` as UTF-8 bytes.
#[must_use]
pub fn encode_utf8(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        encode_scalar(c as u32, &mut out);
    }
    out
}

/// Encodes a 16-bit code-unit string as UTF-8 bytes.
///
/// Surrogate pairs are combined through the UTF-16 pairing bridge; unpaired
/// surrogates encode as U+FFFD.
#[must_use]
pub fn encode_utf8_units(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len() * 3);
    let mut cursor = Cursor::new(units);
    while let Some(step) = utf16::decode_unit_sequence(&mut cursor) {
        match step {
            utf16::UnitSequence::Scalar(c) => encode_scalar(c as u32, &mut out),
            utf16::UnitSequence::Unpaired | utf16::UnitSequence::Truncated => {
                encode_scalar(REPLACEMENT_CHAR as u32, &mut out);
            }
        }
    }
    out
}

/// Returns `true` if `bytes` starts with the UTF-8 byte-order mark
/// (EF BB BF). The UTF-8 decoders never strip it.
#[must_use]
pub fn has_utf8_bom(bytes: &[u8]) -> bool {
    bytes.len() >= UTF8_BOM.len() && bytes[..UTF8_BOM.len()] == UTF8_BOM
}
