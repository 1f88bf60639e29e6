//! A streaming, incremental Unicode transcoder.
//!
//! Converts text between its scalar-value form and the UTF-8, UTF-16 and
//! UTF-32 byte encodings, in both directions: one-shot over complete
//! buffers, lazily via restartable iterators, and incrementally over byte
//! chunks of arbitrary boundaries with [`Utf8StreamDecoder`].
//!
//! Malformed input is substituted with U+FFFD by default; strict decoding
//! ([`DecodeOptions::strict`]) fails on the first malformed sequence with
//! its position instead.
//!
//! ```rust
//! use utfmodem::{DecodeOptions, Utf8StreamDecoder, decode_utf16, encode_utf16};
//!
//! let bytes = encode_utf16("modem ✓");
//! assert_eq!(decode_utf16(&bytes, DecodeOptions::default()).unwrap(), "modem ✓");
//!
//! // A scalar split across chunk boundaries decodes once it completes.
//! let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
//! assert_eq!(decoder.feed(&[0xE2, 0x9C]).unwrap(), "");
//! assert_eq!(decoder.feed(&[0x93]).unwrap(), "✓");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod error;
mod options;
mod scalar;
mod stream;
mod utf8;
mod utf16;
mod utf32;

#[doc(hidden)]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::CodecError;
pub use options::DecodeOptions;
pub use scalar::{MAX_SCALAR_VALUE, REPLACEMENT_CHAR, is_scalar_value};
pub use stream::{Utf8StreamDecoder, Utf8TextStream};
pub use utf8::{
    Utf8Chars, decode_utf8, decode_utf8_lazy, encode_utf8, encode_utf8_units, has_utf8_bom,
};
pub use utf16::{
    Utf16Chars, decode_utf16, decode_utf16_lazy, decode_utf16_units, decode_utf16be,
    decode_utf16be_lazy, decode_utf16le, decode_utf16le_lazy, encode_utf16, encode_utf16_units,
    encode_utf16be, encode_utf16le, has_utf16_bom, has_utf16be_bom, has_utf16le_bom,
};
pub use utf32::{
    Utf32Chars, decode_utf32, decode_utf32_lazy, decode_utf32be, decode_utf32be_lazy,
    decode_utf32le, decode_utf32le_lazy, encode_utf32, encode_utf32_units, encode_utf32be,
    encode_utf32le, has_utf32_bom, has_utf32be_bom, has_utf32le_bom,
};
