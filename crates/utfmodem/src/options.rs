use crate::scalar::REPLACEMENT_CHAR;

/// Configuration options for the byte-to-text decoders.
///
/// The replacement policy is fixed when a decoder is constructed and cannot
/// change for the lifetime of that decode call or streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Substitute for each malformed or truncated sequence.
    ///
    /// `Some(c)` recovers locally and silently by emitting `c`; `None` puts
    /// the decoder in strict mode, where the first malformed element fails
    /// the whole call with [`CodecError::InvalidEncoding`] or
    /// [`CodecError::TruncatedInput`].
    ///
    /// [`CodecError::InvalidEncoding`]: crate::CodecError::InvalidEncoding
    /// [`CodecError::TruncatedInput`]: crate::CodecError::TruncatedInput
    ///
    /// # Default
    ///
    /// `Some('\u{FFFD}')`
    pub replacement: Option<char>,

    /// Whether the explicit big/little-endian UTF-16 and UTF-32 decoders
    /// strip their own byte-order mark when the input starts with one.
    ///
    /// The endianness-sniffing entry points (`decode_utf16`, `decode_utf32`)
    /// always strip a BOM they detect, regardless of this flag. UTF-8 decode
    /// never strips a BOM.
    ///
    /// # Default
    ///
    /// `true`
    pub strip_bom: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            replacement: Some(REPLACEMENT_CHAR),
            strip_bom: true,
        }
    }
}

impl DecodeOptions {
    /// Options with no replacement character: the first malformed sequence
    /// fails the decode call.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            replacement: None,
            ..Self::default()
        }
    }
}
