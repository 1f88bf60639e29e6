//! Incremental, chunk-wise UTF-8 decoding.
//!
//! [`Utf8StreamDecoder`] accepts byte chunks of arbitrary boundaries and
//! emits decoded text as it becomes available. A multi-byte sequence split
//! across chunks is carried over (at most 5 bytes, the longest possible
//! partial lead sequence) and completed when the next chunk arrives; decoded
//! output is never emitted for bytes that later turn out to belong to an
//! incomplete sequence, and the carry is flushed or rejected on close.
//!
//! The decoder is sans-io: it is driven entirely by [`feed`] and [`close`]
//! calls, performs no suspension, and processes each chunk to completion
//! before returning. [`Utf8StreamDecoder::bind`] adapts an upstream iterator
//! of byte chunks into an iterator of text chunks for callers that want the
//! source/sink shape.
//!
//! [`feed`]: Utf8StreamDecoder::feed
//! [`close`]: Utf8StreamDecoder::close

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::BStr;

use crate::{
    cursor::Cursor,
    error::CodecError,
    options::DecodeOptions,
    utf8::{Sequence, decode_sequence},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Idle,
    Receiving,
    Closed,
    Failed,
}

/// A push-based incremental UTF-8 decoder.
///
/// One decoder serves one bound stream: feed it chunks in stream order, then
/// close it exactly once. Reuse after close or after a strict-mode failure
/// fails with [`CodecError::AlreadyBound`].
///
/// # Examples
///
/// ```rust
/// use utfmodem::{DecodeOptions, Utf8StreamDecoder};
///
/// // U+1F44B split across two chunks of two bytes each.
/// let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
/// assert_eq!(decoder.feed(&[0xF0, 0x9F]).unwrap(), "");
/// assert_eq!(decoder.feed(&[0x91, 0x8B]).unwrap(), "👋");
/// assert_eq!(decoder.close().unwrap(), "");
/// ```
#[derive(Clone)]
pub struct Utf8StreamDecoder {
    options: DecodeOptions,
    state: StreamState,
    /// Bytes of an incomplete trailing sequence, carried between chunks.
    carry: Vec<u8>,
    /// Total bytes received so far; carried bytes keep their original
    /// stream offsets for error reporting.
    received: usize,
}

impl Utf8StreamDecoder {
    /// Creates a decoder with the given replacement policy.
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            state: StreamState::Idle,
            carry: Vec::new(),
            received: 0,
        }
    }

    /// Decodes one chunk, returning the text decoded so far (possibly
    /// empty while a split sequence waits for more bytes).
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidEncoding`] in strict mode, naming the global
    /// stream byte offset of the malformed sequence; the session stops
    /// processing afterwards. [`CodecError::AlreadyBound`] if the session
    /// was already closed or has failed.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<String, CodecError> {
        match self.state {
            StreamState::Idle | StreamState::Receiving => self.state = StreamState::Receiving,
            StreamState::Closed | StreamState::Failed => return Err(CodecError::AlreadyBound),
        }

        // Stream offset of logical position 0 in the carry+chunk sequence.
        let base = self.received - self.carry.len();
        self.received += chunk.len();

        let carry = core::mem::take(&mut self.carry);
        let mut cursor = Cursor::split(&carry, chunk);
        let mut out = String::new();
        while cursor.remaining() > 0 {
            let start = cursor.position();
            match decode_sequence(&mut cursor) {
                Sequence::Scalar(c) => out.push(c),
                Sequence::NeedMore => {
                    // Save the unconsumed tail (spanning carry and chunk as
                    // needed) and wait for the next chunk.
                    self.carry = cursor.copy_from(start);
                    break;
                }
                Sequence::Malformed => match self.options.replacement {
                    Some(replacement) => out.push(replacement),
                    None => {
                        self.state = StreamState::Failed;
                        return Err(CodecError::InvalidEncoding {
                            position: base + start,
                        });
                    }
                },
            }
        }
        Ok(out)
    }

    /// Ends the stream, flushing the carry buffer.
    ///
    /// A non-empty carry denotes an incomplete trailing sequence: it becomes
    /// one replacement character per carried byte.
    ///
    /// # Errors
    ///
    /// [`CodecError::TruncatedInput`] in strict mode if bytes were carried;
    /// [`CodecError::AlreadyBound`] if the session was already closed or has
    /// failed.
    pub fn close(&mut self) -> Result<String, CodecError> {
        match self.state {
            StreamState::Idle | StreamState::Receiving => self.state = StreamState::Closed,
            StreamState::Closed | StreamState::Failed => return Err(CodecError::AlreadyBound),
        }

        let carry = core::mem::take(&mut self.carry);
        if carry.is_empty() {
            return Ok(String::new());
        }
        match self.options.replacement {
            Some(replacement) => Ok(carry.iter().map(|_| replacement).collect()),
            None => {
                self.state = StreamState::Failed;
                Err(CodecError::TruncatedInput {
                    position: self.received - carry.len(),
                })
            }
        }
    }

    /// Binds a fresh decoder to an upstream source of byte chunks, producing
    /// an iterator of decoded text chunks.
    ///
    /// The downstream iterator yields zero or more non-empty text chunks and
    /// then ends (the close is forwarded), or yields one error — either an
    /// upstream error forwarded verbatim or the decoder's own strict-mode
    /// failure — and fuses.
    ///
    /// # Errors
    ///
    /// [`CodecError::AlreadyBound`] if this decoder has already received
    /// input or been closed.
    pub fn bind<I>(self, chunks: I) -> Result<Utf8TextStream<I::IntoIter>, CodecError>
    where
        I: IntoIterator<Item = Result<Vec<u8>, CodecError>>,
    {
        if self.state != StreamState::Idle {
            return Err(CodecError::AlreadyBound);
        }
        Ok(Utf8TextStream {
            decoder: self,
            chunks: chunks.into_iter(),
            done: false,
        })
    }
}

impl fmt::Debug for Utf8StreamDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf8StreamDecoder")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("carry", &BStr::new(&self.carry))
            .field("received", &self.received)
            .finish()
    }
}

/// A bound streaming session: byte chunks in, text chunks out.
///
/// Created by [`Utf8StreamDecoder::bind`]. Fuses after the first error.
#[derive(Debug)]
pub struct Utf8TextStream<I> {
    decoder: Utf8StreamDecoder,
    chunks: I,
    done: bool,
}

impl<I> Iterator for Utf8TextStream<I>
where
    I: Iterator<Item = Result<Vec<u8>, CodecError>>,
{
    type Item = Result<String, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.chunks.next() {
                Some(Ok(chunk)) => match self.decoder.feed(&chunk) {
                    Ok(text) if text.is_empty() => {}
                    Ok(text) => return Some(Ok(text)),
                    Err(err) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                },
                // Upstream error: forwarded verbatim, then the stream stops.
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    return match self.decoder.close() {
                        Ok(text) if text.is_empty() => None,
                        Ok(text) => Some(Ok(text)),
                        Err(err) => Some(Err(err)),
                    };
                }
            }
        }
    }
}
