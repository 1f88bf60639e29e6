use thiserror::Error;

/// Errors surfaced by the decoders and the streaming adapter.
///
/// Malformed input only produces an error in strict mode (see
/// [`DecodeOptions::replacement`](crate::DecodeOptions)); the structural
/// variants (`OutOfRange`, `AlreadyBound`, `EmptyCursor`) denote caller
/// misuse and are fatal regardless of the replacement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A malformed or out-of-range byte/unit sequence in strict mode.
    #[error("invalid encoding at position {position}")]
    InvalidEncoding {
        /// Index of the first element of the rejected sequence. For the
        /// streaming decoder this is a global stream byte offset.
        position: usize,
    },

    /// The input ended in the middle of a multi-byte/unit sequence.
    #[error("input ends mid-sequence at position {position}")]
    TruncatedInput {
        /// Index where the incomplete sequence starts.
        position: usize,
    },

    /// A cursor was asked to move outside its window, or a window was
    /// requested outside its backing sequence.
    #[error("position {position} is outside the window of length {window}")]
    OutOfRange {
        /// The offending position.
        position: usize,
        /// Length of the violated window.
        window: usize,
    },

    /// A streaming session was bound, fed, or closed after its lifecycle
    /// ended, or bound more than once.
    #[error("stream decoder is already bound")]
    AlreadyBound,

    /// `current` was read before a successful advance.
    #[error("cursor read before a successful advance")]
    EmptyCursor,
}
