//! Bounded, backtrackable cursors over borrowed element slices.
//!
//! Every decoder in this crate walks its input through a [`Cursor`]: the only
//! component that touches raw indices. Decoders reason purely in
//! advance / backup / remaining terms, which keeps resynchronization after a
//! malformed sequence tractable without re-deriving offsets.
//!
//! A cursor may span *two* segments (see [`Cursor::split`]): the streaming
//! decoder reads its carried-over bytes followed by the newly fed chunk as
//! one logical sequence without copying the chunk.

use alloc::vec::Vec;

use crate::error::CodecError;

/// A bounded window over one or two borrowed slices, with single or
/// multi-step backup, skip, absolute position and remaining-count queries.
///
/// Positions are absolute indices into the logical backing sequence
/// (`head` followed by `tail`); the window invariant
/// `start <= position <= end` holds at all times.
#[derive(Debug, Clone)]
pub struct Cursor<'a, T: Copy> {
    head: &'a [T],
    tail: &'a [T],
    start: usize,
    end: usize,
    /// Number of elements consumed from the start of the backing sequence.
    pos: usize,
    /// Set when an advance past the window end was attempted.
    depleted: bool,
}

impl<'a, T: Copy> Cursor<'a, T> {
    /// A cursor over the whole of `data`.
    #[must_use]
    pub fn new(data: &'a [T]) -> Self {
        Self::split(&[], data)
    }

    /// A cursor over the sub-window `[offset, offset + len)` of `data`.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if the window extends past the end of
    /// `data`.
    pub fn with_window(data: &'a [T], offset: usize, len: usize) -> Result<Self, CodecError> {
        let end = offset.checked_add(len).filter(|&end| end <= data.len());
        let Some(end) = end else {
            return Err(CodecError::OutOfRange {
                position: offset.saturating_add(len),
                window: data.len(),
            });
        };
        Ok(Self {
            head: &[],
            tail: data,
            start: offset,
            end,
            pos: offset,
            depleted: false,
        })
    }

    /// A cursor over the logical concatenation of `head` and `tail`.
    ///
    /// Elements of `head` occupy positions `0..head.len()`, elements of
    /// `tail` the positions after; neither slice is copied.
    #[must_use]
    pub fn split(head: &'a [T], tail: &'a [T]) -> Self {
        let end = head.len() + tail.len();
        Self {
            head,
            tail,
            start: 0,
            end,
            pos: 0,
            depleted: false,
        }
    }

    fn at(&self, index: usize) -> T {
        if index < self.head.len() {
            self.head[index]
        } else {
            self.tail[index - self.head.len()]
        }
    }

    /// Advances to the next element. Returns `false` at the window end.
    pub fn advance(&mut self) -> bool {
        if self.pos < self.end {
            self.pos += 1;
            self.depleted = false;
            true
        } else {
            self.depleted = true;
            false
        }
    }

    /// The element the cursor last advanced onto.
    ///
    /// # Errors
    ///
    /// [`CodecError::EmptyCursor`] before the first successful
    /// [`advance`](Self::advance), after a failed advance at the window end,
    /// or after backing up to the window start.
    pub fn current(&self) -> Result<T, CodecError> {
        if self.pos == self.start || self.depleted {
            return Err(CodecError::EmptyCursor);
        }
        Ok(self.at(self.pos - 1))
    }

    /// Rewinds the cursor by `n` elements.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if the move would cross the window start;
    /// the cursor is left unchanged in that case.
    pub fn backup(&mut self, n: usize) -> Result<(), CodecError> {
        if n > self.pos - self.start {
            return Err(CodecError::OutOfRange {
                position: self.pos.saturating_sub(n),
                window: self.end - self.start,
            });
        }
        self.pos -= n;
        self.depleted = false;
        Ok(())
    }

    /// Advances by `n` elements without producing values.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if the move would cross the window end;
    /// the cursor is left unchanged in that case.
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        if n > self.end - self.pos {
            return Err(CodecError::OutOfRange {
                position: self.pos + n,
                window: self.end - self.start,
            });
        }
        self.pos += n;
        Ok(())
    }

    /// Absolute index (into the backing sequence) of the next unread element.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of elements left in the window.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// The next element, without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<T> {
        (self.pos < self.end).then(|| self.at(self.pos))
    }

    /// Advances and returns the element advanced onto, or `None` at the
    /// window end.
    ///
    /// This is an inherent method rather than an `Iterator` impl: the
    /// blanket `impl Iterator for &mut I` would otherwise shadow
    /// [`position`](Self::position) and [`skip`](Self::skip) on `&mut`
    /// receivers with the iterator adapters of the same names.
    #[expect(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<T> {
        if self.advance() {
            Some(self.at(self.pos - 1))
        } else {
            None
        }
    }

    /// Rewinds to an absolute position previously obtained from
    /// [`position`](Self::position). Internal helper for resynchronization.
    pub(crate) fn rewind_to(&mut self, pos: usize) {
        debug_assert!(self.start <= pos && pos <= self.pos);
        self.pos = pos;
        self.depleted = false;
    }

    /// Copies the window tail starting at absolute position `from`, crossing
    /// the segment seam if needed. Used to save the streaming carry buffer.
    pub(crate) fn copy_from(&self, from: usize) -> Vec<T> {
        debug_assert!(self.start <= from && from <= self.end);
        (from..self.end).map(|i| self.at(i)).collect()
    }
}
