//! A fixed-capacity byte buffer refilled from a blocking reader.
//!
//! The unconsumed bytes live in `[cursor, end)`. A refill compacts that
//! region to offset 0 and reads more bytes into the tail, so a slice index
//! taken before a refill is invalid after it. The lexers therefore never
//! trigger a refill while holding positions into the window.

use std::io::{self, Read};

use crate::errors::Result;

/// Default buffer capacity, enough that refills are rare even for large
/// documents.
pub(super) const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Smallest usable capacity. The buffer must be able to hold any indivisible
/// token (a whole start tag, declaration or processing instruction).
pub(super) const MIN_CAPACITY: usize = 4096;

pub(super) struct Buffer {
    data: Box<[u8]>,
    cursor: usize,
    end: usize,
    /// A read returned 0 bytes; the stream has no more data.
    exhausted: bool,
    /// Cumulative bytes read from the stream.
    total: u64,
}

impl Buffer {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            cursor: 0,
            end: 0,
            exhausted: false,
            total: 0,
        }
    }

    /// The unconsumed window `[cursor, end)`.
    #[inline]
    pub(super) fn window(&self) -> &[u8] {
        &self.data[self.cursor..self.end]
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.end - self.cursor
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.cursor == self.end
    }

    #[inline]
    pub(super) fn exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub(super) fn total(&self) -> u64 {
        self.total
    }

    /// Consumes `n` bytes of the window.
    #[inline]
    pub(super) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.cursor += n;
    }

    /// Compacts the window to offset 0 and reads more bytes into the tail.
    ///
    /// Returns the number of bytes read: 0 at end of stream, and also 0
    /// when the window already fills the whole buffer (an oversized token;
    /// the caller's terminator search will fail and report it). Interrupted
    /// reads are retried.
    pub(super) fn refill(&mut self, source: &mut impl Read) -> Result<usize> {
        let unprocessed = self.end - self.cursor;
        self.data.copy_within(self.cursor..self.end, 0);
        self.cursor = 0;
        self.end = unprocessed;

        if self.exhausted || self.end == self.data.len() {
            return Ok(0);
        }
        loop {
            match source.read(&mut self.data[self.end..]) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(0);
                }
                Ok(n) => {
                    self.end += n;
                    self.total += n as u64;
                    return Ok(n);
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
