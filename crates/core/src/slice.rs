//! Source slices
//!
//! A `Slice` is a pair of byte offsets into the one immutable source buffer of
//! a run. It never owns or copies text: lambdas are stored as slices and
//! re-scanned each time they are called, so the buffer must outlive every
//! slice taken from it. The runtime enforces that by borrowing the buffer for
//! the whole run.

use std::ops::Range;

/// Half-open byte range `[start, end)` into the source buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Slice {
    start: usize,
    end: usize,
}

impl Slice {
    /// Slice covering `len` bytes starting at `start`
    pub const fn new(start: usize, len: usize) -> Self {
        Slice {
            start,
            end: start + len,
        }
    }

    /// Slice over `len` bytes from `start`, or the empty slice when there is
    /// no buffer position to start from
    pub fn make(start: Option<usize>, len: usize) -> Self {
        match start {
            Some(start) => Slice::new(start, len),
            None => Slice::default(),
        }
    }

    /// Slice over a whole buffer
    pub fn whole(source: &[u8]) -> Self {
        Slice::new(0, source.len())
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The bytes this slice covers
    ///
    /// Out-of-range slices yield an empty view instead of panicking; a slice
    /// is only meaningful for the buffer it was cut from.
    pub fn text<'src>(&self, source: &'src [u8]) -> &'src [u8] {
        source.get(self.range()).unwrap_or_default()
    }
}
