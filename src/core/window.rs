// window.rs - Window and extent value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Half-open column interval `[start, stop)` marking the core of a 3-way split.
///
/// Within a parent extent of `n` columns the window splits it into the left
/// flank `[0, start)`, the core `[start, stop)` and the right flank `[stop, n)`.
/// `start <= stop` always holds: [`Window::new`] orients reversed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Window {
    start: usize,
    stop: usize,
}

impl Window {
    pub fn new(start: usize, stop: usize) -> Self {
        if start <= stop {
            Self { start, stop }
        } else {
            Self {
                start: stop,
                stop: start,
            }
        }
    }

    /// Inclusive first column of the core
    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end of the core
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Number of columns in the core
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Move the window by `offset` columns, e.g. from locus-local to alignment coordinates
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            stop: self.stop + offset,
        }
    }

    /// Left flank, core and right flank ranges within an extent of `extent_len` columns
    pub fn segments(&self, extent_len: usize) -> [Range<usize>; 3] {
        [0..self.start, self.start..self.stop, self.stop..extent_len]
    }

    /// Lengths of the left flank, core and right flank
    pub fn segment_lengths(&self, extent_len: usize) -> [usize; 3] {
        [
            self.start,
            self.len(),
            extent_len.saturating_sub(self.stop),
        ]
    }

    /// Position of `column` relative to the window: -1 before, 0 inside, 1 after
    pub fn relative_position(&self, column: usize) -> i8 {
        if column < self.start {
            -1
        } else if column >= self.stop {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.stop)
    }
}

/// Half-open column range of a locus within the full alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Extent {
    pub start: usize,
    pub stop: usize,
}

impl Extent {
    pub fn new(start: usize, stop: usize) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    /// Smallest extent covering both
    pub fn hull(&self, other: &Extent) -> Extent {
        Extent {
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}
