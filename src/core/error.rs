// error.rs - Error types for the window-search engine

use crate::core::metrics::MetricKind;
use thiserror::Error;

/// Errors raised while searching a locus for its best core window.
///
/// Every variant is fatal for the locus being processed only; batch
/// processing records it next to the locus and carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    /// `min_win` is incompatible with the extent (`extent / 3 < min_win`)
    #[error("minimum window size {min_win} is too large for an extent of {extent} columns (maximum allowed is {})", .extent / 3)]
    Config { min_win: usize, extent: usize },

    /// The extent cannot hold three segments of `min_win` columns
    #[error("cannot split {length} columns into flanks and core of at least {min_win} columns each")]
    WindowTooSmall { length: usize, min_win: usize },

    #[error("minimum window size must be a positive integer")]
    ZeroMinWindow,

    #[error("no candidate windows to select from")]
    NoCandidates,

    /// Every candidate scored NaN for this metric; nothing can be picked honestly
    #[error("every candidate window has an undefined {metric} score")]
    UndefinedScores { metric: MetricKind },

    #[error("{metric} series has {actual} values, expected {expected}")]
    SeriesLength {
        metric: MetricKind,
        expected: usize,
        actual: usize,
    },

    #[error("extent {start}..{stop} lies outside the {length} alignment columns")]
    ExtentOutOfBounds {
        start: usize,
        stop: usize,
        length: usize,
    },

    #[error("{0} metric is not implemented")]
    UnsupportedMetric(MetricKind),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, WindowError>;
