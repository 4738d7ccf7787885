// scoring.rs - Segment homogeneity scoring for candidate windows

use crate::core::invariants::all_invariant;
use crate::core::window::Window;
use std::cmp::Ordering;

/// Scale-normalized sum of squares of one segment: `Σ (v / mean)²`.
///
/// Values are divided by the segment mean, not centered on it. An empty
/// segment has no mean and scores NaN, as does a segment whose mean is 0.
pub fn segment_sse(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v / mean).powi(2)).sum()
}

/// Score of splitting `values` into left flank, core and right flank at `window`.
///
/// With `invariant` flags supplied, a window leaving any segment made only
/// of invariant columns is disqualified with `+inf`.
pub fn score_window(values: &[f64], window: Window, invariant: Option<&[bool]>) -> f64 {
    debug_assert!(window.stop() <= values.len());
    let segments = window.segments(values.len());

    if segments.iter().any(|r| r.is_empty()) {
        return f64::NAN;
    }
    if let Some(flags) = invariant {
        if segments.iter().any(|r| all_invariant(&flags[r.clone()])) {
            return f64::INFINITY;
        }
    }

    segments
        .iter()
        .map(|r| segment_sse(&values[r.clone()]))
        .sum()
}

/// Total order on scores: ascending, every NaN after every number (including `+inf`)
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Spread of the three segment lengths, `3·Σx² − (Σx)²`.
///
/// Proportional to their sample variance (`spread / 6`) but exact, so
/// windows with permuted segment lengths compare equal.
pub fn length_spread(window: Window, extent_len: usize) -> u128 {
    let lengths = window.segment_lengths(extent_len);
    let sum: u128 = lengths.iter().map(|&x| x as u128).sum();
    let sum_sq: u128 = lengths.iter().map(|&x| (x as u128) * (x as u128)).sum();
    3 * sum_sq - sum * sum
}

/// Sample variance of the left, core and right segment lengths
pub fn segment_length_variance(window: Window, extent_len: usize) -> f64 {
    length_spread(window, extent_len) as f64 / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_segment_sse_is_scale_normalized() {
        // mean 2: (1/2)² + (3/2)² = 2.5, not the classical 2.0
        assert!((segment_sse(&[1.0, 3.0]) - 2.5).abs() < EPS);
        // Constant segment: every term is 1
        assert!((segment_sse(&[4.2, 4.2, 4.2]) - 3.0).abs() < EPS);
        assert!(segment_sse(&[]).is_nan());
        assert!(segment_sse(&[0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_score_window() {
        let values = [1.0, 3.0, 2.0, 2.0, 5.0, 5.0];
        let score = score_window(&values, Window::new(2, 4), None);
        assert!((score - (2.5 + 2.0 + 2.0)).abs() < EPS);
    }

    #[test]
    fn test_invariant_segment_disqualifies_window() {
        let values = [0.0, 0.0, 1.0, 1.2, 0.8, 0.9];
        let flags = [true, true, false, false, false, false];
        assert_eq!(
            score_window(&values, Window::new(2, 4), Some(&flags)),
            f64::INFINITY
        );
        // Without flags the zero-mean flank is undefined rather than infinite
        assert!(score_window(&values, Window::new(2, 4), None).is_nan());
        // A flank with one variable column is scored normally: 9 + 2.08 + 1
        let score = score_window(&values, Window::new(3, 5), Some(&flags));
        assert!((score - 12.08).abs() < 1e-9);
    }

    #[test]
    fn test_empty_segment_scores_nan() {
        let values = [1.0, 2.0, 3.0];
        assert!(score_window(&values, Window::new(0, 2), None).is_nan());
        assert!(score_window(&values, Window::new(1, 3), None).is_nan());
    }

    #[test]
    fn test_compare_scores_puts_nan_last() {
        let mut scores = vec![f64::NAN, 3.0, f64::INFINITY, -f64::NAN, 1.0];
        scores.sort_by(|a, b| compare_scores(*a, *b));
        assert_eq!(scores[0], 1.0);
        assert_eq!(scores[1], 3.0);
        assert_eq!(scores[2], f64::INFINITY);
        assert!(scores[3].is_nan() && scores[4].is_nan());
    }

    #[test]
    fn test_length_variance() {
        // Segments 2, 2, 2 are perfectly balanced
        assert_eq!(length_spread(Window::new(2, 4), 6), 0);
        // Segments 2, 3, 3: sample variance 1/3
        let v = segment_length_variance(Window::new(2, 5), 8);
        assert!((v - 1.0 / 3.0).abs() < EPS);
        // Permuted lengths compare exactly equal
        assert_eq!(
            length_spread(Window::new(2, 5), 9),
            length_spread(Window::new(4, 7), 9)
        );
    }
}
