// selection.rs - Best-window selection with deterministic tie-breaking

use crate::core::error::{Result, WindowError};
use crate::core::metrics::MetricKind;
use crate::core::scoring::{compare_scores, length_spread, score_window};
use crate::core::window::Window;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Scores closer than this to the minimum are treated as tied
pub const TIE_TOLERANCE: f64 = 1e-10;

/// Metric values over one extent, keyed by metric
pub type MetricSeries<'a> = BTreeMap<MetricKind, &'a [f64]>;

/// Best window per metric
pub type BestWindows = BTreeMap<MetricKind, Window>;

fn size_preference(a: &Window, b: &Window, prefer_large_core: bool) -> Ordering {
    if prefer_large_core {
        b.len().cmp(&a.len())
    } else {
        a.len().cmp(&b.len())
    }
}

/// Order tied windows: by start, then (stably) by core size preference
fn order_ties(ties: &mut [Window], prefer_large_core: bool) {
    ties.sort_by_key(|w| w.start());
    ties.sort_by(|a, b| size_preference(a, b, prefer_large_core));
}

/// First window in `ties` with the most balanced left/core/right lengths
fn most_balanced(ties: &[Window], extent_len: usize) -> Option<Window> {
    let mut best: Option<(u128, Window)> = None;
    for &w in ties {
        let spread = length_spread(w, extent_len);
        match best {
            Some((best_spread, _)) if spread >= best_spread => {}
            _ => best = Some((spread, w)),
        }
    }
    best.map(|(_, w)| w)
}

fn is_tied(score: f64, best: f64) -> bool {
    !score.is_nan() && (score == best || (score - best).abs() <= TIE_TOLERANCE)
}

/// Pick the best window per metric among `candidates`.
///
/// The minimum non-NaN score is found and every candidate within
/// [`TIE_TOLERANCE`] of it is kept. Ties are ordered by start, then by core
/// size (`prefer_large_core`), and the first window with the least variance
/// in segment lengths wins. A single candidate skips tie-breaking but is
/// still scored, so a NaN-only metric fails with `UndefinedScores`.
pub fn select_best(
    series: &MetricSeries<'_>,
    candidates: &[Window],
    extent_len: usize,
    invariant: Option<&[bool]>,
    prefer_large_core: bool,
) -> Result<BestWindows> {
    if candidates.is_empty() {
        return Err(WindowError::NoCandidates);
    }
    let mut best_windows = BestWindows::new();
    for (&kind, values) in series {
        let scores: Vec<f64> = candidates
            .iter()
            .map(|&w| score_window(values, w, invariant))
            .collect();

        let best = scores
            .iter()
            .copied()
            .filter(|s| !s.is_nan())
            .min_by(|a, b| compare_scores(*a, *b))
            .ok_or(WindowError::UndefinedScores { metric: kind })?;

        if candidates.len() == 1 {
            best_windows.insert(kind, candidates[0]);
            continue;
        }

        let mut ties: Vec<Window> = candidates
            .iter()
            .zip(&scores)
            .filter(|(_, &s)| is_tied(s, best))
            .map(|(&w, _)| w)
            .collect();
        order_ties(&mut ties, prefer_large_core);

        let chosen = most_balanced(&ties, extent_len)
            .ok_or(WindowError::UndefinedScores { metric: kind })?;
        best_windows.insert(kind, chosen);
    }
    Ok(best_windows)
}

/// Top `n` windows per metric, ranked by score, then segment-length
/// variance, then core size preference. NaN scores rank last.
pub fn select_best_n(
    series: &MetricSeries<'_>,
    candidates: &[Window],
    extent_len: usize,
    invariant: Option<&[bool]>,
    prefer_large_core: bool,
    n: usize,
) -> Result<BTreeMap<MetricKind, Vec<Window>>> {
    if candidates.is_empty() {
        return Err(WindowError::NoCandidates);
    }

    let mut ranked_windows = BTreeMap::new();
    for (&kind, values) in series {
        let mut ranked: Vec<(f64, u128, Window)> = candidates
            .iter()
            .map(|&w| {
                (
                    score_window(values, w, invariant),
                    length_spread(w, extent_len),
                    w,
                )
            })
            .collect();

        ranked.sort_by(|a, b| {
            compare_scores(a.0, b.0)
                .then(a.1.cmp(&b.1))
                .then_with(|| size_preference(&a.2, &b.2, prefer_large_core))
                .then(a.2.cmp(&b.2))
        });

        let top = ranked.into_iter().take(n).map(|(_, _, w)| w).collect();
        ranked_windows.insert(kind, top);
    }
    Ok(ranked_windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::candidates::generate_all;

    fn entropy_series(values: &[f64]) -> MetricSeries<'_> {
        let mut series = MetricSeries::new();
        series.insert(MetricKind::Entropy, values);
        series
    }

    #[test]
    fn test_exhaustive_best_for_reversed_sequence() {
        let entropies = [0.6365, 0.6365, 0.6365, 0.6365, 0.6365, 1.3297];
        let candidates = generate_all(entropies.len(), 2).unwrap();
        let best = select_best(
            &entropy_series(&entropies),
            &candidates,
            entropies.len(),
            None,
            false,
        )
        .unwrap();
        assert_eq!(best[&MetricKind::Entropy], Window::new(2, 4));
    }

    #[test]
    fn test_single_candidate_returned_when_scored() {
        let entropies = [0.5, 0.7, 0.1, 0.1, 0.6, 0.9];
        let gc = [0.3, 0.6, 1.0, 1.0, 0.4, 0.5];
        let mut series = MetricSeries::new();
        series.insert(MetricKind::Gc, &gc[..]);
        series.insert(MetricKind::Entropy, &entropies[..]);

        let best = select_best(&series, &[Window::new(2, 4)], 6, None, true).unwrap();
        assert_eq!(best.len(), 2);
        assert!(best.values().all(|&w| w == Window::new(2, 4)));
    }

    #[test]
    fn test_single_nan_candidate_fails() {
        // Zero-mean flanks score NaN even when there is nothing else to pick
        let gc = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0];
        assert_eq!(
            select_best(
                &entropy_series(&gc),
                &[Window::new(2, 4)],
                6,
                None,
                false
            ),
            Err(WindowError::UndefinedScores {
                metric: MetricKind::Entropy
            })
        );
    }

    #[test]
    fn test_tie_tolerance() {
        // One perturbed column in the left flank; constant elsewhere.
        // Score excess over the flat case is about delta^2 * (L - 1) / L
        // for a left flank of L columns.
        let candidates = generate_all(9, 2).unwrap();

        // delta = 1e-6: every window lies within 1e-10 of the minimum, so the
        // balance rule decides exactly as for a flat series
        let mut nearly_flat = [1.0; 9];
        nearly_flat[0] = 1.0 + 1e-6;
        let best =
            select_best(&entropy_series(&nearly_flat), &candidates, 9, None, false).unwrap();
        assert_eq!(best[&MetricKind::Entropy], Window::new(3, 6));

        // delta = 1e-3: only windows with a two-column left flank remain tied
        let mut perturbed = [1.0; 9];
        perturbed[0] = 1.0 + 1e-3;
        let series = entropy_series(&perturbed);
        let s_25 = score_window(&perturbed, Window::new(2, 5), None);
        let s_36 = score_window(&perturbed, Window::new(3, 6), None);
        assert!(s_36 - s_25 > TIE_TOLERANCE);
        let best = select_best(&series, &candidates, 9, None, false).unwrap();
        assert_eq!(best[&MetricKind::Entropy], Window::new(2, 5));
        let large = select_best(&series, &candidates, 9, None, true).unwrap();
        assert_eq!(large[&MetricKind::Entropy], Window::new(2, 6));

        assert!(is_tied(1.0 + 5e-11, 1.0));
        assert!(!is_tied(1.0 + 1e-9, 1.0));
        assert!(!is_tied(f64::NAN, 1.0));
        assert!(is_tied(f64::INFINITY, f64::INFINITY));
    }

    #[test]
    fn test_ties_resolved_by_balanced_lengths() {
        // Constant values: every window scores exactly 9
        let values = [1.0; 9];
        let candidates = generate_all(9, 2).unwrap();
        let best = select_best(&entropy_series(&values), &candidates, 9, None, false).unwrap();
        assert_eq!(best[&MetricKind::Entropy], Window::new(3, 6));
    }

    #[test]
    fn test_core_size_preference() {
        // 3/3/4, 3/4/3 and 4/3/3 splits are equally balanced
        let values = [1.0; 10];
        let candidates = generate_all(10, 2).unwrap();
        let series = entropy_series(&values);

        let large = select_best(&series, &candidates, 10, None, true).unwrap();
        assert_eq!(large[&MetricKind::Entropy], Window::new(3, 7));

        let small = select_best(&series, &candidates, 10, None, false).unwrap();
        assert_eq!(small[&MetricKind::Entropy], Window::new(3, 6));
    }

    #[test]
    fn test_nan_scores_never_selected() {
        // Any window starting at 2 leaves a zero-mean left flank
        let values = [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let candidates = generate_all(values.len(), 2).unwrap();
        let best = select_best(&entropy_series(&values), &candidates, 8, None, false).unwrap();
        assert!(best[&MetricKind::Entropy].start() >= 3);
    }

    #[test]
    fn test_all_nan_scores_fail() {
        let values = [0.0; 8];
        let candidates = generate_all(values.len(), 2).unwrap();
        assert_eq!(
            select_best(&entropy_series(&values), &candidates, 8, None, false),
            Err(WindowError::UndefinedScores {
                metric: MetricKind::Entropy
            })
        );
        assert_eq!(
            select_best(&entropy_series(&values), &[], 8, None, false),
            Err(WindowError::NoCandidates)
        );
    }

    #[test]
    fn test_fully_invariant_extent_falls_back_to_balance() {
        // Every window is disqualified; the most balanced one is still reported
        let values = [0.0; 9];
        let flags = [true; 9];
        let candidates = generate_all(9, 2).unwrap();
        let best = select_best(&entropy_series(&values), &candidates, 9, Some(&flags), false)
            .unwrap();
        assert_eq!(best[&MetricKind::Entropy], Window::new(3, 6));
    }

    #[test]
    fn test_selection_is_order_independent() {
        let values = [1.2, 0.4, 0.1, 0.1, 0.2, 0.1, 0.9, 1.5, 1.1, 1.3];
        let series = entropy_series(&values);
        let mut candidates = generate_all(values.len(), 2).unwrap();

        let forward = select_best(&series, &candidates, 10, None, false).unwrap();
        candidates.reverse();
        let backward = select_best(&series, &candidates, 10, None, false).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            select_best(&series, &candidates, 10, None, false).unwrap()
        );
    }

    #[test]
    fn test_select_best_n_ranks_and_truncates() {
        let values = [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let candidates = generate_all(values.len(), 2).unwrap();
        let series = entropy_series(&values);

        let top = select_best_n(&series, &candidates, 8, None, false, 3).unwrap();
        assert_eq!(top[&MetricKind::Entropy].len(), 3);

        // Asking for more than exist returns everything, NaN-scored windows last
        let all = select_best_n(&series, &candidates, 8, None, false, 100).unwrap();
        let ranked = &all[&MetricKind::Entropy];
        assert_eq!(ranked.len(), candidates.len());
        let scores: Vec<f64> = ranked
            .iter()
            .map(|&w| score_window(&values, w, None))
            .collect();
        let first_nan = scores.iter().position(|s| s.is_nan()).unwrap();
        assert!(scores[first_nan..].iter().all(|s| s.is_nan()));
        assert!(scores[..first_nan]
            .windows(2)
            .all(|pair| pair[0] <= pair[1]));

        // The top-ranked window is the one select_best picks
        let best = select_best(&series, &candidates, 8, None, false).unwrap();
        assert_eq!(ranked[0], best[&MetricKind::Entropy]);
    }
}
