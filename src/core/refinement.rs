// refinement.rs - Seed-and-refine window search for long extents

use crate::core::candidates::{generate_seeds, generate_within};
use crate::core::error::Result;
use crate::core::selection::{select_best, select_best_n, BestWindows, MetricSeries};
use crate::core::window::{Extent, Window};
use std::collections::BTreeSet;

/// Intermediate state of a refined search, kept for inspection and tests
#[derive(Debug, Clone)]
pub struct Refinement {
    /// Seeds scored in the coarse pass
    pub seeds: Vec<Window>,
    /// Candidate pool scored in the fine pass
    pub candidates: Vec<Window>,
    pub best: BestWindows,
}

/// Neighbourhood of `seed` in which the fine pass looks for windows
fn neighbourhood(seed: Window, min_win: usize, extent_len: usize) -> Extent {
    Extent::new(
        seed.start().saturating_sub(min_win),
        (seed.stop() + min_win).min(extent_len),
    )
}

/// Two-pass search over `[0, extent_len)`.
///
/// Coarse pass: score half-overlapping seeds of `min_win` columns and keep
/// the top `n_candidates` per metric. Fine pass: enumerate every admissible
/// window whose bounds fall within `min_win` of a kept seed, add the window
/// spanning all kept seeds, and select the best among them.
pub fn refine_detailed(
    series: &MetricSeries<'_>,
    extent_len: usize,
    invariant: Option<&[bool]>,
    min_win: usize,
    prefer_large_core: bool,
    n_candidates: usize,
) -> Result<Refinement> {
    let seeds = generate_seeds(0, extent_len, min_win)?;
    let ranked = select_best_n(
        series,
        &seeds,
        extent_len,
        invariant,
        prefer_large_core,
        n_candidates.max(1),
    )?;

    let kept: BTreeSet<Window> = ranked.values().flatten().copied().collect();

    let mut pool = BTreeSet::new();
    for &seed in &kept {
        pool.extend(generate_within(
            extent_len,
            min_win,
            neighbourhood(seed, min_win, extent_len),
        ));
    }

    let first_start = kept.iter().map(|w| w.start()).min();
    let last_stop = kept.iter().map(|w| w.stop()).max();
    if let (Some(start), Some(stop)) = (first_start, last_stop) {
        pool.insert(Window::new(start, stop));
    }
    // Seeds always survive into the fine pass
    pool.extend(kept.iter().copied());

    let candidates: Vec<Window> = pool.into_iter().collect();
    let best = select_best(series, &candidates, extent_len, invariant, prefer_large_core)?;

    Ok(Refinement {
        seeds,
        candidates,
        best,
    })
}

/// Best window per metric found by the seed-and-refine search
pub fn refine(
    series: &MetricSeries<'_>,
    extent_len: usize,
    invariant: Option<&[bool]>,
    min_win: usize,
    prefer_large_core: bool,
    n_candidates: usize,
) -> Result<BestWindows> {
    refine_detailed(
        series,
        extent_len,
        invariant,
        min_win,
        prefer_large_core,
        n_candidates,
    )
    .map(|r| r.best)
}
