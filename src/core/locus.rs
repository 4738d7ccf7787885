// locus.rs - Per-locus window search and parallel batch processing

use crate::core::candidates::generate_all;
use crate::core::error::{Result, WindowError};
use crate::core::metrics::{BaseCounts, MetricKind, SiteMetrics};
use crate::core::refinement::refine;
use crate::core::selection::{select_best, BestWindows, MetricSeries};
use crate::core::window::{Extent, Window};
use crate::data::alignment::symbol_frequencies;
use crate::data::locus::Locus;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// How candidate windows are produced for a locus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Seed with half-overlapping windows, then search their neighbourhoods
    #[default]
    Refined,
    /// Score every admissible window
    Exhaustive,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Refined => write!(f, "refined"),
            SearchStrategy::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "refined" => Ok(SearchStrategy::Refined),
            "exhaustive" => Ok(SearchStrategy::Exhaustive),
            _ => Err(format!(
                "Invalid search strategy: {}. Use: refined, exhaustive",
                s
            )),
        }
    }
}

/// Immutable parameters of a window search, shared by every locus of a run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub metrics: Vec<MetricKind>,
    pub min_win: usize,
    pub prefer_large_core: bool,
    pub n_candidates: usize,
    pub strategy: SearchStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            metrics: vec![MetricKind::Entropy],
            min_win: 50,
            prefer_large_core: false,
            n_candidates: 3,
            strategy: SearchStrategy::Refined,
        }
    }
}

/// Reject a `min_win` that cannot fit three times into `extent_len` columns
pub fn validate_min_win(extent_len: usize, min_win: usize) -> Result<()> {
    if min_win == 0 {
        return Err(WindowError::ZeroMinWindow);
    }
    if extent_len / 3 < min_win {
        return Err(WindowError::Config {
            min_win,
            extent: extent_len,
        });
    }
    Ok(())
}

/// True when the window leaves a segment that lacks some alphabet symbol
/// altogether. Segments without any determined symbol are included.
///
/// `counts` covers the locus only and `window` is relative to its start.
pub fn use_full_range(window: Window, counts: &BaseCounts) -> bool {
    let extent_len = match counts.values().next() {
        Some(column_counts) => column_counts.len(),
        None => return true,
    };

    window.segments(extent_len).iter().any(|segment| {
        if segment.is_empty() {
            return true;
        }
        let segment_counts: BTreeMap<u8, usize> = counts
            .iter()
            .map(|(&symbol, column_counts)| {
                (symbol, column_counts[segment.clone()].iter().sum::<usize>())
            })
            .collect();
        // An all-zero total gives all-zero frequencies
        symbol_frequencies(&segment_counts)
            .values()
            .any(|&f| f == 0.0)
    })
}

/// Best window per metric within `extent`, relative to `extent.start`
fn search_extent(extent: Extent, metrics: &SiteMetrics, config: &SearchConfig) -> Result<BestWindows> {
    validate_min_win(extent.len(), config.min_win)?;

    let available = metrics.series_in(extent)?;
    let mut series = MetricSeries::new();
    for &kind in &config.metrics {
        if !kind.is_implemented() {
            return Err(WindowError::UnsupportedMetric(kind));
        }
        let values = available.get(&kind).ok_or(WindowError::SeriesLength {
            metric: kind,
            expected: extent.len(),
            actual: 0,
        })?;
        series.insert(kind, *values);
    }
    let invariant = metrics.invariant_in(extent)?;

    match config.strategy {
        SearchStrategy::Exhaustive => {
            let candidates = generate_all(extent.len(), config.min_win)?;
            select_best(
                &series,
                &candidates,
                extent.len(),
                Some(invariant),
                config.prefer_large_core,
            )
        }
        SearchStrategy::Refined => refine(
            &series,
            extent.len(),
            Some(invariant),
            config.min_win,
            config.prefer_large_core,
            config.n_candidates,
        ),
    }
}

/// Best window per metric for the locus at `extent`, in alignment coordinates.
///
/// Pure: reads only its arguments, so loci can be processed concurrently.
pub fn process_locus(
    extent: Extent,
    metrics: &SiteMetrics,
    config: &SearchConfig,
) -> Result<BestWindows> {
    let local = search_extent(extent, metrics, config)?;
    Ok(local
        .into_iter()
        .map(|(kind, window)| (kind, window.shifted(extent.start)))
        .collect())
}

/// Windows found for one locus with their degenerate-split flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocusResult {
    /// Best window per metric, in alignment coordinates
    pub windows: BestWindows,
    /// Per metric: report the whole locus as one partition instead
    pub full_range: BTreeMap<MetricKind, bool>,
}

/// Outcome of processing one locus; errors stay with their locus
#[derive(Debug, Clone)]
pub struct LocusOutcome {
    pub locus: Locus,
    pub result: Result<LocusResult>,
}

impl LocusOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Search one locus and flag degenerate splits
pub fn analyze_locus(locus: &Locus, metrics: &SiteMetrics, config: &SearchConfig) -> Result<LocusResult> {
    let local = search_extent(locus.extent, metrics, config)?;
    let counts = metrics.base_counts_in(locus.extent)?;

    let full_range = local
        .iter()
        .map(|(&kind, &window)| (kind, use_full_range(window, &counts)))
        .collect();
    let windows = local
        .into_iter()
        .map(|(kind, window)| (kind, window.shifted(locus.start())))
        .collect();

    Ok(LocusResult {
        windows,
        full_range,
    })
}

/// Process every locus in parallel on the current rayon pool.
///
/// Outcomes come back ordered by (start, name) whatever order the tasks
/// finish in. A failing locus never stops its siblings.
pub fn process_loci(
    loci: &[Locus],
    metrics: &SiteMetrics,
    config: &SearchConfig,
    show_progress: bool,
) -> Vec<LocusOutcome> {
    let total = loci.len();
    let pb = if show_progress {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let update_interval = std::cmp::max(1, total / 100);
    let completed = Arc::new(AtomicUsize::new(0));

    let mut outcomes: Vec<LocusOutcome> = loci
        .par_iter()
        .map(|locus| {
            let result = analyze_locus(locus, metrics, config);

            let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if count % update_interval == 0 {
                pb.set_position(count as u64);
            }

            LocusOutcome {
                locus: locus.clone(),
                result,
            }
        })
        .collect();

    pb.set_position(total as u64);
    pb.finish_with_message("✅ Window search completed!");

    outcomes.sort_by(|a, b| {
        a.locus
            .start()
            .cmp(&b.locus.start())
            .then_with(|| a.locus.name.cmp(&b.locus.name))
    });
    outcomes
}
