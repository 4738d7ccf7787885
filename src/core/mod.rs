// mod.rs - Core window-search engine module

pub mod candidates;
pub mod error;
pub mod invariants;
pub mod locus;
pub mod metrics;
pub mod refinement;
pub mod scoring;
pub mod selection;
pub mod window;

// Re-export main types for convenience
pub use candidates::{candidate_count, generate_all, generate_seeds, generate_within};
pub use error::{Result, WindowError};
pub use invariants::{all_invariant, invariant_sites};
pub use locus::{
    analyze_locus, process_locus, process_loci, use_full_range, validate_min_win, LocusOutcome,
    LocusResult, SearchConfig, SearchStrategy,
};
pub use metrics::{column_entropy, BaseCounts, MetricKind, SiteMetrics};
pub use refinement::{refine, refine_detailed, Refinement};
pub use scoring::{compare_scores, score_window, segment_length_variance, segment_sse};
pub use selection::{select_best, select_best_n, BestWindows, MetricSeries, TIE_TOLERANCE};
pub use window::{Extent, Window};
