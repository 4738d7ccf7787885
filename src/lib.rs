// lib.rs - ucecore library root

//! # ucecore - Core/flank partitioning of ultraconserved element alignments
//!
//! For every locus (UCE) of a multi-sequence alignment, this library finds the
//! window that best separates a conserved core from its two more variable
//! flanks, scoring candidate splits with per-column Shannon entropy or GC
//! content. The chosen windows drive partitioning for PartitionFinder2.
//!
//! ## Features
//!
//! - **Exact scoring**: scale-normalized segment sums of squares with explicit tie-breaking
//! - **Seed-and-refine search**: near-linear candidate counts on long loci, or exhaustive search
//! - **Parallel loci**: one rayon task per locus with per-locus error isolation
//! - **Multiple inputs**: NEXUS with charsets, or aligned FASTA plus a UCE table
//! - **Multiple outputs**: per-site CSV table, PartitionFinder2 `.cfg`, JSON summary
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use ucecore::prelude::*;
//!
//! let nexus = load_nexus(std::path::Path::new("loci.nex"))?;
//! let alphabet = nexus.alphabet()?;
//! let config = SearchConfig {
//!     metrics: vec![MetricKind::Entropy],
//!     min_win: 50,
//!     ..SearchConfig::default()
//! };
//!
//! let metrics = SiteMetrics::compute(&nexus.alignment, alphabet.as_bytes(), &config.metrics)
//!     .map_err(|e| e.to_string())?;
//! let outcomes = process_loci(&nexus.charsets, &metrics, &config, false);
//! for outcome in &outcomes {
//!     if let Ok(result) = &outcome.result {
//!         println!("{}: {}", outcome.locus.name, result.windows[&MetricKind::Entropy]);
//!     }
//! }
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, InputSource, ValidationResult};
    pub use crate::core::{process_locus, process_loci, select_best, select_best_n};
    pub use crate::core::{Extent, MetricKind, SearchConfig, SearchStrategy, SiteMetrics, Window};
    pub use crate::core::{LocusOutcome, LocusResult, WindowError};
    pub use crate::data::loaders::{load_fasta, load_nexus, load_uces};
    pub use crate::data::{Alignment, Locus};
    pub use crate::output::{write_pfinder_cfg, write_sites_csv, write_summary_json};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use crate::core::{Extent, MetricKind, SearchConfig, SearchStrategy, SiteMetrics, Window, WindowError};
pub use data::{Alignment, Locus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "ucecore v{} - Sliding-window core/flank partitioning for UCE alignments",
        VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_info() {
        assert!(get_info().starts_with("ucecore v"));
        assert!(get_info().contains(VERSION));
    }
}
