// mod.rs - Data structures module

pub mod alignment;
pub mod loaders;
pub mod locus;

// Re-export main types for convenience
pub use alignment::{symbol_frequencies, Alignment};
pub use locus::{check_loci_bounds, merge_loci, sort_loci, Locus};
