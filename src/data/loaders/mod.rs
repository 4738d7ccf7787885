// mod.rs - Input loaders for alignments and locus tables

pub mod fasta;
pub mod nexus;
pub mod uces;

pub use fasta::{load_fasta, read_fasta, FASTA_ALPHABET};
pub use nexus::{alphabet_for_datatype, load_nexus, parse_nexus, NexusFile};
pub use uces::{load_uces, read_uces};
