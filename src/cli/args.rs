// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// ucecore - Sliding-window core/flank partitioning of UCE alignments
pub struct Args {
    /// alignment in NEXUS format with UCE charsets (.nex)
    #[argh(option)]
    pub nexus: Option<String>,

    /// aligned multi-FASTA file (.fna, .fasta or .fa); requires --uces
    #[argh(option)]
    pub fasta: Option<String>,

    /// table of UCE ranges (.csv), columns Name,Start,Stop (0-based, inclusive)
    #[argh(option)]
    pub uces: Option<String>,

    /// per-site output table (.csv)
    #[argh(option)]
    pub output: Option<String>,

    /// partitioning config file for PartitionFinder2 (.cfg)
    #[argh(option)]
    pub cfg: Option<String>,

    /// summary of the chosen windows as JSON (.json)
    #[argh(option)]
    pub summary: Option<String>,

    /// minimum size of each flank and of the core (default: 50)
    #[argh(option, default = "50")]
    pub min_win: usize,

    /// prefer the larger core when windows score equally
    #[argh(switch)]
    pub large_core: bool,

    /// number of best seed windows refined per metric (default: 3)
    #[argh(option, default = "3")]
    pub candidates: usize,

    /// score windows with Shannon entropy
    #[argh(switch)]
    pub entropy: bool,

    /// score windows with GC content
    #[argh(switch)]
    pub gc: bool,

    /// score every admissible window instead of seeding and refining
    #[argh(switch)]
    pub exhaustive: bool,

    /// symbols counted by the metrics (default: from the NEXUS datatype, ATGC for FASTA)
    #[argh(option)]
    pub alphabet: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate inputs without searching (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
