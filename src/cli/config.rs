// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub nexus: Option<String>,
    pub fasta: Option<String>,
    pub uces: Option<String>,
    pub output: Option<String>,
    pub cfg: Option<String>,
    pub summary: Option<String>,

    // Window search
    pub min_win: Option<usize>,
    pub large_core: Option<bool>,
    pub candidates: Option<usize>,
    pub exhaustive: Option<bool>,
    pub alphabet: Option<String>,

    // Metrics
    pub entropy: Option<bool>,
    pub gc: Option<bool>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# ucecore.toml - Configuration file for ucecore
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# NEXUS alignment with UCE charsets (use either nexus, or fasta + uces)
nexus = "/path/to/loci.nex"

# Aligned multi-FASTA file and its UCE table (Name,Start,Stop; 0-based inclusive)
# fasta = "/path/to/alignment.fasta"
# uces = "/path/to/uces.csv"

# Per-site output table
output = "sites.csv"

# PartitionFinder2 configuration file
cfg = "partition_finder.cfg"

# JSON summary of the chosen windows
# summary = "summary.json"

# =============================================================================
# WINDOW SEARCH
# =============================================================================

# Minimum size of each flank and of the core
min_win = 50

# Prefer the larger core when windows score equally
large_core = false

# Number of best seed windows refined per metric
candidates = 3

# Score every admissible window instead of seeding and refining (slow on long loci)
exhaustive = false

# Symbols counted by the metrics (omit to derive from the input)
# alphabet = "ATGC"

# =============================================================================
# METRICS
# =============================================================================

entropy = true
gc = false

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
threads = 8

# Validate inputs without searching (dry run)
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();
        assert_eq!(config.nexus.as_deref(), Some("/path/to/loci.nex"));
        assert_eq!(config.min_win, Some(50));
        assert_eq!(config.entropy, Some(true));
        assert_eq!(config.threads, Some(8));
        assert!(config.fasta.is_none());
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(Config::from_toml("min_win = \"fifty\"").is_err());
        assert_eq!(Config::from_toml("").unwrap(), Config::new());
    }
}
