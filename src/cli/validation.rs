// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::{MetricKind, SearchConfig, SearchStrategy};
use std::collections::BTreeSet;
use std::path::Path;

/// Where the alignment and its loci come from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// NEXUS alignment; loci from its charsets unless a UCE table is given
    Nexus { path: String, uces: Option<String> },
    /// Aligned FASTA plus a UCE table
    Fasta { path: String, uces: String },
}

impl InputSource {
    /// Dataset name written into the PartitionFinder2 config
    pub fn dataset_name(&self) -> String {
        let path = match self {
            InputSource::Nexus { path, .. } | InputSource::Fasta { path, .. } => path,
        };
        Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone())
    }
}

pub struct ValidationResult {
    pub input: InputSource,
    pub search: SearchConfig,
    /// Upper-cased alphabet override, if any
    pub alphabet: Option<String>,
}

fn check_extension(path: &str, flag: &str, allowed: &[&str]) -> Result<(), String> {
    let ext = Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if allowed.iter().any(|a| *a == ext) {
        Ok(())
    } else {
        Err(format!(
            "{} expected to end in .{}, got '{}'",
            flag,
            allowed.join(" or ."),
            path
        ))
    }
}

fn validate_alphabet(alphabet: &str) -> Result<String, String> {
    let upper = alphabet.trim().to_uppercase();
    if upper.is_empty() {
        return Err("Alphabet must not be empty".to_string());
    }
    if !upper.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(format!("Alphabet '{}' must contain letters only", alphabet));
    }
    let unique: BTreeSet<u8> = upper.bytes().collect();
    if unique.len() != upper.len() {
        return Err(format!("Alphabet '{}' repeats a symbol", alphabet));
    }
    Ok(upper)
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    // Input: either nexus, or fasta and uces
    let input = match (&args.nexus, &args.fasta, &args.uces) {
        (Some(_), Some(_), _) => {
            return Err("--nexus and --fasta cannot be used together".to_string())
        }
        (Some(nexus), None, uces) => {
            check_extension(nexus, "--nexus", &["nex", "nexus"])?;
            InputSource::Nexus {
                path: nexus.clone(),
                uces: uces.clone(),
            }
        }
        (None, Some(fasta), Some(uces)) => {
            check_extension(fasta, "--fasta", &["fna", "fasta", "fa"])?;
            InputSource::Fasta {
                path: fasta.clone(),
                uces: uces.clone(),
            }
        }
        (None, Some(_), None) => return Err("--fasta requires --uces".to_string()),
        (None, None, _) => {
            return Err("Must provide either --nexus, or --fasta and --uces".to_string())
        }
    };
    if let Some(uces) = &args.uces {
        check_extension(uces, "--uces", &["csv"])?;
    }

    // Outputs
    if args.output.is_none() && args.cfg.is_none() && args.summary.is_none() && !args.dry_run {
        return Err("Must provide at least one of --output, --cfg or --summary".to_string());
    }
    if let Some(output) = &args.output {
        check_extension(output, "--output", &["csv"])?;
    }
    if let Some(cfg) = &args.cfg {
        check_extension(cfg, "--cfg", &["cfg"])?;
    }
    if let Some(summary) = &args.summary {
        check_extension(summary, "--summary", &["json"])?;
    }

    // Metrics
    let mut metrics = Vec::new();
    if args.entropy {
        metrics.push(MetricKind::Entropy);
    }
    if args.gc {
        metrics.push(MetricKind::Gc);
    }
    if metrics.is_empty() {
        return Err("At least one metric is needed (--entropy and/or --gc)".to_string());
    }

    // Search parameters
    if args.min_win == 0 {
        return Err("--min-win must be a positive integer".to_string());
    }
    if args.candidates == 0 {
        return Err("--candidates must be a positive integer".to_string());
    }
    if args.threads == Some(0) {
        return Err("--threads must be a positive integer".to_string());
    }

    let alphabet = match &args.alphabet {
        Some(a) => Some(validate_alphabet(a)?),
        None => None,
    };

    let search = SearchConfig {
        metrics,
        min_win: args.min_win,
        prefer_large_core: args.large_core,
        n_candidates: args.candidates,
        strategy: if args.exhaustive {
            SearchStrategy::Exhaustive
        } else {
            SearchStrategy::Refined
        },
    };

    Ok(ValidationResult {
        input,
        search,
        alphabet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn validate(cli: &[&str]) -> Result<ValidationResult, String> {
        let args = Args::from_args(&["ucecore"], cli).unwrap();
        validate_args(&args)
    }

    #[test]
    fn test_nexus_input() {
        let result = validate(&["--nexus", "data/loci.nex", "--output", "out.csv", "--entropy"]).unwrap();
        assert_eq!(
            result.input,
            InputSource::Nexus {
                path: "data/loci.nex".to_string(),
                uces: None
            }
        );
        assert_eq!(result.input.dataset_name(), "loci");
        assert_eq!(result.search.metrics, vec![MetricKind::Entropy]);
        assert_eq!(result.search.strategy, SearchStrategy::Refined);
        assert!(result.alphabet.is_none());
    }

    #[test]
    fn test_fasta_input_and_options() {
        let result = validate(&[
            "--fasta", "aln.fna", "--uces", "uces.csv", "--cfg", "p.cfg", "--gc", "--entropy",
            "--exhaustive", "--large-core", "--alphabet", "acgt",
        ])
        .unwrap();
        assert!(matches!(result.input, InputSource::Fasta { .. }));
        assert_eq!(result.search.metrics, vec![MetricKind::Entropy, MetricKind::Gc]);
        assert_eq!(result.search.strategy, SearchStrategy::Exhaustive);
        assert!(result.search.prefer_large_core);
        assert_eq!(result.alphabet.as_deref(), Some("ACGT"));
    }

    #[test]
    fn test_invalid_combinations() {
        // No input
        assert!(validate(&["--output", "o.csv", "--entropy"]).is_err());
        // Both inputs
        assert!(validate(&["--nexus", "a.nex", "--fasta", "a.fna", "--uces", "u.csv", "--output", "o.csv", "--gc"]).is_err());
        // FASTA without UCEs
        assert!(validate(&["--fasta", "a.fna", "--output", "o.csv", "--gc"]).is_err());
        // No metric
        assert!(validate(&["--nexus", "a.nex", "--output", "o.csv"]).is_err());
        // No output
        assert!(validate(&["--nexus", "a.nex", "--gc"]).is_err());
        // Wrong extensions
        assert!(validate(&["--nexus", "a.txt", "--output", "o.csv", "--gc"]).is_err());
        assert!(validate(&["--nexus", "a.nex", "--output", "o.tsv", "--gc"]).is_err());
        // Zero parameters
        assert!(validate(&["--nexus", "a.nex", "--output", "o.csv", "--gc", "--min-win", "0"]).is_err());
        assert!(validate(&["--nexus", "a.nex", "--output", "o.csv", "--gc", "--candidates", "0"]).is_err());
        assert!(validate(&["--nexus", "a.nex", "--output", "o.csv", "--gc", "--alphabet", "AAT"]).is_err());
    }

    #[test]
    fn test_dry_run_needs_no_output() {
        assert!(validate(&["--nexus", "a.nex", "--gc", "--dry-run"]).is_ok());
    }
}
