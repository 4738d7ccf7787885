// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.nexus.is_none() {
            self.nexus = config.nexus;
        }
        if self.fasta.is_none() {
            self.fasta = config.fasta;
        }
        if self.uces.is_none() {
            self.uces = config.uces;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.cfg.is_none() {
            self.cfg = config.cfg;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }

        // Window search (only override defaults, not explicit CLI values)
        if self.min_win == 50 {
            if let Some(min_win) = config.min_win {
                self.min_win = min_win;
            }
        }
        if self.candidates == 3 {
            if let Some(candidates) = config.candidates {
                self.candidates = candidates;
            }
        }
        if self.alphabet.is_none() {
            self.alphabet = config.alphabet;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.large_core && config.large_core.unwrap_or(false) {
            self.large_core = true;
        }
        if !self.exhaustive && config.exhaustive.unwrap_or(false) {
            self.exhaustive = true;
        }
        // Metrics from the file only apply when none were chosen on the command line
        if !self.entropy && !self.gc {
            self.entropy = config.entropy.unwrap_or(false);
            self.gc = config.gc.unwrap_or(false);
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
