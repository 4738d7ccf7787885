// summary.rs - JSON summary of a window-search run

use crate::core::locus::{LocusOutcome, SearchConfig};
use crate::core::window::Window;
use crate::output::create_output;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocusSummary {
    pub name: String,
    pub start: usize,
    pub stop: usize,
    /// Best window per metric name, in alignment coordinates
    pub windows: BTreeMap<String, Window>,
    pub use_full_range: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub version: String,
    pub generated: String,
    pub input: String,
    pub min_win: usize,
    pub prefer_large_core: bool,
    pub n_candidates: usize,
    pub strategy: String,
    pub metrics: Vec<String>,
    pub loci_ok: usize,
    pub loci_failed: usize,
    pub loci: Vec<LocusSummary>,
}

fn summarize_locus(outcome: &LocusOutcome) -> LocusSummary {
    let locus = &outcome.locus;
    let (windows, use_full_range, error) = match &outcome.result {
        Ok(result) => (
            result
                .windows
                .iter()
                .map(|(kind, &w)| (kind.to_string(), w))
                .collect(),
            result
                .full_range
                .iter()
                .map(|(kind, &flag)| (kind.to_string(), flag))
                .collect(),
            None,
        ),
        Err(e) => (BTreeMap::new(), BTreeMap::new(), Some(e.to_string())),
    };

    LocusSummary {
        name: locus.name.clone(),
        start: locus.start(),
        stop: locus.stop(),
        windows,
        use_full_range,
        error,
    }
}

pub fn build_summary(input: &str, config: &SearchConfig, outcomes: &[LocusOutcome]) -> RunSummary {
    let loci: Vec<LocusSummary> = outcomes.iter().map(summarize_locus).collect();
    let loci_failed = loci.iter().filter(|l| l.error.is_some()).count();

    RunSummary {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated: chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        input: input.to_string(),
        min_win: config.min_win,
        prefer_large_core: config.prefer_large_core,
        n_candidates: config.n_candidates,
        strategy: config.strategy.to_string(),
        metrics: config.metrics.iter().map(|m| m.to_string()).collect(),
        loci_ok: loci.len() - loci_failed,
        loci_failed,
        loci,
    }
}

pub fn write_summary<W: Write>(writer: W, summary: &RunSummary) -> Result<(), String> {
    serde_json::to_writer_pretty(writer, summary)
        .map_err(|e| format!("Failed to serialize summary: {}", e))
}

/// Write the JSON summary to `file_path`
pub fn write_summary_json(
    file_path: &str,
    input: &str,
    config: &SearchConfig,
    outcomes: &[LocusOutcome],
) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    write_summary(&mut writer, &build_summary(input, config, outcomes))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Summary written to: {}", file_path);
    Ok(())
}
