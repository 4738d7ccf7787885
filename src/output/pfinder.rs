// pfinder.rs - PartitionFinder2 configuration (.cfg) writer

use crate::core::locus::LocusOutcome;
use crate::core::metrics::MetricKind;
use crate::core::window::{Extent, Window};
use crate::output::create_output;
use std::io::Write;

const BRANCH_LENGTHS: &str = "linked";
const MODELS: &str = "GTR+G";
const MODEL_SELECTION: &str = "aicc";
const SEARCH: &str = "rclusterf";

/// Header of the .cfg file up to and including `[data_blocks]`
pub fn write_start_block<W: Write>(writer: &mut W, dataset_name: &str) -> Result<(), String> {
    let block = format!(
        "## ALIGNMENT FILE ##\n\
         alignment = {}.nex;\n\n\
         ## BRANCHLENGTHS: linked | unlinked ##\n\
         branchlengths = {};\n\n\
         ## MODELS OF EVOLUTION: all | allx | mrbayes | beast | gamma | gammai <list> ##\n\
         models = {};\n\n\
         # MODEL SELECTION: AIC | AICc | BIC #\n\
         model_selection = {};\n\n\
         ## DATA BLOCKS: see manual for how to define ##\n\
         [data_blocks]\n",
        dataset_name, BRANCH_LENGTHS, MODELS, MODEL_SELECTION
    );
    writer
        .write_all(block.as_bytes())
        .map_err(|e| format!("Failed to write PartitionFinder2 start block: {}", e))
}

/// Data block lines for one locus, with 1-based inclusive positions.
///
/// The locus is written as a single `_all` partition when `full_range` is
/// set, when no window is known, or when the window covers the whole locus.
/// Otherwise it is split into `_left`, `_core` and `_right`.
pub fn write_config_block<W: Write>(
    writer: &mut W,
    name: &str,
    extent: Extent,
    window: Option<Window>,
    full_range: bool,
) -> Result<(), String> {
    let block = match window {
        Some(w) if !full_range && w.len() != extent.len() => format!(
            "{name}_left = {}-{};\n{name}_core = {}-{};\n{name}_right = {}-{};\n",
            extent.start + 1,
            w.start(),
            w.start() + 1,
            w.stop(),
            w.stop() + 1,
            extent.stop,
            name = name
        ),
        _ => format!("{}_all = {}-{};\n", name, extent.start + 1, extent.stop),
    };
    writer
        .write_all(block.as_bytes())
        .map_err(|e| format!("Failed to write .cfg block for {}: {}", name, e))
}

pub fn write_end_block<W: Write>(writer: &mut W) -> Result<(), String> {
    let block = format!(
        "\n## SCHEMES, search: all | user | greedy | rcluster | hcluster | kmeans ##\n\
         [schemes]\n\
         search = {};\n\n",
        SEARCH
    );
    writer
        .write_all(block.as_bytes())
        .map_err(|e| format!("Failed to write .cfg end block: {}", e))
}

/// Write a complete .cfg partitioning every locus by `metric`'s window.
///
/// Failed loci are kept whole so the partitions still cover them.
pub fn write_pfinder<W: Write>(
    writer: &mut W,
    dataset_name: &str,
    outcomes: &[LocusOutcome],
    metric: MetricKind,
) -> Result<(), String> {
    writeln!(
        writer,
        "# Generated: {} by ucecore v{} ({} windows)",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        env!("CARGO_PKG_VERSION"),
        metric
    )
    .map_err(|e| format!("Write error: {}", e))?;

    write_start_block(writer, dataset_name)?;
    for outcome in outcomes {
        let (window, full_range) = match &outcome.result {
            Ok(result) => (
                result.windows.get(&metric).copied(),
                result.full_range.get(&metric).copied().unwrap_or(true),
            ),
            Err(_) => (None, true),
        };
        write_config_block(
            writer,
            &outcome.locus.name,
            outcome.locus.extent,
            window,
            full_range,
        )?;
    }
    write_end_block(writer)
}

/// Write the .cfg file to `file_path`
pub fn write_pfinder_cfg(
    file_path: &str,
    dataset_name: &str,
    outcomes: &[LocusOutcome],
    metric: MetricKind,
) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    write_pfinder(&mut writer, dataset_name, outcomes, metric)?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ PartitionFinder2 config written to: {}", file_path);
    Ok(())
}
