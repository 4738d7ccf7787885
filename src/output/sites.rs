// sites.rs - Per-column CSV table of metric values and window membership

use crate::core::locus::LocusOutcome;
use crate::core::metrics::SiteMetrics;
use crate::output::create_output;
use std::io::Write;

pub const SITES_HEADER: [&str; 8] = [
    "name",
    "uce_site",
    "aln_site",
    "window_start",
    "window_stop",
    "type",
    "value",
    "plot_mtx",
];

/// Scientific notation with five decimals and a signed two-digit exponent (`6.36514e-01`)
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.5e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => formatted,
        },
        None => formatted,
    }
}

/// Write one row per (locus, metric, column) for every successful locus.
///
/// `uce_site` is the column offset from the locus centre, `aln_site` the
/// alignment column. `plot_mtx` is -1 before, 0 inside and 1 after the
/// locus's best window for that metric. Failed loci are skipped.
pub fn write_sites<W: Write>(
    writer: W,
    outcomes: &[LocusOutcome],
    metrics: &SiteMetrics,
) -> Result<usize, String> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(SITES_HEADER)
        .map_err(|e| format!("Failed to write sites header: {}", e))?;

    let mut rows = 0;
    for outcome in outcomes {
        let result = match &outcome.result {
            Ok(result) => result,
            Err(_) => continue,
        };
        let locus = &outcome.locus;
        let middle = (locus.len() + 1) / 2;

        for (kind, window) in &result.windows {
            let values = match metrics.series.get(kind) {
                Some(values) => &values[locus.extent.range()],
                None => continue,
            };
            for (i, value) in values.iter().enumerate() {
                let aln_site = locus.start() + i;
                let uce_site = i as i64 - middle as i64;
                csv_writer
                    .write_record([
                        locus.name.clone(),
                        uce_site.to_string(),
                        aln_site.to_string(),
                        window.start().to_string(),
                        window.stop().to_string(),
                        kind.to_string(),
                        format_scientific(*value),
                        window.relative_position(aln_site).to_string(),
                    ])
                    .map_err(|e| format!("Failed to write sites row for {}: {}", locus.name, e))?;
                rows += 1;
            }
        }
    }

    csv_writer
        .flush()
        .map_err(|e| format!("Flush error: {}", e))?;
    Ok(rows)
}

/// Write the sites table to `file_path`
pub fn write_sites_csv(
    file_path: &str,
    outcomes: &[LocusOutcome],
    metrics: &SiteMetrics,
) -> Result<(), String> {
    let writer = create_output(file_path)?;
    let rows = write_sites(writer, outcomes, metrics)?;
    println!("✅ Site table ({} rows) written to: {}", rows, file_path);
    Ok(())
}
