// mod.rs - Output writers module

pub mod pfinder;
pub mod sites;
pub mod summary;

use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::Path;

pub use pfinder::{write_config_block, write_end_block, write_pfinder_cfg, write_start_block};
pub use sites::{format_scientific, write_sites, write_sites_csv, SITES_HEADER};
pub use summary::{build_summary, write_summary, write_summary_json, LocusSummary, RunSummary};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}

/// Buffered writer for a new output file, creating missing parent directories
fn create_output(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use crate::core::{process_loci, MetricKind, SearchConfig, SiteMetrics};
    use crate::data::loaders::parse_nexus;
    use crate::output::{pfinder, sites, summary};

    /// Two 30-column loci, each a conserved 10-column core between variable flanks
    fn nexus_text() -> String {
        let rows: Vec<String> = (0..4)
            .map(|k| {
                let seq: String = (0..60)
                    .map(|i| {
                        if (10..20).contains(&(i % 30)) {
                            'G'
                        } else {
                            ['A', 'C', 'G', 'T'][(i + k) % 4]
                        }
                    })
                    .collect();
                format!("taxon_{}  {}", k + 1, seq)
            })
            .collect();
        format!(
            "#NEXUS\nBEGIN DATA;\nDIMENSIONS NTAX=4 NCHAR=60;\nFORMAT DATATYPE=DNA GAP=- MISSING=?;\nMATRIX\n{}\n;\nEND;\n\nBEGIN SETS;\nCHARSET uce-1 = 1-30;\nCHARSET uce-2 = 31-60;\nEND;\n",
            rows.join("\n")
        )
    }

    #[test]
    fn test_nexus_to_outputs() {
        let nexus = parse_nexus(&nexus_text()).unwrap();
        let config = SearchConfig {
            metrics: vec![MetricKind::Entropy, MetricKind::Gc],
            min_win: 5,
            ..SearchConfig::default()
        };
        let metrics = SiteMetrics::compute(
            &nexus.alignment,
            nexus.alphabet().unwrap().as_bytes(),
            &config.metrics,
        )
        .unwrap();

        let outcomes = process_loci(&nexus.charsets, &metrics, &config, false);
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            let result = outcome.result.as_ref().unwrap();
            for w in result.windows.values() {
                assert!(w.start() >= outcome.locus.start() + 5);
                assert!(w.stop() <= outcome.locus.stop() - 5);
                assert!(w.len() >= 5);
            }
        }

        let mut table = Vec::new();
        let rows = sites::write_sites(&mut table, &outcomes, &metrics).unwrap();
        assert_eq!(rows, 2 * 2 * 30);

        let mut cfg = Vec::new();
        pfinder::write_pfinder(&mut cfg, "loci", &outcomes, MetricKind::Entropy).unwrap();
        let cfg = String::from_utf8(cfg).unwrap();
        assert!(cfg.contains("alignment = loci.nex;"));
        for name in ["uce-1", "uce-2"] {
            assert!(
                cfg.contains(&format!("{}_all", name)) || cfg.contains(&format!("{}_core", name))
            );
        }

        let run = summary::build_summary("loci.nex", &config, &outcomes);
        assert_eq!(run.loci_ok, 2);
        assert_eq!(run.loci[1].start, 30);
    }
}
