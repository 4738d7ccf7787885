// main.rs - CLI entry point

use std::time::Instant;
use ucecore::cli::Config;
use ucecore::core::validate_min_win;
use ucecore::data::loaders::FASTA_ALPHABET;
use ucecore::data::{check_loci_bounds, merge_loci};
use ucecore::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

/// Load the alignment, its loci and the alphabet the metrics count
fn load_input(
    input: &InputSource,
    alphabet_override: Option<&str>,
) -> Result<(Alignment, Vec<Locus>, String), String> {
    match input {
        InputSource::Nexus { path, uces } => {
            println!("🧬 Loading NEXUS alignment: {}", path);
            let nexus = load_nexus(std::path::Path::new(path))?;
            println!(
                "   Datatype: {} (gap '{}', missing '{}')",
                nexus.datatype, nexus.gap as char, nexus.missing as char
            );
            let alphabet = match alphabet_override {
                Some(a) => a.to_string(),
                None => nexus.alphabet()?.to_string(),
            };
            let loci = match uces {
                Some(uces) => {
                    println!("📋 Loading UCE table: {}", uces);
                    load_uces(std::path::Path::new(uces))?
                }
                None => nexus.charsets,
            };
            Ok((nexus.alignment, loci, alphabet))
        }
        InputSource::Fasta { path, uces } => {
            println!("🧬 Loading FASTA alignment: {}", path);
            let alignment = load_fasta(std::path::Path::new(path))?;
            println!("📋 Loading UCE table: {}", uces);
            let loci = load_uces(std::path::Path::new(uces))?;
            let alphabet = alphabet_override.unwrap_or(FASTA_ALPHABET).to_string();
            Ok((alignment, loci, alphabet))
        }
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation = validate_args(&args)?;
    let search = &validation.search;

    println!("🚀 {}", ucecore::get_info());

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    let (alignment, loci, alphabet) = load_input(&validation.input, validation.alphabet.as_deref())?;
    let loci = merge_loci(loci);
    if loci.is_empty() {
        return Err("No loci defined: add CHARSET lines to the NEXUS file or pass --uces".to_string());
    }
    check_loci_bounds(&loci, alignment.len())?;

    println!(
        "📊 Alignment: {} sequences × {} columns, {} loci, alphabet {}",
        alignment.n_seq(),
        alignment.len(),
        loci.len(),
        alphabet
    );

    // The whole alignment must admit the window size before any locus is searched
    validate_min_win(alignment.len(), search.min_win).map_err(|e| e.to_string())?;

    println!(
        "🎯 Min window: {} | strategy: {}{}",
        search.min_win,
        search.strategy,
        if search.prefer_large_core {
            " | large core preferred"
        } else {
            ""
        }
    );

    for metric in &search.metrics {
        println!("   Metric: {} ({})", metric, metric.description());
    }

    if args.dry_run {
        println!("📋 Locus composition:");
        for locus in &loci {
            let composition = alignment
                .subseq(locus.start(), locus.stop())
                .frequency(alphabet.as_bytes());
            let summary: Vec<String> = composition
                .iter()
                .map(|(&symbol, f)| format!("{}={:.3}", symbol as char, f))
                .collect();
            println!("   {}: {}", locus, summary.join(" "));
        }
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    let metrics_start = Instant::now();
    let site_metrics = SiteMetrics::compute(&alignment, alphabet.as_bytes(), &search.metrics)
        .map_err(|e| e.to_string())?;
    println!(
        "🔬 Sitewise metrics computed in {:.2}s",
        metrics_start.elapsed().as_secs_f64()
    );

    println!("🔍 Searching {} loci...", loci.len());
    let outcomes = process_loci(&loci, &site_metrics, search, true);

    let mut failed = 0;
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            eprintln!("⚠️  {}: {}", outcome.locus, e);
            failed += 1;
        }
    }
    println!(
        "📊 Loci partitioned: {} succeeded, {} failed",
        outcomes.len() - failed,
        failed
    );

    if let Some(output) = &args.output {
        write_sites_csv(output, &outcomes, &site_metrics)?;
    }
    if let Some(cfg) = &args.cfg {
        write_pfinder_cfg(
            cfg,
            &validation.input.dataset_name(),
            &outcomes,
            search.metrics[0],
        )?;
    }
    if let Some(summary) = &args.summary {
        let input_name = match &validation.input {
            InputSource::Nexus { path, .. } | InputSource::Fasta { path, .. } => path.as_str(),
        };
        write_summary_json(summary, input_name, search, &outcomes)?;
    }

    println!(
        "✅ Completed in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    if failed == outcomes.len() {
        return Err("No locus could be partitioned".to_string());
    }
    Ok(())
}
