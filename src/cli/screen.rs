use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, load_config, load_sequence, OutputFormat, ThresholdArgs};
use crate::core::types::{MatchMethod, ScreeningResult};
use crate::matching::engine::ScreeningEngine;

#[derive(Args)]
pub struct ScreenArgs {
    /// Sequence files to screen (raw text or FASTA, optionally gzipped)
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Matching method: simple, rabin, lcs, or jaccard
    #[arg(short, long, default_value = "simple")]
    pub method: String,

    /// Path to custom marker catalog (text or JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Path to analysis configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Evaluate markers one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

pub fn run(args: ScreenArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let mut config = load_config(args.config.as_deref())?;
    args.thresholds.apply(&mut config)?;
    if args.sequential {
        config.screening.parallel = false;
    }
    let method = MatchMethod::from_selector(&args.method);

    if verbose {
        eprintln!(
            "Screening {} file(s) against {} markers with '{}'",
            args.inputs.len(),
            catalog.len(),
            method
        );
    }

    let engine = ScreeningEngine::with_config(&catalog, config.screening.clone());

    let mut results = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let sequence = load_sequence(path, &config)?;
        if verbose {
            eprintln!("{}: {} bp", path.display(), sequence.len());
        }
        results.push((path, engine.screen(sequence.as_bytes(), method)));
    }

    match format {
        OutputFormat::Text => print_text(&results, method),
        OutputFormat::Json => print_json(&results, method)?,
        OutputFormat::Tsv => print_tsv(&results),
    }

    Ok(())
}

fn print_text(results: &[(&PathBuf, ScreeningResult)], method: MatchMethod) {
    println!("Marker Screening ({})", method.description());
    println!("{}", "=".repeat(60));

    for (path, result) in results {
        println!("\n{}", path.display());
        if result.is_empty() {
            println!("  No markers detected");
        } else {
            for name in result.names() {
                println!("  {name}");
            }
        }
    }
}

fn print_json(results: &[(&PathBuf, ScreeningResult)], method: MatchMethod) -> anyhow::Result<()> {
    let samples: Vec<_> = results
        .iter()
        .map(|(path, result)| {
            serde_json::json!({
                "path": path.display().to_string(),
                "markers": result,
            })
        })
        .collect();

    let output = serde_json::json!({
        "method": method,
        "samples": samples,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(results: &[(&PathBuf, ScreeningResult)]) {
    println!("path\tmarker");
    for (path, result) in results {
        for name in result.names() {
            println!("{}\t{}", path.display(), name);
        }
    }
}
