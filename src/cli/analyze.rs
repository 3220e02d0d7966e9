use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, load_config, load_sequence, OutputFormat, ThresholdArgs};
use crate::core::types::{MatchMethod, ScreeningResult};
use crate::matching::analysis::{analyze, AnalysisReport, AnalysisRequest};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// First sample sequence file
    #[arg(required = true)]
    pub sample1: PathBuf,

    /// Second sample sequence file
    #[arg(required = true)]
    pub sample2: PathBuf,

    /// Matching method: simple, rabin, lcs, or jaccard
    #[arg(short, long, default_value = "simple")]
    pub method: String,

    /// Path to custom marker catalog (text or JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Path to analysis configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

pub fn run(args: AnalyzeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let mut config = load_config(args.config.as_deref())?;
    args.thresholds.apply(&mut config)?;

    let request = AnalysisRequest {
        sample1: load_sequence(&args.sample1, &config)?,
        sample2: load_sequence(&args.sample2, &config)?,
        method: MatchMethod::from_selector(&args.method),
    };

    if verbose {
        eprintln!(
            "Analyzing {} bp and {} bp against {} markers",
            request.sample1.len(),
            request.sample2.len(),
            catalog.len()
        );
    }

    let report = analyze(&request, &catalog, &config)?;

    match format {
        OutputFormat::Text => print_text(&args, &report),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "method": report.method,
                "sample1": report.sample1,
                "sample2": report.sample2,
                "similarity": report.similarity,
                "similarity_percent": report.similarity_percent(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("sample1_markers\tsample2_markers\tmethod\tsimilarity");
            println!(
                "{}\t{}\t{}\t{:.4}",
                report.sample1.names().join(","),
                report.sample2.names().join(","),
                report.method,
                report.similarity.value()
            );
        }
    }

    Ok(())
}

fn print_text(args: &AnalyzeArgs, report: &AnalysisReport) {
    println!("Analysis Results ({})", report.method.description());
    println!("{}", "=".repeat(60));

    print_sample("Sample 1", &args.sample1, &report.sample1);
    print_sample("Sample 2", &args.sample2, &report.sample2);

    println!("\nSimilarity: {}", report.similarity_percent());
}

fn print_sample(label: &str, path: &std::path::Path, result: &ScreeningResult) {
    println!("\n{label}: {}", path.display());
    if result.is_empty() {
        println!("  No markers detected");
    }
    for name in result.names() {
        println!("  {name}");
    }
}
