use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_config, load_sequence, OutputFormat};
use crate::core::types::MatchMethod;
use crate::matching::similarity::SimilarityCalculator;

#[derive(Args)]
pub struct CompareArgs {
    /// First sequence file
    #[arg(required = true)]
    pub input_a: PathBuf,

    /// Second sequence file
    #[arg(required = true)]
    pub input_b: PathBuf,

    /// Matching method: simple, rabin, lcs, or jaccard
    #[arg(short, long, default_value = "simple")]
    pub method: String,

    /// Path to analysis configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let method = MatchMethod::from_selector(&args.method);

    let seq_a = load_sequence(&args.input_a, &config)?;
    let seq_b = load_sequence(&args.input_b, &config)?;

    if verbose {
        eprintln!("Input A: {} bp", seq_a.len());
        eprintln!("Input B: {} bp", seq_b.len());
    }

    config.check_limits(seq_a.len(), seq_b.len(), method)?;

    let calculator = SimilarityCalculator::with_config(config.similarity);
    let score = calculator.similarity(seq_a.as_bytes(), seq_b.as_bytes(), method);

    match format {
        OutputFormat::Text => {
            println!("Comparison Results");
            println!("{}", "=".repeat(60));
            println!("\nInput A: {} ({} bp)", args.input_a.display(), seq_a.len());
            println!("Input B: {} ({} bp)", args.input_b.display(), seq_b.len());
            println!("\nMethod:     {} ({})", method, method.description());
            println!("Similarity: {}", score.as_percentage());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input_a": {
                    "path": args.input_a.display().to_string(),
                    "length": seq_a.len(),
                },
                "input_b": {
                    "path": args.input_b.display().to_string(),
                    "length": seq_b.len(),
                },
                "method": method,
                "similarity": score,
                "similarity_percent": score.as_percentage(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("input_a\tinput_b\tmethod\tsimilarity");
            println!(
                "{}\t{}\t{}\t{:.4}",
                args.input_a.display(),
                args.input_b.display(),
                method,
                score.value()
            );
        }
    }

    Ok(())
}
