//! Command-line interface for marker-screen.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **screen**: Detect catalog markers in one or more sequence files
//! - **compare**: Score the similarity of two sequences
//! - **analyze**: Screen two samples and compare them in one report
//! - **catalog**: List, show, or export disease markers
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # Screen a sample with the default (simple) method
//! marker-screen screen sample.fa
//!
//! # Screen with k-mer Jaccard and a custom catalog
//! marker-screen screen sample.fa --method jaccard --catalog diseases.txt
//!
//! # Compare two samples, JSON output
//! marker-screen compare a.fa b.fa --method lcs --format json
//!
//! # Start web UI
//! marker-screen serve --port 8080 --open
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::MarkerCatalog;
use crate::core::sequence::Sequence;
use crate::matching::analysis::AnalysisConfig;
use crate::parsing::sequence::parse_sequence_file;
use crate::utils::validation::validate_sequence_length;

pub mod analyze;
pub mod catalog;
pub mod compare;
pub mod screen;

#[derive(Parser)]
#[command(name = "marker-screen")]
#[command(version)]
#[command(about = "Screen DNA sequences for disease markers and compare samples")]
#[command(
    long_about = "marker-screen detects known disease marker subsequences in DNA samples and scores how similar two samples are.\n\nFour matching methods are available:\n- simple: windowed position-wise matching\n- rabin: exact occurrence via Rabin-Karp rolling hash\n- lcs: longest common subsequence\n- jaccard: k-mer set similarity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect disease markers in sequence files
    Screen(screen::ScreenArgs),

    /// Compute the similarity of two sequences
    Compare(compare::CompareArgs),

    /// Screen two samples and compare them
    Analyze(analyze::AnalyzeArgs),

    /// Inspect the marker catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Path to custom marker catalog (text or JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Path to analysis configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Screening threshold overrides shared by `screen` and `analyze`
#[derive(clap::Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Fraction of marker positions a window must match (simple)
    #[arg(long)]
    pub exact_threshold: Option<f64>,

    /// Fraction of the marker length the best window LCS must reach (lcs)
    #[arg(long)]
    pub subsequence_threshold: Option<f64>,

    /// Minimum best-window k-mer Jaccard similarity (jaccard)
    #[arg(long)]
    pub jaccard_threshold: Option<f64>,

    /// k-mer length for Jaccard screening and similarity
    #[arg(long)]
    pub kmer_size: Option<usize>,
}

impl ThresholdArgs {
    /// Apply the overrides and re-validate the result
    pub fn apply(&self, config: &mut AnalysisConfig) -> anyhow::Result<()> {
        if let Some(value) = self.exact_threshold {
            config.screening.exact_threshold = value;
        }
        if let Some(value) = self.subsequence_threshold {
            config.screening.subsequence_threshold = value;
        }
        if let Some(value) = self.jaccard_threshold {
            config.screening.jaccard_threshold = value;
        }
        if let Some(k) = self.kmer_size {
            config.screening.kmer_size = k;
            config.similarity.kmer_size = k;
        }
        config.validate()?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Custom catalog if given, otherwise the embedded one
pub(crate) fn load_catalog(path: Option<&Path>) -> anyhow::Result<MarkerCatalog> {
    let catalog = match path {
        Some(path) => MarkerCatalog::load_from_file(path)?,
        None => MarkerCatalog::load_embedded(),
    };

    if catalog.is_empty() {
        tracing::warn!("Marker catalog is empty; nothing will be detected");
    }

    Ok(catalog)
}

/// Config file if given, otherwise defaults
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => Ok(AnalysisConfig::load_from_file(path)?),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Read a sequence file and enforce the configured length limit
pub(crate) fn load_sequence(path: &Path, config: &AnalysisConfig) -> anyhow::Result<Sequence> {
    let sequence = parse_sequence_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    validate_sequence_length(sequence.len(), config.max_sequence_length)?;
    Ok(sequence)
}
