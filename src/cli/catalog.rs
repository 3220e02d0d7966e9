use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_catalog, OutputFormat};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all markers in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show one marker
    Show {
        /// Disease name
        #[arg(required = true)]
        name: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file (JSON for `.json`, marker text otherwise)
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog } => run_list(catalog, format, verbose),
        CatalogCommands::Show { name, catalog } => run_show(&name, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn run_list(catalog_path: Option<PathBuf>, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} markers", catalog.len());
    }

    match format {
        OutputFormat::Text => {
            let name_width = catalog
                .iter()
                .map(|m| m.name().len())
                .max()
                .unwrap_or(4)
                .max(4);

            println!("Marker Catalog ({} markers)\n", catalog.len());
            println!("{:<name_w$} {:>8}  Pattern", "Name", "Length", name_w = name_width);
            println!("{}", "-".repeat(name_width + 10 + 40));

            for marker in &catalog {
                println!(
                    "{:<name_w$} {:>8}  {}",
                    marker.name(),
                    marker.pattern().len(),
                    truncate(&marker.pattern().to_string(), 40),
                    name_w = name_width
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = catalog
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "name": m.name(),
                        "length": m.pattern().len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("name\tlength\tpattern");
            for marker in &catalog {
                println!(
                    "{}\t{}\t{}",
                    marker.name(),
                    marker.pattern().len(),
                    marker.pattern()
                );
            }
        }
    }

    Ok(())
}

fn run_show(name: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let marker = catalog
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Marker '{}' not found", name))?;

    match format {
        OutputFormat::Text => {
            println!("Marker:  {}", marker.name());
            println!("Length:  {}", marker.pattern().len());
            println!("Pattern: {}", marker.pattern());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(marker)?);
        }
        OutputFormat::Tsv => {
            println!("name\tlength\tpattern");
            println!(
                "{}\t{}\t{}",
                marker.name(),
                marker.pattern().len(),
                marker.pattern()
            );
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let is_json = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let content = if is_json {
        catalog.to_json()?
    } else {
        catalog.to_text()
    };
    std::fs::write(&output, content)?;

    println!("Exported {} markers to {}", catalog.len(), output.display());

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
