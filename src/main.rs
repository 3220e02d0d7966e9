use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("marker_screen=debug,info")
    } else {
        EnvFilter::new("marker_screen=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Screen(args) => {
            cli::screen::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Compare(args) => {
            cli::compare::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Analyze(args) => {
            cli::analyze::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
