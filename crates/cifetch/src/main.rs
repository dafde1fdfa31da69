//! cifetch CLI - fetch image manifests and layer digests from registries
//!
//! This is the main entry point for the cifetch command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let overrides = cli.overrides();
    let run = async move {
        match cli.command {
            Commands::Version(args) => commands::version::run(args),
            Commands::Manifest(args) => {
                let config = commands::load_config(&overrides)?;
                commands::manifest::run(args, &config).await
            }
            Commands::Layers(args) => {
                let config = commands::load_config(&overrides)?;
                commands::layers::run(args, &config).await
            }
        }
    };

    // Dropping `run` aborts in-flight requests and closes their connections.
    tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => {
            output::error("Interrupted");
            Err(anyhow!("interrupted"))
        }
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr; stdout is reserved for command output.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
