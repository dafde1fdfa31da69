//! Manifest command

use crate::cli::ManifestArgs;
use anyhow::{Context, Result};
use cifetch_core::RuntimeConfig;
use cifetch_image::parse_image;
use console::Term;
use std::io::Write;
use tracing::info;

/// Print the manifest body exactly as the registry served it
pub async fn run(args: ManifestArgs, config: &RuntimeConfig) -> Result<()> {
    let image = parse_image(&args.image, config)?;
    info!("Fetching {} manifest of {}", image.kind(), image.name());

    let raw = image
        .raw_manifest(&args.manifest_version)
        .await
        .with_context(|| format!("Failed to fetch manifest of {}", image.name()))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&raw)?;
    if Term::stdout().is_term() && !raw.ends_with(b"\n") {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;

    Ok(())
}
