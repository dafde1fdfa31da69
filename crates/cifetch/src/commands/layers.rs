//! Layers command

use crate::cli::LayersArgs;
use anyhow::{Context, Result};
use cifetch_core::RuntimeConfig;
use cifetch_image::parse_image;
use tracing::info;

/// Print validated layer digests, top layer first
pub async fn run(args: LayersArgs, config: &RuntimeConfig) -> Result<()> {
    let image = parse_image(&args.image, config)?;
    info!("Listing layers of {}", image.name());

    let layers = image
        .layers()
        .await
        .with_context(|| format!("Failed to list layers of {}", image.name()))?;

    println!("{}", render(&layers, args.json)?);
    Ok(())
}

fn render(layers: &[String], json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(layers)?)
    } else {
        Ok(layers.join("\n"))
    }
}
