//! CLI argument parsing with clap

use crate::commands::ConfigOverrides;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// cifetch - Fetch container image manifests from registries
#[derive(Parser, Debug)]
#[command(name = "cifetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ~/.cifetch/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Deadline in seconds for each registry request
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config settings given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            insecure: self.insecure,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an image manifest as served by the registry
    Manifest(ManifestArgs),

    /// List the layer digests of an image, top layer first
    Layers(LayersArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Image, e.g. docker://busybox:latest
    pub image: String,

    /// Manifest schema version
    #[arg(long, default_value = "2-1")]
    pub manifest_version: String,
}

#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Image, e.g. docker://quay.io/coreos/etcd:v3.5.0
    pub image: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
