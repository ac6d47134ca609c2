//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::PathBuf;

use clap::Args;
use tips_config::{CliSettings, Config};
use tips_site::{BuildOptions, Site};
use tips_storage::FsSource;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every command that runs the pipeline.
#[derive(Args, Debug)]
pub(crate) struct PipelineArgs {
    /// Directory containing tip documents (overrides config).
    source: Option<PathBuf>,

    /// Index documents marked `published: false` too.
    #[arg(long)]
    include_drafts: bool,

    /// Path to configuration file (default: auto-discover tips.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show per-stage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PipelineArgs {
    /// Load configuration, letting command-line values win.
    fn load_config(&self, out: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source.clone(),
            out,
            include_drafts: self.include_drafts.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");
        Ok(config)
    }
}

/// Run the pipeline over the configured content directory.
fn build_site(config: &Config, output: &Output) -> Result<Site, CliError> {
    let content = &config.content_resolved;
    output.info(&format!("Source: {}", content.source_dir.display()));

    let source = FsSource::with_extensions(content.source_dir.clone(), &content.extensions);
    let options = BuildOptions {
        include_drafts: config.build_resolved.include_drafts,
    };
    let site = Site::build(&source, &options)?;

    if site.index().is_empty() {
        output.warning("No published documents found");
    }
    Ok(site)
}
