//! `tips build` command implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;

use super::{PipelineArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Artifact output path (default: config `build.out`, or stdout).
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, any document is invalid, or
    /// the artifact cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.pipeline.load_config(self.out)?;
        let site = build_site(&config, &output)?;
        let json = site.to_json()?;

        match &config.build_resolved.out {
            Some(path) => {
                write_artifact(path, &json)?;
                output.success(&format!(
                    "Indexed {} document(s) to {}",
                    site.index().len(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Write the artifact, creating parent directories as needed.
fn write_artifact(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "Wrote artifact");
    Ok(())
}
