//! `tips check` command implementation.

use clap::Args;

use super::{PipelineArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any document is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.pipeline.load_config(None)?;
        let site = build_site(&config, &output)?;

        let index = site.index();
        output.success(&format!(
            "{} document(s) OK, {} draft(s) excluded",
            index.len(),
            index.excluded_drafts()
        ));
        Ok(())
    }
}
