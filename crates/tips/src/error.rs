//! CLI error types.

use std::collections::BTreeSet;

use tips_config::ConfigError;
use tips_site::{BuildError, BuildFailure};

use crate::output::Output;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Print the error to stderr.
    ///
    /// Document failures get one `<id>: <Kind>: <detail>` line each, followed
    /// by a summary.
    pub(crate) fn report(&self, output: &Output) {
        match self {
            Self::Build(BuildError::Failed(failure)) => {
                for err in &failure.errors {
                    output.error(&err.to_string());
                }
                output.error(&summary(failure));
            }
            other => output.error(&format!("Error: {other}")),
        }
    }
}

/// One-line count of failures and affected documents.
fn summary(failure: &BuildFailure) -> String {
    let documents: BTreeSet<&str> = failure.errors.iter().map(|e| e.id.as_str()).collect();
    format!(
        "Build failed: {} error(s) in {} document(s)",
        failure.errors.len(),
        documents.len()
    )
}
