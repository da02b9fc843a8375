//! Top-level error taxonomy. Every failure the tool can report ends up
//! here and is printed once by `main`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::css::SyntaxError;
use crate::inliner::InlineError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No action supplied")]
    MissingAction,

    #[error("Unexpected action: {0}")]
    UnknownAction(String),

    #[error("Failed to open file: {}: {source}", .path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("Failed to read stdin: {0}")]
    ReadStdin(io::Error),

    #[error("Parsing error: {0}")]
    Parse(#[from] SyntaxError),

    #[error("Inlining error: {0}")]
    Inline(#[from] InlineError),
}

impl CliError {
    /// Usage errors are followed by the usage text.
    pub fn shows_usage(&self) -> bool {
        matches!(self, CliError::MissingAction | CliError::UnknownAction(_))
    }

    pub fn exit_code(&self) -> u8 {
        1
    }
}
