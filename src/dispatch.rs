//! Action dispatcher: maps the selected action to its handler and runs
//! input acquisition, the parser or inliner, and result rendering.
//!
//! Handlers return the complete output text instead of printing it, so
//! a failure can never leave partial output behind.

use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::instrument;

use crate::cli::Cli;
use crate::css;
use crate::error::CliError;
use crate::inliner::Inliner;
use crate::input::InputSource;

/// The top-level operation selected by the first positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Parse,
    Inline,
}

impl FromStr for Action {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse" => Ok(Action::Parse),
            "inline" => Ok(Action::Inline),
            other => Err(CliError::UnknownAction(other.to_owned())),
        }
    }
}

/// Flag-driven behavior toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Suppress legacy presentational attributes when inlining.
    pub no_attributes: bool,
    /// External stylesheet merged before inlining.
    pub css_path: Option<PathBuf>,
}

impl From<&Cli> for Options {
    fn from(cli: &Cli) -> Self {
        Self {
            no_attributes: cli.no_attributes,
            css_path: cli
                .css_path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Resolves the action named on the command line and runs it.
pub fn execute<R: Read>(cli: &Cli, stdin: R) -> Result<String, CliError> {
    let action: Action = cli
        .action
        .as_deref()
        .filter(|action| !action.is_empty())
        .ok_or(CliError::MissingAction)?
        .parse()?;
    if !cli.extra.is_empty() {
        tracing::debug!(ignored = ?cli.extra, "ignoring extra positional arguments");
    }
    let source = InputSource::from_arg(cli.path.as_deref());
    run(action, &source, &Options::from(cli), stdin)
}

/// Runs one action to completion and returns the text to print.
#[instrument(skip(stdin))]
pub fn run<R: Read>(
    action: Action,
    source: &InputSource,
    options: &Options,
    stdin: R,
) -> Result<String, CliError> {
    match action {
        Action::Parse => parse_css(source, stdin),
        Action::Inline => inline_css(source, options, stdin),
    }
}

/// Parses a stylesheet and renders its canonical form.
fn parse_css<R: Read>(source: &InputSource, stdin: R) -> Result<String, CliError> {
    let input = source.read(stdin)?;
    let stylesheet = css::parse(&input)?;
    Ok(stylesheet.to_string())
}

/// Inlines CSS into an HTML document.
fn inline_css<R: Read>(source: &InputSource, options: &Options, stdin: R) -> Result<String, CliError> {
    let html = source.read(stdin)?;
    let mut inliner = Inliner::new(html);

    if let Some(css_path) = &options.css_path {
        let css = InputSource::File(css_path.clone()).read(std::io::empty())?;
        inliner.merge_stylesheet(&css)?;
    }

    inliner.set_legacy_attributes(!options.no_attributes);
    Ok(inliner.inline()?)
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
