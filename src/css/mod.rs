//! CSS stylesheet support built on `cssparser`: parsing into a small
//! owned model and canonical serialization.
//!
//! The public surface is small: [`parse`] turns stylesheet text into a
//! [`Stylesheet`], [`parse_declarations`] handles bare declaration lists
//! such as `style` attribute values, and `Stylesheet`'s `Display` impl
//! produces the canonical form.

mod parser;
mod stylesheet;
mod tokens;

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, ToCss, Token};
use thiserror::Error;

pub use parser::{parse, parse_declarations};
pub use stylesheet::{Declaration, Rule, Stylesheet};

/// A CSS syntax error with a 1-based source position.
///
/// Columns count UTF-16 code units, as `cssparser` reports them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Errors raised by our own rule and declaration parsers, on top of the
/// basic ones `cssparser` reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum ParseIssue {
    #[error("Missing selector")]
    MissingSelector,

    #[error("Empty selector in selector list")]
    EmptySelector,

    #[error("Missing value for property '{0}'")]
    MissingValue(String),

    #[error("{reason} in declaration '{declaration}'")]
    InvalidDeclaration { reason: String, declaration: String },

    #[error("Unexpected end of input, expected '{0}'")]
    Unclosed(char),

    #[error("Unterminated comment")]
    UnterminatedComment,
}

impl From<ParseError<'_, ParseIssue>> for SyntaxError {
    fn from(error: ParseError<'_, ParseIssue>) -> Self {
        let message = match error.kind {
            ParseErrorKind::Basic(kind) => describe(&kind),
            ParseErrorKind::Custom(issue) => issue.to_string(),
        };
        Self {
            message,
            line: error.location.line as usize,
            column: error.location.column as usize,
        }
    }
}

/// Human-readable text for the errors `cssparser` raises itself.
pub(crate) fn describe(kind: &BasicParseErrorKind<'_>) -> String {
    match kind {
        BasicParseErrorKind::UnexpectedToken(Token::BadString(_)) => "Unterminated string".to_owned(),
        BasicParseErrorKind::UnexpectedToken(Token::BadUrl(_)) => "Invalid url()".to_owned(),
        BasicParseErrorKind::UnexpectedToken(token) => format!("Unexpected '{}'", token.to_css_string()),
        BasicParseErrorKind::EndOfInput => "Unexpected end of input".to_owned(),
        BasicParseErrorKind::AtRuleInvalid(name) => format!("Unexpected at-rule '@{name}'"),
        BasicParseErrorKind::AtRuleBodyInvalid => "Invalid at-rule body".to_owned(),
        BasicParseErrorKind::QualifiedRuleInvalid => "Invalid rule".to_owned(),
    }
}
