//! Token-level helpers on top of `cssparser`.
//!
//! CSS error recovery silently closes blocks at end of input and skips
//! stray closing brackets. [`check_source`] walks the whole token stream
//! first and turns those cases into errors. [`component_text`] serializes
//! component values back to text with whitespace runs collapsed.

use cssparser::{ParseError, Parser, ParserInput, ToCss, Token, TokenSerializationType};

use super::{ParseIssue, SyntaxError};

/// Rejects unbalanced brackets, bad strings or urls, and unterminated
/// comments anywhere in `source`.
pub(crate) fn check_source(source: &str) -> Result<(), SyntaxError> {
    let mut input = ParserInput::new_with_line_number_offset(source, 1);
    check(&mut Parser::new(&mut input)).map_err(SyntaxError::from)
}

fn check<'i, 't>(input: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, ParseIssue>> {
    loop {
        let start = input.state();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        if let Some(closing) = closing_bracket(&token) {
            let mut inner_end = None;
            input.parse_nested_block(|input| {
                check(input)?;
                inner_end = Some(input.position());
                Ok(())
            })?;
            // The closing bracket was never consumed: the block ran to end of input.
            if inner_end == Some(input.position()) {
                return Err(input.new_custom_error(ParseIssue::Unclosed(closing)));
            }
        } else if let Token::Comment(_) = token {
            let raw = input.slice_from(start.position());
            if raw.len() < 4 || !raw.ends_with("*/") {
                return Err(start.source_location().new_custom_error(ParseIssue::UnterminatedComment));
            }
        } else if token.is_parse_error() {
            return Err(start.source_location().new_unexpected_token_error(token));
        }
    }
}

/// Serializes everything left in `input`.
pub(crate) fn component_text<'i, 't>(input: &mut Parser<'i, 't>) -> Result<String, ParseError<'i, ParseIssue>> {
    let mut writer = ComponentWriter::default();
    writer.write_all(input)?;
    Ok(writer.text)
}

/// Returns the character closing the block `token` opens, if any.
fn closing_bracket(token: &Token<'_>) -> Option<char> {
    match token {
        Token::Function(_) | Token::ParenthesisBlock => Some(')'),
        Token::SquareBracketBlock => Some(']'),
        Token::CurlyBracketBlock => Some('}'),
        _ => None,
    }
}

struct ComponentWriter {
    text: String,
    previous: TokenSerializationType,
    pending_space: bool,
    after_comment: bool,
}

impl Default for ComponentWriter {
    fn default() -> Self {
        Self {
            text: String::new(),
            previous: TokenSerializationType::nothing(),
            pending_space: false,
            after_comment: false,
        }
    }
}

impl ComponentWriter {
    fn write_all<'i, 't>(&mut self, input: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, ParseIssue>> {
        loop {
            let token = match input.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return Ok(()),
            };
            match token {
                Token::WhiteSpace(_) => self.pending_space = true,
                Token::Comment(_) => self.after_comment = true,
                _ => {
                    self.push_token(&token);
                    if let Some(closing) = closing_bracket(&token) {
                        input.parse_nested_block(|input| self.write_all(input))?;
                        self.push_closing(closing);
                    }
                }
            }
        }
    }

    fn push_token(&mut self, token: &Token<'_>) {
        let kind = token.serialization_type();
        if self.pending_space {
            self.flush_space();
        } else if self.after_comment && self.previous.needs_separator_when_before(kind) {
            // A comment was the only thing keeping two tokens apart.
            self.text.push(' ');
        }
        self.after_comment = false;
        self.text.push_str(&token.to_css_string());
        self.previous = kind;
    }

    fn push_closing(&mut self, closing: char) {
        if self.pending_space {
            self.flush_space();
        }
        self.after_comment = false;
        self.text.push(closing);
        self.previous = TokenSerializationType::nothing();
    }

    /// Emits one space for a whitespace run, never at the start.
    fn flush_space(&mut self) {
        self.pending_space = false;
        if !self.text.is_empty() {
            self.text.push(' ');
            self.previous = TokenSerializationType::nothing();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(source: &str) -> String {
        let mut input = ParserInput::new(source);
        component_text(&mut Parser::new(&mut input)).expect("serializable")
    }

    #[test]
    fn test_tokens_whitespace_collapses() {
        assert_eq!(text("  div   >\n\t p.x  "), "div > p.x");
    }

    #[test]
    fn test_tokens_comment_between_values_becomes_space() {
        assert_eq!(text("1px/**/2px"), "1px 2px");
        assert_eq!(text("1px /* gap */ 2px"), "1px 2px");
    }

    #[test]
    fn test_tokens_comment_between_unrelated_tokens_disappears() {
        assert_eq!(text("a/**/:hover"), "a:hover");
    }

    #[test]
    fn test_tokens_nested_blocks_keep_inner_spacing() {
        assert_eq!(text("calc( 100% - 10px )"), "calc( 100% - 10px )");
        assert_eq!(text("[type=\"text\"]"), "[type=\"text\"]");
    }

    #[test]
    fn test_tokens_strings_and_urls() {
        assert_eq!(text("'Foo Bar'"), "\"Foo Bar\"");
        assert_eq!(text("url(data:image/png;base64,AA==)"), "url(data:image/png;base64,AA==)");
        assert_eq!(text("url(\"a.css\")"), "url(\"a.css\")");
    }

    #[test]
    fn test_tokens_check_accepts_balanced_input() {
        assert!(check_source("a { b: f(x) [y] } /* done */").is_ok());
    }

    #[test]
    fn test_tokens_check_unclosed_block() {
        let err = check_source("a { b: c").unwrap_err();
        assert_eq!(err.message, "Unexpected end of input, expected '}'");
    }

    #[test]
    fn test_tokens_check_innermost_unclosed_block_wins() {
        let err = check_source("a { b: f(x").unwrap_err();
        assert_eq!(err.message, "Unexpected end of input, expected ')'");
    }

    #[test]
    fn test_tokens_check_stray_closer() {
        let err = check_source("a {}\n  ]").unwrap_err();
        assert_eq!(err.message, "Unexpected ']'");
        assert_eq!((err.line, err.column), (2, 3));
    }

    #[test]
    fn test_tokens_check_unterminated_comment() {
        let err = check_source("a {} /* open").unwrap_err();
        assert_eq!(err.message, "Unterminated comment");
        assert_eq!((err.line, err.column), (1, 6));
    }

    #[test]
    fn test_tokens_check_string_broken_by_newline() {
        let err = check_source("a { content: \"x\n}").unwrap_err();
        assert_eq!(err.message, "Unterminated string");
    }
}
