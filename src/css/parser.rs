//! CSS parser: drives `cssparser`'s rule and declaration list parsers
//! into the [`Stylesheet`] model.
//!
//! Selector, prelude and value text is re-serialized from tokens, so
//! comments disappear and whitespace runs collapse to a single space.
//! Unlike browser error recovery, the first invalid rule or declaration
//! fails the whole parse.

use cssparser::{
    AtRuleParser, AtRuleType, CowRcStr, DeclarationListParser, DeclarationParser, Delimiter, ParseError,
    ParseErrorKind, Parser, ParserInput, QualifiedRuleParser, RuleListParser, SourceLocation, parse_important,
};

use super::stylesheet::{AtRuleBlock, Declaration, Rule, Stylesheet};
use super::tokens::{check_source, component_text};
use super::{ParseIssue, SyntaxError, describe};

/// At-rules whose block contains nested rules rather than declarations.
const RULE_BLOCK_AT_RULES: &[&str] = &[
    "@container",
    "@document",
    "@font-feature-values",
    "@keyframes",
    "@layer",
    "@media",
    "@supports",
];

/// Vendor prefixes ignored when classifying at-rules.
const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Parses a complete stylesheet.
///
/// A leading `@charset` rule is dropped, as CSS Syntax requires.
pub fn parse(source: &str) -> Result<Stylesheet, SyntaxError> {
    check_source(source)?;

    let mut input = ParserInput::new_with_line_number_offset(source, 1);
    let mut parser = Parser::new(&mut input);
    let rules = RuleListParser::new_for_stylesheet(&mut parser, RuleParser { source })
        .map(|result| result.map_err(|(error, _)| error))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rules = rules.len(), "parsed stylesheet");
    Ok(Stylesheet { rules })
}

/// Parses a bare declaration list, such as the value of a `style` attribute.
pub fn parse_declarations(source: &str) -> Result<Vec<Declaration>, SyntaxError> {
    check_source(source)?;

    let mut input = ParserInput::new_with_line_number_offset(source, 1);
    let mut parser = Parser::new(&mut input);
    Ok(declaration_list(&mut parser)?)
}

// ── Rules ───────────────────────────────────────────────────

/// Parses qualified rules and at-rules, at the top level or inside a
/// grouping at-rule.
struct RuleParser<'i> {
    /// Whole input, used to look past an at-rule prelude.
    source: &'i str,
}

impl<'i> QualifiedRuleParser<'i> for RuleParser<'i> {
    type Prelude = Vec<String>;
    type QualifiedRule = Rule;
    type Error = ParseIssue;

    fn parse_prelude<'t>(&mut self, input: &mut Parser<'i, 't>) -> Result<Vec<String>, ParseError<'i, ParseIssue>> {
        if input.is_exhausted() {
            return Err(input.new_custom_error(ParseIssue::MissingSelector));
        }
        input.parse_comma_separated(selector)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Vec<String>,
        _location: SourceLocation,
        input: &mut Parser<'i, 't>,
    ) -> Result<Rule, ParseError<'i, ParseIssue>> {
        Ok(Rule::Qualified {
            selectors,
            declarations: declaration_list(input)?,
        })
    }
}

/// One entry of a selector list.
fn selector<'i, 't>(input: &mut Parser<'i, 't>) -> Result<String, ParseError<'i, ParseIssue>> {
    let selector = component_text(input)?;
    if selector.is_empty() {
        return Err(input.new_custom_error(ParseIssue::EmptySelector));
    }
    Ok(selector)
}

/// An at-rule's name (with `@`) and its prelude text.
type AtRuleHeader = (String, String);

impl<'i> AtRuleParser<'i> for RuleParser<'i> {
    type PreludeNoBlock = AtRuleHeader;
    type PreludeBlock = AtRuleHeader;
    type AtRule = Rule;
    type Error = ParseIssue;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<AtRuleType<AtRuleHeader, AtRuleHeader>, ParseError<'i, ParseIssue>> {
        let header = (format!("@{name}"), component_text(input)?);
        // The prelude is fully consumed, so the next byte is `{`, `;`, `}` or end of input.
        let opens_block = self
            .source
            .get(input.position().byte_index()..)
            .is_some_and(|rest| rest.starts_with('{'));
        Ok(if opens_block {
            AtRuleType::WithBlock(header)
        } else {
            AtRuleType::WithoutBlock(header)
        })
    }

    fn rule_without_block(&mut self, (name, prelude): AtRuleHeader, _location: SourceLocation) -> Rule {
        Rule::At {
            name,
            prelude,
            block: None,
        }
    }

    fn parse_block<'t>(
        &mut self,
        (name, prelude): AtRuleHeader,
        _location: SourceLocation,
        input: &mut Parser<'i, 't>,
    ) -> Result<Rule, ParseError<'i, ParseIssue>> {
        let block = if holds_rules(&name) {
            let nested = RuleParser { source: self.source };
            let rules = RuleListParser::new_for_nested_rule(input, nested)
                .map(|result| result.map_err(|(error, _)| error))
                .collect::<Result<Vec<_>, _>>()?;
            AtRuleBlock::Rules(rules)
        } else {
            AtRuleBlock::Declarations(declaration_list(input)?)
        };
        Ok(Rule::At {
            name,
            prelude,
            block: Some(block),
        })
    }
}

/// Returns true if the at-rule's block holds nested rules.
fn holds_rules(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let bare = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| lower.strip_prefix('@')?.strip_prefix(prefix))
        .map(|rest| format!("@{rest}"))
        .unwrap_or(lower);
    RULE_BLOCK_AT_RULES.contains(&bare.as_str())
}

// ── Declarations ────────────────────────────────────────────

/// Parses `property: value [!important]` items. At-rules inside a
/// declaration block are rejected.
struct PropertyParser;

impl<'i> DeclarationParser<'i> for PropertyParser {
    type Declaration = Declaration;
    type Error = ParseIssue;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Declaration, ParseError<'i, ParseIssue>> {
        let value = input.parse_until_before(Delimiter::Bang, component_text)?;
        let important = input.try_parse(parse_important).is_ok();
        input.expect_exhausted()?;
        if value.is_empty() {
            return Err(input.new_custom_error(ParseIssue::MissingValue(name.to_string())));
        }
        Ok(Declaration {
            important,
            ..Declaration::new(&*name, value)
        })
    }
}

impl<'i> AtRuleParser<'i> for PropertyParser {
    type PreludeNoBlock = ();
    type PreludeBlock = ();
    type AtRule = Declaration;
    type Error = ParseIssue;
}

fn declaration_list<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Vec<Declaration>, ParseError<'i, ParseIssue>> {
    DeclarationListParser::new(input, PropertyParser)
        .map(|result| result.map_err(invalid_declaration))
        .collect()
}

/// Wraps a basic `cssparser` error with the text of the declaration it
/// was raised in.
fn invalid_declaration<'i>((error, text): (ParseError<'i, ParseIssue>, &'i str)) -> ParseError<'i, ParseIssue> {
    let location = error.location;
    match error.kind {
        ParseErrorKind::Basic(kind) => {
            let declaration = text.split_whitespace().collect::<Vec<_>>().join(" ");
            location.new_custom_error(ParseIssue::InvalidDeclaration {
                reason: describe(&kind),
                declaration: declaration.trim_end_matches(';').trim_end().to_owned(),
            })
        }
        custom => ParseError { kind: custom, location },
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
