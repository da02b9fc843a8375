//! CSS inliner: rewrites an HTML document so each element carries its
//! computed styles in a `style` attribute.
//!
//! Stylesheets come from an optional external source and from the
//! document's own `<style>` elements, which are removed. Rules that
//! cannot be expressed inline (at-rules, dynamic pseudo-classes,
//! pseudo-elements) are collected into a fresh `<style>` block in
//! `<head>` so that clients supporting them still see them.

mod element;

use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::string::FromUtf8Error;

use kuchikiki::traits::*;
use kuchikiki::{ElementData, Node, NodeDataRef, NodeRef, Selectors};
use thiserror::Error;

use crate::css::{self, Declaration, Rule, Stylesheet, SyntaxError};
use element::{MatchedRule, Origin, StyledElement};

/// Selector fragments that depend on user interaction, document state, or
/// generated content and therefore cannot be resolved statically.
const DYNAMIC_PSEUDO_CLASSES: &[&str] = &[
    ":active",
    ":after",
    ":before",
    ":checked",
    ":disabled",
    ":enabled",
    ":first-letter",
    ":first-line",
    ":focus",
    ":hover",
    ":in-range",
    ":invalid",
    ":lang",
    ":link",
    ":root",
    ":selection",
    ":target",
    ":valid",
    ":visited",
];

/// Errors raised while inlining.
#[derive(Debug, Error)]
pub enum InlineError {
    #[error("invalid stylesheet: {0}")]
    Stylesheet(#[from] SyntaxError),

    #[error("invalid style attribute on <{element}>: {source}")]
    StyleAttribute { element: String, source: SyntaxError },

    #[error("document has no <head> element")]
    MissingHead,

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] io::Error),

    #[error("serialized document is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// A single-use inlining job over one HTML document.
///
/// Configure it with [`merge_stylesheet`](Self::merge_stylesheet) and
/// [`set_legacy_attributes`](Self::set_legacy_attributes), then consume
/// it with [`inline`](Self::inline).
pub struct Inliner {
    html: String,
    stylesheets: Vec<Stylesheet>,
    legacy_attributes: bool,
}

impl Inliner {
    /// Creates an inliner for `html`. Legacy attributes are emitted by default.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            stylesheets: Vec::new(),
            legacy_attributes: true,
        }
    }

    /// Parses `css` and adds it ahead of the document's own stylesheets.
    pub fn merge_stylesheet(&mut self, css: &str) -> Result<(), InlineError> {
        let stylesheet = css::parse(css)?;
        tracing::debug!(rules = stylesheet.rules.len(), "merged external stylesheet");
        self.stylesheets.push(stylesheet);
        Ok(())
    }

    /// Enables or disables `bgcolor`, `valign` and friends.
    pub fn set_legacy_attributes(&mut self, enabled: bool) {
        self.legacy_attributes = enabled;
    }

    /// Runs the inliner and returns the rewritten document.
    pub fn inline(self) -> Result<String, InlineError> {
        let document = kuchikiki::parse_html().one(self.html.as_str());

        let mut stylesheets = self.stylesheets;
        stylesheets.extend(extract_style_elements(&document)?);

        let mut elements = StyledElements::default();
        let mut raw_rules: Vec<Rule> = Vec::new();
        for stylesheet in stylesheets {
            for rule in stylesheet.rules {
                match rule {
                    Rule::Qualified {
                        selectors,
                        declarations,
                    } => collect_matches(&document, selectors, &declarations, &mut elements, &mut raw_rules),
                    at_rule => raw_rules.push(at_rule),
                }
            }
        }
        tracing::debug!(
            elements = elements.list.len(),
            raw_rules = raw_rules.len(),
            "resolved stylesheet rules"
        );

        for element in &elements.list {
            element.apply(self.legacy_attributes)?;
        }

        if !raw_rules.is_empty() {
            insert_raw_stylesheet(&document, &raw_rules)?;
        }

        let mut buffer = Vec::new();
        document.serialize(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Returns true if `selector` can be resolved against a static document.
pub fn is_inlinable(selector: &str) -> bool {
    let lower = selector.to_ascii_lowercase();
    !lower.contains("::") && !DYNAMIC_PSEUDO_CLASSES.iter().any(|p| lower.contains(p))
}

/// Parses and removes every `<style>` element, in document order.
fn extract_style_elements(document: &NodeRef) -> Result<Vec<Stylesheet>, InlineError> {
    let nodes: Vec<NodeDataRef<ElementData>> = document
        .descendants()
        .elements()
        .filter(|e| &*e.name.local == "style")
        .collect();

    let mut stylesheets = Vec::with_capacity(nodes.len());
    for node in nodes {
        stylesheets.push(css::parse(&node.as_node().text_contents())?);
        node.as_node().detach();
    }
    tracing::debug!(count = stylesheets.len(), "extracted embedded stylesheets");
    Ok(stylesheets)
}

/// Elements selected so far, in first-match order, indexed by node identity.
#[derive(Default)]
struct StyledElements {
    list: Vec<StyledElement>,
    index: HashMap<*const Node, usize>,
}

impl StyledElements {
    fn entry(&mut self, node: NodeDataRef<ElementData>) -> &mut StyledElement {
        let key = Rc::as_ptr(&node.as_node().0);
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.list.push(StyledElement::new(node));
            self.list.len() - 1
        });
        &mut self.list[slot]
    }
}

/// Attaches `declarations` to every element matched by each selector.
/// Selectors that cannot be inlined are kept as raw rules.
fn collect_matches(
    document: &NodeRef,
    selectors: Vec<String>,
    declarations: &[Declaration],
    elements: &mut StyledElements,
    raw_rules: &mut Vec<Rule>,
) {
    for selector in selectors {
        let compiled = if is_inlinable(&selector) {
            Selectors::compile(&selector).ok()
        } else {
            None
        };
        let Some(compiled) = compiled else {
            tracing::trace!(%selector, "keeping rule as raw CSS");
            raw_rules.push(Rule::Qualified {
                selectors: vec![selector],
                declarations: declarations.to_vec(),
            });
            continue;
        };

        for compiled_selector in &compiled.0 {
            let origin = Origin::Selector(compiled_selector.specificity());
            let matches: Vec<NodeDataRef<ElementData>> = document
                .descendants()
                .elements()
                .filter(|e| compiled_selector.matches(e))
                .collect();

            for node in matches {
                elements.entry(node).rules.push(MatchedRule {
                    origin,
                    declarations: declarations.to_vec(),
                });
            }
        }
    }
}

/// Appends a `<style type="text/css">` holding `rules` to `<head>`.
fn insert_raw_stylesheet(document: &NodeRef, rules: &[Rule]) -> Result<(), InlineError> {
    let head = document
        .descendants()
        .elements()
        .find(|e| &*e.name.local == "head")
        .ok_or(InlineError::MissingHead)?;

    let css = rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    let mut name = head.name.clone();
    name.local = "style".into();
    let style = NodeRef::new_element(name, std::iter::empty());
    if let Some(element) = style.as_element() {
        element
            .attributes
            .borrow_mut()
            .insert("type", "text/css".to_owned());
    }
    style.append(NodeRef::new_text(format!("\n{css}\n")));
    head.as_node().append(style);
    Ok(())
}

#[cfg(test)]
#[path = "inliner_tests.rs"]
mod tests;
