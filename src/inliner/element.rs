//! Per-element cascade: merges matched declarations into a `style`
//! attribute and derives legacy presentational attributes.

use std::collections::BTreeMap;

use kuchikiki::{ElementData, NodeDataRef, Specificity};

use super::InlineError;
use crate::css::{self, Declaration};

/// Where a declaration came from. Variant order is cascade order: an
/// element's own `style` attribute beats any selector.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    Selector(Specificity),
    StyleAttribute,
}

/// Cascade weight of a declaration. `!important` dominates origin.
type Precedence = (bool, Origin);

/// A stylesheet rule matched against one element.
#[derive(Clone)]
pub struct MatchedRule {
    pub origin: Origin,
    pub declarations: Vec<Declaration>,
}

/// A presentational attribute that mirrors a CSS property.
struct LegacyAttribute {
    property: &'static str,
    attribute: &'static str,
    elements: &'static [&'static str],
    dimension: bool,
}

const LEGACY_ATTRIBUTES: &[LegacyAttribute] = &[
    LegacyAttribute {
        property: "text-align",
        attribute: "align",
        elements: &["h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "blockquote", "tr", "th", "td"],
        dimension: false,
    },
    LegacyAttribute {
        property: "vertical-align",
        attribute: "valign",
        elements: &["th", "td"],
        dimension: false,
    },
    LegacyAttribute {
        property: "background-color",
        attribute: "bgcolor",
        elements: &["body", "table", "tr", "th", "td"],
        dimension: false,
    },
    LegacyAttribute {
        property: "float",
        attribute: "align",
        elements: &["img"],
        dimension: false,
    },
    LegacyAttribute {
        property: "width",
        attribute: "width",
        elements: &["table", "th", "td", "img"],
        dimension: true,
    },
    LegacyAttribute {
        property: "height",
        attribute: "height",
        elements: &["table", "tr", "th", "td", "img"],
        dimension: true,
    },
];

/// An element selected by at least one inlinable rule.
pub struct StyledElement {
    pub node: NodeDataRef<ElementData>,
    pub rules: Vec<MatchedRule>,
}

impl StyledElement {
    pub fn new(node: NodeDataRef<ElementData>) -> Self {
        Self {
            node,
            rules: Vec::new(),
        }
    }

    /// Writes the computed `style` attribute and, when `legacy` is set,
    /// the matching presentational attributes.
    pub fn apply(&self, legacy: bool) -> Result<(), InlineError> {
        let declarations = self.computed_declarations()?;

        let style = style_value(&declarations);
        let mut attributes = self.node.attributes.borrow_mut();
        if !style.is_empty() {
            attributes.insert("style", style);
        }

        if legacy {
            let name = self.node.name.local.to_ascii_lowercase();
            for declaration in &declarations {
                if let Some((attribute, value)) = legacy_attribute(&name, declaration) {
                    attributes.insert(attribute, value);
                }
            }
        }
        Ok(())
    }

    /// Resolves the cascade for this element, sorted by property name.
    fn computed_declarations(&self) -> Result<Vec<Declaration>, InlineError> {
        let inline = self.style_attribute()?;

        let mut winners: BTreeMap<String, (Precedence, Declaration)> = BTreeMap::new();
        let sources = self
            .rules
            .iter()
            .map(|rule| (rule.origin, &rule.declarations))
            .chain(std::iter::once((Origin::StyleAttribute, &inline)));

        for (origin, declarations) in sources {
            for declaration in declarations {
                let precedence = (declaration.important, origin);
                let replace = winners
                    .get(&declaration.property)
                    .is_none_or(|(current, _)| precedence >= *current);
                if replace {
                    winners.insert(declaration.property.clone(), (precedence, declaration.clone()));
                }
            }
        }

        Ok(winners.into_values().map(|(_, declaration)| declaration).collect())
    }

    /// Parses the element's existing `style` attribute, if any.
    fn style_attribute(&self) -> Result<Vec<Declaration>, InlineError> {
        let attributes = self.node.attributes.borrow();
        match attributes.get("style") {
            Some(value) if !value.trim().is_empty() => {
                css::parse_declarations(value).map_err(|source| InlineError::StyleAttribute {
                    element: self.node.name.local.to_string(),
                    source,
                })
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// Formats declarations as a `style` attribute value, without `!important`.
pub fn style_value(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.property, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the presentational attribute a declaration maps to on the
/// element called `element`, if any.
fn legacy_attribute(element: &str, declaration: &Declaration) -> Option<(&'static str, String)> {
    let property = declaration.property.to_ascii_lowercase();
    let mapping = LEGACY_ATTRIBUTES
        .iter()
        .find(|m| m.property == property && m.elements.contains(&element))?;
    let value = if mapping.dimension {
        dimension_value(&declaration.value)?
    } else {
        declaration.value.clone()
    };
    Some((mapping.attribute, value))
}

/// Converts a CSS length to an HTML dimension: `600px` and `600` become
/// `600`, `50%` stays; anything else has no HTML equivalent.
fn dimension_value(value: &str) -> Option<String> {
    let value = value.trim();
    let (number, suffix) = match value.strip_suffix('%') {
        Some(number) => (number, "%"),
        None => (value.strip_suffix("px").unwrap_or(value), ""),
    };
    let is_number = !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit() || c == '.')
        && number.chars().filter(|&c| c == '.').count() <= 1;
    is_number.then(|| format!("{number}{suffix}"))
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;
