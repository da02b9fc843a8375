//! Stylesheet model and its canonical text form.
//!
//! The canonical form puts one declaration per line, indents two spaces
//! per nesting level, and separates top-level rules with a newline.
//! Re-parsing canonical output yields an equal [`Stylesheet`].

use std::fmt;

/// Indentation unit for nested blocks.
const INDENT: &str = "  ";

/// A parsed stylesheet: an ordered list of top-level rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// A single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `sel1, sel2 { declarations }`
    Qualified {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
    },
    /// `@name prelude;` or `@name prelude { ... }`
    At {
        /// Rule name including the leading `@`.
        name: String,
        prelude: String,
        block: Option<AtRuleBlock>,
    },
}

/// Body of an at-rule that has a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleBlock {
    /// `@font-face`, `@page` and other descriptor blocks.
    Declarations(Vec<Declaration>),
    /// `@media`, `@supports`, `@keyframes` and other grouping rules.
    Rules(Vec<Rule>),
}

/// A `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_str(";")
    }
}

impl Rule {
    /// Writes the rule as if it sat `depth` blocks deep.
    ///
    /// The caller is responsible for indenting the first line.
    fn write_at_depth(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Rule::Qualified {
                selectors,
                declarations,
            } => {
                f.write_str(&selectors.join(", "))?;
                write_declaration_block(f, declarations, depth)
            }
            Rule::At {
                name,
                prelude,
                block,
            } => {
                f.write_str(name)?;
                if !prelude.is_empty() {
                    write!(f, " {prelude}")?;
                }
                match block {
                    None => f.write_str(";"),
                    Some(AtRuleBlock::Declarations(declarations)) => {
                        write_declaration_block(f, declarations, depth)
                    }
                    Some(AtRuleBlock::Rules(rules)) => {
                        f.write_str(" {\n")?;
                        for rule in rules {
                            f.write_str(&INDENT.repeat(depth + 1))?;
                            rule.write_at_depth(f, depth + 1)?;
                            f.write_str("\n")?;
                        }
                        write!(f, "{}}}", INDENT.repeat(depth))
                    }
                }
            }
        }
    }
}

fn write_declaration_block(
    f: &mut fmt::Formatter<'_>,
    declarations: &[Declaration],
    depth: usize,
) -> fmt::Result {
    f.write_str(" {\n")?;
    let indent = INDENT.repeat(depth + 1);
    for declaration in declarations {
        writeln!(f, "{indent}{declaration}")?;
    }
    write!(f, "{}}}", INDENT.repeat(depth))
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_at_depth(f, 0)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            rule.write_at_depth(f, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "stylesheet_tests.rs"]
mod tests;
