//! Style specs: the initial (or reset) content of a style registry.

use serde_json::Value;

use super::rule::{Declarations, StyleRule};
use super::StyleError;
use crate::css::parser::parse_stylesheet;
use crate::css::util::to_kebab_case;

/// A style specification: selector → declarations pairs, or raw CSS text.
///
/// Property names are kebab-cased when the spec is turned into rules, so
/// `fontSize` and `font-size` are the same property. A selector that appears
/// more than once is merged into one rule, later values winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StyleSpec {
    Rules(Vec<(String, Vec<(String, String)>)>),
    Css(String),
    #[default]
    Empty,
}

impl StyleSpec {
    /// Build a spec from `(selector, declarations)` pairs.
    ///
    /// ```ignore
    /// let spec = StyleSpec::rules([(".btn-del", [("color", "red")])]);
    /// ```
    pub fn rules<S, D, P, V>(rules: impl IntoIterator<Item = (S, D)>) -> Self
    where
        S: Into<String>,
        D: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<String>,
    {
        StyleSpec::Rules(
            rules
                .into_iter()
                .map(|(selector, decls)| {
                    let decls = decls.into_iter().map(|(p, v)| (p.into(), v.into())).collect();
                    (selector.into(), decls)
                })
                .collect(),
        )
    }

    /// Raw CSS text of top-level `selector { prop: value; }` blocks.
    pub fn css(text: impl Into<String>) -> Self {
        StyleSpec::Css(text.into())
    }

    /// Read a spec from JSON: an object of objects, or a CSS string.
    ///
    /// Numbers are stringified (`{"p": {"opacity": 0.5}}`); `null` is empty.
    pub fn from_json(value: &Value) -> Result<Self, StyleError> {
        match value {
            Value::Null => Ok(StyleSpec::Empty),
            Value::String(css) => Ok(StyleSpec::Css(css.clone())),
            Value::Object(rules) => {
                let mut out = Vec::with_capacity(rules.len());
                for (selector, decls) in rules {
                    let Value::Object(decls) = decls else {
                        return Err(StyleError::InvalidSpec(format!(
                            "declarations for `{selector}` must be an object"
                        )));
                    };
                    let mut pairs = Vec::with_capacity(decls.len());
                    for (property, value) in decls {
                        let value = match value {
                            Value::String(s) => s.clone(),
                            Value::Number(n) => n.to_string(),
                            other => {
                                return Err(StyleError::InvalidSpec(format!(
                                    "value of `{selector} {{ {property} }}` must be a string or number, got {other}"
                                )))
                            }
                        };
                        pairs.push((property.clone(), value));
                    }
                    out.push((selector.clone(), pairs));
                }
                Ok(StyleSpec::Rules(out))
            }
            other => Err(StyleError::InvalidSpec(format!(
                "style spec must be an object or a CSS string, got {other}"
            ))),
        }
    }

    /// Normalize into registry rules.
    pub fn to_rules(&self) -> Result<Vec<StyleRule>, StyleError> {
        let pairs: Vec<(String, Vec<(String, String)>)> = match self {
            StyleSpec::Empty => Vec::new(),
            StyleSpec::Rules(rules) => rules.clone(),
            StyleSpec::Css(text) => parse_stylesheet(text)?
                .into_iter()
                .map(|raw| (raw.selector, raw.declarations))
                .collect(),
        };

        let mut rules: Vec<StyleRule> = Vec::new();
        for (selector, decls) in pairs {
            let selector = selector.trim().to_string();
            if selector.is_empty() {
                return Err(StyleError::InvalidSpec("empty selector".into()));
            }
            let index = match rules.iter().position(|r| r.selector() == selector) {
                Some(index) => index,
                None => {
                    rules.push(StyleRule::new(selector));
                    rules.len() - 1
                }
            };
            let declarations: &mut Declarations = rules[index].declarations_mut();
            for (property, value) in decls {
                declarations.set(to_kebab_case(property.trim()), value.trim());
            }
        }
        Ok(rules)
    }
}
