//! CSS AST: Selector, CompoundSelector, AttributeSelector, RawRule.

/// How an attribute selector compares the attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOp {
    /// `[attr]`: the attribute is present.
    Exists,
    /// `[attr=v]`
    Equals,
    /// `[attr~=v]`: whitespace-separated list contains `v`.
    Includes,
    /// `[attr|=v]`: equals `v` or starts with `v-`.
    DashMatch,
    /// `[attr^=v]`
    Prefix,
    /// `[attr$=v]`
    Suffix,
    /// `[attr*=v]`
    Substring,
}

/// An attribute selector: `[name op value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub op: AttributeOp,
    /// Unquoted comparison value; empty for [`AttributeOp::Exists`].
    pub value: String,
}

impl AttributeSelector {
    /// Test an attribute value (or its absence) against this selector.
    pub fn matches(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self.op {
            AttributeOp::Exists => true,
            AttributeOp::Equals => actual == self.value,
            AttributeOp::Includes => actual.split_whitespace().any(|word| word == self.value),
            AttributeOp::DashMatch => {
                actual == self.value
                    || actual
                        .strip_prefix(self.value.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            // Empty operands never match for the substring family.
            AttributeOp::Prefix => !self.value.is_empty() && actual.starts_with(&self.value),
            AttributeOp::Suffix => !self.value.is_empty() && actual.ends_with(&self.value),
            AttributeOp::Substring => !self.value.is_empty() && actual.contains(&self.value),
        }
    }
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector, lowercased: `li`, `button`.
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[type=text]`.
    Attribute(AttributeSelector),
    /// Pseudo-class with an optional argument: `:focus`, `:nth-child(2)`.
    PseudoClass { name: String, argument: Option<String> },
    /// Pseudo-element: `::before`. Never matches an element.
    PseudoElement(String),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
    /// Next-sibling combinator: `A + B`.
    NextSibling,
    /// Subsequent-sibling combinator: `A ~ B`.
    SubsequentSibling,
}

/// A single compound selector (sequence of components without combinators).
///
/// For example, `li.todo:first-child` is one `CompoundSelector` with three
/// components: `Type("li")`, `Class("todo")`, `PseudoClass("first-child")`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component to this compound selector.
    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A full CSS selector: chain of compound selectors joined by combinators.
///
/// `ul > li.done` has parts
/// `[Compound(ul), Combinator(Child), Compound(li.done)]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A top-level rule block read from raw CSS text.
///
/// Declaration values are kept verbatim; nothing downstream interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    /// Selector text with internal whitespace collapsed to single spaces.
    pub selector: String,
    /// `(property, value)` pairs in source order.
    pub declarations: Vec<(String, String)>,
}
