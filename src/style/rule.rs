//! Style rules: a selector and its ordered declarations.

use std::fmt;

/// Ordered `property → value` pairs. Updating an existing property keeps its
/// position; new properties are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    /// Create an empty declaration set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or update a declaration.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Remove a declaration, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.entries.iter().position(|(p, _)| p == property)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate `(property, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut declarations = Declarations::new();
        for (property, value) in iter {
            declarations.set(property, value);
        }
        declarations
    }
}

/// One registered rule.
///
/// `scoped_selector` is the selector the scope binder last produced for this
/// rule; until the first bind it is `None` and the raw selector is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    selector: String,
    declarations: Declarations,
    scoped_selector: Option<String>,
}

impl StyleRule {
    /// Create a rule with no declarations.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Declarations::new(),
            scoped_selector: None,
        }
    }

    /// Set the declarations (builder).
    pub fn with_declarations(mut self, declarations: Declarations) -> Self {
        self.declarations = declarations;
        self
    }

    /// The selector as registered.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    pub(crate) fn declarations_mut(&mut self) -> &mut Declarations {
        &mut self.declarations
    }

    /// The selector written to the stylesheet.
    pub fn effective_selector(&self) -> &str {
        self.scoped_selector.as_deref().unwrap_or(&self.selector)
    }

    pub(crate) fn set_scoped_selector(&mut self, scoped: String) {
        self.scoped_selector = Some(scoped);
    }
}

impl fmt::Display for StyleRule {
    /// `selector {\n\tprop: value;\n}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.effective_selector())?;
        for (property, value) in self.declarations.iter() {
            writeln!(f, "\t{property}: {value};")?;
        }
        write!(f, "}}")
    }
}
