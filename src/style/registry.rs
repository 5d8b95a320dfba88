//! The style registry: ordered rules backed by one `<style>` element.

use tracing::{debug, warn};

use super::rule::{Declarations, StyleRule};
use super::scope::ScopeBinder;
use super::spec::StyleSpec;
use super::StyleError;
use crate::css::util::to_kebab_case;
use crate::dom::{Document, NodeId};

/// Selector-keyed style rules for one app instance.
///
/// The registry owns a `<style id=…>` element in `<head>`. Mutations only
/// touch the in-memory rules; [`StyleRegistry::apply`] scopes them against a
/// render root and rewrites the stylesheet.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    rules: Vec<StyleRule>,
    sheet_id: String,
    sheet: NodeId,
}

impl StyleRegistry {
    /// Build a registry from a spec, creating (or reusing) the stylesheet
    /// element `sheet_id`.
    pub fn from_spec(doc: &mut Document, sheet_id: &str, spec: &StyleSpec) -> Result<Self, StyleError> {
        let rules = spec.to_rules()?;
        let sheet = doc.ensure_style_element(sheet_id);
        Ok(Self {
            rules,
            sheet_id: sheet_id.to_string(),
            sheet,
        })
    }

    /// The `<style>` element this registry writes to.
    pub fn sheet(&self) -> NodeId {
        self.sheet
    }

    /// The id of the `<style>` element.
    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    /// All rules in registration order, including empty ones.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [StyleRule] {
        &mut self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a rule is registered for `selector`.
    pub fn contains(&self, selector: &str) -> bool {
        self.find(selector).is_some()
    }

    fn find(&self, selector: &str) -> Option<&StyleRule> {
        let selector = selector.trim();
        self.rules.iter().find(|r| r.selector() == selector)
    }

    fn find_mut(&mut self, selector: &str) -> Option<&mut StyleRule> {
        let selector = selector.trim();
        self.rules.iter_mut().find(|r| r.selector() == selector)
    }

    /// The declarations registered for `selector`.
    pub fn get(&self, selector: &str) -> Result<&Declarations, StyleError> {
        self.find(selector)
            .map(StyleRule::declarations)
            .ok_or_else(|| StyleError::SelectorNotFound(selector.to_string()))
    }

    /// One declaration of `selector`; `Ok(None)` if the rule lacks it.
    pub fn get_property(&self, selector: &str, property: &str) -> Result<Option<&str>, StyleError> {
        Ok(self.get(selector)?.get(&to_kebab_case(property)))
    }

    /// Insert or update a declaration, creating the rule if needed.
    ///
    /// An empty selector is ignored with a warning.
    pub fn put(&mut self, selector: &str, property: &str, value: &str) {
        if selector.trim().is_empty() {
            warn!(property, "style put with an empty selector; ignored");
            return;
        }
        let property = to_kebab_case(property.trim());
        let value = value.trim();
        match self.find_mut(selector) {
            Some(rule) => rule.declarations_mut().set(property, value),
            None => {
                let mut rule = StyleRule::new(selector.trim());
                rule.declarations_mut().set(property, value);
                self.rules.push(rule);
            }
        }
    }

    /// Remove one declaration, or the whole rule when `property` is `None`.
    ///
    /// Returns whether anything was removed. A rule left without
    /// declarations stays registered.
    pub fn del(&mut self, selector: &str, property: Option<&str>) -> bool {
        match property {
            Some(property) => self
                .find_mut(selector)
                .and_then(|rule| rule.declarations_mut().remove(&to_kebab_case(property)))
                .is_some(),
            None => {
                let before = self.rules.len();
                let selector = selector.trim();
                self.rules.retain(|r| r.selector() != selector);
                self.rules.len() != before
            }
        }
    }

    /// Replace every rule with the content of `spec`.
    ///
    /// On error the registry is left untouched.
    pub fn reset(&mut self, spec: &StyleSpec) -> Result<(), StyleError> {
        self.rules = spec.to_rules()?;
        Ok(())
    }

    /// Rule texts for the stylesheet, in order. Empty rules are skipped.
    pub fn serialize(&self) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !rule.declarations().is_empty())
            .map(StyleRule::to_string)
            .collect()
    }

    /// Scope every rule against `root`, then rewrite the stylesheet.
    pub fn apply(&mut self, doc: &mut Document, root: NodeId, binder: &ScopeBinder) {
        binder.bind(self, doc, root);

        self.sheet = doc.ensure_style_element(&self.sheet_id);
        doc.clear_rules(self.sheet);
        let texts = self.serialize();
        let count = texts.len();
        for (index, text) in texts.into_iter().enumerate() {
            doc.insert_rule(self.sheet, text, index);
        }
        debug!(sheet = %self.sheet_id, rules = count, "stylesheet updated");
    }

    /// Remove the stylesheet element from the document.
    pub fn detach(&self, doc: &mut Document) {
        doc.remove(self.sheet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry(spec: StyleSpec) -> (Document, StyleRegistry) {
        let mut doc = Document::new();
        let registry = StyleRegistry::from_spec(&mut doc, "css-test", &spec).unwrap();
        (doc, registry)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn from_spec_creates_one_stylesheet() {
        let (mut doc, first) = registry(StyleSpec::Empty);
        let second = StyleRegistry::from_spec(&mut doc, "css-test", &StyleSpec::Empty).unwrap();
        assert_eq!(first.sheet(), second.sheet());
        assert_eq!(doc.style_element("css-test"), Some(first.sheet()));
    }

    #[test]
    fn invalid_spec_creates_nothing() {
        let mut doc = Document::new();
        let err = StyleRegistry::from_spec(&mut doc, "css-x", &StyleSpec::css("p {")).unwrap_err();
        assert!(matches!(err, StyleError::Parse(_)));
        assert_eq!(doc.style_element("css-x"), None);
    }

    // ── Queries ──────────────────────────────────────────────────────

    #[test]
    fn get_and_get_property() {
        let (_doc, reg) = registry(StyleSpec::rules([(".btn", [("fontSize", "12px")])]));
        assert_eq!(reg.get(".btn").unwrap().get("font-size"), Some("12px"));
        assert_eq!(reg.get_property(".btn", "fontSize").unwrap(), Some("12px"));
        assert_eq!(reg.get_property(".btn", "color").unwrap(), None);
        assert_eq!(
            reg.get(".missing").unwrap_err(),
            StyleError::SelectorNotFound(".missing".into())
        );
        assert!(reg.get_property(".missing", "color").is_err());
    }

    // ── Mutation ─────────────────────────────────────────────────────

    #[test]
    fn put_creates_and_updates() {
        let (_doc, mut reg) = registry(StyleSpec::Empty);
        reg.put(".colorize", "color", "blue");
        reg.put(".colorize", "backgroundColor", "white");
        reg.put(".colorize", "color", "green");
        assert_eq!(reg.len(), 1);
        assert_eq!(
            reg.serialize(),
            vec![".colorize {\n\tcolor: green;\n\tbackground-color: white;\n}"]
        );
    }

    #[test]
    fn put_ignores_empty_selector() {
        let (_doc, mut reg) = registry(StyleSpec::default());
        reg.put("  ", "color", "red");
        reg.put("", "color", "red");
        assert!(reg.is_empty());
        assert!(reg.serialize().is_empty());
    }

    #[test]
    fn del_property_and_rule() {
        let (_doc, mut reg) = registry(StyleSpec::rules([
            ("h1", vec![("color", "red"), ("margin", "0")]),
            ("p", vec![("color", "blue")]),
        ]));
        assert!(reg.del("h1", Some("color")));
        assert!(!reg.del("h1", Some("color")));
        assert!(reg.del("p", None));
        assert!(!reg.del("p", None));
        assert!(!reg.del(".nope", Some("color")));
        assert_eq!(reg.serialize(), vec!["h1 {\n\tmargin: 0;\n}"]);
    }

    #[test]
    fn emptied_rule_stays_registered_but_is_not_serialized() {
        let (_doc, mut reg) = registry(StyleSpec::rules([("h1", [("color", "red")])]));
        reg.del("h1", Some("color"));
        assert!(reg.contains("h1"));
        assert!(reg.get("h1").unwrap().is_empty());
        assert!(reg.serialize().is_empty());
    }

    #[test]
    fn reset_replaces_rules() {
        let (_doc, mut reg) = registry(StyleSpec::rules([("h1", [("color", "red")])]));
        reg.put("p", "color", "blue");
        reg.reset(&StyleSpec::rules([("h2", [("color", "green")])])).unwrap();
        assert_eq!(reg.serialize(), vec!["h2 {\n\tcolor: green;\n}"]);
    }

    #[test]
    fn failed_reset_keeps_rules() {
        let (_doc, mut reg) = registry(StyleSpec::rules([("h1", [("color", "red")])]));
        assert!(reg.reset(&StyleSpec::css("}")).is_err());
        assert!(reg.contains("h1"));
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn serialize_reflects_net_triples_in_order() {
        let (_doc, mut reg) = registry(StyleSpec::Empty);
        reg.put("a", "color", "red");
        reg.put("b", "color", "red");
        reg.put("a", "margin", "0");
        reg.del("b", Some("color"));
        reg.put("b", "padding", "1px");
        reg.put("a", "color", "blue");
        assert_eq!(
            reg.serialize(),
            vec!["a {\n\tcolor: blue;\n\tmargin: 0;\n}", "b {\n\tpadding: 1px;\n}"]
        );
    }

    #[test]
    fn apply_rewrites_stylesheet() {
        let (mut doc, mut reg) = registry(StyleSpec::rules([(".x", [("color", "red")])]));
        let root = doc.append_element(doc.body(), "div");
        let binder = ScopeBinder::new("#root");

        reg.apply(&mut doc, root, &binder);
        assert_eq!(doc.css_rules(reg.sheet()).len(), 1);
        reg.apply(&mut doc, root, &binder);
        assert_eq!(doc.css_rules(reg.sheet()).len(), 1);
        reg.del(".x", None);
        reg.apply(&mut doc, root, &binder);
        assert!(doc.css_rules(reg.sheet()).is_empty());
    }

    #[test]
    fn detach_removes_stylesheet() {
        let (mut doc, reg) = registry(StyleSpec::Empty);
        reg.detach(&mut doc);
        assert_eq!(doc.style_element("css-test"), None);
    }
}
