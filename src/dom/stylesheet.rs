//! `<style>` elements and their rule lists.
//!
//! Each `<style>` element owns an ordered list of rule texts, the
//! in-memory counterpart of `sheet.cssRules`.

use super::node::NodeId;
use super::tree::Document;

impl Document {
    /// Return the `<style id=…>` element in `<head>`, creating it if needed.
    pub fn ensure_style_element(&mut self, id: &str) -> NodeId {
        if let Some(existing) = self.style_element(id) {
            if !self.sheets.contains_key(existing) {
                self.sheets.insert(existing, Vec::new());
            }
            return existing;
        }
        let style = self.append_element(self.head(), "style");
        self.set_attribute(style, "id", id);
        self.sheets.insert(style, Vec::new());
        style
    }

    /// Look up a `<style>` element in `<head>` by id.
    pub fn style_element(&self, id: &str) -> Option<NodeId> {
        self.element_children(self.head()).find(|&node| {
            self.element(node)
                .is_some_and(|el| el.tag == "style" && el.id.as_deref() == Some(id))
        })
    }

    /// The rule texts of a stylesheet, in order. Empty for non-style nodes.
    pub fn css_rules(&self, sheet: NodeId) -> &[String] {
        self.sheets.get(sheet).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Insert a rule at `index` (clamped to the end). Returns the index used,
    /// or `None` if `sheet` is not a stylesheet.
    pub fn insert_rule(&mut self, sheet: NodeId, rule: impl Into<String>, index: usize) -> Option<usize> {
        let rules = self.sheets.get_mut(sheet)?;
        let index = index.min(rules.len());
        rules.insert(index, rule.into());
        Some(index)
    }

    /// Delete the rule at `index`.
    pub fn delete_rule(&mut self, sheet: NodeId, index: usize) -> Option<String> {
        let rules = self.sheets.get_mut(sheet)?;
        (index < rules.len()).then(|| rules.remove(index))
    }

    /// Delete every rule of a stylesheet.
    pub fn clear_rules(&mut self, sheet: NodeId) {
        if let Some(rules) = self.sheets.get_mut(sheet) {
            rules.clear();
        }
    }
}
