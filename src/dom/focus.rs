//! Focus, form-control values and text selection.

use super::node::NodeId;
use super::tree::Document;

impl Document {
    /// The focused element, or `None` when focus rests on the body.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&id| self.contains(id))
    }

    /// Move focus to `id`. Returns `false` (and leaves focus unchanged) if the
    /// node is not a connected, focusable element.
    ///
    /// A text-entry control that never had a selection gets a caret at the end
    /// of its value.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        if !el.is_focusable() {
            return false;
        }
        if el.supports_selection() && el.selection.is_none() {
            let end = el.value.as_deref().map_or(0, |v| v.chars().count());
            el.selection = Some((end, end));
        }
        self.active = Some(id);
        true
    }

    /// Drop focus back to the body.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Whether the element exposes a selection range.
    pub fn supports_selection(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|el| el.supports_selection())
    }

    /// Current selection `(start, end)` in characters.
    pub fn selection_range(&self, id: NodeId) -> Option<(usize, usize)> {
        let el = self.element(id)?;
        if !el.supports_selection() {
            return None;
        }
        el.selection
    }

    /// Set the selection range, clamped to the value length (and `start` to
    /// `end`). Returns `false` if the element has no selection.
    pub fn set_selection_range(&mut self, id: NodeId, start: usize, end: usize) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        if !el.supports_selection() {
            return false;
        }
        let len = el.value.as_deref().map_or(0, |v| v.chars().count());
        let end = end.min(len);
        el.selection = Some((start.min(end), end));
        true
    }

    /// Live value of a form control.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.value.as_deref()
    }

    /// Replace the live value of a form control. The caret moves to the end.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        let value = value.into();
        if el.supports_selection() {
            let end = value.chars().count();
            el.selection = Some((end, end));
        }
        el.value = Some(value);
    }
}
