//! Focus preservation across a full re-render.
//!
//! The focused element does not survive its subtree being replaced. Before
//! the pass the snapshot records where it was on screen and its selection;
//! after the pass whatever element now sits at that point is focused and
//! given the selection back.

use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::geometry::Offset;

/// Focus state captured right before a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSnapshot {
    /// Top-left corner of the focused element's box.
    pub position: Offset,
    /// Selection range, when the element had one.
    pub selection: Option<(usize, usize)>,
    /// Value at capture time. Kept for diagnostics, never written back.
    pub prior_value: Option<String>,
}

impl FocusSnapshot {
    /// Capture focus if the active element lies inside `root` and has a box.
    pub fn capture(doc: &Document, root: NodeId) -> Option<Self> {
        let active = doc.active_element()?;
        if !doc.is_descendant(active, root) {
            return None;
        }
        let rect = doc.bounding_client_rect(active)?;
        Some(Self {
            position: rect.offset(),
            selection: doc.selection_range(active),
            prior_value: doc.value(active).map(str::to_owned),
        })
    }

    /// Focus the element at the remembered position and restore the
    /// selection. Returns the element focused, if any.
    pub fn restore(&self, doc: &mut Document) -> Option<NodeId> {
        let Some(target) = doc.element_from_point(self.position) else {
            trace!(position = ?self.position, "no element at focus position");
            return None;
        };
        if !doc.focus(target) {
            trace!(position = ?self.position, "element at focus position is not focusable");
            return None;
        }
        if let Some((start, end)) = self.selection {
            if doc.supports_selection(target) {
                doc.set_selection_range(target, start, end);
            }
        }
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(doc: &mut Document) -> (NodeId, NodeId) {
        let root = doc.append_element(doc.body(), "div");
        let heading = doc.append_element(root, "h1");
        doc.append_text(heading, "Hello");
        let input = doc.append_element(root, "input");
        doc.set_value(input, "world!");
        (root, input)
    }

    #[test]
    fn capture_requires_focus_inside_root() {
        let mut doc = Document::new();
        let (root, input) = form(&mut doc);
        assert_eq!(FocusSnapshot::capture(&doc, root), None);

        let outside = doc.append_element(doc.body(), "input");
        doc.focus(outside);
        assert_eq!(FocusSnapshot::capture(&doc, root), None);

        doc.focus(input);
        doc.set_selection_range(input, 1, 3);
        let snapshot = FocusSnapshot::capture(&doc, root).unwrap();
        assert_eq!(snapshot.position, Offset::new(0, 16));
        assert_eq!(snapshot.selection, Some((1, 3)));
        assert_eq!(snapshot.prior_value.as_deref(), Some("world!"));
    }

    #[test]
    fn restore_after_replacement() {
        let mut doc = Document::new();
        let (root, input) = form(&mut doc);
        doc.focus(input);
        doc.set_selection_range(input, 2, 2);
        let snapshot = FocusSnapshot::capture(&doc, root).unwrap();

        // Rebuild the subtree: the old input is gone, focus falls to body.
        doc.remove_children(root);
        let heading = doc.append_element(root, "h1");
        doc.append_text(heading, "Hello");
        let fresh = doc.append_element(root, "input");
        doc.set_value(fresh, "world!!");
        assert_eq!(doc.active_element(), None);

        assert_eq!(snapshot.restore(&mut doc), Some(fresh));
        assert_eq!(doc.active_element(), Some(fresh));
        assert_eq!(doc.selection_range(fresh), Some((2, 2)));
        // The prior value is not written back.
        assert_eq!(doc.value(fresh), Some("world!!"));
    }

    #[test]
    fn restore_is_skipped_when_nothing_focusable_is_there() {
        let mut doc = Document::new();
        let (root, input) = form(&mut doc);
        doc.focus(input);
        let snapshot = FocusSnapshot::capture(&doc, root).unwrap();

        doc.remove_children(root);
        let p = doc.append_element(root, "p");
        doc.append_text(p, "no inputs here");
        assert_eq!(snapshot.restore(&mut doc), None);
        assert_eq!(doc.active_element(), None);
    }
}
