//! Event listeners and bubbling dispatch.
//!
//! Listeners are stored per node on the [`Document`]. [`dispatch`] takes the
//! document by `RefCell` so that listeners are free to borrow it mutably
//! (re-rendering replaces the very subtree the event came from): the bubble
//! path and its listeners are collected first, the borrow is released, and
//! only then are the listeners invoked.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::node::NodeId;
use super::tree::Document;

/// A host event listener.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Input types that never contribute to form data.
const NON_DATA_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "image", "file"];

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A dispatched event.
///
/// `value` is the target's live value at dispatch time. `form_data` is only
/// populated for `submit` events: the `(name, value)` pairs of the enclosing
/// form's named controls, in document order.
#[derive(Debug)]
pub struct Event {
    kind: String,
    target: NodeId,
    current_target: Cell<NodeId>,
    value: Option<String>,
    form_data: Vec<(String, String)>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// Create an event without form data.
    pub fn new(kind: impl Into<String>, target: NodeId, value: Option<String>) -> Self {
        Self {
            kind: kind.into(),
            target,
            current_target: Cell::new(target),
            value,
            form_data: Vec::new(),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Attach form data (builder).
    pub fn with_form_data(mut self, form_data: Vec<(String, String)>) -> Self {
        self.form_data = form_data;
        self
    }

    /// Event type, e.g. `"click"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The node the event was dispatched to.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    /// The target's value at dispatch time.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// All form fields of a `submit` event.
    pub fn form_data(&self) -> &[(String, String)] {
        &self.form_data
    }

    /// The first form field named `name`.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form_data
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Mark the default action as cancelled.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether [`Self::prevent_default`] was called.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stop the event from reaching further ancestors.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether [`Self::stop_propagation`] was called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

// ---------------------------------------------------------------------------
// Listener registry
// ---------------------------------------------------------------------------

impl Document {
    /// Register a listener for `kind` events on `id`.
    pub fn add_event_listener(&mut self, id: NodeId, kind: &str, listener: Listener) {
        if !self.contains(id) {
            return;
        }
        match self.listeners.get_mut(id) {
            Some(list) => list.push((kind.to_string(), listener)),
            None => {
                self.listeners.insert(id, vec![(kind.to_string(), listener)]);
            }
        }
    }

    /// Number of listeners registered for `kind` on `id`.
    pub fn listener_count(&self, id: NodeId, kind: &str) -> usize {
        self.listeners
            .get(id)
            .map_or(0, |list| list.iter().filter(|(k, _)| k == kind).count())
    }

    /// Compute the bubble path from `start` up to `<html>` (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., html]`.
    /// If `start` does not exist in the document, returns an empty vec.
    pub fn bubble_path(&self, start: NodeId) -> Vec<NodeId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(self.ancestors(start));
        path
    }

    /// The `(name, value)` pairs a submit of `form` would send.
    pub fn form_data(&self, form: NodeId) -> Vec<(String, String)> {
        self.descendants(form)
            .into_iter()
            .filter_map(|id| {
                let el = self.element(id)?;
                if !matches!(el.tag.as_str(), "input" | "textarea" | "select") {
                    return None;
                }
                let name = el.attribute("name").filter(|n| !n.is_empty())?;
                if el.has_attribute("disabled") {
                    return None;
                }
                let input_type = el.input_type();
                match input_type.as_deref() {
                    Some(t) if NON_DATA_INPUT_TYPES.contains(&t) => return None,
                    Some("checkbox" | "radio") if !el.has_attribute("checked") => return None,
                    Some("checkbox" | "radio") => {
                        return Some((name, el.value.clone().unwrap_or_else(|| "on".into())))
                    }
                    _ => {}
                }
                Some((name, el.value.clone().unwrap_or_default()))
            })
            .collect()
    }

    /// The form a node belongs to: itself or its closest `<form>` ancestor.
    pub fn closest_form(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.tag_name(n) == Some("form"))
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Dispatch a `kind` event at `target`, bubbling to the document root.
///
/// Listeners run with the document unborrowed. Listeners registered during
/// dispatch are not invoked for this event.
pub fn dispatch(document: &RefCell<Document>, target: NodeId, kind: &str) -> Event {
    let (event, listeners) = {
        let doc = document.borrow();
        let mut event = Event::new(kind, target, doc.value(target).map(str::to_owned));
        if kind == "submit" {
            if let Some(form) = doc.closest_form(target) {
                event = event.with_form_data(doc.form_data(form));
            }
        }

        let listeners: Vec<(NodeId, Listener)> = doc
            .bubble_path(target)
            .into_iter()
            .flat_map(|node| {
                doc.listeners
                    .get(node)
                    .into_iter()
                    .flatten()
                    .filter(|(k, _)| k == kind)
                    .map(move |(_, listener)| (node, Rc::clone(listener)))
            })
            .collect();
        (event, listeners)
    };

    for (node, listener) in listeners {
        if event.is_propagation_stopped() && node != event.current_target() {
            break;
        }
        event.current_target.set(node);
        listener(&event);
    }

    event
}
