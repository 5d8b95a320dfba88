//! View nodes: the tree a view function returns.
//!
//! A view builds [`Node`]s with [`el`] and the builder methods of
//! [`Element`]; the render cycle materializes them into the host document.
//!
//! ```ignore
//! el("div")
//!     .child(el("h1").text(format!("Counter: {}", state.get_i64("counter").unwrap_or(0))))
//!     .child(el("button").text("+").on("click", methods.handler("increment")))
//! ```

use std::fmt;
use std::rc::Rc;

use crate::app::Context;
use crate::dom::Event;
use crate::error::Error;

/// An event handler attached to a view element.
pub type Handler = Rc<dyn Fn(&Context, &Event) -> Result<(), Error>>;

/// Event used by [`Element::bind`].
pub const DEFAULT_BIND_EVENT: &str = "change";

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A view node: text or an element.
#[derive(Clone)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Node::Element(el) => el.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// Two-way binding between a form control and a state key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub model: String,
    pub event: String,
}

/// A view element.
///
/// `tag` may use the shortcut syntax (`input:text@taskname`, `button.btn-del`),
/// expanded when the element is materialized.
#[derive(Clone)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    listeners: Vec<(String, Handler)>,
    binding: Option<Binding>,
    children: Vec<Node>,
}

/// Start building an element.
pub fn el(tag: impl Into<String>) -> Element {
    Element {
        tag: tag.into(),
        attributes: Vec::new(),
        listeners: Vec::new(),
        binding: None,
        children: Vec::new(),
    }
}

/// DOM event names recognised after an `on` prefix.
const DOM_EVENTS: &[&str] = &[
    "abort", "blur", "change", "click", "close", "contextmenu", "copy", "cut", "dblclick",
    "drag", "dragend", "dragenter", "dragleave", "dragover", "dragstart", "drop", "error",
    "focus", "focusin", "focusout", "input", "invalid", "keydown", "keypress", "keyup", "load",
    "mousedown", "mouseenter", "mouseleave", "mousemove", "mouseout", "mouseover", "mouseup",
    "paste", "pointerdown", "pointerenter", "pointerleave", "pointermove", "pointerup", "reset",
    "resize", "scroll", "search", "select", "submit", "toggle", "touchend", "touchmove",
    "touchstart", "wheel",
];

/// `onclick` → `click`. The prefix is only dropped in front of a DOM event
/// name, so `online` stays `online`.
pub(crate) fn event_name(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    match name.strip_prefix("on") {
        Some(rest) if DOM_EVENTS.contains(&rest) => rest.to_string(),
        _ => name,
    }
}

impl Element {
    /// Set an attribute, replacing an earlier value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Listen for `event` (`click` or `onclick`).
    pub fn on(
        mut self,
        event: &str,
        handler: impl Fn(&Context, &Event) -> Result<(), Error> + 'static,
    ) -> Self {
        self.listeners.push((event_name(event), Rc::new(handler)));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Bind the control's value to `state[model]`, written back on `change`.
    pub fn bind(self, model: impl Into<String>) -> Self {
        self.bind_on(model, DEFAULT_BIND_EVENT)
    }

    /// Bind the control's value to `state[model]`, written back on `event`.
    pub fn bind_on(mut self, model: impl Into<String>, event: &str) -> Self {
        self.binding = Some(Binding {
            model: model.into(),
            event: event_name(event),
        });
        self
    }

    /// The tag as written, shortcuts included.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn listeners(&self) -> &[(String, Handler)] {
        &self.listeners
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<&str> = self.listeners.iter().map(|(e, _)| e.as_str()).collect();
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("listeners", &events)
            .field("binding", &self.binding)
            .field("children", &self.children)
            .finish()
    }
}
