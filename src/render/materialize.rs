//! Turning view nodes into host document nodes.

use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::error;

use crate::app::{AppInner, Context};
use crate::dom::{Document, Event, Listener, NodeId};
use crate::reactive::State;
use crate::view::node::{Binding, Element, Handler, Node};
use crate::view::{shortcut, tags};

/// Append `node` (and its subtree) under `parent`. Returns the new node.
///
/// Listeners hold the app weakly; once it is gone they do nothing.
pub(crate) fn materialize(
    doc: &mut Document,
    parent: NodeId,
    node: &Node,
    app: &Weak<AppInner>,
    state: &State,
) -> NodeId {
    match node {
        Node::Text(text) => doc.append_text(parent, text.as_str()),
        Node::Element(element) => materialize_element(doc, parent, element, app, state),
    }
}

fn materialize_element(
    doc: &mut Document,
    parent: NodeId,
    element: &Element,
    app: &Weak<AppInner>,
    state: &State,
) -> NodeId {
    let expanded = shortcut::expand(element.tag(), element.attributes());
    let id = doc.append_element(parent, tags::resolve(&expanded.tag));
    for (name, value) in &expanded.attributes {
        doc.set_attribute(id, name, value.as_str());
    }

    if let Some(binding) = element.binding() {
        bind(doc, id, binding, app, state);
    }
    for (event, handler) in element.listeners() {
        doc.add_event_listener(id, event, handler_listener(handler, app));
    }
    for child in element.child_nodes() {
        materialize(doc, id, child, app, state);
    }
    id
}

/// Seed the control from `state[model]` and write it back on the binding
/// event.
fn bind(doc: &mut Document, id: NodeId, binding: &Binding, app: &Weak<AppInner>, state: &State) {
    let value = match state.get(&binding.model) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    doc.set_value(id, value);

    let app = Weak::clone(app);
    let model = binding.model.clone();
    let listener: Listener = Rc::new(move |event: &Event| {
        if let Some(app) = app.upgrade() {
            let value = event.value().unwrap_or_default().to_string();
            app.store.set(model.as_str(), Value::String(value));
        }
    });
    doc.add_event_listener(id, &binding.event, listener);
}

fn handler_listener(handler: &Handler, app: &Weak<AppInner>) -> Listener {
    let handler = Rc::clone(handler);
    let app = Weak::clone(app);
    Rc::new(move |event: &Event| {
        let Some(app) = app.upgrade() else {
            return;
        };
        let ctx = Context::new(app);
        if let Err(err) = handler(&ctx, event) {
            error!(event = event.kind(), %err, "event handler failed");
        }
    })
}
