//! Views: the node tree a view function returns, shortcut tags and the tag
//! name policy.

pub mod node;
pub mod shortcut;
pub mod tags;

pub use node::{el, Binding, Element, Handler, Node, DEFAULT_BIND_EVENT};
pub use shortcut::{expand, Expanded};
