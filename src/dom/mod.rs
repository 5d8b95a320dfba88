//! Host document: slotmap-backed HTML tree with selector queries, focus,
//! stylesheets, events and serialization.

pub mod node;
pub mod tree;
pub mod query;
pub mod focus;
pub mod events;
pub mod stylesheet;
pub mod serialize;

pub use events::{dispatch, Event, Listener};
pub use node::{ElementData, NodeData, NodeId};
pub use tree::{Document, DEFAULT_VIEWPORT_WIDTH};
