//! # uberapp
//!
//! A minimal reactive UI micro-framework over an in-memory HTML document.
//!
//! An app is a view function, a state store, a method table and a style
//! spec mounted at a root element. Every state write re-renders the root
//! wholesale, keeping focus and caret where the user left them, and every
//! render re-scopes the app's style rules so they only reach elements the
//! app rendered.
//!
//! ## Core Systems
//!
//! - **[`dom`]** - Slotmap-backed host document: tree, queries, focus, events, stylesheets
//! - **[`css`]** - Selector tokenizer, parser, matching and selector utilities
//! - **[`layout`]** - Taffy block layout, bounding rects and hit testing
//! - **[`style`]** - Style registry, style specs and the scope binder
//! - **[`reactive`]** - Observed state store
//! - **[`view`]** - View nodes, shortcut tags, tag policy
//! - **[`render`]** - Render cycle, focus preservation, materialization
//! - **[`app`]** - Mounting, configuration, method context
//! - **[`testing`]** - Headless pilot and snapshot helpers
//!
//! ```ignore
//! use std::{cell::RefCell, rc::Rc};
//! use serde_json::json;
//! use uberapp::{el, App, AppConfig, Document};
//!
//! let document = Rc::new(RefCell::new(Document::new()));
//! let app = App::mount(
//!     document,
//!     AppConfig::new("#counter")
//!         .with_state([("counter", json!(0))])
//!         .with_method("increment", |ctx, _| {
//!             ctx.state().update("counter", |v| json!(v.as_i64().unwrap_or(0) + 1));
//!             Ok(())
//!         })
//!         .with_view(|state, methods, _| {
//!             el("div")
//!                 .child(el("h1").text(format!("Counter: {}", state.get_i64("counter").unwrap_or(0))))
//!                 .child(el("button").text("+").on("click", methods.handler("increment")))
//!                 .into()
//!         }),
//! )?;
//! ```

// Foundation
pub mod error;
pub mod geometry;

// Host document
pub mod css;
pub mod dom;
pub mod layout;

// Framework
pub mod style;
pub mod reactive;
pub mod view;
pub mod render;
pub mod app;

// Test tooling
pub mod testing;

pub use app::{App, AppConfig, Context, Methods, StyleHandle};
pub use dom::{dispatch, Document, Event, NodeId};
pub use error::{Error, Result};
pub use reactive::{State, Store};
pub use style::{StyleError, StyleRegistry, StyleSpec};
pub use view::{el, Element, Node};

