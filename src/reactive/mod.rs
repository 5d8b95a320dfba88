//! Reactive state: an observed key/value store.
//!
//! - [`Store`] holds the app's state; every write runs one hook (a render).
//! - [`State`] is the read-only snapshot a view renders from.

pub mod store;

pub use store::{State, Store, WriteHook};
