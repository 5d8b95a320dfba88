//! Headless testing: the Pilot and snapshot helpers.
//!
//! Use the [`Pilot`] to mount an [`App`](crate::app::App) into its own
//! document and drive it like a user would. Use [`subtree_to_string`],
//! [`stylesheet_to_string`] and [`normalize_scope_tags`] to capture output
//! for snapshot assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{normalize_scope_tags, stylesheet_to_string, subtree_to_string};
