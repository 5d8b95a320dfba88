//! Scoped style engine: a per-app rule registry whose selectors are bound to
//! the elements they match under the render root.
//!
//! - [`StyleSpec`] describes initial (or reset) content.
//! - [`StyleRegistry`] holds the ordered rules and owns the `<style>` element.
//! - [`ScopeBinder`] tags matched elements with scope classes and rewrites
//!   each rule's selector to require them.

pub mod rule;
pub mod spec;
pub mod registry;
pub mod scope;

pub use registry::StyleRegistry;
pub use rule::{Declarations, StyleRule};
pub use scope::{ScopeBinder, DEFAULT_SCOPE_PREFIX};
pub use spec::StyleSpec;

use crate::css::ParseError;

/// Errors raised by style lookups and style specs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("no style rule registered for selector `{0}`")]
    SelectorNotFound(String),

    #[error("invalid style spec: {0}")]
    InvalidSpec(String),

    #[error("invalid stylesheet: {0}")]
    Parse(#[from] ParseError),
}
