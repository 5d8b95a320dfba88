//! Crate-level error type.

use crate::css::ParseError;
use crate::style::StyleError;

/// Errors surfaced by mounting, method calls, style lookups and the test
/// pilot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mount locator matched no element.
    #[error("element `{0}` not found in document")]
    MountTargetNotFound(String),

    /// A selector used by the pilot matched no element.
    #[error("no element matches `{0}`")]
    ElementNotFound(String),

    #[error("no method named `{0}`")]
    MethodNotFound(String),

    /// Initial state that is not a JSON object.
    #[error("initial state must be a JSON object, got {0}")]
    InvalidState(String),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("invalid selector: {0}")]
    Selector(#[from] ParseError),

    /// Free-form failure raised by user methods and handlers.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// A free-form error.
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
