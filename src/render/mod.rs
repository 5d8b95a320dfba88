//! Render pass building blocks: the cycle guard, focus preservation and
//! materialization of view nodes.

pub mod cycle;
pub mod focus;
mod materialize;

pub use cycle::{Phase, RenderCycle, RenderGuard};
pub use focus::FocusSnapshot;
pub(crate) use materialize::materialize;
