//! Render cycle state: `Idle → Rendering → Idle`.
//!
//! A pass is entered through [`RenderCycle::begin`], which hands out a guard
//! that returns the cycle to `Idle` when dropped. A second `begin` while the
//! guard is alive is refused, so a write made during a render never starts a
//! nested one.

use std::cell::Cell;

/// Where the cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Rendering,
}

/// Counts render passes and refuses re-entrant ones.
#[derive(Debug, Default)]
pub struct RenderCycle {
    phase: Cell<Phase>,
    passes: Cell<u64>,
    skipped: Cell<u64>,
}

impl RenderCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Completed or running passes.
    pub fn count(&self) -> u64 {
        self.passes.get()
    }

    /// Passes refused because one was already running.
    pub fn skipped(&self) -> u64 {
        self.skipped.get()
    }

    /// Enter `Rendering`, or `None` if a pass is already running.
    pub fn begin(&self) -> Option<RenderGuard<'_>> {
        if self.phase.get() == Phase::Rendering {
            self.skipped.set(self.skipped.get() + 1);
            return None;
        }
        self.phase.set(Phase::Rendering);
        self.passes.set(self.passes.get() + 1);
        Some(RenderGuard { cycle: self })
    }
}

/// An active render pass. Dropping it ends the pass.
#[derive(Debug)]
pub struct RenderGuard<'a> {
    cycle: &'a RenderCycle,
}

impl RenderGuard<'_> {
    /// 1-based number of this pass.
    pub fn pass(&self) -> u64 {
        self.cycle.passes.get()
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.cycle.phase.set(Phase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_end() {
        let cycle = RenderCycle::new();
        assert_eq!(cycle.phase(), Phase::Idle);
        {
            let guard = cycle.begin().unwrap();
            assert_eq!(guard.pass(), 1);
            assert_eq!(cycle.phase(), Phase::Rendering);
        }
        assert_eq!(cycle.phase(), Phase::Idle);
        assert_eq!(cycle.begin().map(|g| g.pass()), Some(2));
    }

    #[test]
    fn nested_begin_is_refused() {
        let cycle = RenderCycle::new();
        let _outer = cycle.begin().unwrap();
        assert!(cycle.begin().is_none());
        assert_eq!(cycle.count(), 1);
        assert_eq!(cycle.skipped(), 1);
    }
}
