//! Shared draft/submit/archive lifecycle rules.
//!
//! Tickets and damage reports are both small forward-only state machines, and
//! task instances and damage reports are both "copy the live row into a history
//! table" records. The two traits here carry those rules once; each entity only
//! supplies its successor table or its history projection.

use std::fmt;

use crate::core::error::{AppError, Result};

/// A status in a forward-moving state machine.
pub trait LifecycleState: Copy + Eq + fmt::Display + 'static {
    /// Name of the record kind, used in error messages
    const RECORD: &'static str;

    /// States reachable from `self` through a regular (non-override) transition
    fn successors(self) -> &'static [Self];

    fn can_advance_to(self, next: Self) -> bool {
        self.successors().contains(&next)
    }

    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

/// How strictly a transition is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    /// Only transitions listed in the successor table
    Forward,
    /// Any state to any state (admin)
    Override,
}

/// Check a transition, returning a `Conflict` when a forward move is not allowed.
pub fn ensure_transition<S: LifecycleState>(from: S, to: S, mode: TransitionMode) -> Result<()> {
    match mode {
        TransitionMode::Override => Ok(()),
        TransitionMode::Forward if from.can_advance_to(to) => Ok(()),
        TransitionMode::Forward => Err(AppError::Conflict(format!(
            "{} cannot move from '{}' to '{}'",
            S::RECORD,
            from,
            to
        ))),
    }
}

/// A live record that is archived by copying it into a history table.
pub trait Snapshot {
    type History;

    fn snapshot(&self) -> Self::History;
}

/// Project every live record into its history row, preserving order.
pub fn snapshot_all<T: Snapshot>(records: &[T]) -> Vec<T::History> {
    records.iter().map(Snapshot::snapshot).collect()
}
