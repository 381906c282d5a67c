//! Core error types.

/// Errors surfaced by the deterministic core.
///
/// Expected player outcomes (not enough magic, no potion left) are *not*
/// errors; they are normal state-machine branches reported through
/// [`crate::event::BattleEvent::ActionRejected`]. This enum covers caller
/// contract violations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A battle was constructed with an empty enemy roster.
    #[error("battle spec contains no enemies")]
    EmptyRoster,
}
