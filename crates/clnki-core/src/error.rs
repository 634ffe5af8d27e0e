//! Scheduler error taxonomy
//!
//! Every failure the scheduling core can report. All variants are
//! recoverable by the caller: re-prompt for a grade, report a missing card,
//! or fix the settings document.

use crate::deck::CardId;

/// Errors raised by the FSRS engine, decks, the daily scheduler and review sessions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    /// Malformed parameter set or out-of-domain numeric input
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Grade outside 1..=4
    #[error("Invalid grade: {0} (expected 1, 2, 3 or 4)")]
    InvalidGrade(i64),
    /// Operation on a card id the deck does not own
    #[error("Unknown card: {0}")]
    UnknownCard(CardId),
    /// A due or session id with no backing card record
    #[error("Due set references missing card: {0}")]
    InconsistentDueSet(CardId),
}

/// Scheduler result type
pub type Result<T> = std::result::Result<T, SchedulerError>;
