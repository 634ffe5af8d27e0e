//! # Clnki Core
//!
//! Spaced repetition engine behind the Clnki flashcard tool:
//!
//! - **FSRS**: 21-weight memory model updating stability, difficulty and the
//!   next interval from each review
//! - **Daily Scheduler**: selects due and new cards for a reference date
//!   under two independent daily budgets
//! - **Review Session**: retry-until-pass grading loop that drains the due set
//! - **Storage**: JSON documents for decks and settings
//!
//! The core never reads the clock. Callers pass the reference date (today
//! plus any forwarded days) and the parameter set into every call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clnki_core::{schedule, DailySchedule, ReviewSession, SessionState, Storage};
//!
//! let storage = Storage::new(None)?;
//! let params = storage.load_settings()?;
//! let mut collection = storage.load_collection()?;
//! let saved = storage.load_schedule()?;
//! schedule::resume_collection(&mut collection, today, &params, saved.as_ref())?;
//!
//! let deck = collection.deck_mut("spanish").unwrap();
//! let mut session = ReviewSession::start(deck, today)?;
//! while let SessionState::Active { card } = session.state() {
//!     // show deck.card(card), read a grade
//!     session.step(deck, &params, grade)?;
//! }
//! storage.save_collection(&collection)?;
//! storage.save_schedule(&DailySchedule::capture(&collection, today, &params))?;
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod deck;
pub mod error;
pub mod fsrs;
pub mod schedule;
pub mod session;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use deck::{CardId, CardRecord, Collection, Deck};

pub use error::{Result, SchedulerError};

// FSRS algorithm
pub use fsrs::{Grade, ParameterSet, ReviewResult, Weights};

pub use schedule::{resume_collection, schedule_collection, DailySchedule};

pub use session::{ReviewSession, SessionState, StepOutcome};

pub use storage::{Storage, StorageError};
