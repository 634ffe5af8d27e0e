//! Card Record - per-card scheduling state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable card identifier; ascending ids follow creation order
pub type CardId = u64;

/// A flashcard with its FSRS memory state
///
/// New cards carry no stability, difficulty or dates. The first passing
/// review initializes them and clears `is_new` for good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Identifier within the owning deck (persisted as the map key)
    #[serde(skip)]
    pub id: CardId,
    /// Prompt side
    pub front: String,
    /// Answer side
    pub back: String,

    // ========== FSRS State ==========
    /// Memory stability in days (> 0 once set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
    /// Intrinsic difficulty in [1, 10]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,

    // ========== Scheduling ==========
    /// Date the card next becomes due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Date of the last passing review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
    /// Never reviewed yet
    #[serde(default = "default_is_new")]
    pub is_new: bool,
}

fn default_is_new() -> bool {
    true
}

impl CardRecord {
    /// Create an unreviewed card
    pub fn new(id: CardId, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            stability: None,
            difficulty: None,
            due_date: None,
            last_review_date: None,
            is_new: true,
        }
    }

    /// Whether the card is due on `reference_date`
    pub fn is_due(&self, reference_date: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due <= reference_date)
    }
}
