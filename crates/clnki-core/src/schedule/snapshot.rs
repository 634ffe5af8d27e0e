//! Daily Schedule Snapshot
//!
//! The due sets handed out for one reference date. Each CLI run is a new
//! process, so the snapshot is what keeps a second run on the same day from
//! drawing another batch of new cards.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deck::{CardId, Collection};
use crate::fsrs::ParameterSet;

/// Remaining due ids per deck, tagged with the date and limits that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub scheduled_on: NaiveDate,
    pub new_cards_per_day: usize,
    pub cards_daily_limit: usize,
    #[serde(default)]
    pub decks: BTreeMap<String, Vec<CardId>>,
}

impl DailySchedule {
    /// Record every deck's current due set
    pub fn capture(collection: &Collection, scheduled_on: NaiveDate, params: &ParameterSet) -> Self {
        Self {
            scheduled_on,
            new_cards_per_day: params.new_cards_per_day(),
            cards_daily_limit: params.cards_daily_limit(),
            decks: collection
                .iter()
                .map(|(name, deck)| (name.to_string(), deck.due_cards().to_vec()))
                .collect(),
        }
    }

    /// Same day and same limits; otherwise the schedule must be rebuilt
    pub fn applies_to(&self, reference_date: NaiveDate, params: &ParameterSet) -> bool {
        self.scheduled_on == reference_date
            && self.new_cards_per_day == params.new_cards_per_day()
            && self.cards_daily_limit == params.cards_daily_limit()
    }

    pub fn due_cards(&self, deck: &str) -> Option<&[CardId]> {
        self.decks.get(deck).map(Vec::as_slice)
    }
}
