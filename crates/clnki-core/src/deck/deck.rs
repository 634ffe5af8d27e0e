//! Deck - a set of cards plus today's due set

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::card::{CardId, CardRecord};
use crate::error::{Result, SchedulerError};
use crate::fsrs::{self, Grade, ParameterSet};

/// Cards keyed by id in creation order, and the ids selected for today
///
/// `due_cards` is not persisted; the daily scheduler rebuilds it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: BTreeMap<CardId, CardRecord>,
    due_cards: Vec<CardId>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from existing records, keyed by their ids
    pub fn from_cards(cards: impl IntoIterator<Item = CardRecord>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
            due_cards: Vec::new(),
        }
    }

    /// Append a new card; ids start at 1 and always increase
    pub fn add_card(&mut self, front: impl Into<String>, back: impl Into<String>) -> CardId {
        let id = self.cards.keys().next_back().map_or(1, |last| last + 1);
        self.cards.insert(id, CardRecord::new(id, front, back));
        id
    }

    pub fn card(&self, id: CardId) -> Option<&CardRecord> {
        self.cards.get(&id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// All cards in creation order
    pub fn cards(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Ids selected for the current day, due cards first then new ones
    pub fn due_cards(&self) -> &[CardId] {
        &self.due_cards
    }

    pub fn num_due(&self) -> usize {
        self.due_cards.len()
    }

    /// Replace the due set; every id must belong to this deck
    pub fn set_due_cards(&mut self, due_cards: Vec<CardId>) -> Result<()> {
        if let Some(missing) = due_cards.iter().find(|id| !self.cards.contains_key(id)) {
            return Err(SchedulerError::InconsistentDueSet(*missing));
        }
        self.due_cards = due_cards;
        Ok(())
    }

    /// Grade a card on `reference_date` and drop it from the due set
    ///
    /// The first graded review initializes stability and difficulty; later
    /// ones update them from the days elapsed since the last review.
    pub fn review(
        &mut self,
        id: CardId,
        grade: Grade,
        params: &ParameterSet,
        reference_date: NaiveDate,
    ) -> Result<&CardRecord> {
        let card = self
            .cards
            .get_mut(&id)
            .ok_or(SchedulerError::UnknownCard(id))?;

        let result = match (card.last_review_date, card.stability, card.difficulty) {
            (Some(last), Some(stability), Some(difficulty)) => {
                let mut elapsed_days = (reference_date - last).num_days();
                if elapsed_days < 0 {
                    tracing::warn!(
                        card = id,
                        %last,
                        %reference_date,
                        "Reference date precedes last review; treating as same-day review"
                    );
                    elapsed_days = 0;
                }
                fsrs::update(
                    elapsed_days as f64,
                    grade,
                    stability,
                    difficulty,
                    params.desired_retention(),
                    params.weights(),
                )?
            }
            (Some(_), _, _) => {
                tracing::warn!(card = id, "Reviewed card has no memory state; initializing");
                fsrs::init(grade, params.desired_retention(), params.weights())?
            }
            (None, _, _) => fsrs::init(grade, params.desired_retention(), params.weights())?,
        };

        let due_date = reference_date
            .checked_add_days(Days::new(result.interval_days.ceil() as u64))
            .ok_or_else(|| {
                SchedulerError::InvalidParameter(format!(
                    "interval of {} days overflows the calendar",
                    result.interval_days
                ))
            })?;

        card.stability = Some(result.stability);
        card.difficulty = Some(result.difficulty);
        card.due_date = Some(due_date);
        card.last_review_date = Some(reference_date);
        card.is_new = false;

        tracing::debug!(
            card = id,
            grade = grade.value(),
            stability = result.stability,
            difficulty = result.difficulty,
            %due_date,
            "Card reviewed"
        );

        self.due_cards.retain(|due| *due != id);
        Ok(&*card)
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

// A deck persists as `{ card_id: card }`; ids live only in the keys.

impl Serialize for Deck {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.cards.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Deck {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut cards = BTreeMap::<CardId, CardRecord>::deserialize(deserializer)?;
        for (id, card) in cards.iter_mut() {
            card.id = *id;
        }
        Ok(Self {
            cards,
            due_cards: Vec::new(),
        })
    }
}
