//! Daily Scheduler
//!
//! Rebuilds a deck's due set for a reference date. Due cards and new cards
//! draw from two independent budgets:
//!
//! 1. Up to `cards_daily_limit` cards whose due date has arrived, in creation order
//! 2. Up to `new_cards_per_day` never-reviewed cards, in creation order
//!
//! The due set is `due ++ new`. Existing due dates are never rewritten, so
//! running the scheduler again for the same inputs yields the same set.
//!
//! A [`DailySchedule`] snapshot carries the remaining due sets between runs
//! on the same day; [`resume_collection`] restores it instead of drawing a
//! fresh batch of new cards.

mod snapshot;

pub use snapshot::DailySchedule;

use chrono::NaiveDate;

use crate::deck::{CardId, Collection, Deck};
use crate::error::Result;
use crate::fsrs::ParameterSet;

/// Recompute `deck`'s due set for `reference_date`
pub fn run(
    deck: &mut Deck,
    reference_date: NaiveDate,
    cards_daily_limit: usize,
    new_cards_per_day: usize,
) -> Result<()> {
    let due: Vec<CardId> = deck
        .cards()
        .filter(|card| card.is_due(reference_date))
        .map(|card| card.id)
        .take(cards_daily_limit)
        .collect();

    // A hand-edited card can be both new and dated; select it once
    let new: Vec<CardId> = deck
        .cards()
        .filter(|card| card.is_new && !due.contains(&card.id))
        .map(|card| card.id)
        .take(new_cards_per_day)
        .collect();

    let (num_review, num_new) = (due.len(), new.len());
    let mut due_cards = due;
    due_cards.extend(new);
    deck.set_due_cards(due_cards)?;

    tracing::debug!(
        %reference_date,
        review = num_review,
        new = num_new,
        "Due set recomputed"
    );
    Ok(())
}

/// Run the scheduler over every deck with the limits in `params`
pub fn schedule_collection(
    collection: &mut Collection,
    reference_date: NaiveDate,
    params: &ParameterSet,
) -> Result<()> {
    for (name, deck) in collection.iter_mut() {
        run(
            deck,
            reference_date,
            params.cards_daily_limit(),
            params.new_cards_per_day(),
        )?;
        tracing::info!(deck = name, due = deck.num_due(), "Deck scheduled");
    }
    Ok(())
}

/// Restore today's due sets from `saved`, scheduling afresh where it does not apply
///
/// The snapshot is used only when it was taken for `reference_date` with the
/// same daily limits. Decks missing from it (created since) are scheduled
/// normally, and ids of cards that no longer exist are dropped.
pub fn resume_collection(
    collection: &mut Collection,
    reference_date: NaiveDate,
    params: &ParameterSet,
    saved: Option<&DailySchedule>,
) -> Result<()> {
    let saved = saved.filter(|s| s.applies_to(reference_date, params));
    let Some(saved) = saved else {
        return schedule_collection(collection, reference_date, params);
    };

    for (name, deck) in collection.iter_mut() {
        match saved.due_cards(name) {
            Some(ids) => {
                let kept: Vec<CardId> = ids.iter().copied().filter(|id| deck.contains(*id)).collect();
                if kept.len() < ids.len() {
                    tracing::warn!(
                        deck = name,
                        dropped = ids.len() - kept.len(),
                        "Saved schedule names missing cards"
                    );
                }
                deck.set_due_cards(kept)?;
                tracing::debug!(deck = name, due = deck.num_due(), "Deck schedule resumed");
            }
            None => {
                run(
                    deck,
                    reference_date,
                    params.cards_daily_limit(),
                    params.new_cards_per_day(),
                )?;
                tracing::info!(deck = name, due = deck.num_due(), "Deck scheduled");
            }
        }
    }
    Ok(())
}
