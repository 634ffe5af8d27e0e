//! Test Data Factory
//!
//! Utilities for generating decks in known states:
//! - Fresh decks of new cards
//! - Decks with a history of passing reviews
//! - A fake calendar so journeys can move through days

use chrono::{Days, NaiveDate};
use clnki_core::{CardId, Collection, Deck, Grade, ParameterSet, ReviewSession, SessionState};

/// Factory for creating test decks
///
/// # Example
///
/// ```rust,ignore
/// let mut collection = Collection::new();
/// DeckFactory::insert_new(&mut collection, "spanish", 10);
/// let ids = DeckFactory::review_all(deck, &params, today, Grade::Easy);
/// ```
pub struct DeckFactory;

impl DeckFactory {
    // ========================================================================
    // DECK CREATION
    // ========================================================================

    /// A deck of `count` unreviewed cards with numbered fronts and backs
    pub fn new_cards(count: usize) -> Deck {
        let mut deck = Deck::new();
        for i in 0..count {
            deck.add_card(format!("front {i}"), format!("back {i}"));
        }
        deck
    }

    /// Insert a fresh deck into `collection`
    pub fn insert_new<'a>(collection: &'a mut Collection, name: &str, count: usize) -> &'a mut Deck {
        collection.insert_deck(name, Self::new_cards(count));
        collection
            .deck_mut(name)
            .expect("deck was just inserted")
    }

    /// A deck whose cards were all graded Easy on `first_day`
    pub fn reviewed_on(count: usize, params: &ParameterSet, first_day: NaiveDate) -> Deck {
        let mut deck = Self::new_cards(count);
        let ids: Vec<CardId> = deck.cards().map(|c| c.id).collect();
        for id in ids {
            deck.review(id, Grade::Easy, params, first_day)
                .expect("review of a fresh card");
        }
        deck
    }

    // ========================================================================
    // SESSIONS
    // ========================================================================

    /// Run a whole session on `deck`, answering every prompt with `grade`
    ///
    /// Panics if `grade` cannot pass cards (Again never does).
    pub fn review_all(
        deck: &mut Deck,
        params: &ParameterSet,
        today: NaiveDate,
        grade: Grade,
    ) -> Vec<CardId> {
        assert!(grade > Grade::Hard, "only Easy and Very Easy pass every card");
        let mut session = ReviewSession::with_seed(deck, today, 42).expect("session start");
        let mut graded = Vec::new();
        while let SessionState::Active { card } = session.state() {
            session
                .grade(deck, params, grade)
                .expect("grading a due card");
            graded.push(card);
        }
        graded
    }
}

/// A calendar that only moves when told to
#[derive(Debug, Clone, Copy)]
pub struct TestClock {
    today: NaiveDate,
}

impl TestClock {
    pub fn starting(year: i32, month: u32, day: u32) -> Self {
        Self {
            today: NaiveDate::from_ymd_opt(year, month, day).expect("valid start date"),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Advance by `days`, like running the CLI with `--forward-days`
    pub fn advance(&mut self, days: u64) -> NaiveDate {
        self.today = self.today + Days::new(days);
        self.today
    }
}
