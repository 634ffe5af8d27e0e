//! Review Session
//!
//! Grading loop over a deck's due set. Each step draws a card uniformly at
//! random from what is left, the caller shows it and submits a grade:
//!
//! - `Again` marks the card as new for the rest of the session
//! - a card treated as new passes with `Easy` or better
//! - any other card passes with `Hard` or better
//!
//! Passing cards are reviewed through [`Deck::review`] and leave the session;
//! failing ones stay and may be drawn again immediately. The session is
//! finished exactly when no cards remain.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::deck::{CardId, Deck};
use crate::error::{Result, SchedulerError};
use crate::fsrs::{Grade, ParameterSet};

/// Where the session stands after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Cards remain; `card` is the one to show next
    Active { card: CardId },
    /// Every card has passed
    Finished,
}

/// Result of grading the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Card that was graded; `None` when the session was already finished
    pub graded: Option<CardId>,
    /// Whether the grade passed the card out of the session
    pub passed: bool,
    /// State after the transition, including the next card to show
    pub state: SessionState,
}

/// A single sitting over one deck's due cards
#[derive(Debug, Clone)]
pub struct ReviewSession {
    /// Card id -> treated as new within this session
    pending: BTreeMap<CardId, bool>,
    current: Option<CardId>,
    reference_date: NaiveDate,
    rng: ChaCha8Rng,
    steps: usize,
}

impl ReviewSession {
    /// Start a session over `deck`'s due set with an entropy-seeded draw
    pub fn start(deck: &Deck, reference_date: NaiveDate) -> Result<Self> {
        Self::with_rng(deck, reference_date, ChaCha8Rng::from_entropy())
    }

    /// Start a session with a fixed seed for reproducible draws
    pub fn with_seed(deck: &Deck, reference_date: NaiveDate, seed: u64) -> Result<Self> {
        Self::with_rng(deck, reference_date, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(deck: &Deck, reference_date: NaiveDate, rng: ChaCha8Rng) -> Result<Self> {
        let mut pending = BTreeMap::new();
        for &id in deck.due_cards() {
            let card = deck
                .card(id)
                .ok_or(SchedulerError::InconsistentDueSet(id))?;
            pending.insert(id, card.is_new);
        }

        let mut session = Self {
            pending,
            current: None,
            reference_date,
            rng,
            steps: 0,
        };
        session.draw();

        tracing::debug!(
            cards = session.pending.len(),
            %reference_date,
            "Review session started"
        );
        Ok(session)
    }

    /// Current state; `Active` carries the card awaiting a grade
    pub fn state(&self) -> SessionState {
        match self.current {
            Some(card) => SessionState::Active { card },
            None => SessionState::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Card awaiting a grade
    pub fn current_card(&self) -> Option<CardId> {
        self.current
    }

    /// Cards still in the session
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Whether `card` is currently treated as new
    pub fn is_treated_as_new(&self, card: CardId) -> Option<bool> {
        self.pending.get(&card).copied()
    }

    /// Grading transitions performed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Grade the current card with a raw integer from the grade input
    ///
    /// Anything outside 1..=4 fails with `InvalidGrade` and leaves the
    /// session untouched, so the caller can simply prompt again.
    pub fn step(&mut self, deck: &mut Deck, params: &ParameterSet, grade: i64) -> Result<StepOutcome> {
        let grade = Grade::from_i64(grade)?;
        self.grade(deck, params, grade)
    }

    /// Grade the current card
    pub fn grade(&mut self, deck: &mut Deck, params: &ParameterSet, grade: Grade) -> Result<StepOutcome> {
        let Some(id) = self.current else {
            return Ok(StepOutcome {
                graded: None,
                passed: false,
                state: SessionState::Finished,
            });
        };
        if !deck.contains(id) {
            return Err(SchedulerError::InconsistentDueSet(id));
        }

        let treated_as_new = self
            .pending
            .get_mut(&id)
            .ok_or(SchedulerError::InconsistentDueSet(id))?;
        if grade == Grade::Again {
            *treated_as_new = true;
        }
        let passed = if *treated_as_new {
            grade > Grade::Hard
        } else {
            grade > Grade::Again
        };

        if passed {
            deck.review(id, grade, params, self.reference_date)?;
            self.pending.remove(&id);
        }
        self.steps += 1;

        tracing::debug!(
            card = id,
            grade = grade.value(),
            passed,
            remaining = self.pending.len(),
            "Card graded"
        );

        self.draw();
        Ok(StepOutcome {
            graded: Some(id),
            passed,
            state: self.state(),
        })
    }

    /// Pick the next card uniformly from what remains; memoryless
    fn draw(&mut self) {
        self.current = self.pending.keys().copied().choose(&mut self.rng);
    }
}
