//! FSRS (Free Spaced Repetition Scheduler) Module
//!
//! Memory model with 21 weights and a personalizable forgetting curve decay (w20).
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki
//!
//! ## Core Formulas:
//! - Retrievability: R = (1 + FACTOR * t / S)^(-w20) where FACTOR = 0.9^(-1/w20) - 1
//! - Interval: t = S/FACTOR * (R^(-1/w20) - 1), rounded to 2 decimals, at least 1 day
//! - Difficulty stays in [1, 10]; stability stays positive
//!
//! Reviews come in two flavours: [`init`] for a card's first graded review and
//! [`update`] for every later one.

mod algorithm;
mod grade;
mod parameters;

pub use algorithm::{
    clamp_difficulty,
    init,
    initial_difficulty,
    initial_stability,
    next_difficulty,
    next_forget_stability,
    next_interval,
    next_recall_stability,
    // Core functions
    retrievability,
    round2,
    update,
    ReviewResult,
    // Constants
    MAX_DIFFICULTY,
    MIN_DIFFICULTY,
    MIN_INITIAL_STABILITY,
    MIN_INTERVAL_DAYS,
    MIN_STABILITY,
};

pub use grade::Grade;

pub use parameters::{
    ParameterSet, Weights, DEFAULT_CARDS_DAILY_LIMIT, DEFAULT_DESIRED_RETENTION,
    DEFAULT_NEW_CARDS_PER_DAY, DEFAULT_WEIGHTS, WEIGHT_COUNT,
};
