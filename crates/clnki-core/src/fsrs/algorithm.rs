//! FSRS formulas
//!
//! Pure, stateless functions. Every derived stability, difficulty and interval
//! is rounded to two decimal places.

use super::grade::Grade;
use super::parameters::{validate_retention, Weights};
use crate::error::{Result, SchedulerError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Lower bound for difficulty
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Upper bound for difficulty
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Floor applied to initial stability before rounding
pub const MIN_INITIAL_STABILITY: f64 = 0.1;

/// Smallest stability a review can produce
pub const MIN_STABILITY: f64 = 0.01;

/// Shortest interval ever scheduled, in days
pub const MIN_INTERVAL_DAYS: f64 = 1.0;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn decay(w: &Weights) -> f64 {
    -w[20]
}

/// Curve factor chosen so that R = 0.9 when elapsed days == S
fn factor(w: &Weights) -> f64 {
    0.9_f64.powf(1.0 / decay(w)) - 1.0
}

fn check_stability(stability: f64) -> Result<()> {
    if stability > 0.0 && stability.is_finite() {
        Ok(())
    } else {
        Err(SchedulerError::InvalidParameter(format!(
            "stability must be positive, got {}",
            stability
        )))
    }
}

// ============================================================================
// FORGETTING CURVE
// ============================================================================

/// Probability of recall after `elapsed_days` for a card of the given stability
pub fn retrievability(elapsed_days: f64, stability: f64, w: &Weights) -> Result<f64> {
    check_stability(stability)?;
    if !(elapsed_days >= 0.0) {
        return Err(SchedulerError::InvalidParameter(format!(
            "elapsed days must be non-negative, got {}",
            elapsed_days
        )));
    }
    Ok((1.0 + factor(w) * elapsed_days / stability).powf(decay(w)))
}

/// Days until retrievability falls to `desired_retention`, at least one day
pub fn next_interval(stability: f64, desired_retention: f64, w: &Weights) -> Result<f64> {
    check_stability(stability)?;
    validate_retention(desired_retention)?;

    let interval =
        stability / factor(w) * (desired_retention.powf(1.0 / decay(w)) - 1.0);
    Ok(round2(interval).max(MIN_INTERVAL_DAYS))
}

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Bound any value into `[1, 10]` after rounding
pub fn clamp_difficulty(difficulty: f64) -> f64 {
    round2(difficulty).min(MAX_DIFFICULTY).max(MIN_DIFFICULTY)
}

/// Difficulty assigned on a card's first graded review
pub fn initial_difficulty(grade: Grade, w: &Weights) -> f64 {
    let g = grade.value() as f64;
    clamp_difficulty(w[4] - (w[5] * (g - 1.0)).exp() + 1.0)
}

fn mean_reversion(init: f64, current: f64, w: &Weights) -> f64 {
    w[7] * init + (1.0 - w[7]) * current
}

fn linear_damping(delta: f64, difficulty: f64) -> f64 {
    delta * (10.0 - difficulty) / 9.0
}

/// Difficulty after a review: graded correction, damped near 10, pulled
/// back toward the initial difficulty of an Easy answer
pub fn next_difficulty(difficulty: f64, grade: Grade, w: &Weights) -> f64 {
    let g = grade.value() as f64;
    let delta = -w[6] * (g - 3.0);
    let next = difficulty + linear_damping(delta, difficulty);
    clamp_difficulty(mean_reversion(
        initial_difficulty(Grade::Easy, w),
        next,
        w,
    ))
}

// ============================================================================
// STABILITY
// ============================================================================

/// Stability assigned on a card's first graded review
pub fn initial_stability(grade: Grade, w: &Weights) -> f64 {
    round2(w[grade.index()].max(MIN_INITIAL_STABILITY))
}

/// Stability after a successful recall (grade Hard or better)
pub fn next_recall_stability(
    difficulty: f64,
    stability: f64,
    retrievability: f64,
    grade: Grade,
    w: &Weights,
) -> Result<f64> {
    check_stability(stability)?;

    let hard_penalty = if grade == Grade::Hard { w[15] } else { 1.0 };
    let easy_bonus = if grade == Grade::VeryEasy { w[16] } else { 1.0 };

    let increase = 1.0
        + w[8].exp()
            * (11.0 - difficulty)
            * stability.powf(-w[9])
            * ((w[10] * (1.0 - retrievability)).exp() - 1.0)
            * hard_penalty
            * easy_bonus;

    Ok(round2(stability * increase).max(MIN_STABILITY))
}

/// Stability after a lapse (grade Again); never exceeds the current stability
pub fn next_forget_stability(
    difficulty: f64,
    stability: f64,
    retrievability: f64,
    w: &Weights,
) -> Result<f64> {
    check_stability(stability)?;

    let forgotten = w[11]
        * difficulty.powf(-w[12])
        * ((stability + 1.0).powf(w[13]) - 1.0)
        * (w[14] * (1.0 - retrievability)).exp();

    Ok(round2(forgotten).max(MIN_STABILITY).min(stability))
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// New memory state produced by grading a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewResult {
    pub stability: f64,
    pub difficulty: f64,
    /// Fractional days until the next review (>= 1)
    pub interval_days: f64,
}

/// First graded review of a card
pub fn init(grade: Grade, desired_retention: f64, w: &Weights) -> Result<ReviewResult> {
    let stability = initial_stability(grade, w);
    let difficulty = initial_difficulty(grade, w);
    let interval_days = next_interval(stability, desired_retention, w)?;

    Ok(ReviewResult {
        stability,
        difficulty,
        interval_days,
    })
}

/// Review of a card that already has a memory state
///
/// The interval is computed from the updated stability, not the stability
/// before the review, so a lapse shortens the next interval right away.
pub fn update(
    elapsed_days: f64,
    grade: Grade,
    stability: f64,
    difficulty: f64,
    desired_retention: f64,
    w: &Weights,
) -> Result<ReviewResult> {
    let r = retrievability(elapsed_days, stability, w)?;

    let next_stability = if grade < Grade::Hard {
        next_forget_stability(difficulty, stability, r, w)?
    } else {
        next_recall_stability(difficulty, stability, r, grade, w)?
    };
    let next_difficulty = next_difficulty(difficulty, grade, w);
    let interval_days = next_interval(next_stability, desired_retention, w)?;

    Ok(ReviewResult {
        stability: next_stability,
        difficulty: next_difficulty,
        interval_days,
    })
}
