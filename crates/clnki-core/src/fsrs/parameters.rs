//! Scheduling parameters
//!
//! The full settings document: the 21 FSRS weights, the desired retention
//! target and the two daily limits. Replaced wholesale on every settings
//! change; validated once here so the engine can trust its inputs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Number of FSRS weights
pub const WEIGHT_COUNT: usize = 21;

/// FSRS weight vector
pub type Weights = [f64; WEIGHT_COUNT];

/// Stock weights used until the user supplies their own
pub const DEFAULT_WEIGHTS: Weights = [
    0.212, 1.2931, 2.3065, 8.2956, // w0-w3: initial stability per grade
    6.4133, 0.8334, 3.0194, 0.001, // w4-w7: difficulty
    1.8722, 0.1666, 0.796, // w8-w10: recall stability
    1.4835, 0.0614, 0.2629, 1.6483, // w11-w14: forget stability
    0.6014, 1.8729, // w15-w16: hard penalty, easy bonus
    0.5425, 0.0912, 0.0658, // w17-w19: short-term stability
    0.1542, // w20: forgetting curve decay
];

/// Default target probability of recall at the scheduled review
pub const DEFAULT_DESIRED_RETENTION: f64 = 0.9;

/// Default number of new cards introduced per day
pub const DEFAULT_NEW_CARDS_PER_DAY: usize = 4;

/// Default number of due cards reviewed per day
pub const DEFAULT_CARDS_DAILY_LIMIT: usize = 25;

/// Validated scheduling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterSet", into = "RawParameterSet")]
pub struct ParameterSet {
    weights: Weights,
    desired_retention: f64,
    new_cards_per_day: usize,
    cards_daily_limit: usize,
}

impl ParameterSet {
    /// Build a parameter set, rejecting malformed input with `InvalidParameter`
    pub fn new(
        weights: &[f64],
        desired_retention: f64,
        new_cards_per_day: usize,
        cards_daily_limit: usize,
    ) -> Result<Self> {
        let weights: Weights = weights.try_into().map_err(|_| {
            SchedulerError::InvalidParameter(format!(
                "expected {} weights, got {}",
                WEIGHT_COUNT,
                weights.len()
            ))
        })?;
        validate_weights(&weights)?;
        validate_retention(desired_retention)?;
        if new_cards_per_day == 0 {
            return Err(SchedulerError::InvalidParameter(
                "new_cards_per_day must be positive".to_string(),
            ));
        }
        if cards_daily_limit == 0 {
            return Err(SchedulerError::InvalidParameter(
                "cards_daily_limit must be positive".to_string(),
            ));
        }

        Ok(Self {
            weights,
            desired_retention,
            new_cards_per_day,
            cards_daily_limit,
        })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn desired_retention(&self) -> f64 {
        self.desired_retention
    }

    pub fn new_cards_per_day(&self) -> usize {
        self.new_cards_per_day
    }

    pub fn cards_daily_limit(&self) -> usize {
        self.cards_daily_limit
    }

    /// Copy with replaced weights
    pub fn with_weights(&self, weights: &[f64]) -> Result<Self> {
        Self::new(
            weights,
            self.desired_retention,
            self.new_cards_per_day,
            self.cards_daily_limit,
        )
    }

    /// Copy with a replaced retention target
    pub fn with_desired_retention(&self, desired_retention: f64) -> Result<Self> {
        Self::new(
            &self.weights,
            desired_retention,
            self.new_cards_per_day,
            self.cards_daily_limit,
        )
    }

    /// Copy with replaced daily limits
    pub fn with_limits(&self, new_cards_per_day: usize, cards_daily_limit: usize) -> Result<Self> {
        Self::new(
            &self.weights,
            self.desired_retention,
            new_cards_per_day,
            cards_daily_limit,
        )
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            desired_retention: DEFAULT_DESIRED_RETENTION,
            new_cards_per_day: DEFAULT_NEW_CARDS_PER_DAY,
            cards_daily_limit: DEFAULT_CARDS_DAILY_LIMIT,
        }
    }
}

/// Every weight must be finite and the decay weight strictly positive
pub(crate) fn validate_weights(weights: &Weights) -> Result<()> {
    if let Some(i) = weights.iter().position(|w| !w.is_finite()) {
        return Err(SchedulerError::InvalidParameter(format!(
            "weight w[{}] is not finite",
            i
        )));
    }
    if weights[20] <= 0.0 {
        return Err(SchedulerError::InvalidParameter(format!(
            "decay weight w[20] must be positive, got {}",
            weights[20]
        )));
    }
    Ok(())
}

pub(crate) fn validate_retention(desired_retention: f64) -> Result<()> {
    if desired_retention > 0.0 && desired_retention < 1.0 {
        Ok(())
    } else {
        Err(SchedulerError::InvalidParameter(format!(
            "desired retention must be between 0 and 1, got {}",
            desired_retention
        )))
    }
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// On-disk settings layout (`settings.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawParameterSet {
    fsrs: Vec<f64>,
    #[serde(rename = "fsrs_desired_R")]
    desired_retention: f64,
    new_cards_per_day: usize,
    cards_daily_limit: usize,
}

impl TryFrom<RawParameterSet> for ParameterSet {
    type Error = SchedulerError;

    fn try_from(raw: RawParameterSet) -> Result<Self> {
        ParameterSet::new(
            &raw.fsrs,
            raw.desired_retention,
            raw.new_cards_per_day,
            raw.cards_daily_limit,
        )
    }
}

impl From<ParameterSet> for RawParameterSet {
    fn from(params: ParameterSet) -> Self {
        Self {
            fsrs: params.weights.to_vec(),
            desired_retention: params.desired_retention,
            new_cards_per_day: params.new_cards_per_day,
            cards_daily_limit: params.cards_daily_limit,
        }
    }
}
