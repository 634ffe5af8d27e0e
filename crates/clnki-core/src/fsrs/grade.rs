//! Review grades

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Review-quality rating given after the back of a card is revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Grade {
    /// Forgot the card
    Again = 1,
    /// Recalled with serious difficulty
    Hard = 2,
    /// Recalled
    Easy = 3,
    /// Recalled effortlessly
    VeryEasy = 4,
}

impl Grade {
    /// All grades in ascending order
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Easy, Grade::VeryEasy];

    /// Parse an integer grade, rejecting anything outside 1..=4
    pub fn from_i64(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Easy),
            4 => Ok(Grade::VeryEasy),
            other => Err(SchedulerError::InvalidGrade(other)),
        }
    }

    /// Numeric value (1-4)
    pub fn value(self) -> i64 {
        self as i64
    }

    /// Zero-based weight index for the initial stability of this grade
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }

    /// Label shown in the grade menu
    pub fn label(self) -> &'static str {
        match self {
            Grade::Again => "Again",
            Grade::Hard => "Hard",
            Grade::Easy => "Easy",
            Grade::VeryEasy => "Very Easy",
        }
    }
}

impl TryFrom<i64> for Grade {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self> {
        Grade::from_i64(value)
    }
}

impl From<Grade> for i64 {
    fn from(grade: Grade) -> Self {
        grade.value()
    }
}

impl std::str::FromStr for Grade {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(Grade::Again),
            "2" => Ok(Grade::Hard),
            "3" => Ok(Grade::Easy),
            "4" => Ok(Grade::VeryEasy),
            other => Err(SchedulerError::InvalidGrade(other.parse().unwrap_or(-1))),
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}
