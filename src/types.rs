use crate::error::CbbocError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One solution: a fixed-length sequence of boolean genes.
pub type Candidate = Vec<bool>;

/// Whether a competitor trains, and how large its pooled training budget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrainingCategory {
    None,
    Short,
    Long,
}

impl TrainingCategory {
    /// Scales both the pooled training evaluations and the training time.
    pub fn multiplier(self) -> i64 {
        match self {
            TrainingCategory::None => 0,
            TrainingCategory::Short => 1,
            TrainingCategory::Long => 10,
        }
    }

    /// Code written into the `trainingCategory` report field.
    pub fn numeric_code(self) -> u8 {
        match self {
            TrainingCategory::None => 0,
            TrainingCategory::Short => 1,
            TrainingCategory::Long => 2,
        }
    }

    pub fn from_numeric_code(code: &str) -> Result<Self, CbbocError> {
        match code.trim() {
            "0" => Ok(TrainingCategory::None),
            "1" => Ok(TrainingCategory::Short),
            "2" => Ok(TrainingCategory::Long),
            other => Err(CbbocError::InvalidTrainingCategory(format!(
                "unknown numeric code '{}'",
                other
            ))),
        }
    }

    pub fn trains(self) -> bool {
        self != TrainingCategory::None
    }
}

impl fmt::Display for TrainingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrainingCategory::None => "NONE",
            TrainingCategory::Short => "SHORT",
            TrainingCategory::Long => "LONG",
        };
        f.write_str(name)
    }
}

impl FromStr for TrainingCategory {
    type Err = CbbocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(TrainingCategory::None),
            "SHORT" => Ok(TrainingCategory::Short),
            "LONG" => Ok(TrainingCategory::Long),
            _ => Err(CbbocError::InvalidTrainingCategory(s.to_string())),
        }
    }
}

/// Which deadline guards an objective function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Training,
    Testing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Training => f.write_str("TRAINING"),
            Phase::Testing => f.write_str("TESTING"),
        }
    }
}

/// Terminal outcome of one objective function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResult {
    pub remaining_evaluations: i64,
    pub remaining_evaluations_when_best_reached: i64,
    pub best_value: f64,
}
