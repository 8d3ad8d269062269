use super::traits::ConfigSection;
use crate::error::CbbocError;
use crate::types::TrainingCategory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorConfig {
    pub strategy: StrategyKind,
    pub training_category: TrainingCategory,
    pub seed: Option<u64>,
}

/// Built-in baseline strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    Nahc,
    Sahh,
}

impl StrategyKind {
    /// Whether the strategy has a training step at all.
    pub fn can_train(self) -> bool {
        matches!(self, StrategyKind::Sahh)
    }
}

impl FromStr for StrategyKind {
    type Err = CbbocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "nahc" => Ok(StrategyKind::Nahc),
            "sahh" => Ok(StrategyKind::Sahh),
            other => Err(CbbocError::Configuration(format!(
                "unknown strategy '{}' (expected random, nahc or sahh)",
                other
            ))),
        }
    }
}

impl Default for CompetitorConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Nahc,
            training_category: TrainingCategory::None,
            seed: None,
        }
    }
}

impl ConfigSection for CompetitorConfig {
    fn section_name() -> &'static str {
        "competitor"
    }

    fn validate(&self) -> Result<(), CbbocError> {
        if self.training_category.trains() && !self.strategy.can_train() {
            return Err(CbbocError::Configuration(format!(
                "Strategy {:?} does not train; training category must be NONE, found {}",
                self.strategy, self.training_category
            )));
        }
        Ok(())
    }
}
