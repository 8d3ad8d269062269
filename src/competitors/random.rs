use super::traits::Competitor;
use crate::engines::objective::ObjectiveFn;
use crate::error::{CbbocError, Result};
use crate::types::TrainingCategory;
use crate::utils::random::{make_rng, random_bitvector};
use rand::rngs::StdRng;
use std::time::Duration;

/// Samples uniformly random candidates until the budget runs out.
pub struct RandomCompetitor {
    rng: StdRng,
}

impl RandomCompetitor {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
        }
    }
}

impl Competitor for RandomCompetitor {
    fn name(&self) -> &str {
        "RandomCompetitor"
    }

    fn training_category(&self) -> TrainingCategory {
        TrainingCategory::None
    }

    fn train(&mut self, _training_set: &[ObjectiveFn], _max_time: Duration) -> Result<()> {
        Err(CbbocError::Competitor(
            "RandomCompetitor does not train".to_string(),
        ))
    }

    fn test(&mut self, test_case: &ObjectiveFn, _max_time: Duration) -> Result<()> {
        loop {
            let candidate = random_bitvector(test_case.num_genes(), &mut self.rng);
            test_case.value(&candidate)?;
        }
    }
}
