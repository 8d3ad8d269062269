use super::traits::Competitor;
use crate::engines::objective::ObjectiveFn;
use crate::error::{CbbocError, Result};
use crate::types::TrainingCategory;
use crate::utils::random::{hamming1_neighbours, make_rng, random_bitvector};
use rand::rngs::StdRng;
use std::time::Duration;

/// Next-ascent hill climbing over Hamming-1 neighbours.
///
/// Each pass scans the neighbours of the incumbent at the start of the pass
/// and moves to any strictly better one. A pass without a move is a local
/// optimum; the climber then restarts from a random candidate.
pub struct NahcCompetitor {
    rng: StdRng,
}

impl NahcCompetitor {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
        }
    }
}

impl Competitor for NahcCompetitor {
    fn name(&self) -> &str {
        "NAHCCompetitor"
    }

    fn training_category(&self) -> TrainingCategory {
        TrainingCategory::None
    }

    fn train(&mut self, _training_set: &[ObjectiveFn], _max_time: Duration) -> Result<()> {
        Err(CbbocError::Competitor(
            "NAHCCompetitor does not train".to_string(),
        ))
    }

    fn test(&mut self, test_case: &ObjectiveFn, _max_time: Duration) -> Result<()> {
        loop {
            let mut incumbent = random_bitvector(test_case.num_genes(), &mut self.rng);
            let mut best_value = test_case.value(&incumbent)?;

            loop {
                let mut improved = false;
                for neighbour in hamming1_neighbours(&incumbent) {
                    let value = test_case.value(&neighbour)?;
                    if value > best_value {
                        improved = true;
                        incumbent = neighbour;
                        best_value = value;
                    }
                }
                if !improved {
                    break;
                }
            }

            log::trace!("Local optimum {} reached, restarting", best_value);
        }
    }
}
