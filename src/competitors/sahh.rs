use super::traits::Competitor;
use crate::engines::objective::ObjectiveFn;
use crate::error::{CbbocError, Result};
use crate::types::TrainingCategory;
use crate::utils::random::{make_rng, random_bitvector, random_hamming1_neighbour};
use crate::utils::stats::{mean, sample_variance};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

/// Simulated annealing hyper-heuristic.
///
/// Training learns the annealing schedule's temperature range from random
/// walks over the training instances (White, "Concepts of Scale in Simulated
/// Annealing", ICCD 1984): the smallest absolute fitness step, zero
/// included, gives the final temperature, the walk's standard deviation the initial one. Testing
/// anneals linearly between the two over the instance's whole budget.
pub struct SahhCompetitor {
    training_category: TrainingCategory,
    schedule_lower_bound: f64,
    schedule_upper_bound: f64,
    rng: StdRng,
}

impl SahhCompetitor {
    pub fn new(training_category: TrainingCategory, seed: Option<u64>) -> Self {
        Self {
            training_category,
            schedule_lower_bound: 0.0,
            schedule_upper_bound: f64::MAX,
            rng: make_rng(seed),
        }
    }

    /// Learned `(final, initial)` temperatures.
    pub fn schedule_bounds(&self) -> (f64, f64) {
        (self.schedule_lower_bound, self.schedule_upper_bound)
    }

    fn random_walk(&mut self, f: &ObjectiveFn, num_steps: i64) -> Result<Vec<f64>> {
        let mut incumbent = random_bitvector(f.num_genes(), &mut self.rng);
        let mut trajectory = Vec::with_capacity(num_steps.max(0) as usize);
        for _ in 0..num_steps {
            let incoming = random_hamming1_neighbour(&incumbent, &mut self.rng);
            trajectory.push(f.value(&incoming)?);
            incumbent = incoming;
        }
        Ok(trajectory)
    }
}

impl Competitor for SahhCompetitor {
    fn name(&self) -> &str {
        "SAHHCompetitor"
    }

    fn training_category(&self) -> TrainingCategory {
        self.training_category
    }

    fn train(&mut self, training_set: &[ObjectiveFn], _max_time: Duration) -> Result<()> {
        let Some(first) = training_set.first() else {
            return Ok(());
        };
        // The pool is shared, so split it evenly across instances up front.
        let evals_per_case = first.remaining_evaluations() / training_set.len() as i64;

        let mut lower_bounds = Vec::new();
        let mut upper_bounds = Vec::new();
        for f in training_set {
            let trajectory = self.random_walk(f, evals_per_case)?;
            match white_temperature_range(&trajectory) {
                Some((lower, upper)) => {
                    lower_bounds.push(lower);
                    upper_bounds.push(upper);
                }
                None => log::debug!(
                    "Walk of {} steps too short to estimate temperatures",
                    trajectory.len()
                ),
            }
        }

        if lower_bounds.is_empty() {
            log::warn!("No temperature estimates from training; keeping default schedule");
            return Ok(());
        }

        self.schedule_lower_bound = mean(&lower_bounds);
        self.schedule_upper_bound = mean(&upper_bounds);
        log::info!(
            "Learned annealing schedule {:.6} -> {:.6}",
            self.schedule_upper_bound,
            self.schedule_lower_bound
        );
        Ok(())
    }

    fn test(&mut self, test_case: &ObjectiveFn, _max_time: Duration) -> Result<()> {
        let mut incumbent = random_bitvector(test_case.num_genes(), &mut self.rng);
        let mut last_value = test_case.value(&incumbent)?;

        let num_evaluations = test_case.remaining_evaluations();
        for i in 0..num_evaluations {
            let incoming = random_hamming1_neighbour(&incumbent, &mut self.rng);
            let value = test_case.value(&incoming)?;

            let temperature = linear_interpolate(
                i as f64,
                0.0,
                (num_evaluations - 1) as f64,
                self.schedule_upper_bound,
                self.schedule_lower_bound,
            );
            if sa_accept(last_value, value, temperature, &mut self.rng)? {
                incumbent = incoming;
                last_value = value;
            }
        }
        Ok(())
    }
}

/// `(min |step|, standard deviation)` of a fitness trajectory.
fn white_temperature_range(trajectory: &[f64]) -> Option<(f64, f64)> {
    if trajectory.len() < 2 {
        return None;
    }
    let min_difference = trajectory
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::MAX, f64::min);
    Some((min_difference, sample_variance(trajectory).sqrt()))
}

/// Metropolis acceptance for maximisation.
fn sa_accept<R: Rng>(
    last_value: f64,
    current_value: f64,
    temperature: f64,
    rng: &mut R,
) -> Result<bool> {
    if temperature.is_nan() || temperature < 0.0 {
        return Err(CbbocError::Competitor(format!(
            "Non-negative temperature expected, found {}",
            temperature
        )));
    }

    if current_value > last_value {
        Ok(true)
    } else if temperature == 0.0 {
        Ok(current_value >= last_value)
    } else {
        let p = ((current_value - last_value) / temperature).exp();
        Ok(rng.gen::<f64>() < p)
    }
}

/// Maps `input` from `[in1, in2]` onto `[out1, out2]`.
fn linear_interpolate(input: f64, in1: f64, in2: f64, out1: f64, out2: f64) -> f64 {
    if in1 == in2 {
        return out1;
    }
    let t = (input - in1) / (in2 - in1);
    out2 * t + out1 * (1.0 - t)
}
