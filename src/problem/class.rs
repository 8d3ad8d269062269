use super::instance::{InstanceFormat, ProblemInstance};
use super::manifest::{read_manifest, TESTING_MANIFEST, TRAINING_MANIFEST};
use crate::engines::objective::{EvaluationBudget, ObjectiveFn};
use crate::error::{CbbocError, Result};
use crate::types::{Phase, TrainingCategory};
use std::path::Path;
use std::rc::Rc;

/// Training and testing objective functions for one run, with budgets
/// allocated.
///
/// Training draws from one pool of `multiplier × Σ maxEvalsPerInstance`
/// evaluations shared by every training objective. Each testing objective
/// gets its own `maxEvalsPerInstance`.
#[derive(Debug)]
pub struct ProblemClass {
    training: Vec<ObjectiveFn>,
    testing: Vec<ObjectiveFn>,
    training_category: TrainingCategory,
}

impl ProblemClass {
    /// Loads both manifests under `root` and every instance they name.
    ///
    /// Training instance files are only read when the category trains.
    pub fn load<P: AsRef<Path>>(
        root: P,
        training_category: TrainingCategory,
        format: InstanceFormat,
    ) -> Result<Self> {
        let root = root.as_ref();
        let training_files = read_manifest(root.join(TRAINING_MANIFEST))?;
        let testing_files = read_manifest(root.join(TESTING_MANIFEST))?;

        let training = if training_category.trains() {
            load_instances(root, &training_files, format)?
        } else {
            Vec::new()
        };
        let testing = load_instances(root, &testing_files, format)?;

        log::debug!(
            "Loaded {} training and {} testing instances from {}",
            training.len(),
            testing.len(),
            root.display()
        );

        Self::from_instances(training, testing, training_category)
    }

    /// Allocates budgets over already-parsed instances. Training instances are
    /// dropped when the category does not train.
    pub fn from_instances(
        training: Vec<ProblemInstance>,
        testing: Vec<ProblemInstance>,
        training_category: TrainingCategory,
    ) -> Result<Self> {
        let training = if training_category.trains() {
            let pool = EvaluationBudget::new(training_pool_size(&training, training_category)?);
            training
                .into_iter()
                .map(|p| ObjectiveFn::new(Rc::new(p), Phase::Training, pool.clone()))
                .collect()
        } else {
            Vec::new()
        };

        let testing = testing
            .into_iter()
            .map(|p| {
                let budget = EvaluationBudget::new(p.max_evals_per_instance());
                ObjectiveFn::new(Rc::new(p), Phase::Testing, budget)
            })
            .collect();

        Ok(Self {
            training,
            testing,
            training_category,
        })
    }

    pub fn training_category(&self) -> TrainingCategory {
        self.training_category
    }

    pub fn training_set(&self) -> &[ObjectiveFn] {
        &self.training
    }

    pub fn testing_set(&self) -> &[ObjectiveFn] {
        &self.testing
    }

    pub(crate) fn training_set_mut(&mut self) -> &mut [ObjectiveFn] {
        &mut self.training
    }

    pub(crate) fn testing_set_mut(&mut self) -> &mut [ObjectiveFn] {
        &mut self.testing
    }

    /// Size of the shared training pool as currently remaining, if training.
    pub fn training_pool_remaining(&self) -> Option<i64> {
        self.training.first().map(|f| f.remaining_evaluations())
    }
}

/// `multiplier × Σ maxEvalsPerInstance`, refusing totals that overflow.
fn training_pool_size(training: &[ProblemInstance], category: TrainingCategory) -> Result<i64> {
    training
        .iter()
        .try_fold(0i64, |total, p| total.checked_add(p.max_evals_per_instance()))
        .and_then(|total| total.checked_mul(category.multiplier()))
        .ok_or_else(|| {
            CbbocError::InstanceFormat(format!(
                "training pool of {} instances ({}) overflows the evaluation counter",
                training.len(),
                category
            ))
        })
}

fn load_instances(
    root: &Path,
    files: &[String],
    format: InstanceFormat,
) -> Result<Vec<ProblemInstance>> {
    files
        .iter()
        .map(|name| ProblemInstance::from_file(root.join(name), format))
        .collect()
}
