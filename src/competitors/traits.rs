use crate::engines::objective::ObjectiveFn;
use crate::error::Result;
use crate::types::TrainingCategory;
use std::time::Duration;

/// A black-box search strategy under test.
///
/// Strategies call [`ObjectiveFn::value`] until it returns
/// `EvaluationsExceeded` or `TimeExceeded` and propagate that error with `?`.
/// Swallowing it gains nothing: the objective function keeps refusing.
pub trait Competitor {
    /// Identity written into the report and the results file name.
    fn name(&self) -> &str;

    /// Queried once per run.
    fn training_category(&self) -> TrainingCategory;

    /// Called once, and only when the category trains. Every objective in
    /// `training_set` draws from one shared evaluation pool.
    fn train(&mut self, training_set: &[ObjectiveFn], max_time: Duration) -> Result<()>;

    /// Called once per testing instance, in manifest order.
    fn test(&mut self, test_case: &ObjectiveFn, max_time: Duration) -> Result<()>;
}
