pub mod budget;
pub mod objective_fn;

pub use budget::EvaluationBudget;
pub use objective_fn::{BestRecord, BudgetSignal, ObjectiveFn};
