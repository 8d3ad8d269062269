//! Benchmark harness for black-box optimisation of k-bounded pseudo-Boolean
//! functions under enforced evaluation and wall-clock budgets.

pub mod competitors;
pub mod config;
pub mod engines;
pub mod error;
pub mod problem;
pub mod types;
pub mod utils;

pub use competitors::Competitor;
pub use engines::competition::{CompetitionOrchestrator, Report};
pub use engines::objective::ObjectiveFn;
pub use error::{CbbocError, Result};
pub use problem::{ProblemClass, ProblemInstance};
pub use types::{InstanceResult, TrainingCategory};
