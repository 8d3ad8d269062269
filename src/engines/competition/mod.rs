pub mod orchestrator;
pub mod report;
pub mod stats;

pub use orchestrator::CompetitionOrchestrator;
pub use report::Report;
pub use stats::ResultStats;
