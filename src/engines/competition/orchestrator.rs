use super::report::{Report, COMPETITOR_LANGUAGE};
use super::stats::ResultStats;
use crate::competitors::Competitor;
use crate::config::CompetitionConfig;
use crate::engines::objective::ObjectiveFn;
use crate::error::{CbbocError, Result};
use crate::problem::manifest::read_class_folder;
use crate::problem::ProblemClass;
use std::time::{Duration, Instant};

/// Runs one competitor through training (when its category trains) and
/// testing, then builds the report.
///
/// `EvaluationsExceeded` and `TimeExceeded` end the current phase or testing
/// instance normally. Any other error aborts the run without a report.
pub struct CompetitionOrchestrator {
    config: CompetitionConfig,
}

impl CompetitionOrchestrator {
    pub fn new(config: CompetitionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompetitionConfig {
        &self.config
    }

    /// Loads the configured problem class, runs the competitor on it, and
    /// writes the report to stdout and the results directory.
    pub fn run(&self, competitor: &mut dyn Competitor) -> Result<Report> {
        let problem_class_name = match &self.config.problem_class {
            Some(name) => name.clone(),
            None => read_class_folder(&self.config.resources_root)?,
        };
        let problem_dir = self.config.problem_class_dir(&problem_class_name);
        let training_category = competitor.training_category();

        log::info!(
            "Running {} on problem class '{}' (training category {})",
            competitor.name(),
            problem_class_name,
            training_category
        );

        let mut problem_class =
            ProblemClass::load(&problem_dir, training_category, self.config.instance_format)?;
        let report = self.run_problem_class(competitor, &problem_class_name, &mut problem_class)?;

        let json = report.to_json_pretty()?;
        if self.config.write_results_file {
            let path = report.write_to_dir(&problem_dir)?;
            log::info!("Results written to {}", path.display());
        }
        println!("{}", json);

        if let Some(stats) = ResultStats::from_results(&report.testing_results) {
            log::info!("Testing summary:\n{}", stats);
        }

        Ok(report)
    }

    /// Runs both phases over an already-built problem class. The class's
    /// training category decides whether training happens.
    pub fn run_problem_class(
        &self,
        competitor: &mut dyn Competitor,
        problem_class_name: &str,
        problem_class: &mut ProblemClass,
    ) -> Result<Report> {
        let training_category = problem_class.training_category();

        let training_wall_clock_usage = if training_category.trains() {
            let elapsed = self.train_phase(competitor, problem_class)?;
            log::info!("actualTrainingTime: {} ms", elapsed.as_millis());
            millis(elapsed)
        } else {
            -1
        };

        let elapsed = self.test_phase(competitor, problem_class)?;
        log::info!("actualTestingTime: {} ms", elapsed.as_millis());
        let testing_wall_clock_usage = millis(elapsed);

        Ok(Report {
            competitor_name: competitor.name().to_string(),
            competitor_language: COMPETITOR_LANGUAGE.to_string(),
            problem_class_name: problem_class_name.to_string(),
            training_category,
            datetime: Report::timestamp_now(),
            training_results: problem_class
                .training_set()
                .iter()
                .map(ObjectiveFn::result)
                .collect(),
            training_wall_clock_usage,
            testing_results: problem_class
                .testing_set()
                .iter()
                .map(ObjectiveFn::result)
                .collect(),
            testing_wall_clock_usage,
        })
    }

    fn train_phase(
        &self,
        competitor: &mut dyn Competitor,
        problem_class: &mut ProblemClass,
    ) -> Result<Duration> {
        let multiplier = problem_class.training_category().multiplier() as u64;
        let training_set = problem_class.training_set_mut();
        let max_time = Duration::from_millis(
            self.config
                .base_time_per_instance_ms
                .saturating_mul(training_set.len() as u64)
                .saturating_mul(multiplier),
        );

        let start = Instant::now();
        let deadline = deadline_after(start, max_time)?;
        for f in training_set.iter_mut() {
            f.arm(deadline);
        }

        log::info!(
            "Training on {} instances: {} pooled evaluations, {} ms",
            training_set.len(),
            training_set.first().map_or(0, |f| f.remaining_evaluations()),
            max_time.as_millis()
        );

        let outcome = competitor.train(training_set, max_time);
        let elapsed = start.elapsed();
        for f in training_set.iter_mut() {
            f.disarm();
        }

        settle(outcome, training_set.iter(), "training")?;
        Ok(elapsed)
    }

    fn test_phase(
        &self,
        competitor: &mut dyn Competitor,
        problem_class: &mut ProblemClass,
    ) -> Result<Duration> {
        let max_time = self.config.base_time_per_instance();
        let start = Instant::now();

        for (i, f) in problem_class.testing_set_mut().iter_mut().enumerate() {
            f.arm(deadline_after(Instant::now(), max_time)?);
            let outcome = competitor.test(f, max_time);
            f.disarm();

            settle(outcome, std::iter::once(&*f), "testing")?;
            log::debug!("Testing instance {} finished: {:?}", i, f.result());
        }

        Ok(start.elapsed())
    }
}

/// Absorbs the expected exhaustion signals at a phase boundary.
fn settle<'a>(
    outcome: Result<()>,
    objectives: impl Iterator<Item = &'a ObjectiveFn>,
    phase: &str,
) -> Result<()> {
    match outcome {
        Ok(()) => {
            let swallowed: Vec<_> = objectives.filter_map(ObjectiveFn::signal).collect();
            if let Some(signal) = swallowed.first() {
                log::warn!(
                    "Competitor returned normally from {} after a {:?} signal",
                    phase,
                    signal
                );
            }
            Ok(())
        }
        Err(e) if e.is_budget_signal() => {
            log::debug!("{} ended: {}", phase, e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn deadline_after(start: Instant, allowance: Duration) -> Result<Instant> {
    start.checked_add(allowance).ok_or_else(|| {
        CbbocError::Configuration(format!(
            "time allowance of {} ms is too large",
            allowance.as_millis()
        ))
    })
}

fn millis(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}
