use crate::types::InstanceResult;
use crate::utils::stats::{mean, std_dev};
use std::fmt;

/// Summary of a result list; informational only, not part of the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultStats {
    pub best_value_mean: f64,
    pub best_value_sd: f64,
    pub remaining_at_best_mean: f64,
    pub remaining_at_best_sd: f64,
}

impl ResultStats {
    pub fn from_results(results: &[InstanceResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let best_values: Vec<f64> = results.iter().map(|r| r.best_value).collect();
        let remaining_at_best: Vec<f64> = results
            .iter()
            .map(|r| r.remaining_evaluations_when_best_reached as f64)
            .collect();

        Some(Self {
            best_value_mean: mean(&best_values),
            best_value_sd: std_dev(&best_values),
            remaining_at_best_mean: mean(&remaining_at_best),
            remaining_at_best_sd: std_dev(&remaining_at_best),
        })
    }
}

impl fmt::Display for ResultStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bestValueMean: {}", self.best_value_mean)?;
        writeln!(f, "bestValueSD: {}", self.best_value_sd)?;
        writeln!(f, "remainingEvaluationsWhenBestReachedMean: {}", self.remaining_at_best_mean)?;
        write!(f, "remainingEvaluationsWhenBestReachedSD: {}", self.remaining_at_best_sd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(best_value: f64, at_best: i64) -> InstanceResult {
        InstanceResult {
            remaining_evaluations: 0,
            remaining_evaluations_when_best_reached: at_best,
            best_value,
        }
    }

    #[test]
    fn test_stats_over_results() {
        let stats = ResultStats::from_results(&[result(1.0, 10), result(3.0, 30)]).unwrap();
        assert_eq!(stats.best_value_mean, 2.0);
        assert_eq!(stats.best_value_sd, 1.0);
        assert_eq!(stats.remaining_at_best_mean, 20.0);
        assert_eq!(stats.remaining_at_best_sd, 10.0);
    }

    #[test]
    fn test_no_stats_for_empty_results() {
        assert!(ResultStats::from_results(&[]).is_none());
    }
}
