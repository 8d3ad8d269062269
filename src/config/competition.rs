use super::traits::ConfigSection;
use crate::error::CbbocError;
use crate::problem::InstanceFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Wall-clock allowance for one testing instance, and per training instance
/// before the category multiplier.
pub const BASE_TIME_PER_INSTANCE_MS: u64 = 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionConfig {
    /// Directory holding `classFolder.txt` and one folder per problem class.
    pub resources_root: PathBuf,
    /// Problem class folder name; read from `classFolder.txt` when unset.
    pub problem_class: Option<String>,
    pub base_time_per_instance_ms: u64,
    pub instance_format: InstanceFormat,
    pub write_results_file: bool,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            resources_root: PathBuf::from("./resources"),
            problem_class: None,
            base_time_per_instance_ms: BASE_TIME_PER_INSTANCE_MS,
            instance_format: InstanceFormat::Current,
            write_results_file: true,
        }
    }
}

impl CompetitionConfig {
    pub fn base_time_per_instance(&self) -> Duration {
        Duration::from_millis(self.base_time_per_instance_ms)
    }

    pub fn problem_class_dir(&self, problem_class_name: &str) -> PathBuf {
        self.resources_root.join(problem_class_name)
    }
}

impl ConfigSection for CompetitionConfig {
    fn section_name() -> &'static str {
        "competition"
    }

    fn validate(&self) -> Result<(), CbbocError> {
        if self.base_time_per_instance_ms == 0 {
            return Err(CbbocError::Configuration(
                "Base time per instance must be positive".to_string(),
            ));
        }
        if let Some(name) = &self.problem_class {
            if name.trim().is_empty() {
                return Err(CbbocError::Configuration(
                    "Problem class name must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
