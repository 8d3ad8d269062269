use crate::error::Result;
use crate::types::{InstanceResult, TrainingCategory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const COMPETITOR_LANGUAGE: &str = "Rust";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
pub const RESULTS_DIR: &str = "results";

/// Scorecard of one competition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub competitor_name: String,
    pub competitor_language: String,
    pub problem_class_name: String,
    #[serde(with = "category_code")]
    pub training_category: TrainingCategory,
    pub datetime: String,
    pub training_results: Vec<InstanceResult>,
    /// Milliseconds; -1 when the category does not train.
    pub training_wall_clock_usage: i64,
    pub testing_results: Vec<InstanceResult>,
    pub testing_wall_clock_usage: i64,
}

impl Report {
    pub fn timestamp_now() -> String {
        chrono::Local::now().format(DATETIME_FORMAT).to_string()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn results_file_name(&self) -> String {
        format!(
            "CBBOCresults-{}-{}-{}.json",
            self.competitor_name, self.problem_class_name, self.datetime
        )
    }

    /// Writes the report under `<problem_class_dir>/results/`.
    pub fn write_to_dir<P: AsRef<Path>>(&self, problem_class_dir: P) -> Result<PathBuf> {
        let dir = problem_class_dir.as_ref().join(RESULTS_DIR);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(self.results_file_name());
        std::fs::write(&path, format!("{}\n", self.to_json_pretty()?))?;
        Ok(path)
    }
}

/// `trainingCategory` is written as its numeric code in a string.
mod category_code {
    use crate::types::TrainingCategory;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(category: &TrainingCategory, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&category.numeric_code().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TrainingCategory, D::Error> {
        let code = String::deserialize(d)?;
        TrainingCategory::from_numeric_code(&code).map_err(de::Error::custom)
    }
}
