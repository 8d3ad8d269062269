use super::{
    competition::CompetitionConfig,
    competitor::CompetitorConfig,
    traits::ConfigSection,
};
use crate::error::CbbocError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `CBBOC__COMPETITOR__SEED=7`.
pub const ENV_PREFIX: &str = "CBBOC";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub competition: CompetitionConfig,
    pub competitor: CompetitorConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CbbocError> {
        validate_section(&self.competition)?;
        validate_section(&self.competitor)?;
        Ok(())
    }
}

fn validate_section<S: ConfigSection>(section: &S) -> Result<(), CbbocError> {
    section.validate().map_err(|e| match e {
        CbbocError::Configuration(msg) => {
            CbbocError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Loads a TOML file, then applies `CBBOC__<SECTION>__<KEY>` overrides.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CbbocError> {
        let path = path.as_ref();
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::new(
                &path.to_string_lossy(),
                config::FileFormat::Toml,
            ))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                CbbocError::Configuration(format!(
                    "Failed to load config {}: {}",
                    path.display(),
                    e
                ))
            })?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CbbocError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| CbbocError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CbbocError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `f` and keeps the result only if it validates.
    pub fn update<F>(&self, f: F) -> Result<(), CbbocError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::problem::InstanceFormat;
    use crate::types::TrainingCategory;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.competition.base_time_per_instance_ms, 60_000);
        assert_eq!(config.competitor.training_category, TrainingCategory::None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cbboc.toml");

        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.competitor.strategy = StrategyKind::Sahh;
                c.competitor.training_category = TrainingCategory::Long;
                c.competitor.seed = Some(99);
                c.competition.instance_format = InstanceFormat::Legacy2015;
                c.competition.problem_class = Some("toy".to_string());
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        let config = loaded.get();
        assert_eq!(config.competitor.strategy, StrategyKind::Sahh);
        assert_eq!(config.competitor.training_category, TrainingCategory::Long);
        assert_eq!(config.competitor.seed, Some(99));
        assert_eq!(config.competition.instance_format, InstanceFormat::Legacy2015);
        assert_eq!(config.competition.problem_class.as_deref(), Some("toy"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[competitor]\nstrategy = \"random\"\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.competitor.strategy, StrategyKind::Random);
        assert_eq!(config.competition.base_time_per_instance_ms, 60_000);
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| {
            c.competitor.strategy = StrategyKind::Random;
            c.competitor.training_category = TrainingCategory::Short;
        });
        match result {
            Err(CbbocError::Configuration(msg)) => assert!(msg.starts_with("[competitor]")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
        assert_eq!(manager.get().competitor.training_category, TrainingCategory::None);
    }

    #[test]
    fn test_unknown_category_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[competitor]\ntraining_category = \"MEDIUM\"\n").unwrap();

        let manager = ConfigManager::new();
        assert!(matches!(
            manager.load_from_file(&path),
            Err(CbbocError::Configuration(_))
        ));
    }
}
