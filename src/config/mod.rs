pub mod traits;
pub mod competition;
pub mod competitor;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use competition::CompetitionConfig;
pub use competitor::{CompetitorConfig, StrategyKind};
