pub mod nahc;
pub mod random;
pub mod sahh;
pub mod traits;

pub use nahc::NahcCompetitor;
pub use random::RandomCompetitor;
pub use sahh::SahhCompetitor;
pub use traits::Competitor;

use crate::config::traits::ConfigSection;
use crate::config::{CompetitorConfig, StrategyKind};
use crate::error::Result;

/// Instantiates the configured baseline strategy.
pub fn build_competitor(config: &CompetitorConfig) -> Result<Box<dyn Competitor>> {
    config.validate()?;
    let competitor: Box<dyn Competitor> = match config.strategy {
        StrategyKind::Random => Box::new(RandomCompetitor::new(config.seed)),
        StrategyKind::Nahc => Box::new(NahcCompetitor::new(config.seed)),
        StrategyKind::Sahh => Box::new(SahhCompetitor::new(config.training_category, config.seed)),
    };
    Ok(competitor)
}
