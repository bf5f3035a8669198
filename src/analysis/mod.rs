pub mod hero_stats;
pub mod window;

pub use hero_stats::{aggregate, aggregate_in, HeroStat, HeroStatsTracker};
pub use window::Window;
