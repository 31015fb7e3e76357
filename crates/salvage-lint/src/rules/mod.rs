//! Built-in lint rules.

pub mod missing_recommendations;
pub mod slug_collision;
pub mod unknown_main_stat;
pub mod unused_set;

pub use missing_recommendations::MissingRecommendationsRule;
pub use slug_collision::SlugCollisionRule;
pub use unknown_main_stat::UnknownMainStatRule;
pub use unused_set::UnusedSetRule;
