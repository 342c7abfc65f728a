pub mod champion_stats;
pub mod draft;
pub mod recommender;
