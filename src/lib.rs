//! Champion pick recommendations for League of Legends champ select.
//!
//! Given a precomputed synergy/matchup table and the current draft, the
//! [`ChampionRecommender`] scores every champion still available and ranks
//! them by smoothed win probability.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod champions;
pub mod config;
pub mod display;
pub mod error;

pub use analysis::champion_stats::{ChampionData, ChampionDataMap, ChampionId, WinStats};
pub use analysis::draft::ChampSelect;
pub use analysis::recommender::{
    ChampionInteraction, ChampionPerformance, ChampionRecommender, InteractionKind,
    MissingInteraction, Recommendation,
};
pub use error::AppError;
