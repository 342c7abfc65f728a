use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Riot champion id (the numeric `key` in Data Dragon).
pub type ChampionId = u32;

/// Raw observed outcomes for one champion in one context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinStats {
    pub wins: u32,
    pub games: u32,
}

impl WinStats {
    pub fn new(wins: u32, games: u32) -> Self {
        WinStats { wins, games }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.wins <= self.games
    }
}

/// Per-champion record: overall results plus sparse ally/opponent tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChampionData {
    #[serde(default)]
    pub winrate: WinStats,
    #[serde(default)]
    pub matchups: BTreeMap<ChampionId, WinStats>,
    #[serde(default)]
    pub synergies: BTreeMap<ChampionId, WinStats>,
}

impl ChampionData {
    pub fn synergy_with(&self, ally: ChampionId) -> Option<&WinStats> {
        self.synergies.get(&ally)
    }

    pub fn matchup_against(&self, enemy: ChampionId) -> Option<&WinStats> {
        self.matchups.get(&enemy)
    }
}

/// The precomputed statistics table, keyed by champion id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChampionDataMap {
    champions: BTreeMap<ChampionId, ChampionData>,
}

impl ChampionDataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ChampionId, data: ChampionData) {
        self.champions.insert(id, data);
    }

    pub fn get(&self, id: ChampionId) -> Option<&ChampionData> {
        self.champions.get(&id)
    }

    pub fn contains(&self, id: ChampionId) -> bool {
        self.champions.contains_key(&id)
    }

    /// Ascending by champion id.
    pub fn iter(&self) -> impl Iterator<Item = (ChampionId, &ChampionData)> {
        self.champions.iter().map(|(id, data)| (*id, data))
    }

    pub fn ids(&self) -> impl Iterator<Item = ChampionId> + '_ {
        self.champions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let map: ChampionDataMap = serde_json::from_str(json)
            .map_err(|e| AppError::JsonError(format!("Failed to parse champion stats: {}", e)))?;
        map.validate()?;
        Ok(map)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read champion stats from {}: {}",
                path.display(),
                e
            ))
        })?;

        let map = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            champions = map.len(),
            "loaded champion stats"
        );
        Ok(map)
    }

    /// Checks every id is positive and every record has `wins <= games`.
    pub fn validate(&self) -> Result<(), AppError> {
        for (id, data) in self.iter() {
            if id == 0 {
                return Err(AppError::InvalidInput(
                    "champion id 0 in stats dataset".to_string(),
                ));
            }
            check_stats(id, "winrate", &data.winrate)?;

            for (other, stats) in &data.synergies {
                check_interaction_key(id, "synergies", *other)?;
                check_stats(id, &format!("synergies[{}]", other), stats)?;
            }
            for (other, stats) in &data.matchups {
                check_interaction_key(id, "matchups", *other)?;
                check_stats(id, &format!("matchups[{}]", other), stats)?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(ChampionId, ChampionData)> for ChampionDataMap {
    fn from_iter<I: IntoIterator<Item = (ChampionId, ChampionData)>>(iter: I) -> Self {
        ChampionDataMap {
            champions: iter.into_iter().collect(),
        }
    }
}

fn check_interaction_key(id: ChampionId, table: &str, other: ChampionId) -> Result<(), AppError> {
    if other == 0 {
        return Err(AppError::InvalidInput(format!(
            "champion {} has a {} entry keyed by id 0",
            id, table
        )));
    }
    Ok(())
}

fn check_stats(id: ChampionId, field: &str, stats: &WinStats) -> Result<(), AppError> {
    if !stats.is_consistent() {
        return Err(AppError::InvalidInput(format!(
            "champion {} {}: wins ({}) exceed games ({})",
            id, field, stats.wins, stats.games
        )));
    }
    Ok(())
}
