use super::champion_stats::ChampionId;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

pub const MAX_ALLIES: usize = 4;
pub const MAX_ENEMIES: usize = 5;
pub const MAX_BANS: usize = 10;

/// Snapshot of the draft: champions locked in on either side and banned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampSelect {
    #[serde(default)]
    pub allies: Vec<ChampionId>,
    #[serde(default)]
    pub enemies: Vec<ChampionId>,
    #[serde(default)]
    pub bans: Vec<ChampionId>,
}

impl ChampSelect {
    pub fn new(allies: Vec<ChampionId>, enemies: Vec<ChampionId>, bans: Vec<ChampionId>) -> Self {
        ChampSelect {
            allies,
            enemies,
            bans,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allies.is_empty() && self.enemies.is_empty() && self.bans.is_empty()
    }

    /// Every id that can no longer be picked, duplicates collapsed.
    pub fn unavailable(&self) -> BTreeSet<ChampionId> {
        self.bans
            .iter()
            .chain(&self.allies)
            .chain(&self.enemies)
            .copied()
            .collect()
    }

    /// Strict check for callers building a draft from user input.
    ///
    /// The recommender tolerates overlapping lists; this does not.
    pub fn validate(&self) -> Result<(), AppError> {
        check_len("allies", &self.allies, MAX_ALLIES)?;
        check_len("enemies", &self.enemies, MAX_ENEMIES)?;
        check_len("bans", &self.bans, MAX_BANS)?;

        let mut seen: HashSet<ChampionId> = HashSet::new();
        for (list, ids) in [
            ("allies", &self.allies),
            ("enemies", &self.enemies),
            ("bans", &self.bans),
        ] {
            for &id in ids {
                if id == 0 {
                    return Err(AppError::InvalidInput(format!(
                        "champion id 0 in {}",
                        list
                    )));
                }
                if !seen.insert(id) {
                    return Err(AppError::InvalidInput(format!(
                        "champion {} is selected more than once (last seen in {})",
                        id, list
                    )));
                }
            }
        }

        Ok(())
    }
}

fn check_len(list: &str, ids: &[ChampionId], max: usize) -> Result<(), AppError> {
    if ids.len() > max {
        return Err(AppError::InvalidInput(format!(
            "{} holds {} champions, at most {} allowed",
            list,
            ids.len(),
            max
        )));
    }
    Ok(())
}
