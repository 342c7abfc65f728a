use crate::analysis::champion_stats::ChampionId;
use crate::api::models::ChampionInfo;
use crate::error::AppError;
use std::collections::{BTreeMap, HashMap};

/// Champion id <-> name lookup built from the Data Dragon roster.
#[derive(Debug, Clone, Default)]
pub struct ChampionRoster {
    names: BTreeMap<ChampionId, String>,
    lookup: HashMap<String, ChampionId>,
}

impl ChampionRoster {
    /// Empty roster; only numeric ids resolve and names render as `#id`.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn from_infos<'a, I>(infos: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = &'a ChampionInfo>,
    {
        let mut roster = ChampionRoster::default();
        for info in infos {
            let id: ChampionId = info.key.parse().map_err(|_| {
                AppError::JsonError(format!(
                    "champion {} has a non-numeric key '{}'",
                    info.id, info.key
                ))
            })?;

            roster.names.insert(id, info.name.clone());
            roster.lookup.insert(normalize(&info.name), id);
            // Data Dragon ids differ from display names for a few champions
            // (MonkeyKing = Wukong)
            roster.lookup.entry(normalize(&info.id)).or_insert(id);
        }
        Ok(roster)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn name_of(&self, id: ChampionId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or("Unknown")
    }

    pub fn display_name(&self, id: ChampionId) -> String {
        if self.is_empty() {
            format!("#{}", id)
        } else {
            self.name_of(id).to_string()
        }
    }

    /// Accepts a numeric id or a champion name ("kaisa", "Kai'Sa", "kai sa").
    pub fn resolve(&self, token: &str) -> Result<ChampionId, AppError> {
        let token = token.trim();
        if let Ok(id) = token.parse::<ChampionId>() {
            return Ok(id);
        }

        if self.is_empty() {
            return Err(AppError::UnknownChampion(format!(
                "'{}' (champion names need the Data Dragon roster, pass ids when offline)",
                token
            )));
        }

        self.lookup
            .get(&normalize(token))
            .copied()
            .ok_or_else(|| AppError::UnknownChampion(token.to_string()))
    }

    pub fn resolve_all<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<ChampionId>, AppError> {
        tokens
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| !t.trim().is_empty())
            .map(|t| self.resolve(t))
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
