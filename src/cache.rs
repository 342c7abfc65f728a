use crate::api::models::ChampionInfo;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Champion roster for one Data Dragon version, persisted between runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct RosterCache {
    pub version: String,
    pub locale: String,
    pub fetched_at: DateTime<Utc>,
    pub champions: Vec<ChampionInfo>,
}

impl RosterCache {
    pub fn new(version: &str, locale: &str, mut champions: Vec<ChampionInfo>) -> Self {
        champions.sort_by(|a, b| a.name.cmp(&b.name));
        RosterCache {
            version: version.to_string(),
            locale: locale.to_string(),
            fetched_at: Utc::now(),
            champions,
        }
    }

    pub fn cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".champ_recommender")
    }

    pub fn file_name(version: &str, locale: &str) -> String {
        format!("champions_{}_{}.json", version, locale)
    }

    /// `Ok(None)` when nothing is cached yet for this version.
    pub fn load(dir: &Path, version: &str, locale: &str) -> Result<Option<Self>, AppError> {
        let path = dir.join(Self::file_name(version, locale));

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| AppError::JsonError(format!("Failed to parse roster cache: {}", e))),
            Err(_) => Ok(None),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(dir)?;

        let path = dir.join(Self::file_name(&self.version, &self.locale));
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize roster cache: {}", e))
        })?;

        fs::write(&path, json)?;
        Ok(())
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        age.num_minutes() > max_age_mins as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn champions() -> Vec<ChampionInfo> {
        vec![
            ChampionInfo {
                id: "Lulu".to_string(),
                key: "117".to_string(),
                name: "Lulu".to_string(),
            },
            ChampionInfo {
                id: "Ashe".to_string(),
                key: "22".to_string(),
                name: "Ashe".to_string(),
            },
        ]
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RosterCache::new("14.18.1", "en_US", champions());
        cache.save(dir.path()).unwrap();

        let loaded = RosterCache::load(dir.path(), "14.18.1", "en_US")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.version, "14.18.1");
        assert_eq!(loaded.champions.len(), 2);
        // Sorted by name on creation
        assert_eq!(loaded.champions[0].name, "Ashe");
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RosterCache::load(dir.path(), "14.18.1", "en_US")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_corrupt_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RosterCache::file_name("1.2.3", "en_US")), "{").unwrap();
        assert!(RosterCache::load(dir.path(), "1.2.3", "en_US").is_err());
    }

    #[test]
    fn test_is_stale() {
        let mut cache = RosterCache::new("14.18.1", "en_US", champions());
        assert!(!cache.is_stale(60));

        cache.fetched_at = Utc::now() - Duration::hours(2);
        assert!(cache.is_stale(60));
        assert!(!cache.is_stale(180));
    }
}
