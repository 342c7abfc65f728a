use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_STATS_PATH: &str = "champion_stats.json";
const DEFAULT_LOCALE: &str = "en_US";
const DEFAULT_ROSTER_MAX_AGE_MINS: u64 = 24 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub stats_path: PathBuf,
    pub locale: String,
    pub roster_max_age_mins: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let stats_path = env::var("CHAMP_STATS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATS_PATH));

        let locale = env::var("DDRAGON_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());

        let roster_max_age_mins = match env::var("CHAMP_ROSTER_MAX_AGE_MINS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "CHAMP_ROSTER_MAX_AGE_MINS must be a whole number of minutes, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_ROSTER_MAX_AGE_MINS,
        };

        Ok(Config {
            stats_path,
            locale,
            roster_max_age_mins,
        })
    }
}
