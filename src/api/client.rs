use crate::error::AppError;
use std::thread;
use std::time::Duration;

use super::endpoints::{champions_endpoint, VERSIONS_ENDPOINT};
use super::game_version::GameVersion;
use super::models::DataDragonChampions;

const USER_AGENT: &str = concat!("champ_recommender/", env!("CARGO_PKG_VERSION"));
const MAX_RETRIES: u32 = 3;

pub struct DataDragonClient {
    locale: String,
}

impl DataDragonClient {
    pub fn new(locale: &str) -> Self {
        DataDragonClient {
            locale: locale.to_string(),
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            let response = ureq::get(url).set("User-Agent", USER_AGENT).call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::HttpError(format!(
                            "rate limited after {} retries: {}",
                            MAX_RETRIES, url
                        )));
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    tracing::warn!(url, wait_ms, "rate limited, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    pub fn get_versions(&self) -> Result<Vec<String>, AppError> {
        let body = self.execute_request(VERSIONS_ENDPOINT)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_latest_version(&self) -> Result<GameVersion, AppError> {
        let versions = self.get_versions()?;
        GameVersion::latest(&versions)
    }

    pub fn get_champion_data(&self, version: &str) -> Result<DataDragonChampions, AppError> {
        let url = champions_endpoint(version, &self.locale);
        tracing::debug!(%url, "fetching champion roster");

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }
}
