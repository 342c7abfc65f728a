use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Data Dragon champion.json response
#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    #[serde(default)]
    pub version: String,
    pub data: HashMap<String, ChampionInfo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChampionInfo {
    pub id: String,
    /// Numeric champion id, as a string.
    pub key: String,
    pub name: String,
}
