pub mod client;
pub mod endpoints;
pub mod game_version;
pub mod models;
