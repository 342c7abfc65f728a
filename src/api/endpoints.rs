// Data Dragon is static CDN content, no API key or regional routing.

pub const VERSIONS_ENDPOINT: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

pub fn champions_endpoint(version: &str, locale: &str) -> String {
    format!(
        "https://ddragon.leagueoflegends.com/cdn/{}/data/{}/champion.json",
        version, locale
    )
}
