/// Wire types for the henrygd NCAA scoreboard API.
/// Endpoint: https://ncaa-api.henrygd.me/scoreboard/lacrosse-men/d1/{yyyy}/{mm}/{dd}/all-conf
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct HenrygdScoreboard {
    #[serde(default)]
    pub games: Vec<HenrygdGameWrapper>,
}

/// Each entry nests the game one level down: `{"game": {...}}`.
#[derive(Deserialize, Default, Debug)]
pub struct HenrygdGameWrapper {
    pub game: HenrygdGame,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HenrygdGame {
    #[serde(rename = "gameID", default)]
    pub game_id: String,
    #[serde(default)]
    pub home: HenrygdTeam,
    #[serde(default)]
    pub away: HenrygdTeam,
    /// "pre" | "live" | "final"
    #[serde(default)]
    pub game_state: String,
    /// "02-20-2026" or "02/20/2026"
    #[serde(default)]
    pub start_date: String,
    /// "12:00PM ET", or "TBD"
    #[serde(default)]
    pub start_time: String,
    /// "1st".."4th", "OT", "2OT", "HALF", "FINAL"
    #[serde(default)]
    pub current_period: String,
    #[serde(default)]
    pub contest_clock: String,
    pub network: Option<String>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct HenrygdTeam {
    /// Empty string before the game starts.
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub names: HenrygdNames,
    pub winner: Option<bool>,
    /// Win-loss record, wrapped in parentheses: "(5-1)".
    pub description: Option<String>,
    pub rank: Option<String>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct HenrygdNames {
    #[serde(default)]
    pub char6: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub seo: String,
    #[serde(default)]
    pub full: String,
}
