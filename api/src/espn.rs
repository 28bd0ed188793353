/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // ISO 8601, seconds usually omitted
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub date: Option<String>,
    /// False when the start time has not been announced yet.
    #[serde(rename = "timeValid")]
    pub time_valid: Option<bool>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub status: Option<EspnStatus>,
    pub venue: Option<EspnVenue>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub records: Option<Vec<EspnRecord>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>, // "total", "home", "road", ...
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnStatus {
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    pub period: Option<u8>,
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnStatusType {
    pub name: Option<String>,  // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub address: Option<EspnAddress>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnAddress {
    pub city: Option<String>,
    pub state: Option<String>,
}
