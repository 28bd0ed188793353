use crate::espn::{EspnCompetitor, EspnEvent, EspnStatusType, ScoreboardResponse};
use crate::henrygd::{HenrygdGame, HenrygdScoreboard, HenrygdTeam};
use crate::normalize::{
    compose_venue, is_tbd, normalize_date, parse_score, parse_timestamp, period_label,
};
use crate::{Game, GameStatus, LEAGUE_NCAA_D1, Team};
use chrono::{Datelike, NaiveDate};
use chrono_tz::America::New_York;
use log::debug;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_SITE_V2: &str =
    "https://site.api.espn.com/apis/site/v2/sports/lacrosse/mens-college-lacrosse";
pub const NCAA_HENRYGD: &str = "https://ncaa-api.henrygd.me";
const NCAA_SPORT_PATH: &str = "lacrosse-men/d1";
const NCAA_LOGO_BASE: &str = "https://www.ncaa.com/sites/default/files/images/logos/schools/bgl";
const ESPN_DAY_LIMIT: u32 = 100;
const ESPN_SEASON_LIMIT: u32 = 300;

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
        }
    }
}

/// Shared HTTP plumbing for both adapters: one pooled client, fixed timeout.
#[derive(Debug, Clone)]
struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("laxtui/0.1 (terminal lacrosse scoreboard)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpClient {
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_owned()
}

// ---------------------------------------------------------------------------
// ESPN adapter
// ---------------------------------------------------------------------------

/// Men's college lacrosse scoreboard backed by ESPN's public site API.
#[derive(Debug, Clone)]
pub struct EspnApi {
    http: HttpClient,
    base_url: String,
}

impl Default for EspnApi {
    fn default() -> Self {
        Self::with_base_url(ESPN_SITE_V2)
    }
}

impl EspnApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self { http: HttpClient::default(), base_url: trim_base(base_url) }
    }

    /// All games on one calendar day. ESPN takes the date as `YYYYMMDD`.
    pub async fn scoreboard(&self, date: NaiveDate) -> ApiResult<Vec<Game>> {
        let raw: ScoreboardResponse = self.http.get(&self.scoreboard_url(date)).await?;
        Ok(map_espn_scoreboard(raw))
    }

    /// The whole season in one request; ESPN's undated scoreboard with a high limit.
    pub async fn season(&self) -> ApiResult<Vec<Game>> {
        let url = format!("{}/scoreboard?limit={ESPN_SEASON_LIMIT}", self.base_url);
        let raw: ScoreboardResponse = self.http.get(&url).await?;
        Ok(map_espn_scoreboard(raw))
    }

    fn scoreboard_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/scoreboard?dates={}&limit={ESPN_DAY_LIMIT}",
            self.base_url,
            date.format("%Y%m%d")
        )
    }
}

// ---------------------------------------------------------------------------
// NCAA (henrygd) adapter
// ---------------------------------------------------------------------------

/// Men's D1 lacrosse scoreboard backed by the henrygd mirror of ncaa.com.
#[derive(Debug, Clone)]
pub struct NcaaApi {
    http: HttpClient,
    base_url: String,
}

impl Default for NcaaApi {
    fn default() -> Self {
        Self::with_base_url(NCAA_HENRYGD)
    }
}

impl NcaaApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self { http: HttpClient::default(), base_url: trim_base(base_url) }
    }

    /// All games on one calendar day, addressed as `/YYYY/MM/DD/all-conf`.
    pub async fn scoreboard(&self, date: NaiveDate) -> ApiResult<Vec<Game>> {
        let raw: HenrygdScoreboard = self.http.get(&self.scoreboard_url(date)).await?;
        Ok(map_ncaa_scoreboard(raw))
    }

    /// The provider's undated scoreboard.
    pub async fn season(&self) -> ApiResult<Vec<Game>> {
        let url = format!("{}/scoreboard/{NCAA_SPORT_PATH}", self.base_url);
        let raw: HenrygdScoreboard = self.http.get(&url).await?;
        Ok(map_ncaa_scoreboard(raw))
    }

    fn scoreboard_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/scoreboard/{NCAA_SPORT_PATH}/{:04}/{:02}/{:02}/all-conf",
            self.base_url,
            date.year(),
            date.month(),
            date.day()
        )
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_espn_scoreboard(raw: ScoreboardResponse) -> Vec<Game> {
    raw.events
        .unwrap_or_default()
        .iter()
        .filter_map(|event| {
            let game = map_espn_event(event);
            if game.is_none() {
                debug!("skipping ESPN event {:?}: missing date or competitors", event.id);
            }
            game
        })
        .collect()
}

/// Map one ESPN event onto a `Game`.
///
/// Unlike the NCAA path, which runs `startDate` through `normalize_date`, the
/// ESPN `date` is taken from the start timestamp converted to US Eastern, not
/// from the UTC date prefix. `2026-02-21T00:30Z` is a 7:30 PM game on the
/// 20th. `normalize_date` is only the fallback for timestamps that don't parse.
fn map_espn_event(event: &EspnEvent) -> Option<Game> {
    let comp = event.competitions.as_deref()?.first()?;
    let competitors = comp.competitors.as_deref().unwrap_or_default();
    let home = find_side(competitors, "home")?;
    let away = find_side(competitors, "away")?;

    let status = comp
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref())
        .map(map_espn_status)
        .unwrap_or_default();
    let live = status == GameStatus::Live;

    // Dates and display times are Eastern; a late-evening game is still
    // "that day" even though its UTC timestamp has rolled over.
    let raw_date = comp.date.as_deref().or(event.date.as_deref())?;
    let (date, time) = match parse_timestamp(raw_date) {
        Some(utc) => {
            let eastern = utc.with_timezone(&New_York);
            (eastern.date_naive(), Some(eastern.format("%-I:%M %p %Z").to_string()))
        }
        None => (normalize_date(raw_date)?, None),
    };
    let time = time.filter(|_| comp.time_valid != Some(false));

    let period = comp
        .status
        .as_ref()
        .and_then(|s| s.period)
        .filter(|p| live && *p > 0)
        .map(period_label);
    let clock = comp
        .status
        .as_ref()
        .and_then(|s| s.display_clock.clone())
        .filter(|_| live);

    let venue = comp.venue.as_ref().and_then(|v| {
        let address = v.address.as_ref();
        compose_venue(
            v.full_name.as_deref(),
            address.and_then(|a| a.city.as_deref()),
            address.and_then(|a| a.state.as_deref()),
        )
    });

    Some(Game {
        id: comp.id.clone().or_else(|| event.id.clone()).unwrap_or_default(),
        home: map_espn_team(home),
        away: map_espn_team(away),
        home_score: parse_score(home.score.as_deref()),
        away_score: parse_score(away.score.as_deref()),
        status,
        period,
        clock,
        date,
        time,
        venue,
        league: LEAGUE_NCAA_D1.to_owned(),
    })
}

fn find_side<'a>(competitors: &'a [EspnCompetitor], side: &str) -> Option<&'a EspnCompetitor> {
    competitors.iter().find(|c| c.home_away.as_deref() == Some(side))
}

fn map_espn_status(t: &EspnStatusType) -> GameStatus {
    if t.completed == Some(true) {
        return GameStatus::Final;
    }
    if matches!(t.state.as_deref(), Some("in" | "live")) {
        return GameStatus::Live;
    }
    match t.name.as_deref() {
        Some("STATUS_POSTPONED" | "STATUS_CANCELED" | "STATUS_CANCELLED") => GameStatus::Postponed,
        _ => GameStatus::Scheduled,
    }
}

fn map_espn_team(c: &EspnCompetitor) -> Team {
    let record = c
        .records
        .iter()
        .flatten()
        .find(|r| r.record_type.as_deref() == Some("total"))
        .and_then(|r| r.summary.clone());

    let Some(t) = c.team.as_ref() else {
        return Team { id: c.id.clone().unwrap_or_default(), record, ..Default::default() };
    };

    Team {
        id: t.id.clone().or_else(|| c.id.clone()).unwrap_or_default(),
        name: t
            .short_display_name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| t.display_name.clone())
            .unwrap_or_default(),
        abbreviation: t.abbreviation.clone().unwrap_or_default(),
        logo: t.logo.clone(),
        record,
    }
}

// ---------------------------------------------------------------------------
// Mapping: NCAA henrygd wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_ncaa_scoreboard(raw: HenrygdScoreboard) -> Vec<Game> {
    raw.games
        .iter()
        .filter_map(|wrapper| {
            let game = map_ncaa_game(&wrapper.game);
            if game.is_none() {
                debug!(
                    "skipping NCAA game {}: unparseable start date {:?}",
                    wrapper.game.game_id, wrapper.game.start_date
                );
            }
            game
        })
        .collect()
}

fn map_ncaa_game(g: &HenrygdGame) -> Option<Game> {
    let date = normalize_date(&g.start_date)?;
    let status = map_ncaa_status(&g.game_state);
    let live = status == GameStatus::Live;

    let period = if live { ncaa_period_label(&g.current_period) } else { None };
    let clock = Some(g.contest_clock.trim())
        .filter(|c| live && !c.is_empty())
        .map(str::to_owned);
    let time = Some(g.start_time.trim())
        .filter(|t| !is_tbd(t))
        .map(str::to_owned);

    Some(Game {
        id: g.game_id.clone(),
        home: map_ncaa_team(&g.home),
        away: map_ncaa_team(&g.away),
        home_score: parse_score(Some(&g.home.score)),
        away_score: parse_score(Some(&g.away.score)),
        status,
        period,
        clock,
        date,
        time,
        venue: None, // the scoreboard endpoint carries no venue
        league: LEAGUE_NCAA_D1.to_owned(),
    })
}

fn map_ncaa_status(state: &str) -> GameStatus {
    match state.trim().to_ascii_lowercase().as_str() {
        "final" => GameStatus::Final,
        "live" | "in" => GameStatus::Live,
        _ => GameStatus::Scheduled,
    }
}

fn map_ncaa_team(t: &HenrygdTeam) -> Team {
    let names = &t.names;
    let name = if names.short.is_empty() { names.full.clone() } else { names.short.clone() };
    let record = t
        .description
        .as_deref()
        .map(|d| d.trim().trim_start_matches('(').trim_end_matches(')').trim().to_owned())
        .filter(|r| !r.is_empty());

    Team {
        id: names.seo.clone(),
        name,
        abbreviation: names.char6.clone(),
        logo: (!names.seo.is_empty()).then(|| format!("{NCAA_LOGO_BASE}/{}.svg", names.seo)),
        record,
    }
}

/// ncaa.com reports periods as ordinals ("1st", "3rd") or overtime strings
/// ("OT", "2OT"). Map them onto the same labels ESPN periods get.
fn ncaa_period_label(raw: &str) -> Option<String> {
    let p = raw.trim().to_ascii_uppercase();
    if p.is_empty() {
        return None;
    }

    let overtime = p.strip_suffix("OT").or_else(|| p.strip_prefix("OT"));
    if let Some(n) = overtime {
        return Some(match n.parse::<u8>() {
            Ok(n) if n > 1 => format!("OT{n}"),
            _ => "OT".to_string(),
        });
    }

    let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u8>() {
        Ok(n) if n > 0 => Some(period_label(n)),
        _ => Some(raw.trim().to_owned()), // "HALF", "END 2ND", ...
    }
}
