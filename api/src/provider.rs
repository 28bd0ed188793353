/// The capability every upstream adapter offers, plus startup-time selection.
use crate::client::{ApiResult, ESPN_SITE_V2, EspnApi, NCAA_HENRYGD, NcaaApi};
use crate::Game;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future::join_all;
use log::warn;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A source of normalized games.
///
/// Every method is fail-soft: network errors, non-2xx responses, and
/// malformed bodies are logged and come back as an empty list.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    /// Short label for logs and the status bar.
    fn name(&self) -> &'static str;

    /// All games on one calendar day.
    async fn fetch_scoreboard(&self, date: NaiveDate) -> Vec<Game>;

    /// The full season in a single request.
    async fn fetch_schedule(&self) -> Vec<Game>;

    /// One scoreboard request per date, all in flight at once. Results are
    /// concatenated in the order of `dates`; a failed date adds nothing.
    async fn fetch_scoreboard_range(&self, dates: &[NaiveDate]) -> Vec<Game> {
        let per_date = join_all(dates.iter().map(|date| self.fetch_scoreboard(*date))).await;
        per_date.into_iter().flatten().collect()
    }
}

fn fail_soft(provider: &str, result: ApiResult<Vec<Game>>) -> Vec<Game> {
    result.unwrap_or_else(|e| {
        warn!("{provider}: {e}");
        Vec::new()
    })
}

#[async_trait]
impl ScoreProvider for EspnApi {
    fn name(&self) -> &'static str {
        "ESPN"
    }

    async fn fetch_scoreboard(&self, date: NaiveDate) -> Vec<Game> {
        fail_soft(self.name(), self.scoreboard(date).await)
    }

    async fn fetch_schedule(&self) -> Vec<Game> {
        fail_soft(self.name(), self.season().await)
    }
}

#[async_trait]
impl ScoreProvider for NcaaApi {
    fn name(&self) -> &'static str {
        "NCAA"
    }

    async fn fetch_scoreboard(&self, date: NaiveDate) -> Vec<Game> {
        fail_soft(self.name(), self.scoreboard(date).await)
    }

    async fn fetch_schedule(&self) -> Vec<Game> {
        fail_soft(self.name(), self.season().await)
    }
}

// ---------------------------------------------------------------------------
// Provider selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Espn,
    Ncaa,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Espn => ESPN_SITE_V2,
            ProviderKind::Ncaa => NCAA_HENRYGD,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Espn => write!(f, "espn"),
            ProviderKind::Ncaa => write!(f, "ncaa"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "espn" => Ok(ProviderKind::Espn),
            "ncaa" | "henrygd" => Ok(ProviderKind::Ncaa),
            other => Err(format!("unknown provider {other:?} (expected \"espn\" or \"ncaa\")")),
        }
    }
}

/// Build the adapter chosen at startup. `base_url` overrides the provider default.
pub fn build_provider(kind: ProviderKind, base_url: Option<&str>) -> Arc<dyn ScoreProvider> {
    let base_url = base_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| kind.default_base_url());
    match kind {
        ProviderKind::Espn => Arc::new(EspnApi::with_base_url(base_url)),
        ProviderKind::Ncaa => Arc::new(NcaaApi::with_base_url(base_url)),
    }
}
