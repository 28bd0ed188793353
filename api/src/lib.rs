pub mod client;
pub mod espn;
pub mod henrygd;
pub mod normalize;
pub mod provider;
pub mod views;

use chrono::NaiveDate;

pub use client::{ApiError, ApiResult, EspnApi, NcaaApi};
pub use provider::{ProviderKind, ScoreProvider, build_provider};

/// League label attached to every normalized game.
pub const LEAGUE_NCAA_D1: &str = "NCAA D1";

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of any provider's wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub name: String,           // "Duke"
    pub abbreviation: String,   // "DUKE"
    pub logo: Option<String>,   // absolute URL
    pub record: Option<String>, // "5-1"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: String,
    pub home: Team,
    pub away: Team,
    pub home_score: u16,
    pub away_score: u16,
    pub status: GameStatus,
    /// "Q3", "OT2". Only set while live.
    pub period: Option<String>,
    /// "7:42". Only set while live.
    pub clock: Option<String>,
    pub date: NaiveDate,
    /// Display start time, e.g. "12:00 PM EST". None when upstream says TBD.
    pub time: Option<String>,
    pub venue: Option<String>,
    pub league: String,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }

    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    pub fn home_won(&self) -> bool {
        self.is_final() && self.home_score > self.away_score
    }

    pub fn away_won(&self) -> bool {
        self.is_final() && self.away_score > self.home_score
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Live,
    Final,
    #[default]
    Scheduled,
    Postponed,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Live => "Live",
            GameStatus::Final => "Final",
            GameStatus::Scheduled => "Scheduled",
            GameStatus::Postponed => "Postponed",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::game;
    use super::*;

    #[test]
    fn winner_only_counts_for_final_games() {
        let mut g = game("1", GameStatus::Live, "2026-02-20", None);
        g.home_score = 9;
        g.away_score = 4;
        assert!(!g.home_won(), "live games have no winner yet");

        g.status = GameStatus::Final;
        assert!(g.home_won());
        assert!(!g.away_won());
    }

    #[test]
    fn tied_final_has_no_winner() {
        let mut g = game("1", GameStatus::Final, "2026-02-20", None);
        g.home_score = 7;
        g.away_score = 7;
        assert!(!g.home_won());
        assert!(!g.away_won());
    }
}
