//! Page-level aggregation: partition, filter, sort, and group normalized games
//! for the Scores, Schedule, and Results views.
//!
//! The `*_view` functions are pure. The `load_*` functions add the fetch step,
//! including the bounded date-range scan used when the season fetch is empty.

use crate::provider::ScoreProvider;
use crate::{Game, GameStatus};
use chrono::{Days, NaiveDate};
use log::debug;

/// Days scanned forward from today when the season schedule comes back empty.
pub const SCHEDULE_FALLBACK_DAYS: u64 = 14;
/// Days scanned backward from today when the season schedule comes back empty.
pub const RESULTS_FALLBACK_DAYS: u64 = 30;

// ---------------------------------------------------------------------------
// Today
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodaySection {
    InProgress,
    Final,
    Upcoming,
}

impl TodaySection {
    pub fn label(&self) -> &'static str {
        match self {
            TodaySection::InProgress => "In Progress",
            TodaySection::Final => "Final",
            TodaySection::Upcoming => "Today's Games",
        }
    }
}

/// Today's games bucketed by status. Postponed games land in no bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodayView {
    pub live: Vec<Game>,
    pub finals: Vec<Game>,
    pub scheduled: Vec<Game>,
}

impl TodayView {
    pub fn from_games(games: Vec<Game>) -> Self {
        let mut view = TodayView::default();
        for game in games {
            match game.status {
                GameStatus::Live => view.live.push(game),
                GameStatus::Final => view.finals.push(game),
                GameStatus::Scheduled => view.scheduled.push(game),
                GameStatus::Postponed => {}
            }
        }
        view
    }

    /// Sections to render, in order. Once anything has started, the live and
    /// final buckets replace the upcoming list entirely.
    pub fn sections(&self) -> Vec<(TodaySection, &[Game])> {
        if self.live.is_empty() && self.finals.is_empty() {
            if self.scheduled.is_empty() {
                return Vec::new();
            }
            return vec![(TodaySection::Upcoming, self.scheduled.as_slice())];
        }

        let mut sections = Vec::with_capacity(2);
        if !self.live.is_empty() {
            sections.push((TodaySection::InProgress, self.live.as_slice()));
        }
        if !self.finals.is_empty() {
            sections.push((TodaySection::Final, self.finals.as_slice()));
        }
        sections
    }

    pub fn has_live(&self) -> bool {
        !self.live.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Schedule / Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub games: Vec<Game>,
}

/// Upcoming games: scheduled, dated today or later, ascending by date then
/// by display time string.
pub fn schedule_view(games: Vec<Game>, today: NaiveDate) -> Vec<DateGroup> {
    let mut upcoming: Vec<Game> = games
        .into_iter()
        .filter(|g| g.status == GameStatus::Scheduled && g.date >= today)
        .collect();
    upcoming.sort_by(|a, b| {
        a.date.cmp(&b.date).then_with(|| {
            a.time
                .as_deref()
                .unwrap_or_default()
                .cmp(b.time.as_deref().unwrap_or_default())
        })
    });
    group_by_date(upcoming)
}

/// Past results: final, dated today or earlier, newest date first. Games on
/// the same date keep their fetch order.
pub fn results_view(games: Vec<Game>, today: NaiveDate) -> Vec<DateGroup> {
    let mut past: Vec<Game> = games
        .into_iter()
        .filter(|g| g.status == GameStatus::Final && g.date <= today)
        .collect();
    past.sort_by(|a, b| b.date.cmp(&a.date));
    group_by_date(past)
}

/// Group an already date-sorted list into consecutive runs of equal dates.
fn group_by_date(sorted: Vec<Game>) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for game in sorted {
        match groups.last_mut() {
            Some(group) if group.date == game.date => group.games.push(game),
            _ => groups.push(DateGroup { date: game.date, games: vec![game] }),
        }
    }
    groups
}

/// `n` consecutive dates starting with `today`.
pub fn next_days(today: NaiveDate, n: u64) -> Vec<NaiveDate> {
    (0..n).filter_map(|i| today.checked_add_days(Days::new(i))).collect()
}

/// `n` consecutive dates ending with `today`, today first.
pub fn last_days(today: NaiveDate, n: u64) -> Vec<NaiveDate> {
    (0..n).filter_map(|i| today.checked_sub_days(Days::new(i))).collect()
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

pub async fn load_today(provider: &dyn ScoreProvider, today: NaiveDate) -> TodayView {
    TodayView::from_games(provider.fetch_scoreboard(today).await)
}

pub async fn load_schedule(provider: &dyn ScoreProvider, today: NaiveDate) -> Vec<DateGroup> {
    let mut games = provider.fetch_schedule().await;
    if games.is_empty() {
        debug!(
            "{}: season schedule empty, scanning next {SCHEDULE_FALLBACK_DAYS} days",
            provider.name()
        );
        games = provider
            .fetch_scoreboard_range(&next_days(today, SCHEDULE_FALLBACK_DAYS))
            .await;
    }
    schedule_view(games, today)
}

pub async fn load_results(provider: &dyn ScoreProvider, today: NaiveDate) -> Vec<DateGroup> {
    let mut games = provider.fetch_schedule().await;
    if games.is_empty() {
        debug!(
            "{}: season schedule empty, scanning last {RESULTS_FALLBACK_DAYS} days",
            provider.name()
        );
        games = provider
            .fetch_scoreboard_range(&last_days(today, RESULTS_FALLBACK_DAYS))
            .await;
    }
    results_view(games, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::game;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn ids(group: &DateGroup) -> Vec<&str> {
        group.games.iter().map(|g| g.id.as_str()).collect()
    }

    /// In-memory provider that records every per-date request.
    #[derive(Default)]
    struct Recording {
        season: Vec<Game>,
        by_date: HashMap<NaiveDate, Vec<Game>>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    #[async_trait]
    impl ScoreProvider for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn fetch_scoreboard(&self, date: NaiveDate) -> Vec<Game> {
            self.requested.lock().unwrap().push(date);
            self.by_date.get(&date).cloned().unwrap_or_default()
        }

        async fn fetch_schedule(&self) -> Vec<Game> {
            self.season.clone()
        }
    }

    #[test]
    fn today_prefers_live_and_final_over_upcoming() {
        let view = TodayView::from_games(vec![
            game("s", GameStatus::Scheduled, "2026-02-20", Some("7:00 PM EST")),
            game("l", GameStatus::Live, "2026-02-20", None),
            game("f", GameStatus::Final, "2026-02-20", None),
            game("p", GameStatus::Postponed, "2026-02-20", None),
        ]);
        let sections = view.sections();
        let kinds: Vec<TodaySection> = sections.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![TodaySection::InProgress, TodaySection::Final]);
        assert_eq!(sections[0].1[0].id, "l");
        assert!(view.has_live());
    }

    #[test]
    fn today_with_only_finals_still_hides_upcoming() {
        let view = TodayView::from_games(vec![
            game("s", GameStatus::Scheduled, "2026-02-20", None),
            game("f", GameStatus::Final, "2026-02-20", None),
        ]);
        let kinds: Vec<TodaySection> = view.sections().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![TodaySection::Final]);
    }

    #[test]
    fn today_with_nothing_started_shows_upcoming_only() {
        let view = TodayView::from_games(vec![game("s", GameStatus::Scheduled, "2026-02-20", None)]);
        let kinds: Vec<TodaySection> = view.sections().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![TodaySection::Upcoming]);
        assert_eq!(TodaySection::Upcoming.label(), "Today's Games");
    }

    #[test]
    fn today_empty_when_only_postponed() {
        let view = TodayView::from_games(vec![game("p", GameStatus::Postponed, "2026-02-20", None)]);
        assert!(view.is_empty());
        assert!(TodayView::default().is_empty());
    }

    #[test]
    fn schedule_groups_ascending_with_time_order() {
        let today = date("2026-02-20");
        let groups = schedule_view(
            vec![
                game("tomorrow", GameStatus::Scheduled, "2026-02-21", Some("1:00 PM EST")),
                game("late", GameStatus::Scheduled, "2026-02-20", Some("7:00 PM EST")),
                game("early", GameStatus::Scheduled, "2026-02-20", Some("12:00 PM EST")),
                game("past", GameStatus::Scheduled, "2026-02-19", Some("1:00 PM EST")),
                game("done", GameStatus::Final, "2026-02-21", None),
            ],
            today,
        );
        let dates: Vec<NaiveDate> = groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![date("2026-02-20"), date("2026-02-21")]);
        assert_eq!(ids(&groups[0]), vec!["early", "late"]);
        assert_eq!(ids(&groups[1]), vec!["tomorrow"]);
    }

    #[test]
    fn schedule_missing_time_sorts_first() {
        let groups = schedule_view(
            vec![
                game("timed", GameStatus::Scheduled, "2026-02-20", Some("1:00 PM EST")),
                game("tbd", GameStatus::Scheduled, "2026-02-20", None),
            ],
            date("2026-02-20"),
        );
        assert_eq!(ids(&groups[0]), vec!["tbd", "timed"]);
    }

    #[test]
    fn results_newest_date_first() {
        let today = date("2026-03-01");
        let groups = results_view(
            vec![
                game("a", GameStatus::Final, "2026-02-20", None),
                game("b", GameStatus::Final, "2026-02-25", None),
                game("c", GameStatus::Final, "2026-02-20", None),
                game("live", GameStatus::Live, "2026-02-25", None),
                game("future", GameStatus::Final, "2026-03-02", None),
            ],
            today,
        );
        let dates: Vec<NaiveDate> = groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![date("2026-02-25"), date("2026-02-20")]);
        assert_eq!(ids(&groups[1]), vec!["a", "c"], "same-date games keep fetch order");
    }

    #[test]
    fn day_ranges() {
        let today = date("2026-03-01");
        let next = next_days(today, 3);
        assert_eq!(next, vec![date("2026-03-01"), date("2026-03-02"), date("2026-03-03")]);
        let last = last_days(today, 3);
        assert_eq!(last, vec![date("2026-03-01"), date("2026-02-28"), date("2026-02-27")]);
    }

    #[tokio::test]
    async fn schedule_falls_back_to_fourteen_day_scan() {
        let today = date("2026-02-20");
        let provider = Recording {
            by_date: HashMap::from([(
                date("2026-02-25"),
                vec![game("x", GameStatus::Scheduled, "2026-02-25", Some("1:00 PM EST"))],
            )]),
            ..Default::default()
        };

        let groups = load_schedule(&provider, today).await;

        let requested = provider.requested.lock().unwrap().clone();
        assert_eq!(requested.len(), 14);
        assert_eq!(requested.first(), Some(&today));
        assert_eq!(requested.last(), Some(&date("2026-03-05")));
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["x"]);
    }

    #[tokio::test]
    async fn schedule_all_empty_renders_nothing() {
        let provider = Recording::default();
        let groups = load_schedule(&provider, date("2026-02-20")).await;
        assert_eq!(provider.requested.lock().unwrap().len(), 14);
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn results_fall_back_to_thirty_day_scan() {
        let today = date("2026-02-20");
        let provider = Recording::default();
        let _ = load_results(&provider, today).await;
        let requested = provider.requested.lock().unwrap().clone();
        assert_eq!(requested.len(), 30);
        assert_eq!(requested.first(), Some(&today));
        assert_eq!(requested.last(), Some(&date("2026-01-22")));
    }

    #[tokio::test]
    async fn season_data_skips_range_scan() {
        let provider = Recording {
            season: vec![
                game("old", GameStatus::Final, "2026-02-10", None),
                game("new", GameStatus::Scheduled, "2026-02-28", None),
            ],
            ..Default::default()
        };
        let today = date("2026-02-20");

        let schedule = load_schedule(&provider, today).await;
        let results = load_results(&provider, today).await;

        assert!(provider.requested.lock().unwrap().is_empty());
        assert_eq!(ids(&schedule[0]), vec!["new"]);
        assert_eq!(ids(&results[0]), vec!["old"]);
    }

    #[tokio::test]
    async fn today_loader_queries_today_only() {
        let today = date("2026-02-20");
        let provider = Recording {
            by_date: HashMap::from([(today, vec![game("l", GameStatus::Live, "2026-02-20", None)])]),
            ..Default::default()
        };
        let view = load_today(&provider, today).await;
        assert_eq!(*provider.requested.lock().unwrap(), vec![today]);
        assert!(view.has_live());
    }
}
