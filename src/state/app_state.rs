use crate::app::MenuItem;
use crate::state::app_settings::AppSettings;
use lacrosse_api::views::{DateGroup, TodayView};
use std::time::{Duration, Instant};

/// Below this age the refresh label reads "Just updated".
const JUST_UPDATED: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Per-page data
// ---------------------------------------------------------------------------

/// One page's last load and how long it stays fresh.
#[derive(Debug)]
pub struct PageState<T> {
    pub data: Option<T>,
    pub loaded_at: Option<Instant>,
    pub scroll_offset: u16,
    pub refresh_every: Duration,
}

impl<T> PageState<T> {
    pub fn new(refresh_every: Duration) -> Self {
        Self { data: None, loaded_at: None, scroll_offset: 0, refresh_every }
    }

    pub fn store(&mut self, data: T, now: Instant) {
        self.data = Some(data);
        self.loaded_at = Some(now);
    }

    /// Never loaded, or older than the page's window.
    pub fn is_stale(&self, now: Instant) -> bool {
        self.age(now).is_none_or(|age| age >= self.refresh_every)
    }

    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.loaded_at.map(|at| now.saturating_duration_since(at))
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// "Just updated" or "Updated 12s ago", followed by the refresh cadence.
    pub fn updated_label(&self, now: Instant) -> Option<String> {
        let age = self.age(now)?;
        let head = if age < JUST_UPDATED {
            "Just updated".to_string()
        } else {
            format!("Updated {}s ago", age.as_secs())
        };
        Some(format!("{head} · auto-refreshes every {}s", self.refresh_every.as_secs()))
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub provider_name: String,
    pub today: PageState<TodayView>,
    pub schedule: PageState<Vec<DateGroup>>,
    pub results: PageState<Vec<DateGroup>>,
}

impl AppState {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            provider_name: settings.provider.to_string(),
            today: PageState::new(settings.today_refresh),
            schedule: PageState::new(settings.schedule_refresh),
            results: PageState::new(settings.results_refresh),
        }
    }
}
