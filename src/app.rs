use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use lacrosse_api::views::{DateGroup, TodayView};
use std::time::Instant;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Scores,
    Schedule,
    Results,
    Help,
}

impl MenuItem {
    /// The load that backs this tab, if it shows provider data.
    pub fn refresh_request(&self) -> Option<NetworkRequest> {
        match self {
            MenuItem::Scores => Some(NetworkRequest::LoadToday),
            MenuItem::Schedule => Some(NetworkRequest::LoadSchedule),
            MenuItem::Results => Some(NetworkRequest::LoadResults),
            MenuItem::Help => None,
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn with_settings(settings: AppSettings) -> Self {
        Self { state: AppState::new(&settings), settings }
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_today_loaded(&mut self, view: TodayView) {
        self.state.today.store(view, Instant::now());
    }

    pub fn on_schedule_loaded(&mut self, groups: Vec<DateGroup>) {
        self.state.schedule.store(groups, Instant::now());
    }

    pub fn on_results_loaded(&mut self, groups: Vec<DateGroup>) {
        self.state.results.store(groups, Instant::now());
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Switch tabs. Returns a reload request when the new tab's data is
    /// missing or past its staleness window.
    pub fn update_tab(&mut self, next: MenuItem) -> Option<NetworkRequest> {
        if self.state.active_tab == next {
            return None;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.stale_request(next, Instant::now())
    }

    fn stale_request(&self, tab: MenuItem, now: Instant) -> Option<NetworkRequest> {
        let stale = match tab {
            MenuItem::Scores => self.state.today.is_stale(now),
            MenuItem::Schedule => self.state.schedule.is_stale(now),
            MenuItem::Results => self.state.results.is_stale(now),
            MenuItem::Help => false,
        };
        if stale { tab.refresh_request() } else { None }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn scroll_down(&mut self) {
        match self.state.active_tab {
            MenuItem::Scores => self.state.today.scroll_down(),
            MenuItem::Schedule => self.state.schedule.scroll_down(),
            MenuItem::Results => self.state.results.scroll_down(),
            MenuItem::Help => {}
        }
    }

    pub fn scroll_up(&mut self) {
        match self.state.active_tab {
            MenuItem::Scores => self.state.today.scroll_up(),
            MenuItem::Schedule => self.state.schedule.scroll_up(),
            MenuItem::Results => self.state.results.scroll_up(),
            MenuItem::Help => {}
        }
    }
}
