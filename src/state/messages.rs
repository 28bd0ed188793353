use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use lacrosse_api::views::{DateGroup, TodayView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRequest {
    LoadToday,
    LoadSchedule,
    LoadResults,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TodayLoaded { view: TodayView },
    ScheduleLoaded { groups: Vec<DateGroup> },
    ResultsLoaded { groups: Vec<DateGroup> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Once a second; keeps the "updated Ns ago" counter moving.
    ClockTick,
}
