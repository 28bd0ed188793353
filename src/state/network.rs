use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::{Local, NaiveDate};
use lacrosse_api::ScoreProvider;
use lacrosse_api::views::{load_results, load_schedule, load_today};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Runs every request as its own task: a slow Results scan never holds up a
/// Scores refresh, and overlapping refreshes of one page are not merged.
pub struct NetworkWorker {
    provider: Arc<dyn ScoreProvider>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    spinning: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        provider: Arc<dyn ScoreProvider>,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            provider,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
            spinning: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            start_loading_animation(
                self.responses.clone(),
                self.in_flight.clone(),
                self.spinning.clone(),
            )
            .await;

            let provider = self.provider.clone();
            let responses = self.responses.clone();
            let in_flight = self.in_flight.clone();

            tokio::spawn(async move {
                let today = Local::now().date_naive();
                let response = handle_request(provider.as_ref(), request, today).await;
                debug!("network request {request:?} complete");

                if in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
                    stop_loading_animation(&responses, &in_flight).await;
                }
                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
    }
}

pub async fn handle_request(
    provider: &dyn ScoreProvider,
    request: NetworkRequest,
    today: NaiveDate,
) -> NetworkResponse {
    match request {
        NetworkRequest::LoadToday => {
            debug!("loading today's scoreboard from {}", provider.name());
            NetworkResponse::TodayLoaded { view: load_today(provider, today).await }
        }
        NetworkRequest::LoadSchedule => {
            debug!("loading schedule from {}", provider.name());
            NetworkResponse::ScheduleLoaded { groups: load_schedule(provider, today).await }
        }
        NetworkRequest::LoadResults => {
            debug!("loading results from {}", provider.name());
            NetworkResponse::ResultsLoaded { groups: load_results(provider, today).await }
        }
    }
}

/// Starts the spinner unless one is already running.
async fn start_loading_animation(
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    spinning: Arc<AtomicBool>,
) {
    if spinning.swap(true, Ordering::SeqCst) {
        return;
    }

    let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state })
        .await;

    tokio::spawn(async move {
        let mut spinner_index = 1;
        let mut interval = tokio::time::interval(Duration::from_millis(33));
        loop {
            interval.tick().await;
            if in_flight.load(Ordering::SeqCst) == 0 {
                spinning.store(false, Ordering::SeqCst);
                // A request that slipped in between the check and the store
                // saw the flag still set and left the spinning to us.
                if in_flight.load(Ordering::SeqCst) == 0 || spinning.swap(true, Ordering::SeqCst) {
                    break;
                }
            }
            loading_state.spinner_char = SPINNER_CHARS[spinner_index];
            spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
            let _ = responses
                .send(NetworkResponse::LoadingStateChanged { loading_state })
                .await;
        }
    });
}

async fn stop_loading_animation(responses: &mpsc::Sender<NetworkResponse>, in_flight: &AtomicUsize) {
    // Let the spinner task observe the zero count before the final state lands.
    tokio::time::sleep(Duration::from_millis(15)).await;
    if in_flight.load(Ordering::SeqCst) > 0 {
        return;
    }
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state: LoadingState::default() })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lacrosse_api::{Game, GameStatus};

    struct FixedProvider {
        today: Vec<Game>,
        season: Vec<Game>,
    }

    #[async_trait]
    impl ScoreProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_scoreboard(&self, _date: NaiveDate) -> Vec<Game> {
            self.today.clone()
        }

        async fn fetch_schedule(&self) -> Vec<Game> {
            self.season.clone()
        }
    }

    fn game(id: &str, status: GameStatus, date: &str) -> Game {
        Game {
            id: id.into(),
            home: Default::default(),
            away: Default::default(),
            home_score: 0,
            away_score: 0,
            status,
            period: None,
            clock: None,
            date: date.parse().unwrap(),
            time: None,
            venue: None,
            league: lacrosse_api::LEAGUE_NCAA_D1.into(),
        }
    }

    fn loading_states(rx: &mut mpsc::Receiver<NetworkResponse>) -> Vec<bool> {
        let mut states = Vec::new();
        while let Ok(response) = rx.try_recv() {
            if let NetworkResponse::LoadingStateChanged { loading_state } = response {
                states.push(loading_state.is_loading);
            }
        }
        states
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_skipped_when_a_request_arrives_during_grace_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let in_flight = Arc::new(AtomicUsize::new(0));

        let stop = tokio::spawn({
            let (tx, in_flight) = (tx.clone(), in_flight.clone());
            async move { stop_loading_animation(&tx, &in_flight).await }
        });
        in_flight.fetch_add(1, Ordering::SeqCst);
        stop.await.unwrap();

        assert!(loading_states(&mut rx).is_empty(), "idle state must not land over a new load");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_lands_when_nothing_is_in_flight() {
        let (tx, mut rx) = mpsc::channel(8);
        let in_flight = AtomicUsize::new(0);
        stop_loading_animation(&tx, &in_flight).await;
        assert_eq!(loading_states(&mut rx), vec![false]);
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_reuses_running_spinner() {
        let (tx, mut rx) = mpsc::channel(64);
        let in_flight = Arc::new(AtomicUsize::new(2));
        let spinning = Arc::new(AtomicBool::new(false));

        start_loading_animation(tx.clone(), in_flight.clone(), spinning.clone()).await;
        start_loading_animation(tx.clone(), in_flight.clone(), spinning.clone()).await;
        assert_eq!(loading_states(&mut rx), vec![true], "one spinner, one initial state");

        in_flight.store(0, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!spinning.load(Ordering::SeqCst), "spinner released the flag once idle");
    }

    #[tokio::test]
    async fn each_request_maps_to_its_page() {
        let provider = FixedProvider {
            today: vec![game("live", GameStatus::Live, "2026-02-20")],
            season: vec![
                game("next", GameStatus::Scheduled, "2026-02-22"),
                game("prev", GameStatus::Final, "2026-02-18"),
            ],
        };
        let today: NaiveDate = "2026-02-20".parse().unwrap();

        match handle_request(&provider, NetworkRequest::LoadToday, today).await {
            NetworkResponse::TodayLoaded { view } => assert!(view.has_live()),
            other => panic!("unexpected response {other:?}"),
        }
        match handle_request(&provider, NetworkRequest::LoadSchedule, today).await {
            NetworkResponse::ScheduleLoaded { groups } => assert_eq!(groups[0].games[0].id, "next"),
            other => panic!("unexpected response {other:?}"),
        }
        match handle_request(&provider, NetworkRequest::LoadResults, today).await {
            NetworkResponse::ResultsLoaded { groups } => assert_eq!(groups[0].games[0].id, "prev"),
            other => panic!("unexpected response {other:?}"),
        }
    }
}
