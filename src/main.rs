mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::{AppSettings, config_path};
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use lacrosse_api::build_provider;
use log::{info, warn};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let settings = AppSettings::load();

    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);
    for warning in &settings.warnings {
        warn!("settings: {warning}");
    }

    let provider = build_provider(settings.provider, settings.base_url.as_deref());
    info!("using {} provider", provider.name());

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let refresh_windows = [
        (NetworkRequest::LoadToday, settings.today_refresh),
        (NetworkRequest::LoadSchedule, settings.schedule_refresh),
        (NetworkRequest::LoadResults, settings.results_refresh),
    ];
    let app = Arc::new(Mutex::new(App::with_settings(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::task::spawn_blocking({
        let ui_events = ui_event_tx.clone();
        move || input_handler_task(ui_events)
    });

    // Network thread
    let network_worker = NetworkWorker::new(provider, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // One refresher per page, each on its own staleness window
    let refreshers: Vec<_> = refresh_windows
        .into_iter()
        .map(|(request, period)| {
            PeriodicRefresher::new(network_req_tx.clone(), request, period).spawn()
        })
        .collect();

    // Clock tick so the "updated Ns ago" label keeps counting
    let clock_tx = ui_event_tx.clone();
    let clock_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if clock_tx.send(UiEvent::ClockTick).await.is_err() {
                break;
            }
        }
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    for refresher in &refreshers {
        refresher.cancel();
    }
    input_handler.abort();
    network_task.abort();
    clock_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("laxtui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> String {
    format!(
        "laxtui - NCAA D1 men's lacrosse scores in the terminal

Usage:
  laxtui
  laxtui --help
  laxtui --version

Config file:
  {}

Environment:
  LAXTUI_PROVIDER                Score source: espn (default) or ncaa
  LAXTUI_BASE_URL                Override the provider's base URL
  LAXTUI_TODAY_REFRESH_SECS      Scores refresh period (default 30)
  LAXTUI_SCHEDULE_REFRESH_SECS   Schedule refresh period (default 600)
  LAXTUI_RESULTS_REFRESH_SECS    Results refresh period (default 300)
  LAXTUI_LOG_LEVEL               off, error, warn (default), info, debug, trace",
        config_path().display()
    )
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            for request in [
                NetworkRequest::LoadToday,
                NetworkRequest::LoadSchedule,
                NetworkRequest::LoadResults,
            ] {
                let _ = network_requests.send(request).await;
            }
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize | UiEvent::ClockTick => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => *loading = loading_state,
        NetworkResponse::TodayLoaded { view } => app.lock().await.on_today_loaded(view),
        NetworkResponse::ScheduleLoaded { groups } => app.lock().await.on_schedule_loaded(groups),
        NetworkResponse::ResultsLoaded { groups } => app.lock().await.on_results_loaded(groups),
    }
}

fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.blocking_send(ui_event).is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
