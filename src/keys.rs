use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    let request = match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Scores),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Results),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => {
            guard.exit_help();
            None
        }

        // Manual reload of whatever is on screen
        (tab, Char('r'), _) => tab.refresh_request(),

        // Scrolling
        (_, Char('j') | KeyCode::Down, _) => {
            guard.scroll_down();
            None
        }
        (_, Char('k') | KeyCode::Up, _) => {
            guard.scroll_up();
            None
        }

        // Global
        (_, Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    if let Some(request) = request {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}
