//! Cancellation sources: quit keys (raw mode swallows Ctrl+C as a signal) and SIGINT.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How often the key watcher wakes up to notice the loop has stopped.
const POLL: Duration = Duration::from_millis(100);

pub fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind == KeyEventKind::Release {
        return false;
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Read terminal events on a blocking thread and raise `stop` on a quit key.
/// Exits on its own once `stop` is raised by anyone.
pub fn spawn_key_watcher(stop: Arc<watch::Sender<bool>>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !*stop.borrow() {
            match event::poll(POLL) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(k)) if is_quit_key(&k) => {
                        debug!(code = ?k.code, "quit key");
                        stop.send_replace(true);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("reading terminal events failed: {e}");
                        return;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("polling terminal events failed: {e}");
                    return;
                }
            }
        }
    })
}

/// Raise `stop` on SIGINT.
pub fn spawn_signal_watcher(stop: Arc<watch::Sender<bool>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt signal");
            stop.send_replace(true);
        }
    })
}
