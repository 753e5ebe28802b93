use std::io::{self, Stderr};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::client::Answer;
use crate::error::AskError;
use crate::message::MessageId;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// A question sent from the chat finished, one way or the other.
    Answer {
        placeholder: MessageId,
        outcome: Result<Answer, AskError>,
    },
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn event reader task
        let tx_events = tx.clone();
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            while let Some(evt) = reader.next().await {
                let app_event = match evt {
                    // Only handle key press events, not release
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                    Ok(Event::Mouse(mouse)) => Some(AppEvent::Mouse(mouse)),
                    Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::error!(error = %err, "terminal event stream failed");
                        break;
                    }
                };

                if let Some(event) = app_event {
                    if tx_events.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for request tasks to report back on.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Put the terminal into raw mode on the alternate screen with mouse capture.
///
/// If any step after raw mode fails, the terminal is restored before the
/// error is returned.
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    undo_on_error(enter_chat_screen(), restore)
}

fn enter_chat_screen() -> Result<Tui> {
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stderr()))?)
}

/// Run `undo` when `result` is an error, keeping the original error.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce() -> Result<()>) -> Result<T> {
    if let Err(err) = &result {
        if let Err(undo_err) = undo() {
            tracing::error!(error = %undo_err, "failed to restore terminal after {err}");
        }
    }
    result
}

/// Leave the chat screen. Every step is attempted; the first failure is returned.
pub fn restore() -> Result<()> {
    let screen = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen?;
    raw?;
    Ok(())
}

/// Restore the terminal before the panic message is printed, and log the panic.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        tracing::error!(panic = %info, "chat screen panicked");
        default_hook(info);
    }));
}
