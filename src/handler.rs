use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::App;
use crate::client::AnswerClient;
use crate::tui::AppEvent;

const WHEEL_LINES: u16 = 3;
const PAGE_LINES: u16 = 10;

pub fn handle_event<C: AnswerClient + 'static>(app: &mut App<C>, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Answer {
            placeholder,
            outcome,
        } => app.controller.resolve(placeholder, outcome),
    }
    Ok(())
}

fn handle_key<C: AnswerClient + 'static>(app: &mut App<C>, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => send_question(app),

        // Log scrolling
        KeyCode::Up => app.controller.log_mut().scroll_up(1),
        KeyCode::Down => app.controller.log_mut().scroll_down(1),
        KeyCode::PageUp => app.controller.log_mut().scroll_up(PAGE_LINES),
        KeyCode::PageDown => app.controller.log_mut().scroll_down(PAGE_LINES),

        // Line editing
        KeyCode::Backspace => app.controller.input_mut().backspace(),
        KeyCode::Delete => app.controller.input_mut().delete(),
        KeyCode::Left => app.controller.input_mut().move_left(),
        KeyCode::Right => app.controller.input_mut().move_right(),
        KeyCode::Home => app.controller.input_mut().move_home(),
        KeyCode::End => app.controller.input_mut().move_end(),
        // Ctrl/Alt chords are shortcuts, not text
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        KeyCode::Char(c) => app.controller.input_mut().insert(c),
        _ => {}
    }
}

/// Submit the input and answer it on a background task.
fn send_question<C: AnswerClient + 'static>(app: &mut App<C>) {
    let Some(pending) = app.controller.submit() else {
        return;
    };

    let client = app.controller.client();
    let events = app.events();
    tokio::spawn(async move {
        let outcome = client.ask(&pending.question).await;
        // The receiver only goes away when the app is shutting down
        let _ = events.send(AppEvent::Answer {
            placeholder: pending.placeholder,
            outcome,
        });
    });
}

fn handle_mouse<C: AnswerClient>(app: &mut App<C>, mouse: MouseEvent) {
    let over_log = app
        .log_area
        .map_or(true, |area| contains(area, mouse.column, mouse.row));
    if !over_log {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.controller.log_mut().scroll_up(WHEEL_LINES),
        MouseEventKind::ScrollDown => app.controller.log_mut().scroll_down(WHEEL_LINES),
        _ => {}
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
