use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::client::{AnswerClient, HttpAnswerClient};
use crate::controller::ChatController;
use crate::tui::AppEvent;

pub struct App<C = HttpAnswerClient> {
    pub should_quit: bool,
    pub controller: ChatController<C>,
    /// Shown in the header so it's obvious which service is being asked.
    pub endpoint: String,

    // Panel area for mouse hit-testing (updated during render)
    pub log_area: Option<Rect>,

    // Request tasks report their outcome here
    events: UnboundedSender<AppEvent>,
}

impl<C: AnswerClient> App<C> {
    pub fn new(controller: ChatController<C>, endpoint: &str, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            should_quit: false,
            controller,
            endpoint: endpoint.to_string(),
            log_area: None,
            events,
        }
    }

    pub fn events(&self) -> UnboundedSender<AppEvent> {
        self.events.clone()
    }
}
