//! The ordered message log and its scroll position.

use crate::message::{Message, MessageId, MessageKind, Role, PLACEHOLDER_TEXT};
use crate::sanitize::escape_text;

/// Append-only list of chat messages in display order.
///
/// Placeholders are the one exception to append-only: they are removed by
/// handle once their answer (or error) arrives.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
    next_id: u64,
    scroll: u16,
    follow_tail: bool,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_placeholder()).count()
    }

    fn push(&mut self, role: Role, text: String, kind: MessageKind) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message { id, role, text, kind });
        id
    }

    /// Append a plain message. The text is escaped first.
    pub fn append(&mut self, role: Role, text: &str) -> MessageId {
        self.push(role, escape_text(text), MessageKind::Plain)
    }

    pub fn append_placeholder(&mut self) -> MessageId {
        self.push(Role::Bot, PLACEHOLDER_TEXT.to_string(), MessageKind::Placeholder)
    }

    /// Append a bot answer with its citation. Both parts are escaped.
    pub fn append_answer(&mut self, answer: &str, source: &str) -> MessageId {
        let source = escape_text(source);
        self.push(Role::Bot, escape_text(answer), MessageKind::Answer { source })
    }

    pub fn append_error(&mut self, text: &str) -> MessageId {
        self.push(Role::Bot, text.to_string(), MessageKind::Error)
    }

    /// Remove a placeholder by handle.
    ///
    /// Returns `false` (and leaves the log untouched) when the handle is unknown
    /// or refers to a message that is not a placeholder.
    pub fn remove_placeholder(&mut self, id: MessageId) -> bool {
        match self.messages.iter().position(|m| m.id == id) {
            Some(idx) if self.messages[idx].is_placeholder() => {
                self.messages.remove(idx);
                true
            }
            _ => false,
        }
    }

    // Scrolling

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn is_following(&self) -> bool {
        self.follow_tail
    }

    /// Keep the view on the most recent entry from the next render on.
    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_tail = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    /// Reconcile the scroll offset with the rendered size of the log.
    ///
    /// Called by the renderer once it knows how many wrapped lines the log
    /// takes and how tall the viewport is. Scrolling past the end snaps back
    /// and resumes following the tail.
    pub fn fit_scroll(&mut self, total_lines: u16, viewport_height: u16) {
        let max_scroll = total_lines.saturating_sub(viewport_height);
        if self.follow_tail || self.scroll >= max_scroll {
            self.scroll = max_scroll;
            self.follow_tail = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::CONNECTION_ERROR_TEXT;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = ChatLog::new();
        let a = log.append(Role::User, "first");
        let b = log.append_placeholder();
        let c = log.append(Role::Bot, "third");

        let ids: Vec<MessageId> = log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_append_escapes_text() {
        let mut log = ChatLog::new();
        let id = log.append(Role::User, "\x1b[2Jhi");
        assert_eq!(log.get(id).unwrap().text, "hi");
    }

    #[test]
    fn test_append_answer_escapes_answer_and_source() {
        let mut log = ChatLog::new();
        let id = log.append_answer("4\x1b[0m", "calc\x07.txt");
        let msg = log.get(id).unwrap();
        assert_eq!(msg.text, "4");
        assert_eq!(msg.source(), Some("calc.txt"));
        assert_eq!(msg.role, Role::Bot);
    }

    #[test]
    fn test_placeholder_counts() {
        let mut log = ChatLog::new();
        log.append(Role::User, "q");
        let p = log.append_placeholder();
        assert_eq!(log.pending_count(), 1);
        assert_eq!(log.get(p).unwrap().text, PLACEHOLDER_TEXT);

        assert!(log.remove_placeholder(p));
        assert_eq!(log.pending_count(), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_placeholder_only_once() {
        let mut log = ChatLog::new();
        let p = log.append_placeholder();
        assert!(log.remove_placeholder(p));
        assert!(!log.remove_placeholder(p));
    }

    #[test]
    fn test_remove_placeholder_refuses_other_messages() {
        let mut log = ChatLog::new();
        let user = log.append(Role::User, "keep me");
        let err = log.append_error(CONNECTION_ERROR_TEXT);
        assert!(!log.remove_placeholder(user));
        assert!(!log.remove_placeholder(err));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut log = ChatLog::new();
        let p = log.append_placeholder();
        log.remove_placeholder(p);
        let next = log.append(Role::Bot, "answer");
        assert_ne!(p, next);
    }

    #[test]
    fn test_follow_tail_pins_to_last_line() {
        let mut log = ChatLog::new();
        log.scroll_to_bottom();
        log.fit_scroll(50, 20);
        assert_eq!(log.scroll(), 30);

        // Content grows while following
        log.fit_scroll(60, 20);
        assert_eq!(log.scroll(), 40);
    }

    #[test]
    fn test_manual_scroll_up_stops_following() {
        let mut log = ChatLog::new();
        log.scroll_to_bottom();
        log.fit_scroll(50, 20);
        log.scroll_up(5);
        assert!(!log.is_following());

        log.fit_scroll(60, 20);
        assert_eq!(log.scroll(), 25);
    }

    #[test]
    fn test_scrolling_back_to_end_resumes_following() {
        let mut log = ChatLog::new();
        log.fit_scroll(50, 20);
        log.scroll_up(10);
        log.scroll_down(100);
        log.fit_scroll(50, 20);
        assert_eq!(log.scroll(), 30);
        assert!(log.is_following());
    }

    #[test]
    fn test_short_log_never_scrolls() {
        let mut log = ChatLog::new();
        log.scroll_to_bottom();
        log.fit_scroll(5, 20);
        assert_eq!(log.scroll(), 0);
    }
}
