//! Chat message types
//!
//! These are shared by the interactive terminal UI and the one-shot `ask`
//! command and don't depend on any UI framework.

/// Text shown while a question is waiting for its answer.
pub const PLACEHOLDER_TEXT: &str = "Thinking...";

/// Text shown when a question could not be answered for any reason.
pub const CONNECTION_ERROR_TEXT: &str = "❌ Error connecting to server";

/// Opaque handle to a message in a [`ChatLog`](crate::chat_log::ChatLog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub(crate) u64);

/// The sender of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You:",
            Role::Bot => "Bot:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Plain,
    /// Transient "Thinking..." entry; the only kind that may be removed.
    Placeholder,
    /// An answer from the service with its citation.
    Answer { source: String },
    Error,
}

/// A chat message in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn is_placeholder(&self) -> bool {
        self.kind == MessageKind::Placeholder
    }

    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Answer { source } => Some(source),
            _ => None,
        }
    }
}
