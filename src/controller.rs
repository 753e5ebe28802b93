//! The chat interaction controller.
//!
//! Owns the input field and the message log, and turns one submission into
//! one request/response cycle:
//!
//! 1. [`ChatController::submit`] appends the user's message and a
//!    "Thinking..." placeholder and hands back the question to send.
//! 2. The caller sends it (inline via [`ChatController::ask`], or on a
//!    spawned task in the terminal UI).
//! 3. [`ChatController::resolve`] swaps the placeholder for the answer or for
//!    the connection error message.

use std::sync::Arc;

use crate::chat_log::ChatLog;
use crate::client::{Answer, AnswerClient};
use crate::error::AskError;
use crate::input::InputField;
use crate::message::{MessageId, Role, CONNECTION_ERROR_TEXT};

/// A submitted question waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    pub placeholder: MessageId,
    pub question: String,
}

pub struct ChatController<C> {
    input: InputField,
    log: ChatLog,
    client: Arc<C>,
    in_flight: Option<MessageId>,
}

impl<C: AnswerClient> ChatController<C> {
    pub fn new(client: C) -> Self {
        Self::with_parts(InputField::new(), ChatLog::new(), Arc::new(client))
    }

    pub fn with_parts(input: InputField, log: ChatLog, client: Arc<C>) -> Self {
        Self {
            input,
            log,
            client,
            in_flight: None,
        }
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ChatLog {
        &mut self.log
    }

    pub fn client(&self) -> Arc<C> {
        Arc::clone(&self.client)
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Append a plain message and scroll to it.
    pub fn append_message(&mut self, text: &str, role: Role) -> MessageId {
        let id = self.log.append(role, text);
        self.log.scroll_to_bottom();
        id
    }

    /// Take the current input as a question.
    ///
    /// Returns `None` without touching anything when the trimmed input is
    /// empty or another question is still waiting for its answer.
    pub fn submit(&mut self) -> Option<PendingQuestion> {
        let question = self.input.value().trim().to_string();
        if question.is_empty() {
            return None;
        }
        if self.in_flight.is_some() {
            tracing::debug!("ignoring submit while a question is in flight");
            return None;
        }

        self.append_message(&question, Role::User);
        self.input.clear();

        let placeholder = self.log.append_placeholder();
        self.log.scroll_to_bottom();
        self.in_flight = Some(placeholder);

        tracing::info!(chars = question.chars().count(), "question submitted");
        Some(PendingQuestion {
            placeholder,
            question,
        })
    }

    /// Replace the placeholder of a submitted question with its outcome.
    pub fn resolve(&mut self, placeholder: MessageId, outcome: Result<Answer, AskError>) {
        if self.in_flight != Some(placeholder) || !self.log.remove_placeholder(placeholder) {
            tracing::warn!(?placeholder, "outcome for unknown placeholder dropped");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(answer) => {
                tracing::info!(source = %answer.source, "answer received");
                self.log.append_answer(&answer.answer, &answer.source);
            }
            Err(err) => {
                tracing::warn!(error = %err, cause = ?std::error::Error::source(&err), "question failed");
                self.log.append_error(CONNECTION_ERROR_TEXT);
            }
        }
        self.log.scroll_to_bottom();
    }

    /// Submit the current input and wait for the outcome.
    ///
    /// Returns whether a request was sent.
    pub async fn ask(&mut self) -> bool {
        let Some(pending) = self.submit() else {
            return false;
        };
        let client = self.client();
        let outcome = client.ask(&pending.question).await;
        self.resolve(pending.placeholder, outcome);
        true
    }
}
