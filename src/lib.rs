pub mod app;
pub mod chat_log;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod handler;
pub mod input;
pub mod logging;
pub mod message;
pub mod sanitize;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use chat_log::ChatLog;
pub use client::{Answer, AnswerClient, HttpAnswerClient, Question};
pub use config::Config;
pub use controller::{ChatController, PendingQuestion};
pub use error::AskError;
pub use input::InputField;
pub use message::{Message, MessageId, MessageKind, Role};
