use reqwest::StatusCode;
use thiserror::Error;

/// Why a question could not be answered.
///
/// The chat view collapses all of these into one message; the detail is only
/// written to the log file.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("response from {url} is not a valid answer")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
