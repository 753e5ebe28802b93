use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AskError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

/// Something that can answer a question.
#[async_trait]
pub trait AnswerClient: Send + Sync {
    async fn ask(&self, question: &str) -> Result<Answer, AskError>;
}

#[derive(Clone)]
pub struct HttpAnswerClient {
    client: Client,
    base_url: String,
}

impl HttpAnswerClient {
    /// Client for the service at `base_url` (e.g. `http://127.0.0.1:3448`).
    ///
    /// Without a timeout a request waits until the server or the OS gives up.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AskError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AskError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url)
    }

    /// Ask the service's root route whether it is up.
    pub async fn health(&self) -> Result<String, AskError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await;
        let health: HealthStatus = read_json(&url, response).await?;
        Ok(health.status)
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn ask(&self, question: &str) -> Result<Answer, AskError> {
        let url = self.ask_url();

        let request = Question {
            question: question.to_string(),
        };

        tracing::debug!(%url, "sending question");
        let response = self.client.post(&url).json(&request).send().await;
        read_json(&url, response).await
    }
}

async fn read_json<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Result<reqwest::Response>,
) -> Result<T, AskError> {
    let transport = |source: reqwest::Error| AskError::Transport {
        url: url.to_string(),
        source,
    };

    let response = response.map_err(transport)?;
    if !response.status().is_success() {
        return Err(AskError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|source| AskError::Decode {
        url: url.to_string(),
        source,
    })
}
