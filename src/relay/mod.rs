//! Relay: forwards newsletter sign-ups as repository-dispatch events
//!
//! ```text
//! browser ──POST {email}──► relay ──POST /repos/{owner}/{repo}/dispatches──► GitHub
//!                             │        {event_type, client_payload:{email}}
//!                             └── 204 → 200 "Subscribed", else 500 "GitHub error: ..."
//! ```
//!
//! No retries. The caller decides whether to try again.

pub mod config;

pub use config::RelayConfig;

use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const USER_AGENT: &str = concat!("folio-relay/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("missing email")]
    MissingEmail,
    #[error("GitHub error: {0}")]
    Upstream(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Body the site posts. `email` is checked separately.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscribeRequest {
    pub email: Option<Value>,
}

impl SubscribeRequest {
    /// Any JSON value except `null` is accepted. Non-objects carry no email.
    pub fn parse(body: &[u8]) -> Result<Self, RelayError> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(RelayError::Malformed(serde::de::Error::custom("body is null"))),
            Value::Object(mut fields) => Ok(Self { email: fields.remove("email") }),
            _ => Ok(Self { email: None }),
        }
    }

    /// The address, when it is a non-empty string
    pub fn email(&self) -> Result<&str, RelayError> {
        match self.email.as_ref().and_then(|v| v.as_str()) {
            Some(e) if !e.is_empty() => Ok(e),
            _ => Err(RelayError::MissingEmail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    pub email: String,
}

/// Repository-dispatch event body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub event_type: String,
    pub client_payload: ClientPayload,
}

impl DispatchEvent {
    pub fn new(event_type: impl Into<String>, email: impl Into<String>) -> Self {
        Self { event_type: event_type.into(), client_payload: ClientPayload { email: email.into() } }
    }
}

/// Upstream client. Cheap to clone; share one per process.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    config: RelayConfig,
}

impl Dispatcher {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RelayConfig { &self.config }

    /// Fire one dispatch. Only 204 counts as success.
    pub async fn dispatch(&self, email: &str) -> Result<(), RelayError> {
        let event = DispatchEvent::new(&self.config.event_type, email);
        let resp = self
            .client
            .post(self.config.dispatch_url())
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(&self.config.token)
            .json(&event)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            tracing::info!(owner = %self.config.owner, repo = %self.config.repo, "dispatch accepted");
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        tracing::warn!(%status, "dispatch rejected upstream");
        Err(RelayError::Upstream(text))
    }
}
