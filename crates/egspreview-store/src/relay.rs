//! Client for the anti-bot bypass relay.
//!
//! The relay drives a real browser on our behalf. Every call is a JSON command
//! posted to a single endpoint, bound to a named browser session that is
//! created once at startup and destroyed at shutdown.

use reqwest::{Client, Url};

use crate::error::StoreError;
use crate::types::{RelayCommand, RelayResponse};

const CMD_SESSION_CREATE: &str = "sessions.create";
const CMD_SESSION_DESTROY: &str = "sessions.destroy";
const CMD_REQUEST_GET: &str = "request.get";

/// Client for the relay command endpoint, bound to one session name.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: Url,
    session: String,
}

impl RelayClient {
    /// Wraps a shared `reqwest::Client` for the relay at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if `endpoint` does not parse.
    pub fn new(client: Client, endpoint: &str, session: &str) -> Result<Self, StoreError> {
        let endpoint = Url::parse(endpoint).map_err(|e| StoreError::InvalidUrl {
            // The relay URL may carry credentials; keep them out of error text.
            url: "[relay endpoint]".to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            endpoint,
            session: session.to_owned(),
        })
    }

    #[must_use]
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Creates the relay-side browser session.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Relay`] if the relay answers with an error status.
    /// - [`StoreError::Http`] / [`StoreError::UnexpectedStatus`] on transport failure.
    pub async fn create_session(&self) -> Result<(), StoreError> {
        self.send(CMD_SESSION_CREATE, None).await?;
        tracing::info!(session = %self.session, "relay session created");
        Ok(())
    }

    /// Destroys the relay-side browser session.
    ///
    /// # Errors
    ///
    /// Same as [`RelayClient::create_session`].
    pub async fn destroy_session(&self) -> Result<(), StoreError> {
        self.send(CMD_SESSION_DESTROY, None).await?;
        tracing::info!(session = %self.session, "relay session destroyed");
        Ok(())
    }

    /// Fetches `url` through the relay and returns the raw page HTML.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Relay`] if the relay reports an error or returns no solution.
    /// - [`StoreError::Http`] / [`StoreError::UnexpectedStatus`] on transport failure.
    /// - [`StoreError::Deserialize`] if the envelope is not valid JSON.
    pub async fn request_get(&self, url: &str) -> Result<String, StoreError> {
        let envelope = self.send(CMD_REQUEST_GET, Some(url)).await?;
        let solution = envelope
            .solution
            .ok_or_else(|| StoreError::Relay(format!("no solution returned for {url}")))?;

        tracing::debug!(
            url,
            upstream_status = ?solution.status,
            final_url = ?solution.url,
            "relay fetched page"
        );
        Ok(solution.response)
    }

    /// Posts one command and decodes the envelope.
    ///
    /// The relay reports command failures in the body, usually alongside a
    /// 500, so the body is checked before the HTTP status.
    async fn send(&self, cmd: &str, url: Option<&str>) -> Result<RelayResponse, StoreError> {
        let command = RelayCommand {
            cmd,
            session: &self.session,
            url,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&command)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<RelayResponse>(&body);
        if let Ok(envelope) = &parsed {
            if envelope.status.as_deref() == Some("error") {
                let message = envelope
                    .message
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                return Err(StoreError::Relay(format!("{cmd}: {message}")));
            }
        }

        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: format!("relay command {cmd}"),
            });
        }

        parsed.map_err(|e| StoreError::Deserialize {
            context: format!("relay response to {cmd}"),
            source: e,
        })
    }
}
