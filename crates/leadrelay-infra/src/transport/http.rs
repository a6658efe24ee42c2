//! reqwest-backed [`RelayTransport`] posting to `{relay_url}/chat`.

use leadrelay_core::client::transport::RelayTransport;
use leadrelay_types::chat::{ChatReply, ChatRequest};
use leadrelay_types::error::TransportError;

/// Sends chat requests to a running relay server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRelayTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayTransport {
    /// `relay_url` is the server base URL; `/chat` is appended.
    pub fn new(relay_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), relay_url)
    }

    pub fn with_client(client: reqwest::Client, relay_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat", relay_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RelayTransport for HttpRelayTransport {
    async fn send(&self, request: ChatRequest) -> Result<ChatReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), endpoint = %self.endpoint, "relay returned error status");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
