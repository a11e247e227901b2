//! The Freesend HTTP transport.
//!
//! One authenticated POST per send, no retries, no internal state. Retry and
//! backoff policy belong to the caller.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::error::{FreesendError, Result};
use crate::model::mail::{Envelope, Message};
use crate::payload;

/// Fixed literal name reported for logging and registry display.
pub const TRANSPORT_NAME: &str = "freesend";

/// Default connect timeout when the caller doesn't override the client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default total request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Async mail delivery trait.
///
/// Implement this to provide alternative delivery backends; the crate ships
/// [`FreesendTransport`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message. Exactly one delivery attempt per call.
    async fn send(&self, message: &Message, envelope: &Envelope) -> Result<SentReceipt>;

    /// Human-readable transport name.
    fn name(&self) -> &'static str;
}

/// Result of a successful send.
///
/// The API's 200 body is not parsed; only the status matters.
#[derive(Debug, Clone)]
pub struct SentReceipt {
    /// The recipient address the payload was sent to.
    pub to: String,
    /// HTTP status of the accepted request (always 200).
    pub status: u16,
}

/// Transport that delivers mail through the Freesend HTTP API.
///
/// Cheap to clone; the underlying HTTP client is shared, so connection reuse
/// carries across clones. Concurrent sends from separate tasks are
/// independent — there is no shared mutable state.
#[derive(Clone)]
pub struct FreesendTransport {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl FreesendTransport {
    /// Create a transport from resolved credentials.
    ///
    /// Uses a client with a 10s connect timeout and 30s total timeout.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, credentials))
    }

    /// Create a transport reusing an existing HTTP client.
    ///
    /// Lets several transports share one connection pool, and lets callers
    /// set their own timeouts.
    pub fn with_client(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            api_key: credentials.api_key,
            endpoint: credentials.endpoint,
        }
    }

    /// The endpoint this transport posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for FreesendTransport {
    /// Build the payload and POST it to the configured endpoint.
    ///
    /// A payload build failure (missing sender/recipient) surfaces before any
    /// network call. Status 200 is the only success; any other status yields
    /// [`FreesendError::Api`] with the raw response body text.
    async fn send(&self, message: &Message, envelope: &Envelope) -> Result<SentReceipt> {
        let payload = payload::build_payload(message, envelope)?;

        tracing::debug!(
            transport = TRANSPORT_NAME,
            endpoint = %self.endpoint,
            to = %payload.to,
            "sending message"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            // A failed body read must not mask the API failure itself.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                transport = TRANSPORT_NAME,
                status,
                body = %body,
                "send rejected by API"
            );
            return Err(FreesendError::Api { status, body });
        }

        tracing::info!(transport = TRANSPORT_NAME, to = %payload.to, "message sent");
        Ok(SentReceipt {
            to: payload.to,
            status,
        })
    }

    fn name(&self) -> &'static str {
        TRANSPORT_NAME
    }
}

impl fmt::Display for FreesendTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TRANSPORT_NAME)
    }
}

impl fmt::Debug for FreesendTransport {
    // Never print the API key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreesendTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
