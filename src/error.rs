//! Centralized error types for the Freesend transport.

use thiserror::Error;

/// All errors produced by the freesend library.
///
/// Every failure is surfaced synchronously from the call that caused it:
/// configuration errors at mailer construction, everything else from `send`.
/// Nothing is retried or swallowed internally.
#[derive(Error, Debug)]
pub enum FreesendError {
    /// API key or endpoint missing after all configuration fallbacks.
    ///
    /// Raised at mailer construction time, never at send time.
    #[error("freesend configuration error: {0}")]
    Config(String),

    /// Neither the message nor the envelope carries a sender address.
    #[error("no sender address: set a from address on the message or the envelope")]
    MissingSender,

    /// Neither the message nor the envelope carries a usable recipient.
    ///
    /// Empty and whitespace-only addresses are treated as absent.
    #[error("no recipient address: set a to address on the message or the envelope")]
    MissingRecipient,

    /// The API answered with a status other than 200.
    ///
    /// The raw response body is kept verbatim for diagnosis; it is not parsed.
    #[error("freesend API error: status {status}: {body}")]
    Api { status: u16, body: String },

    /// Connection, DNS, timeout, or TLS failure below the HTTP layer.
    #[error("freesend network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Convenience alias for `Result<T, FreesendError>`.
pub type Result<T> = std::result::Result<T, FreesendError>;

impl FreesendError {
    /// Create a `Config` variant from any message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
