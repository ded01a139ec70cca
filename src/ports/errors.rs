//! Shared port error types.

use thiserror::Error;

/// Errors from the persistence store ports.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Store unreachable: {0}")]
    Unavailable(String),

    /// The store rejected the request.
    #[error("Store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The store answered with a body we could not interpret.
    #[error("Unexpected store response: {0}")]
    BadResponse(String),
}

/// Errors from message delivery ports.
#[derive(Debug, Error)]
pub enum MessengerError {
    /// The recipient cannot be reached (unknown chat, bot blocked).
    #[error("Recipient unreachable: {0}")]
    Unreachable(String),

    /// The messaging API rejected the call.
    #[error("Messaging API error {code}: {description}")]
    Api { code: i64, description: String },

    /// Transport-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// A local artifact could not be read for sending.
    #[error("Artifact unreadable: {0}")]
    Io(String),
}

impl MessengerError {
    /// True when the failure is about the recipient rather than the service.
    ///
    /// Unreachable recipients are an expected condition (admins who never
    /// started the bot, purchasers who blocked it) and log at warn.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, MessengerError::Unreachable(_))
    }
}
