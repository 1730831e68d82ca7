//! Mail action error types.

use thiserror::Error;

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Errors produced while composing or dispatching the outgoing message.
#[derive(Debug, Error)]
pub enum MailError {
    /// No output artifact was supplied to the action.
    ///
    /// Surfaced to callers through [`ActionResult::NoInput`](crate::ActionResult);
    /// most callers treat it as a no-op rather than a real failure.
    #[error("no output artifact was supplied")]
    NoInput,

    /// The action was executed without delivery settings.
    #[error("Missing a valid settings")]
    MissingSettings,

    /// Sender or recipient string fails address-syntax validation.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Failure originating from the SMTP layer: connection, TLS negotiation,
    /// authentication, timeout. Wraps the underlying cause's description.
    #[error("SMTP error: {0}")]
    Transport(String),

    /// Attachment metadata error (for example a path with no usable filename).
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// I/O failure reading the artifact stream or an attachment file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cancellation signal fired before or during the send.
    #[error("send cancelled")]
    Cancelled,
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
