//! Uniform action outcome.

use crate::MailError;

/// Outcome of a [`SendMail`](crate::SendMail) execution.
///
/// Exactly one state holds: success, the distinguished missing-input case, or
/// failure with an ordered, non-empty list of errors. No partial-success state
/// exists: either the send attempt completed or nothing was sent.
#[derive(Debug)]
pub enum ActionResult {
    /// The message was handed to the transport and the send completed.
    Success,
    /// No artifact was supplied. Callers may treat this as a no-op rather
    /// than a failure.
    NoInput,
    /// The send did not happen (or the transport reported an error). Carries
    /// the errors in the order they were detected.
    Failure(Vec<MailError>),
}

impl ActionResult {
    /// Wrap a single error as a failure outcome.
    pub fn from_error(error: MailError) -> Self {
        match error {
            MailError::NoInput => Self::NoInput,
            other => Self::Failure(vec![other]),
        }
    }

    /// Whether the send completed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether the action was invoked without an artifact.
    pub fn is_no_input(&self) -> bool {
        matches!(self, Self::NoInput)
    }

    /// Errors carried by a failure outcome, empty otherwise.
    pub fn errors(&self) -> &[MailError] {
        match self {
            Self::Failure(errors) => errors,
            _ => &[],
        }
    }

    /// Human-readable error messages, in detection order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(|e| e.to_string()).collect()
    }
}

impl From<MailError> for ActionResult {
    fn from(error: MailError) -> Self {
        Self::from_error(error)
    }
}
