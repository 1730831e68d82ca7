//! Email address handling.

use crate::{MailError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// The bare email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl Address {
    /// Create an address from a bare email, validating its syntax.
    pub fn new(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        email
            .trim()
            .parse::<lettre::Address>()
            .map_err(|_| MailError::InvalidAddress(email.clone()))?;
        Ok(Self {
            email: email.trim().to_string(),
            name: None,
        })
    }

    /// Create an address carrying a display name.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let mut addr = Self::new(email)?;
        let name = name.into();
        if !name.trim().is_empty() {
            addr.name = Some(name);
        }
        Ok(addr)
    }

    /// Parse `"Name <email@example.com>"` or a bare `"email@example.com"`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let (Some(start), Some(end)) = (s.find('<'), s.rfind('>')) {
            if start < end {
                let name = s[..start].trim().trim_matches('"');
                return Self::with_name(&s[start + 1..end], name);
            }
        }
        Self::new(s)
    }

    /// Convert to a lettre mailbox for message building.
    pub(crate) fn to_mailbox(&self) -> Result<lettre::message::Mailbox> {
        let address = self
            .email
            .parse::<lettre::Address>()
            .map_err(|_| MailError::InvalidAddress(self.email.clone()))?;
        Ok(lettre::message::Mailbox::new(self.name.clone(), address))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

impl TryFrom<&str> for Address {
    type Error = MailError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
