//! SMTP transport collaborator.

use async_trait::async_trait;
use lettre::{
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::{debug, info};

use crate::{MailError, MailMessage, Result, SmtpCredential};

/// Delivery transport for composed messages.
///
/// The SMTP implementation below performs the real network conversation;
/// tests substitute a capturing implementation.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one message. Exactly one attempt, no retries.
    async fn send(&self, message: &MailMessage) -> Result<()>;
}

/// SMTP transport backed by lettre.
///
/// The connection is owned for the duration of one send and released
/// afterwards regardless of outcome.
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpTransport {
    /// Build a transport from an SMTP credential.
    ///
    /// `use_tls` selects a STARTTLS-upgraded connection; without it the
    /// conversation stays in the clear.
    pub fn from_credential(credential: &SmtpCredential) -> Result<Self> {
        let mut builder = if credential.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&credential.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&credential.host)
        };

        builder = builder.port(credential.port);

        if !credential.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                credential.username.clone(),
                credential.password.clone(),
            ));
        }

        info!(
            host = %credential.host,
            port = credential.port,
            tls = credential.use_tls,
            "SMTP transport initialized"
        );

        Ok(Self {
            transport: builder.build(),
            host: credential.host.clone(),
        })
    }

    /// Probe the SMTP endpoint.
    pub async fn test_connection(&self) -> Result<bool> {
        self.transport
            .test_connection()
            .await
            .map_err(MailError::from)
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let rendered = message.to_lettre()?;

        debug!(
            host = %self.host,
            to = ?message.to.iter().map(|a| a.email.as_str()).collect::<Vec<_>>(),
            subject = %message.subject,
            "sending message via SMTP"
        );

        self.transport.send(rendered).await?;

        debug!("message accepted by SMTP server");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_from_plaintext_credential() {
        let credential = SmtpCredential::new("smtp.mailtrap.io", 2525)
            .login("sender@example.com", "user", "secret");
        assert!(SmtpTransport::from_credential(&credential).is_ok());
    }

    #[test]
    fn test_transport_from_tls_credential() {
        let credential = SmtpCredential::new("smtp.example.com", 587)
            .tls()
            .login("sender@example.com", "user", "secret");
        assert!(SmtpTransport::from_credential(&credential).is_ok());
    }
}
