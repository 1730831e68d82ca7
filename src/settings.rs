//! Delivery settings consumed by the send action.
//!
//! Pure data: the aggregates hold credentials, message templates, recipients
//! and auxiliary attachment paths, with no behavior of their own. Every list
//! defaults to empty rather than absent, so iteration never has to deal with
//! a missing collection. Once handed to the action the settings are treated
//! as an immutable value; the action never writes back into them.

use serde::{Deserialize, Serialize};

/// SMTP server endpoint and account credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpCredential {
    /// SMTP server host.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Negotiate TLS (STARTTLS) on the connection.
    pub use_tls: bool,
    /// Account email address.
    pub email: String,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl SmtpCredential {
    /// Create a credential for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Set the account email and login.
    pub fn login(
        mut self,
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.email = email.into();
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Negotiate TLS on the connection.
    pub fn tls(mut self) -> Self {
        self.use_tls = true;
        self
    }
}

/// Subject and body templates for the outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Subject line text.
    pub subject_template: String,
    /// Body text.
    pub body_template: String,
    /// Whether the body is HTML rather than plain text.
    pub is_body_html: bool,
}

impl TemplateSettings {
    /// Create templates from subject and body text.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject_template: subject.into(),
            body_template: body.into(),
            is_body_html: false,
        }
    }

    /// Mark the body as HTML.
    pub fn html(mut self) -> Self {
        self.is_body_html = true;
        self
    }
}

/// Ordered recipient address lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipientsSettings {
    /// "To" addresses, in declaration order.
    pub to_addresses: Vec<String>,
    /// "Cc" addresses, in declaration order.
    pub cc_addresses: Vec<String>,
}

impl RecipientsSettings {
    /// Create recipients from "to" addresses.
    pub fn to<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to_addresses: addresses.into_iter().map(Into::into).collect(),
            cc_addresses: Vec::new(),
        }
    }

    /// Add "cc" addresses.
    pub fn cc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc_addresses
            .extend(addresses.into_iter().map(Into::into));
        self
    }
}

/// Caller-supplied configuration bundle for one send action.
///
/// Sub-aggregates can be supplied individually; anything left out defaults.
/// Attachment paths may start with the virtual root prefix `~/`, resolved
/// against the action's base directory at composition time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpMailSettings {
    /// Server endpoint and account credentials.
    pub credential: SmtpCredential,
    /// Subject/body templates.
    pub templates: TemplateSettings,
    /// Recipient lists.
    pub recipients: RecipientsSettings,
    /// Auxiliary attachment file paths, in declaration order.
    pub attachments: Vec<String>,
}

impl SmtpMailSettings {
    /// Create settings around a credential, everything else defaulted.
    pub fn new(credential: SmtpCredential) -> Self {
        Self {
            credential,
            ..Self::default()
        }
    }

    /// Set the message templates.
    pub fn templates(mut self, templates: TemplateSettings) -> Self {
        self.templates = templates;
        self
    }

    /// Set the recipient lists.
    pub fn recipients(mut self, recipients: RecipientsSettings) -> Self {
        self.recipients = recipients;
        self
    }

    /// Set the auxiliary attachment paths.
    pub fn attachments<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachments = paths.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_are_empty_not_absent() {
        let settings = SmtpMailSettings::default();
        assert!(settings.recipients.to_addresses.is_empty());
        assert!(settings.recipients.cc_addresses.is_empty());
        assert!(settings.attachments.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let settings = SmtpMailSettings::new(
            SmtpCredential::new("smtp.mailtrap.io", 2525)
                .tls()
                .login("sender@example.com", "user", "secret"),
        )
        .templates(TemplateSettings::new("Test > pdf file", "Hey!!").html())
        .recipients(RecipientsSettings::to(["ops@example.com"]).cc(["audit@example.com"]))
        .attachments(["~/images/bar-chart.png"]);

        assert_eq!(settings.credential.port, 2525);
        assert!(settings.credential.use_tls);
        assert!(settings.templates.is_body_html);
        assert_eq!(settings.recipients.to_addresses, ["ops@example.com"]);
        assert_eq!(settings.recipients.cc_addresses, ["audit@example.com"]);
        assert_eq!(settings.attachments.len(), 1);
    }

    #[test]
    fn test_partial_deserialization_defaults_rest() {
        let settings: SmtpMailSettings = serde_json::from_str(
            r#"{
                "credential": { "host": "smtp.example.com", "port": 587, "use_tls": true },
                "recipients": { "to_addresses": ["a@example.com"] }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.credential.host, "smtp.example.com");
        assert!(settings.templates.subject_template.is_empty());
        assert_eq!(settings.recipients.to_addresses, ["a@example.com"]);
        assert!(settings.recipients.cc_addresses.is_empty());
        assert!(settings.attachments.is_empty());
    }
}
