//! The composed outgoing message.

use crate::{Address, Attachment, MailError, Result};
use lettre::message::{header::ContentType, MultiPart, SinglePart};

/// In-memory email representation built just before send.
///
/// Constructed fresh for every action invocation and discarded afterwards;
/// nothing is shared between sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Sender address.
    pub from: Address,
    /// "To" recipients, in declaration order.
    pub to: Vec<Address>,
    /// "Cc" recipients, in declaration order.
    pub cc: Vec<Address>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Whether the body is HTML.
    pub is_body_html: bool,
    /// Attachments, primary artifact first.
    pub attachments: Vec<Attachment>,
}

impl MailMessage {
    /// Create a message from a sender.
    pub fn new(from: Address) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            subject: String::new(),
            body: String::new(),
            is_body_html: false,
            attachments: Vec::new(),
        }
    }

    /// Add a "to" recipient.
    pub fn to(mut self, address: Address) -> Self {
        self.to.push(address);
        self
    }

    /// Add a "cc" recipient.
    pub fn cc(mut self, address: Address) -> Self {
        self.cc.push(address);
        self
    }

    /// Set the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>, html: bool) -> Self {
        self.body = body.into();
        self.is_body_html = html;
        self
    }

    /// Add an attachment.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Build the lettre message for the SMTP transport.
    pub(crate) fn to_lettre(&self) -> Result<lettre::Message> {
        if self.to.is_empty() && self.cc.is_empty() {
            return Err(MailError::InvalidAddress(
                "no recipients specified".to_string(),
            ));
        }

        let mut builder = lettre::Message::builder()
            .from(self.from.to_mailbox()?)
            .subject(self.subject.clone());

        for addr in &self.to {
            builder = builder.to(addr.to_mailbox()?);
        }
        for addr in &self.cc {
            builder = builder.cc(addr.to_mailbox()?);
        }

        let body = if self.is_body_html {
            SinglePart::html(self.body.clone())
        } else {
            SinglePart::plain(self.body.clone())
        };

        if self.attachments.is_empty() {
            return builder.singlepart(body).map_err(MailError::from);
        }

        let mut mixed = MultiPart::mixed().singlepart(body);
        for attachment in &self.attachments {
            let content_type = attachment
                .content_type
                .parse::<ContentType>()
                .unwrap_or(ContentType::TEXT_PLAIN);
            let part = lettre::message::Attachment::new(attachment.filename.clone())
                .body(attachment.data.clone(), content_type);
            mixed = mixed.singlepart(part);
        }

        builder.multipart(mixed).map_err(MailError::from)
    }
}
