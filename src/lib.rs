//! # pdfwriter-mail
//!
//! Output action that sends a generated PDF document by email over SMTP.
//!
//! The document pipeline produces an [`OutputArtifact`] (a readable byte
//! stream plus a compressed flag); this crate composes a message from it and
//! caller-supplied [`SmtpMailSettings`] and dispatches it through an SMTP
//! transport, reporting the outcome as a single [`ActionResult`]. No failure
//! escapes the action as a panic: invalid settings, malformed addresses and
//! transport errors all land in the result's error list.
//!
//! - **Uniform result**: success, a distinguished no-input case, or an
//!   ordered error list.
//! - **Best-effort auxiliary attachments**: configured paths that do not
//!   resolve to an existing file are skipped, not failed.
//! - **Single attempt**: exactly one network send per invocation, no retries.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pdfwriter_mail::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = SmtpMailSettings::new(
//!         SmtpCredential::new("smtp.mailtrap.io", 2525)
//!             .tls()
//!             .login("sender@example.com", "user", "password"),
//!     )
//!     .templates(TemplateSettings::new("Monthly report", "Attached.").html())
//!     .recipients(RecipientsSettings::to(["ops@example.com"]))
//!     .attachments(["~/images/bar-chart.png"]);
//!
//!     let action = SendMail::new("sender@example.com", "Report")
//!         .from_display_name("Reporting")
//!         .settings(settings);
//!
//!     let artifact = MemoryArtifact::new(pdf_bytes);
//!     match action.execute(Some(&artifact)).await {
//!         result if result.is_success() => println!("sent"),
//!         result => eprintln!("{:?}", result.error_messages()),
//!     }
//! }
//! ```

mod action;
mod address;
mod artifact;
mod attachment;
mod error;
mod message;
mod path;
mod result;
mod settings;
mod transport;

pub use action::SendMail;
pub use address::Address;
pub use artifact::{MemoryArtifact, OutputArtifact};
pub use attachment::Attachment;
pub use error::{MailError, Result};
pub use message::MailMessage;
pub use path::PathResolver;
pub use result::ActionResult;
pub use settings::{RecipientsSettings, SmtpCredential, SmtpMailSettings, TemplateSettings};
pub use transport::{MailTransport, SmtpTransport};

/// Prelude for common imports.
///
/// ```
/// use pdfwriter_mail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::action::SendMail;
    pub use crate::address::Address;
    pub use crate::artifact::{MemoryArtifact, OutputArtifact};
    pub use crate::attachment::Attachment;
    pub use crate::error::{MailError, Result};
    pub use crate::message::MailMessage;
    pub use crate::result::ActionResult;
    pub use crate::settings::{
        RecipientsSettings, SmtpCredential, SmtpMailSettings, TemplateSettings,
    };
    pub use crate::transport::{MailTransport, SmtpTransport};
}
