//! The mail-send output action.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    ActionResult, Address, Attachment, MailError, MailMessage, MailTransport, OutputArtifact,
    PathResolver, Result, SmtpMailSettings, SmtpTransport,
};

const PDF_EXTENSION: &str = "pdf";
const ZIP_EXTENSION: &str = "zip";

/// Output action that emails a generated document.
///
/// Configured once with sender identity, attachment filename and delivery
/// settings, then invoked per artifact. Each invocation composes a fresh
/// message, makes exactly one send attempt and reports the outcome as an
/// [`ActionResult`]; no error escapes as a panic or raw `Err`.
///
/// Auxiliary attachment paths that do not resolve to an existing file are
/// skipped silently. That is a deliberate best-effort policy inherited from
/// the settings contract, not an oversight; the skip is logged at `debug`.
pub struct SendMail {
    from_address: String,
    from_display_name: String,
    attached_filename: String,
    settings: Option<SmtpMailSettings>,
    resolver: PathResolver,
    transport: Option<Arc<dyn MailTransport>>,
}

impl SendMail {
    /// Create an action for the given sender address and attachment filename.
    ///
    /// The filename's extension is replaced at composition time according to
    /// the artifact's compressed flag, so a bare stem like `"Report"` is fine.
    pub fn new(from_address: impl Into<String>, attached_filename: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            from_display_name: String::new(),
            attached_filename: attached_filename.into(),
            settings: None,
            resolver: PathResolver::default(),
            transport: None,
        }
    }

    /// Set the display name shown next to the sender address.
    pub fn from_display_name(mut self, name: impl Into<String>) -> Self {
        self.from_display_name = name.into();
        self
    }

    /// Supply the delivery settings. Executing without them fails.
    pub fn settings(mut self, settings: SmtpMailSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the base directory for resolving `~/`-prefixed attachment paths.
    pub fn base_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.resolver = PathResolver::new(dir);
        self
    }

    /// Replace the SMTP transport with a caller-managed one.
    pub fn with_transport(mut self, transport: impl MailTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Execute the action for an output artifact.
    ///
    /// An absent artifact yields [`ActionResult::NoInput`] without touching
    /// the transport; every other failure is reported through
    /// [`ActionResult::Failure`].
    pub async fn execute<A>(&self, artifact: Option<&A>) -> ActionResult
    where
        A: OutputArtifact + ?Sized,
    {
        match self.execute_impl(artifact, None).await {
            Ok(()) => ActionResult::Success,
            Err(error) => {
                if !matches!(error, MailError::NoInput) {
                    warn!(error = %error, "send action failed");
                }
                ActionResult::from_error(error)
            }
        }
    }

    /// Execute the action, honoring a cancellation signal.
    ///
    /// The signal is checked before the network send is initiated; a signal
    /// observed there fails with [`MailError::Cancelled`] and the transport
    /// is never invoked. A signal arriving after the send has been issued
    /// abandons the wait and also reports [`MailError::Cancelled`], but the
    /// message may or may not have been delivered by then — callers must not
    /// assume either outcome.
    pub async fn execute_cancellable<A>(
        &self,
        artifact: Option<&A>,
        cancel: &mut broadcast::Receiver<()>,
    ) -> ActionResult
    where
        A: OutputArtifact + ?Sized,
    {
        match self.execute_impl(artifact, Some(cancel)).await {
            Ok(()) => ActionResult::Success,
            Err(error) => ActionResult::from_error(error),
        }
    }

    async fn execute_impl<A>(
        &self,
        artifact: Option<&A>,
        mut cancel: Option<&mut broadcast::Receiver<()>>,
    ) -> Result<()>
    where
        A: OutputArtifact + ?Sized,
    {
        let artifact = artifact.ok_or(MailError::NoInput)?;
        let settings = self.settings.as_ref().ok_or(MailError::MissingSettings)?;

        let message = self.compose(artifact, settings)?;

        if let Some(cancel) = cancel.as_mut() {
            if cancel.try_recv().is_ok() {
                debug!("send cancelled before the transport was invoked");
                return Err(MailError::Cancelled);
            }
        }

        match (&self.transport, cancel) {
            (Some(transport), cancel) => Self::dispatch(transport.as_ref(), &message, cancel).await,
            (None, cancel) => {
                let transport = SmtpTransport::from_credential(&settings.credential)?;
                Self::dispatch(&transport, &message, cancel).await
            }
        }
    }

    async fn dispatch(
        transport: &dyn MailTransport,
        message: &MailMessage,
        cancel: Option<&mut broadcast::Receiver<()>>,
    ) -> Result<()> {
        match cancel {
            None => transport.send(message).await,
            Some(cancel) => {
                // A closed channel means no cancellation will ever arrive.
                let cancelled = async {
                    loop {
                        match cancel.recv().await {
                            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => break,
                            Err(broadcast::error::RecvError::Closed) => {
                                std::future::pending::<()>().await
                            }
                        }
                    }
                };
                tokio::select! {
                    outcome = transport.send(message) => outcome,
                    _ = cancelled => {
                        debug!("send cancelled while awaiting the transport");
                        Err(MailError::Cancelled)
                    }
                }
            }
        }
    }

    fn compose<A>(&self, artifact: &A, settings: &SmtpMailSettings) -> Result<MailMessage>
    where
        A: OutputArtifact + ?Sized,
    {
        let from = Address::with_name(&self.from_address, &self.from_display_name)?;

        let mut message = MailMessage::new(from)
            .subject(&settings.templates.subject_template)
            .body(
                &settings.templates.body_template,
                settings.templates.is_body_html,
            );

        for to in &settings.recipients.to_addresses {
            message = message.to(Address::parse(to)?);
        }
        for cc in &settings.recipients.cc_addresses {
            message = message.cc(Address::parse(cc)?);
        }

        message = message.attach(self.primary_attachment(artifact)?);

        for path in &settings.attachments {
            let resolved = self.resolver.resolve(path);
            if !resolved.is_file() {
                // Missing auxiliary attachments are skipped, not failed.
                debug!(path = %resolved.display(), "skipping missing attachment");
                continue;
            }
            message = message.attach(Attachment::from_file(&resolved)?);
        }

        Ok(message)
    }

    fn primary_attachment<A>(&self, artifact: &A) -> Result<Attachment>
    where
        A: OutputArtifact + ?Sized,
    {
        let compressed = artifact.is_compressed();
        let extension = if compressed { ZIP_EXTENSION } else { PDF_EXTENSION };
        let filename = Path::new(&self.attached_filename)
            .with_extension(extension)
            .to_string_lossy()
            .into_owned();

        let mut data = Vec::new();
        artifact.reader()?.read_to_end(&mut data)?;

        Ok(if compressed {
            Attachment::zip(filename, data)
        } else {
            Attachment::pdf(filename, data)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MemoryArtifact, RecipientsSettings, SmtpCredential, TemplateSettings,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingTransport {
        sent: Arc<Mutex<Vec<MailMessage>>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl MailTransport for CapturingTransport {
        async fn send(&self, message: &MailMessage) -> Result<()> {
            if let Some(reason) = &self.fail_with {
                return Err(MailError::Transport(reason.clone()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn settings() -> SmtpMailSettings {
        SmtpMailSettings::new(
            SmtpCredential::new("smtp.mailtrap.io", 2525)
                .tls()
                .login("sender@example.com", "user", "secret"),
        )
        .templates(TemplateSettings::new("Test > pdf file", "Hey!!").html())
        .recipients(RecipientsSettings::to(["ops@example.com"]))
    }

    fn action_with(sent: &Arc<Mutex<Vec<MailMessage>>>, settings: SmtpMailSettings) -> SendMail {
        SendMail::new("sender@example.com", "Sample-01")
            .from_display_name("Fernando")
            .settings(settings)
            .with_transport(CapturingTransport {
                sent: Arc::clone(sent),
                fail_with: None,
            })
    }

    #[tokio::test]
    async fn test_successful_send_reaches_transport_once() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = action_with(&sent, settings());
        let artifact = MemoryArtifact::new(b"%PDF-1.7".to_vec());

        let result = action.execute(Some(&artifact)).await;

        assert!(result.is_success());
        let messages = sent.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].subject, "Test > pdf file");
        assert_eq!(messages[0].attachments.len(), 1);
        assert_eq!(messages[0].from.name.as_deref(), Some("Fernando"));
    }

    #[tokio::test]
    async fn test_absent_artifact_is_no_input() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = action_with(&sent, settings());

        let result = action.execute(None::<&MemoryArtifact>).await;

        assert!(result.is_no_input());
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_absent_settings_is_failure() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = SendMail::new("sender@example.com", "Sample-01").with_transport(
            CapturingTransport {
                sent: Arc::clone(&sent),
                fail_with: None,
            },
        );
        let artifact = MemoryArtifact::new(vec![1]);

        let result = action.execute(Some(&artifact)).await;

        assert_eq!(result.error_messages(), ["Missing a valid settings"]);
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_recipient_aborts_before_transport() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut bad = settings();
        bad.recipients.to_addresses = vec!["not-an-email".to_string()];
        let action = action_with(&sent, bad);
        let artifact = MemoryArtifact::new(vec![1]);

        let result = action.execute(Some(&artifact)).await;

        assert!(matches!(result.errors(), [MailError::InvalidAddress(_)]));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_auxiliary_attachment_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), [1, 2, 3]).unwrap();

        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = SendMail::new("sender@example.com", "Sample-01")
            .settings(settings().attachments(["~/a.png", "~/missing.png"]))
            .base_dir(dir.path())
            .with_transport(CapturingTransport {
                sent: Arc::clone(&sent),
                fail_with: None,
            });
        let artifact = MemoryArtifact::new(vec![1]);

        let result = action.execute(Some(&artifact)).await;

        assert!(result.is_success());
        let messages = sent.lock().unwrap();
        // primary artifact plus the one auxiliary file that exists
        assert_eq!(messages[0].attachments.len(), 2);
        assert_eq!(messages[0].attachments[1].filename, "a.png");
    }

    #[tokio::test]
    async fn test_primary_attachment_naming() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = action_with(&sent, settings());

        let plain = MemoryArtifact::new(vec![1]);
        assert!(action.execute(Some(&plain)).await.is_success());

        let zipped = MemoryArtifact::new(vec![1]).compressed();
        assert!(action.execute(Some(&zipped)).await.is_success());

        let messages = sent.lock().unwrap();
        assert_eq!(messages[0].attachments[0].filename, "Sample-01.pdf");
        assert_eq!(messages[0].attachments[0].content_type, "application/pdf");
        assert_eq!(messages[1].attachments[0].filename, "Sample-01.zip");
        assert_eq!(messages[1].attachments[0].content_type, "application/zip");
    }

    #[tokio::test]
    async fn test_repeated_execution_is_independent_and_identical() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = action_with(&sent, settings());
        let artifact = MemoryArtifact::new(b"%PDF-1.7".to_vec());

        assert!(action.execute(Some(&artifact)).await.is_success());
        assert!(action.execute(Some(&artifact)).await.is_success());

        let messages = sent.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], messages[1]);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_cause() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = SendMail::new("sender@example.com", "Sample-01")
            .settings(settings())
            .with_transport(CapturingTransport {
                sent: Arc::clone(&sent),
                fail_with: Some("connection refused".to_string()),
            });
        let artifact = MemoryArtifact::new(vec![1]);

        let result = action.execute(Some(&artifact)).await;

        assert!(matches!(result.errors(), [MailError::Transport(_)]));
        assert_eq!(result.error_messages(), ["SMTP error: connection refused"]);
    }

    #[tokio::test]
    async fn test_cancellation_before_send() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = action_with(&sent, settings());
        let artifact = MemoryArtifact::new(vec![1]);

        let (tx, mut rx) = broadcast::channel(1);
        tx.send(()).unwrap();

        let result = action.execute_cancellable(Some(&artifact), &mut rx).await;

        assert!(matches!(result.errors(), [MailError::Cancelled]));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uncancelled_signal_still_sends() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = action_with(&sent, settings());
        let artifact = MemoryArtifact::new(vec![1]);

        let (_tx, mut rx) = broadcast::channel::<()>(1);

        let result = action.execute_cancellable(Some(&artifact), &mut rx).await;

        assert!(result.is_success());
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_sender_aborts() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let action = SendMail::new("not-a-sender", "Sample-01")
            .settings(settings())
            .with_transport(CapturingTransport {
                sent: Arc::clone(&sent),
                fail_with: None,
            });
        let artifact = MemoryArtifact::new(vec![1]);

        let result = action.execute(Some(&artifact)).await;

        assert!(matches!(result.errors(), [MailError::InvalidAddress(_)]));
        assert!(sent.lock().unwrap().is_empty());
    }
}
