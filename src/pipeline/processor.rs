//! Pipeline orchestrator — sequences one inbound email event.
//!
//! Locating → Parsing → Classifying → {Skipped | Sanitizing →
//! Publishing → Notifying → Done}. Every failure surfaces at this
//! boundary as a structured 500 response. There are no retries and no
//! rollback: a notification failure after a successful publish is
//! still an overall failure, and the created issue stands — the
//! triggering system decides whether to redeliver the event.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::config::SenderIdentity;
use crate::error::PipelineError;
use crate::pipeline::classifier::ReplyClassifier;
use crate::pipeline::locator::ContentLocator;
use crate::pipeline::mask::mask_email;
use crate::pipeline::parser::parse_inbound;
use crate::pipeline::sanitizer::BodySanitizer;
use crate::pipeline::types::{
    ConfirmationNotifier, ContentStore, EmailEvent, InboundEmail, IssuePublisher, NewIssue,
    PipelineResponse,
};

/// Processor settings beyond the injected collaborators.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub owner: String,
    pub repo: String,
    pub labels: Vec<String>,
    pub sender_identity: SenderIdentity,
}

/// Processes inbound email events into tracker issues.
///
/// Collaborators are injected as trait objects so the pipeline is
/// testable without network access. One call to [`process`] handles
/// exactly one event; concurrent calls share no mutable state.
///
/// [`process`]: EmailProcessor::process
pub struct EmailProcessor {
    locator: ContentLocator,
    classifier: ReplyClassifier,
    sanitizer: BodySanitizer,
    publisher: Arc<dyn IssuePublisher>,
    notifier: Arc<dyn ConfirmationNotifier>,
    config: ProcessorConfig,
}

impl EmailProcessor {
    pub fn new(
        store: Arc<dyn ContentStore>,
        publisher: Arc<dyn IssuePublisher>,
        notifier: Arc<dyn ConfirmationNotifier>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            locator: ContentLocator::new(store),
            classifier: ReplyClassifier::default(),
            sanitizer: BodySanitizer::new(),
            publisher,
            notifier,
            config,
        }
    }

    /// Replace the default classifier (custom locale tables).
    pub fn with_classifier(mut self, classifier: ReplyClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Process a single event. Never panics; every failure is mapped to
    /// a 500-class response.
    pub async fn process(&self, event: &EmailEvent) -> PipelineResponse {
        match self.run(event).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Error processing email");
                PipelineResponse::error(&e.to_string())
            }
        }
    }

    async fn run(&self, event: &EmailEvent) -> Result<PipelineResponse, PipelineError> {
        let invocation = Uuid::new_v4();

        let raw = self.locator.resolve(event).await?;
        let email = parse_inbound(&raw, &event.mail)?;
        info!(
            %invocation,
            sender = %email.sender,
            subject = %email.subject,
            received = ?event.mail.timestamp,
            "Processing inbound email"
        );

        let classification = self.classifier.classify(&email);
        if classification.is_reply {
            info!(
                %invocation,
                signal = classification.matched_signal.as_deref().unwrap_or("unknown"),
                "Email detected as a reply - skipping issue creation"
            );
            return Ok(PipelineResponse::skipped_reply());
        }

        let cleaned = self.sanitizer.sanitize(&email.text_body);

        let issue = NewIssue {
            owner: self.config.owner.clone(),
            repo: self.config.repo.clone(),
            title: email.subject.clone(),
            body: issue_body(&email, &cleaned, self.config.sender_identity),
            labels: self.config.labels.clone(),
        };
        let created = self.publisher.create_issue(&issue).await?;
        info!(
            %invocation,
            issue = created.number,
            url = %created.html_url,
            "Created tracker issue"
        );

        self.notifier
            .send_confirmation(&email.sender, created.number, &created.html_url)
            .await?;
        info!(%invocation, recipient = %email.sender, "Sent confirmation email");

        Ok(PipelineResponse::processed(created.number, &created.html_url))
    }
}

/// Format the issue body for a sanitized request.
///
/// The sender line follows the configured identity policy; the same
/// masker used for body redaction is used here so both call sites
/// agree on the output.
fn issue_body(email: &InboundEmail, sanitized: &str, identity: SenderIdentity) -> String {
    let sender = match identity {
        SenderIdentity::DisplayName => email
            .sender_name
            .clone()
            .unwrap_or_else(|| "an anonymous user".to_string()),
        SenderIdentity::MaskedAddress => mask_email(&email.sender),
    };
    format!("*Sent by {sender} and automatically created by email*\n\n---\n\n{sanitized}")
}
