//! End-to-end pipeline tests with mocked transports.
//!
//! Drives `EmailProcessor` through full events (inline and stored
//! content) and asserts on the calls the transports observe.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mailgate::config::SenderIdentity;
use mailgate::error::{NotifyError, PublishError, StorageError};
use mailgate::pipeline::processor::{EmailProcessor, ProcessorConfig};
use mailgate::pipeline::types::{
    ConfirmationNotifier, ContentStore, CreatedIssue, EmailEvent, IssuePublisher, MailSummary,
    NewIssue, StorageReceipt,
};

const ISSUE_URL: &str = "https://github.com/acme/site-configs/issues/42";

// ── Mock transports ─────────────────────────────────────────────────

#[derive(Default)]
struct RecordingPublisher {
    issues: Mutex<Vec<NewIssue>>,
    fail: bool,
}

#[async_trait]
impl IssuePublisher for RecordingPublisher {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, PublishError> {
        if self.fail {
            return Err(PublishError::Api {
                status: 502,
                body: "bad gateway".into(),
            });
        }
        self.issues.lock().unwrap().push(issue.clone());
        Ok(CreatedIssue {
            number: 42,
            html_url: ISSUE_URL.into(),
        })
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, u64, String)>>,
    fail: bool,
}

#[async_trait]
impl ConfirmationNotifier for RecordingNotifier {
    async fn send_confirmation(
        &self,
        recipient: &str,
        issue_number: u64,
        issue_url: &str,
    ) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Transport("connection reset".into()));
        }
        self.sent.lock().unwrap().push((
            recipient.to_string(),
            issue_number,
            issue_url.to_string(),
        ));
        Ok(())
    }
}

/// Store that serves a fixed body for any key.
struct StaticStore(String);

#[async_trait]
impl ContentStore for StaticStore {
    async fn fetch(&self, _bucket: &str, _key: &str) -> Result<String, StorageError> {
        Ok(self.0.clone())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn raw_mime(from: &str, subject: &str, extra_headers: &str, body: &str) -> String {
    format!(
        "From: {from}\r\nTo: gate@example.org\r\nSubject: {subject}\r\n\
         {extra_headers}Content-Type: text/plain; charset=UTF-8\r\n\r\n{body}"
    )
}

fn inline_event(from: &str, subject: &str, extra_headers: &str, body: &str) -> EmailEvent {
    EmailEvent {
        mail: MailSummary {
            source: from.to_string(),
            subject: subject.to_string(),
            timestamp: None,
        },
        content: Some(raw_mime(from, subject, extra_headers, body)),
        receipt: None,
    }
}

fn build_processor(
    stored: &str,
    publisher: Arc<RecordingPublisher>,
    notifier: Arc<RecordingNotifier>,
    identity: SenderIdentity,
) -> EmailProcessor {
    EmailProcessor::new(
        Arc::new(StaticStore(stored.to_string())),
        publisher,
        notifier,
        ProcessorConfig {
            owner: "acme".into(),
            repo: "site-configs".into(),
            labels: vec!["Site Config".into()],
            sender_identity: identity,
        },
    )
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn reply_subject_is_skipped_without_side_effects() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = inline_event("a@b.com", "Re: anything", "", "some answer");
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("reply"));
    assert!(publisher.issues.lock().unwrap().is_empty());
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn in_reply_to_header_is_skipped() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = inline_event(
        "a@b.com",
        "Following up",
        "In-Reply-To: <msg1@example.org>\r\n",
        "as discussed",
    );
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 200);
    assert!(publisher.issues.lock().unwrap().is_empty());
}

#[tokio::test]
async fn original_request_publishes_masked_body_and_notifies_raw_sender() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = inline_event("a@b.com", "New Request", "", "contact me at a@b.com");
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("42"));

    let issues = publisher.issues.lock().unwrap();
    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.owner, "acme");
    assert_eq!(issue.repo, "site-configs");
    assert_eq!(issue.title, "New Request");
    assert_eq!(issue.labels, vec!["Site Config".to_string()]);
    assert!(issue.body.contains("a***@b.com"));
    assert!(!issue.body.contains("a@b.com"));

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], ("a@b.com".to_string(), 42, ISSUE_URL.to_string()));
}

#[tokio::test]
async fn stored_content_is_fetched_and_processed() {
    let raw = raw_mime("bob@example.com", "Stored request", "", "please add example.net");
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor(&raw, publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = EmailEvent {
        mail: MailSummary {
            source: "bob@example.com".into(),
            subject: "Stored request".into(),
            timestamp: None,
        },
        content: None,
        receipt: Some(StorageReceipt {
            bucket_name: "inbound-mail".into(),
            object_key: "raw/abc".into(),
        }),
    };
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(publisher.issues.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn secrets_are_redacted_before_publishing() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = inline_event(
        "carol@example.com",
        "Login details",
        "",
        "site needs auth\ntoken: abc123\n",
    );
    processor.process(&event).await;

    let issues = publisher.issues.lock().unwrap();
    assert!(issues[0].body.contains("token: [redacted]"));
    assert!(!issues[0].body.contains("abc123"));
}

#[tokio::test]
async fn masked_address_policy_names_sender_by_mask() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor(
        "",
        publisher.clone(),
        notifier.clone(),
        SenderIdentity::MaskedAddress,
    );

    let event = inline_event("john.doe@example.com", "New Request", "", "hello");
    processor.process(&event).await;

    let issues = publisher.issues.lock().unwrap();
    assert!(issues[0].body.contains("Sent by j***e@example.com"));
    assert!(!issues[0].body.contains("john.doe@example.com"));
}

#[tokio::test]
async fn display_name_policy_uses_anonymous_fallback() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::DisplayName);

    let event = inline_event("a@b.com", "New Request", "", "hello");
    processor.process(&event).await;

    let issues = publisher.issues.lock().unwrap();
    assert!(issues[0].body.contains("Sent by an anonymous user"));
}

#[tokio::test]
async fn missing_content_is_a_500() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = EmailEvent {
        mail: MailSummary {
            source: "a@b.com".into(),
            subject: "No content".into(),
            timestamp: None,
        },
        content: None,
        receipt: None,
    };
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("Unable to retrieve email content"));
    assert!(publisher.issues.lock().unwrap().is_empty());
}

#[tokio::test]
async fn publish_failure_is_a_500_and_skips_notification() {
    let publisher = Arc::new(RecordingPublisher {
        issues: Mutex::new(vec![]),
        fail: true,
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = inline_event("a@b.com", "New Request", "", "hello");
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 500);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn notify_failure_after_publish_is_still_a_500() {
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Arc::new(RecordingNotifier {
        sent: Mutex::new(vec![]),
        fail: true,
    });
    let processor = build_processor("", publisher.clone(), notifier.clone(), SenderIdentity::default());

    let event = inline_event("a@b.com", "New Request", "", "hello");
    let response = processor.process(&event).await;

    assert_eq!(response.status_code, 500);
    // The issue was already created; there is no rollback.
    assert_eq!(publisher.issues.lock().unwrap().len(), 1);
}
