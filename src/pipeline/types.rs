//! Shared types for the email-to-issue pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NotifyError, PublishError, StorageError};

// ── Inbound event ───────────────────────────────────────────────────

/// Envelope delivered by the inbound-mail notification.
///
/// Carries either the raw message inline or a storage reference to it,
/// plus a summary of the headers the receiving service already parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailEvent {
    pub mail: MailSummary,
    /// Raw MIME content, when the notification carries it inline.
    #[serde(default)]
    pub content: Option<String>,
    /// Storage reference, when the message was written to a bucket instead.
    #[serde(default)]
    pub receipt: Option<StorageReceipt>,
}

/// Header summary attached to the notification.
#[derive(Debug, Clone, Deserialize)]
pub struct MailSummary {
    /// Envelope sender address.
    pub source: String,
    #[serde(default)]
    pub subject: String,
    /// When the upstream service received the message.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Reference to email content stored in an object bucket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageReceipt {
    pub bucket_name: String,
    pub object_key: String,
}

// ── Parsed message ──────────────────────────────────────────────────

/// A parsed inbound email.
///
/// Immutable once built; owned by the invocation that created it and
/// dropped when that invocation completes. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    /// Sender address from the From header (envelope fallback).
    pub sender: String,
    /// Human-readable sender name, if the From header carried one.
    pub sender_name: Option<String>,
    pub subject: String,
    /// Plain-text body (HTML-stripped fallback when no text part exists).
    pub text_body: String,
    pub html_body: Option<String>,
    /// In-Reply-To header value, if present.
    pub in_reply_to: Option<String>,
    /// References header entries, if present.
    pub references: Vec<String>,
}

// ── Classification ──────────────────────────────────────────────────

/// Outcome of reply classification.
///
/// `matched_signal` names the rule that fired and exists for logging
/// only — downstream behavior depends solely on `is_reply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_reply: bool,
    pub matched_signal: Option<String>,
}

impl Classification {
    pub fn original() -> Self {
        Self {
            is_reply: false,
            matched_signal: None,
        }
    }

    pub fn reply(signal: impl Into<String>) -> Self {
        Self {
            is_reply: true,
            matched_signal: Some(signal.into()),
        }
    }
}

// ── Issue types ─────────────────────────────────────────────────────

/// Request to open a tracker issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Created issue as reported by the tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: String,
}

// ── Pipeline result ─────────────────────────────────────────────────

/// Structured result handed back to the invoking transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResponse {
    pub status_code: u16,
    /// JSON-encoded message object.
    pub body: String,
}

impl PipelineResponse {
    /// Success: an issue was created and the sender notified.
    pub fn processed(issue_number: u64, issue_url: &str) -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!({
                "message": "Email processed successfully",
                "issueNumber": issue_number,
                "issueUrl": issue_url,
            })
            .to_string(),
        }
    }

    /// Success: the message was a reply, no action was required.
    pub fn skipped_reply() -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!({
                "message": "Email is a reply - no action taken",
                "reason": "Reply emails are not processed",
            })
            .to_string(),
        }
    }

    /// Failure: the invocation could not complete.
    pub fn error(detail: &str) -> Self {
        Self {
            status_code: 500,
            body: serde_json::json!({
                "message": "Error processing email",
                "error": detail,
            })
            .to_string(),
        }
    }
}

// ── Collaborator traits ─────────────────────────────────────────────

/// Fetches externally stored email content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<String, StorageError>;
}

/// Creates a ticket in the issue tracker.
#[async_trait]
pub trait IssuePublisher: Send + Sync {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, PublishError>;
}

/// Sends the confirmation reply back to the original sender.
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    async fn send_confirmation(
        &self,
        recipient: &str,
        issue_number: u64,
        issue_url: &str,
    ) -> Result<(), NotifyError>;
}
