//! Pull-request webhook handlers for the config repository.
//!
//! Two handlers share the event shape below: the file-extension status
//! check and the translation-PR labeler. Both answer webhook-creation
//! pings with a 200 and reject anything that is not a pull request.

use serde::Deserialize;

pub mod diff;
pub mod extension;
pub mod weblate;

// ── Event types ─────────────────────────────────────────────────────

/// Subset of the tracker's pull-request webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// Present on the ping delivered when the webhook is created.
    #[serde(default)]
    pub hook: Option<serde_json::Value>,
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
    #[serde(default)]
    pub repository: Option<Repository>,
    #[serde(default)]
    pub sender: Option<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub diff_url: String,
    pub user: Account,
    pub head: CommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: Account,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

// ── Handler result ──────────────────────────────────────────────────

/// Structured result returned by the webhook handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: message.into(),
        }
    }

    /// Event acknowledged, nothing to do.
    pub fn no_action(message: impl Into<String>) -> Self {
        Self {
            status_code: 204,
            body: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: message.into(),
        }
    }
}
