//! GitHub REST transport — issue creation, commit statuses, labels.
//!
//! Covers only the three endpoints this service calls. The base URL is
//! injectable so tests can point the client at a mock server.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::info;

use crate::error::PublishError;
use crate::pipeline::types::{CreatedIssue, IssuePublisher, NewIssue};

/// User-Agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = concat!("mailgate/", env!("CARGO_PKG_VERSION"));

/// Commit status posted on a pull-request head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStatus {
    /// `success` or `failure`.
    pub state: String,
    pub description: String,
    pub context: String,
}

impl CommitStatus {
    pub fn success(description: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            state: "success".into(),
            description: description.into(),
            context: context.into(),
        }
    }

    pub fn failure(description: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            state: "failure".into(),
            description: description.into(),
            context: context.into(),
        }
    }
}

/// Minimal GitHub REST client.
pub struct GithubClient {
    client: reqwest::Client,
    token: SecretString,
    api_base: String,
}

impl GithubClient {
    pub fn new(token: SecretString, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            api_base: api_base.into(),
        }
    }

    /// Post a commit status on a PR head sha.
    pub async fn create_commit_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), PublishError> {
        let url = format!("{}/repos/{owner}/{repo}/statuses/{sha}", self.api_base);
        self.post_json(&url, status).await?;
        info!(owner, repo, sha, state = %status.state, "Commit status posted");
        Ok(())
    }

    /// Add labels to an existing issue or pull request.
    pub async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), PublishError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/issues/{issue_number}/labels",
            self.api_base
        );
        self.post_json(&url, &serde_json::json!({ "labels": labels }))
            .await?;
        info!(owner, repo, issue_number, ?labels, "Labels added");
        Ok(())
    }

    /// Download a pull-request diff (no auth — diff URLs are public).
    pub async fn fetch_diff(&self, diff_url: &str) -> Result<String, PublishError> {
        let response = self
            .client
            .get(diff_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<reqwest::Response, PublishError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(payload)
            .send()
            .await
            .map_err(|e| PublishError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl IssuePublisher for GithubClient {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, PublishError> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.api_base, issue.owner, issue.repo
        );
        let payload = serde_json::json!({
            "title": issue.title,
            "body": issue.body,
            "labels": issue.labels,
        });

        let response = self.post_json(&url, &payload).await?;
        let created: CreatedIssue = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;

        info!(
            owner = %issue.owner,
            repo = %issue.repo,
            number = created.number,
            url = %created.html_url,
            "Issue created"
        );
        Ok(created)
    }
}
