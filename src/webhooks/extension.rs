//! File-extension status check for pull requests.
//!
//! Every non-deleted file in a PR against the config repository must
//! carry a `.txt` extension; the result is posted as a commit status
//! on the PR head.

use tracing::{info, warn};

use crate::github::{CommitStatus, GithubClient};
use crate::webhooks::diff::scan_diff;
use crate::webhooks::{PullRequestEvent, WebhookResponse};

pub async fn handle(
    event: &PullRequestEvent,
    github: &GithubClient,
    namespace: &str,
) -> WebhookResponse {
    if event.hook.is_some() {
        return WebhookResponse::ok("Webhook created");
    }

    let (Some(pr), Some(repo)) = (&event.pull_request, &event.repository) else {
        return WebhookResponse::error("Event is not a Pull Request");
    };

    info!(repo = %repo.full_name, number = pr.number, "Working on pull request");

    let diff = match github.fetch_diff(&pr.diff_url).await {
        Ok(diff) => diff,
        Err(e) => return WebhookResponse::error(e.to_string()),
    };

    let offender = scan_diff(&diff)
        .into_iter()
        .find(|file| !file.deleted && !file.path.ends_with(".txt"));

    let context = format!("{namespace} - File extension check");
    let status = match &offender {
        None => CommitStatus::success("passed", context),
        Some(file) => {
            warn!(file = %file.path, "Non-txt file in pull request");
            CommitStatus::failure(
                format!("Fail: \"{}\" has not a txt extension", file.path),
                context,
            )
        }
    };

    match github
        .create_commit_status(&repo.owner.login, &repo.name, &pr.head.sha, &status)
        .await
    {
        Ok(()) => WebhookResponse::ok(format!("Status set to {}", status.state)),
        Err(e) => WebhookResponse::error(e.to_string()),
    }
}
