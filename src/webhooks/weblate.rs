//! Labels translation pull requests.
//!
//! PRs both authored and delivered by the `weblate` account get the
//! `Translations` label; everything else is acknowledged untouched.

use tracing::info;

use crate::github::GithubClient;
use crate::webhooks::{PullRequestEvent, WebhookResponse};

const TRANSLATION_BOT: &str = "weblate";
const TRANSLATION_LABEL: &str = "Translations";

pub async fn handle(event: &PullRequestEvent, github: &GithubClient) -> WebhookResponse {
    if event.hook.is_some() {
        return WebhookResponse::ok("Webhook created");
    }

    let (Some(pr), Some(repo)) = (&event.pull_request, &event.repository) else {
        return WebhookResponse::error("Event is not a Pull Request");
    };

    info!(repo = %repo.full_name, number = pr.number, "Working on pull request");

    let sender_login = event.sender.as_ref().map(|s| s.login.as_str());
    if pr.user.login != TRANSLATION_BOT || sender_login != Some(TRANSLATION_BOT) {
        return WebhookResponse::no_action("PR is not from Weblate");
    }

    match github
        .add_labels(
            &repo.owner.login,
            &repo.name,
            pr.number,
            &[TRANSLATION_LABEL.to_string()],
        )
        .await
    {
        Ok(()) => {
            info!(number = pr.number, "Labelled");
            WebhookResponse::no_action("Process finished")
        }
        Err(e) => WebhookResponse::error(e.to_string()),
    }
}
