//! Confirmation mail transport — SMTP via lettre.
//!
//! Sends the fixed confirmation reply (plain text + HTML alternative)
//! to the original sender after an issue has been created.

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::SmtpConfig;
use crate::error::NotifyError;
use crate::pipeline::types::ConfirmationNotifier;

const CONFIRMATION_SUBJECT: &str = "Your site configuration request has been received";

/// SMTP-backed confirmation sender.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::relay(&self.config.host)
            .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        transport
            .send(message)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ConfirmationNotifier for SmtpNotifier {
    async fn send_confirmation(
        &self,
        recipient: &str,
        issue_number: u64,
        issue_url: &str,
    ) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.config.from_address.parse().map_err(|e| {
                NotifyError::InvalidAddress {
                    address: self.config.from_address.clone(),
                    reason: format!("{e}"),
                }
            })?)
            .to(recipient.parse().map_err(|e| NotifyError::InvalidAddress {
                address: recipient.to_string(),
                reason: format!("{e}"),
            })?)
            .subject(CONFIRMATION_SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                confirmation_text(issue_number, issue_url),
                confirmation_html(issue_number, issue_url),
            ))
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        self.send(&message)?;
        info!(recipient, issue_number, "Confirmation email sent");
        Ok(())
    }
}

/// Plain-text confirmation body.
pub fn confirmation_text(issue_number: u64, issue_url: &str) -> String {
    format!(
        "Hello,\n\n\
         Thank you for contacting site configuration support.\n\n\
         Your email has been received and a tracker issue has been automatically created to track your request.\n\n\
         Issue #{issue_number}: {issue_url}\n\n\
         Our team will review your request and respond on the issue.\n\
         If someone replies there, you will NOT receive an email notification.\n\n\
         Best regards,\n\
         The site configuration team\n\n\
         ---\n\
         Please do not reply to this email. Any responses will not be processed.\n"
    )
}

/// HTML confirmation body.
pub fn confirmation_html(issue_number: u64, issue_url: &str) -> String {
    format!(
        "<html>\n<body>\n\
         <p>Hello,</p>\n\
         <p>Thank you for contacting site configuration support.</p>\n\
         <p>Your email has been received and a tracker issue has been automatically created to track your request.</p>\n\
         <p><strong>Issue #{issue_number}:</strong> <a href=\"{issue_url}\">{issue_url}</a></p>\n\
         <p>Our team will review your request and respond on the issue.</p>\n\
         <p><i>If someone replies there, you will NOT receive an email notification.</i></p>\n\
         <p>Best regards,<br>The site configuration team</p>\n\
         <hr>\n\
         <p><small>Please do not reply to this email. Any responses will not be processed.</small></p>\n\
         </body>\n</html>"
    )
}
