//! Service configuration, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;

/// How the sender is identified in the generated issue body.
///
/// The confirmation email always goes to the real envelope address;
/// this policy only controls what readers of the issue see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SenderIdentity {
    /// Display name from the From header, or "an anonymous user".
    #[default]
    DisplayName,
    /// Masked envelope address (`j***e@example.com`).
    MaskedAddress,
}

impl SenderIdentity {
    /// Parse from a config string (`display-name` | `masked-address`).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "display-name" => Ok(Self::DisplayName),
            "masked-address" => Ok(Self::MaskedAddress),
            other => Err(ConfigError::InvalidValue {
                key: "SENDER_IDENTITY".into(),
                message: format!("unknown policy '{other}'"),
            }),
        }
    }
}

/// Issue-tracker settings.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub token: SecretString,
    pub owner: String,
    pub repo: String,
    pub labels: Vec<String>,
    pub api_base: String,
}

/// SMTP settings for the confirmation sender.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

/// Object-storage settings for externally stored email content.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Prefix used in commit-status contexts posted by the webhook handlers.
    pub namespace: String,
    pub sender_identity: SenderIdentity,
    pub tracker: TrackerConfig,
    pub smtp: SmtpConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = required("GITHUB_TOKEN")?;
        let owner = required("TRACKER_OWNER")?;
        let repo = required("TRACKER_REPO")?;

        let labels = parse_labels(
            &std::env::var("ISSUE_LABELS").unwrap_or_else(|_| "Site Config".to_string()),
        );

        let api_base = std::env::var("GITHUB_API_BASE")
            .unwrap_or_else(|_| "https://api.github.com".to_string());

        let smtp_host = required("SMTP_HOST")?;
        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);
        let smtp_username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let smtp_password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from_address = required("MAIL_FROM_ADDRESS")?;

        let storage_endpoint = std::env::var("STORAGE_ENDPOINT")
            .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string());

        let bind_addr =
            std::env::var("MAILGATE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let namespace = std::env::var("NAMESPACE").unwrap_or_else(|_| "mailgate".to_string());

        let sender_identity = match std::env::var("SENDER_IDENTITY") {
            Ok(value) => SenderIdentity::parse(&value)?,
            Err(_) => SenderIdentity::default(),
        };

        Ok(Self {
            bind_addr,
            namespace,
            sender_identity,
            tracker: TrackerConfig {
                token: SecretString::from(token),
                owner,
                repo,
                labels,
                api_base,
            },
            smtp: SmtpConfig {
                host: smtp_host,
                port: smtp_port,
                username: smtp_username,
                password: SecretString::from(smtp_password),
                from_address,
            },
            storage: StorageConfig {
                endpoint: storage_endpoint,
            },
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Split a comma-separated label list, dropping empty entries.
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
