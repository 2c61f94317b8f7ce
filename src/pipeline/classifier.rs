//! Reply detection for inbound email.
//!
//! Multi-signal heuristic: subject prefix, threading headers, then
//! quoted-text markers near the top of the body. The first matching
//! signal short-circuits; which one matched is recorded for logging
//! only and never changes downstream behavior.

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::{Classification, InboundEmail};

/// How many leading characters of the body are scanned for quote markers.
const BODY_SCAN_CHARS: usize = 500;

/// Locale tables consumed by the classifier.
///
/// Maintained lists, not exhaustive rules — new locales are added here
/// without touching the classifier control flow.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Literal subject prefixes that mark a reply. Matched at position 0
    /// of the trimmed subject, case-insensitively.
    pub reply_prefixes: Vec<String>,
    /// Regex patterns for quoted-text introducers scanned in the body.
    pub quote_patterns: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let reply_prefixes = [
            "re:",   // English, French
            "aw:",   // Dutch
            "sv:",   // Swedish
            "vs:",   // Danish
            "rif:",  // Italian
            "ref:",  // Portuguese
            "antw:", // German
            "odp:",  // Polish
            "回复:",  // Chinese
            "답장:",  // Korean
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let quote_patterns = [
            r"(?im)^on .* wrote:",
            r"(?im)^le .* a écrit :",
            r"(?im)^am .* schrieb:",
            r"(?im)^el .* escribió:",
            r"(?im)^-{3,}\s*original message\s*-{3,}",
            r"(?m)^>+\s",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            reply_prefixes,
            quote_patterns,
        }
    }
}

/// Heuristic reply classifier. Pure after construction.
pub struct ReplyClassifier {
    /// Single anchored alternation over the configured prefixes.
    /// `None` when the prefix list is empty.
    subject_prefix: Option<Regex>,
    quote_patterns: Vec<Regex>,
}

impl ReplyClassifier {
    /// Compile the configured locale tables.
    pub fn new(config: &ClassifierConfig) -> Result<Self, regex::Error> {
        let subject_prefix = if config.reply_prefixes.is_empty() {
            None
        } else {
            let alternation = config
                .reply_prefixes
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!("(?i)^(?:{alternation})"))?)
        };

        let quote_patterns = config
            .quote_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            subject_prefix,
            quote_patterns,
        })
    }

    /// Classify one message. Signals are evaluated in fixed order and
    /// the first match wins; absence of all signals means original.
    pub fn classify(&self, message: &InboundEmail) -> Classification {
        let subject = message.subject.trim();

        if let Some(prefix) = &self.subject_prefix
            && prefix.is_match(subject)
        {
            debug!(subject, "Reply detected: subject starts with a reply prefix");
            return Classification::reply("subject prefix");
        }

        if message
            .in_reply_to
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
        {
            debug!("Reply detected: In-Reply-To header present");
            return Classification::reply("in-reply-to header");
        }

        if !message.references.is_empty() {
            debug!(
                count = message.references.len(),
                "Reply detected: References header present"
            );
            return Classification::reply("references header");
        }

        let window: String = message.text_body.chars().take(BODY_SCAN_CHARS).collect();
        if self.quote_patterns.iter().any(|p| p.is_match(&window)) {
            debug!("Reply detected: quoted-text marker near top of body");
            return Classification::reply("quoted text in body");
        }

        debug!(subject, "Message does not appear to be a reply");
        Classification::original()
    }
}

impl Default for ReplyClassifier {
    fn default() -> Self {
        // The built-in tables are known-good patterns.
        Self::new(&ClassifierConfig::default()).expect("default classifier config compiles")
    }
}
