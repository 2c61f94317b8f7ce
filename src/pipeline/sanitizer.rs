//! Body sanitization — strips email artifacts and redacts PII.
//!
//! A fixed, ordered list of total text transforms. Each step operates
//! on the output of the previous one:
//!
//! 1. Signature blocks (`-- ` delimiter, mobile-client markers)
//! 2. Embedded header lines, only when two or more cluster together
//! 3. Quoted-reply lines (`>` prefixed)
//! 4. Quoted-header lines ("On … wrote:") and original-message dividers
//! 5. PII redaction: address masking, phone numbers, card numbers,
//!    `label: value` secrets
//! 6. Blank-line collapse and outer trim

use regex::{Captures, Regex};
use tracing::debug;

use crate::pipeline::mask::mask_email;

/// One step of the sanitization pass.
enum Transform {
    /// Delete every match.
    Strip(Regex),
    /// Replace every match with the given text (`$n` refs allowed).
    Replace(Regex, &'static str),
    /// Mask every email address in place, leaving surrounding text intact.
    MaskAddresses(Regex),
    /// Remove header-like lines, but only when two or more such lines
    /// appear in the text. A single isolated match is left untouched so
    /// ordinary prose containing a colon survives.
    StripHeaderCluster(Vec<Regex>),
}

impl Transform {
    fn apply(&self, text: &str) -> String {
        match self {
            Self::Strip(pattern) => pattern.replace_all(text, "").into_owned(),
            Self::Replace(pattern, replacement) => {
                pattern.replace_all(text, *replacement).into_owned()
            }
            Self::MaskAddresses(pattern) => pattern
                .replace_all(text, |caps: &Captures| mask_email(&caps[0]))
                .into_owned(),
            Self::StripHeaderCluster(patterns) => {
                let lines: Vec<&str> = text.split('\n').collect();
                let matched = lines
                    .iter()
                    .filter(|line| patterns.iter().any(|p| p.is_match(line)))
                    .count();
                if matched < 2 {
                    return text.to_string();
                }
                lines
                    .into_iter()
                    .filter(|line| !patterns.iter().any(|p| p.is_match(line)))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}

/// Sanitizes free-form email bodies. Pure after construction.
pub struct BodySanitizer {
    transforms: Vec<Transform>,
}

impl BodySanitizer {
    pub fn new() -> Self {
        let strip = |p: &str| Transform::Strip(Regex::new(p).unwrap());

        let header_cluster = [
            r"(?i)^(?:from|de|von|från):\s*.+$",
            r"(?i)^(?:to|à|an|till):\s*.+$",
            r"(?i)^(?:sent|date|envoyé|gesendet|skickat):\s*.+$",
            r"(?i)^(?:cc|bcc):\s*.+$",
            r"(?i)^subject:\s*.+$",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        let transforms = vec![
            // 1. Signatures: standard delimiter, then mobile/client markers.
            strip(r"(?s)\n--[ \t]*\n.*"),
            strip(r"(?is)\n\s*-+[ \t]*\n.*?(?:sent from|envoyé de|enviado desde).*"),
            strip(r"(?im)^[ \t]*sent from my (?:iphone|ipad|android|mobile|phone).*$"),
            strip(r"(?im)^[ \t]*envoyé de mon (?:iphone|ipad|android|mobile|téléphone).*$"),
            strip(r"(?im)^[ \t]*von meinem (?:iphone|ipad|android|mobilgerät) gesendet.*$"),
            strip(r"(?im)^[ \t]*get outlook for (?:ios|android).*$"),
            strip(r"(?im)^[ \t]*télécharger outlook pour (?:ios|android).*$"),
            // 2. Forwarded-header lines, only when clustered.
            Transform::StripHeaderCluster(header_cluster),
            // 3. Quoted replies.
            strip(r"(?m)^>+.+$"),
            // 4. Quoted-header lines and dividers.
            strip(r"(?im)^on\s+.+?\s+wrote:\s*$"),
            strip(r"(?im)^le\s+.+?\s+a écrit\s*:\s*$"),
            strip(r"(?im)^am\s+.+?\s+schrieb:\s*$"),
            strip(r"(?im)^el\s+.+?\s+escribió:\s*$"),
            strip(r"(?im)^-+\s*original message\s*-+$"),
            strip(r"(?im)^-+\s*message d'origine\s*-+$"),
            // 5. PII redaction.
            Transform::MaskAddresses(Regex::new(r"[\w.+-]+@[\w.-]+\.\w+").unwrap()),
            Transform::Replace(
                Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
                "[phone redacted]",
            ),
            Transform::Replace(
                Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").unwrap(),
                "[card number redacted]",
            ),
            Transform::Replace(
                Regex::new(r"(?i)(password|passwd|pwd|token|api[-_]?key|secret):\s*\S+").unwrap(),
                "${1}: [redacted]",
            ),
            // 6. Blank-line collapse (outer trim happens in sanitize()).
            Transform::Replace(Regex::new(r"\n{3,}").unwrap(), "\n\n"),
        ];

        Self { transforms }
    }

    /// Run the full transform sequence over a raw body.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for transform in &self.transforms {
            text = transform.apply(&text);
        }
        let cleaned = text.trim().to_string();
        debug!(
            raw_len = raw.len(),
            cleaned_len = cleaned.len(),
            "Email body sanitized"
        );
        cleaned
    }
}

impl Default for BodySanitizer {
    fn default() -> Self {
        Self::new()
    }
}
