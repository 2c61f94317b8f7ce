//! MIME extraction glue over mail-parser.
//!
//! Turns raw message text into the `InboundEmail` the pipeline works
//! with: sender identity, subject, plain-text body (HTML-stripped
//! fallback), and the threading headers the classifier reads.

use mail_parser::{HeaderValue, MessageParser};

use crate::error::PipelineError;
use crate::pipeline::types::{InboundEmail, MailSummary};

/// Parse a raw message into the pipeline's inbound shape.
///
/// The event summary supplies fallbacks for fields the MIME payload is
/// missing (envelope sender, subject).
pub fn parse_inbound(raw: &str, summary: &MailSummary) -> Result<InboundEmail, PipelineError> {
    if raw.trim().is_empty() {
        return Err(PipelineError::Malformed("empty message".into()));
    }

    let parsed = MessageParser::default()
        .parse(raw.as_bytes())
        .ok_or_else(|| PipelineError::Malformed("unparseable MIME message".into()))?;

    let from = parsed.from().and_then(|addr| addr.first());
    let sender = from
        .and_then(|a| a.address())
        .map(|s| s.to_string())
        .unwrap_or_else(|| summary.source.clone());
    let sender_name = from
        .and_then(|a| a.name.as_ref())
        .map(|s| s.to_string())
        .filter(|name| !name.trim().is_empty());

    let subject = if summary.subject.is_empty() {
        parsed.subject().unwrap_or("(no subject)").to_string()
    } else {
        summary.subject.clone()
    };

    let html_body = parsed.body_html(0).map(|s| s.to_string());
    let text_body = parsed
        .body_text(0)
        .map(|s| s.to_string())
        .or_else(|| html_body.as_deref().map(strip_html))
        .unwrap_or_default();

    let in_reply_to = header_text(&parsed, "In-Reply-To");
    let references = header_text_list(&parsed, "References");

    Ok(InboundEmail {
        sender,
        sender_name,
        subject,
        text_body,
        html_body,
        in_reply_to,
        references,
    })
}

fn header_text(parsed: &mail_parser::Message, name: &str) -> Option<String> {
    match parsed.header(name) {
        Some(HeaderValue::Text(text)) => Some(text.to_string()),
        Some(HeaderValue::TextList(list)) => list.first().map(|t| t.to_string()),
        _ => None,
    }
}

fn header_text_list(parsed: &mail_parser::Message, name: &str) -> Vec<String> {
    match parsed.header(name) {
        Some(HeaderValue::Text(text)) => vec![text.to_string()],
        Some(HeaderValue::TextList(list)) => list.iter().map(|t| t.to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Strip HTML tags, approximating line structure: `<br>` and closing
/// block tags become newlines so the sanitizer's line-based rules still
/// apply to HTML-only messages.
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut tag = String::new();
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag.trim().trim_end_matches('/').trim_end().to_lowercase();
                if name == "br"
                    || name.starts_with("br ")
                    || matches!(
                        name.as_str(),
                        "/p" | "/div" | "/li" | "/tr" | "/h1" | "/h2" | "/h3"
                    )
                {
                    result.push('\n');
                }
            }
            _ if in_tag => tag.push(ch),
            _ => result.push(ch),
        }
    }

    // Collapse intra-line whitespace, keep line breaks.
    result
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
