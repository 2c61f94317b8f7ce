//! Email address masking.
//!
//! One-way partial obfuscation that keeps enough structure for visual
//! identification (first character and domain) without exposing the
//! full address. Used both when redacting addresses inside a body and
//! when naming the sender in a generated issue, so the two call sites
//! always agree on the output.

/// Placeholder returned for anything that does not look like an address.
const INVALID_MARKER: &str = "[invalid email]";

/// Fixed mask inserted in place of the middle of the local part.
const MASK: &str = "***";

/// Mask an email address: `john.doe@example.com` → `j***e@example.com`.
///
/// Total over any input string. Strings that do not split into exactly
/// two non-empty-local parts on a single `@` yield `[invalid email]`.
/// The domain is never altered.
pub fn mask_email(address: &str) -> String {
    let parts: Vec<&str> = address.split('@').collect();
    let [local, domain] = parts.as_slice() else {
        return INVALID_MARKER.to_string();
    };

    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return INVALID_MARKER.to_string();
    };

    // Very short local parts (1-2 chars): show the first character only.
    if local.chars().count() <= 2 {
        return format!("{first}{MASK}@{domain}");
    }

    let last = local.chars().next_back().unwrap_or(first);
    format!("{first}{MASK}{last}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_typical_address() {
        assert_eq!(mask_email("john.doe@example.com"), "j***e@example.com");
    }

    #[test]
    fn masks_short_local_part() {
        assert_eq!(mask_email("ab@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@b.com"), "a***@b.com");
    }

    #[test]
    fn three_char_local_shows_first_and_last() {
        assert_eq!(mask_email("abc@example.com"), "a***c@example.com");
    }

    #[test]
    fn rejects_non_addresses() {
        assert_eq!(mask_email("not-an-email"), "[invalid email]");
        assert_eq!(mask_email(""), "[invalid email]");
        assert_eq!(mask_email("a@b@c"), "[invalid email]");
        assert_eq!(mask_email("@example.com"), "[invalid email]");
    }

    #[test]
    fn domain_is_untouched() {
        assert_eq!(
            mask_email("support@sub.Example-Domain.co.uk"),
            "s***t@sub.Example-Domain.co.uk"
        );
    }

    #[test]
    fn deterministic() {
        let a = mask_email("jane.roe@example.org");
        let b = mask_email("jane.roe@example.org");
        assert_eq!(a, b);
    }

    #[test]
    fn handles_multibyte_local_part() {
        assert_eq!(mask_email("日本太郎@example.jp"), "日***郎@example.jp");
    }
}
