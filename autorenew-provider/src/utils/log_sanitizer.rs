//! Log sanitization utilities
//!
//! Keeps API keys and oversized response bodies out of debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const SECRET_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes with a suffix giving the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential for display, keeping a short prefix so operators can
/// tell keys apart.
///
/// Secrets too short to keep a prefix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let visible = floor_char_boundary(secret, SECRET_VISIBLE_PREFIX);
    if secret.len() <= SECRET_VISIBLE_PREFIX * 2 {
        "***".to_string()
    } else {
        format!("{}***", &secret[..visible])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = "<ApiResponse Status=\"OK\"/>";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "é".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn mask_keeps_prefix() {
        assert_eq!(mask_secret("abcd1234efgh5678"), "abcd***");
    }

    #[test]
    fn mask_short_secret_fully() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "***");
    }
}
