//! Heuristic secret detection for copied text.
//!
//! Two independent signals mark a text entry as a password: the shape of
//! the text itself, and the concealed marker type that password managers
//! publish next to the secrets they copy.

use crate::clipboard::ClipboardFormat;

const MIN_PASSWORD_LEN: usize = 5;

/// Punctuation that commonly appears in paths and identifiers and
/// therefore does not count as a "special character" on its own.
const BENIGN_PUNCTUATION: &[char] = &['/', '.', ':', '-', '_', '~'];

/// A URL scheme separator counts as a special character.
const SCHEME_SEPARATOR: &str = "://";

/// Returns true when `text` looks like a password.
///
/// All of the following must hold on the trimmed text: it is non-empty,
/// has no embedded whitespace, is at least five characters long, contains
/// a lowercase letter and a special character, and is not made of hex
/// digits only (commit hashes and similar tokens).
///
/// URL-like strings are reported as password-like: the `://` scheme
/// separator counts as a special character, and so does query punctuation
/// (`?`, `=`, `&`). Plain paths and identifiers do not.
pub fn is_password_like(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    if trimmed.chars().count() < MIN_PASSWORD_LEN {
        return false;
    }

    let has_lowercase = trimmed.chars().any(char::is_lowercase);
    let has_special =
        trimmed.contains(SCHEME_SEPARATOR) || trimmed.chars().any(is_special_char);
    let all_hex = trimmed.chars().all(|c| c.is_ascii_hexdigit());

    has_lowercase && has_special && !all_hex
}

fn is_special_char(c: char) -> bool {
    !(c.is_alphanumeric() || c.is_whitespace() || BENIGN_PUNCTUATION.contains(&c))
}

/// Returns true when the clipboard advertises the concealed marker type.
///
/// Password managers set this marker on secrets they copy; its presence
/// forces password treatment regardless of [`is_password_like`].
pub fn has_concealed_marker(formats: &[ClipboardFormat]) -> bool {
    formats.iter().any(|f| f.as_str() == ClipboardFormat::CONCEALED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_passwords_are_detected() {
        assert!(is_password_like("p@ssw0rd"));
        assert!(is_password_like("  hunter2!  "));
        assert!(is_password_like("correct#horse"));
    }

    #[test]
    fn test_commit_hashes_are_excluded() {
        assert!(!is_password_like("fa81bf3c4d5e6f7a"));
        assert!(!is_password_like("deadbeef"));
    }

    #[test]
    fn test_plain_words_and_sentences_are_not_passwords() {
        assert!(!is_password_like("hello"));
        assert!(!is_password_like("hello world!"));
        assert!(!is_password_like("snake_case_name"));
        assert!(!is_password_like("/usr/local/bin"));
    }

    #[test]
    fn test_short_or_empty_text_is_not_a_password() {
        assert!(!is_password_like(""));
        assert!(!is_password_like("   "));
        assert!(!is_password_like("a@1"));
    }

    #[test]
    fn test_uppercase_only_secret_is_not_detected() {
        assert!(!is_password_like("ABC$1234"));
    }

    #[test]
    fn test_bare_url_is_password_like() {
        assert!(is_password_like("https://example.com"));
        assert!(is_password_like("ftp://files.example.org/pub"));
    }

    #[test]
    fn test_paths_without_scheme_are_not_password_like() {
        assert!(!is_password_like("example.com/docs"));
        assert!(!is_password_like("~/projects/clip-stash"));
    }

    #[test]
    fn test_url_with_query_is_password_like() {
        assert!(is_password_like("https://example.com/search?q=rust&page=2"));
    }

    #[test]
    fn test_concealed_marker() {
        let formats = vec![ClipboardFormat::text_plain(), ClipboardFormat::concealed()];
        assert!(has_concealed_marker(&formats));
        assert!(!has_concealed_marker(&[ClipboardFormat::text_plain()]));
    }
}
