//! Identifier rules shared by entities and request validation

use regex::Regex;

/// Longest identifier accepted or derived
pub const MAX_IDENTIFIER_LEN: usize = 50;

/// Longest team name accepted
pub const MAX_NAME_LEN: usize = 100;

lazy_static::lazy_static! {
    /// Lowercase alphanumeric runs joined by single hyphens
    pub static ref TEAM_IDENTIFIER_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

/// Check an identifier against the format and length rules
pub fn validate_team_identifier(identifier: &str) -> bool {
    identifier.len() <= MAX_IDENTIFIER_LEN && TEAM_IDENTIFIER_REGEX.is_match(identifier)
}

/// `validator` hook for request bodies carrying an identifier
pub fn validate_identifier_format(identifier: &str) -> Result<(), validator::ValidationError> {
    if validate_team_identifier(identifier) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_identifier"))
    }
}

/// Derive a URL-safe identifier from free text.
///
/// Lowercases, replaces every run of characters outside `[a-z0-9]` with a
/// single `-`, trims hyphens at both ends and caps the result at
/// [`MAX_IDENTIFIER_LEN`]. May return an empty string.
pub fn safe_text(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.len() > MAX_IDENTIFIER_LEN {
        slug.truncate(MAX_IDENTIFIER_LEN);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }

    slug
}
