//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits follow the original content contract: names and positions at 100,
//! titles at 200, descriptions/bios at 500-1000, hex colors for every
//! styleable text fragment.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names, positions, organizations
pub const MAX_NAME_LEN: usize = 100;

/// Titles, themes, headlines
pub const MAX_TITLE_LEN: usize = 200;

/// Short descriptions, notes, bios
pub const MAX_NOTE_LEN: usize = 500;

/// Long descriptions (season description, highlight description)
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Blog post bodies
pub const MAX_CONTENT_LEN: usize = 100_000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / media paths
pub const MAX_URL_LEN: usize = 2048;

/// Seasons may carry at most this many board members
pub const MAX_BOARD_MEMBERS: usize = 10;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a `#RGB` / `#RRGGBB` hex color.
pub fn validate_hex_color(value: &str, field: &str) -> Result<(), AppError> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| AppError::validation(format!("{field} must be a hex color like #81C99C")))?;
    if !(hex.len() == 3 || hex.len() == 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::validation(format!(
            "{field} must be a hex color like #81C99C"
        )));
    }
    Ok(())
}

/// Validate an optional hex color.
pub fn validate_optional_hex_color(value: &Option<String>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => validate_hex_color(v, field),
        None => Ok(()),
    }
}

/// Validate an http(s) URL. Empty strings are allowed; callers that require
/// a URL should combine with [`validate_required_text`].
pub fn validate_url(value: &str, field: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_URL_LEN {
        return Err(AppError::validation(format!("{field} is too long")));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(AppError::validation(format!(
            "{field} must be an http(s) URL"
        )));
    }
    Ok(())
}

/// Validate an academic year tag like `2023-2024`.
pub fn validate_academic_year(value: &str) -> Result<(), AppError> {
    let valid = value.len() == 9
        && value.as_bytes()[4] == b'-'
        && value[..4].chars().all(|c| c.is_ascii_digit())
        && value[5..].chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(AppError::validation(
            "academic_year must be in format YYYY-YYYY (e.g., 2023-2024)",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("ok", "title", 10).is_ok());
        assert!(validate_required_text("  ", "title", 10).is_err());
        assert!(validate_required_text("0123456789ab", "title", 10).is_err());
    }

    #[test]
    fn hex_colors() {
        assert!(validate_hex_color("#81C99C", "color").is_ok());
        assert!(validate_hex_color("#fff", "color").is_ok());
        assert!(validate_hex_color("81C99C", "color").is_err());
        assert!(validate_hex_color("#81C99", "color").is_err());
        assert!(validate_hex_color("#81C99Z", "color").is_err());
    }

    #[test]
    fn urls() {
        assert!(validate_url("https://example.org/x", "url").is_ok());
        assert!(validate_url("", "url").is_ok());
        assert!(validate_url("ftp://example.org", "url").is_err());
    }

    #[test]
    fn academic_years() {
        assert!(validate_academic_year("2023-2024").is_ok());
        assert!(validate_academic_year("2023/2024").is_err());
        assert!(validate_academic_year("23-24").is_err());
    }
}
