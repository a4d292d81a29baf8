//! Zone ID formatting and syntax validation.
//!
//! Two shapes are accepted:
//!
//! - `XD` followed by one or two digits: `XD1`, `XD12`.
//! - digits, an optional letter, a hyphen and a direction: `1A-S`, `12-W`.
//!
//! User input is normalised first (`"xd-7"` → `"XD7"`, `"1as"` → `"1A-S"`), so
//! only IDs that cannot be coerced into either shape are rejected.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Error returned for a zone ID that matches neither accepted shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneIdError {
    #[error("Zone ID must be in format like '1A-S' or 'XD1' (caps and hyphens will be auto-formatted)")]
    InvalidFormat { input: String },
}

fn xd_input() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^XD-?\s*([0-9]+)").expect("constant pattern"))
}

fn regular_input() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)([A-Z])?-?([NSEW])").expect("constant pattern"))
}

fn xd_canonical() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^XD[0-9]{1,2}$").expect("constant pattern"))
}

fn regular_canonical() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+[A-Z]?-[NSEW]$").expect("constant pattern"))
}

/// Normalises a user-entered zone ID.
///
/// Trims and upper-cases the input, drops the hyphen in `XD-n`, and inserts
/// the missing hyphen before the direction of a regular ID.  Input that
/// matches neither prefix is returned trimmed and upper-cased.
pub fn format_dockmaster_id(raw: &str) -> String {
    let cleaned = raw.trim().to_uppercase();

    if let Some(caps) = xd_input().captures(&cleaned) {
        return format!("XD{}", &caps[1]);
    }

    if let Some(caps) = regular_input().captures(&cleaned) {
        let letter = caps.get(2).map_or("", |m| m.as_str());
        return format!("{}{}-{}", &caps[1], letter, &caps[3]);
    }

    cleaned
}

/// Formats `raw` and checks it against the two accepted shapes.
///
/// Returns the formatted ID on success.
///
/// # Errors
///
/// Returns [`ZoneIdError::InvalidFormat`] when the formatted ID is neither
/// `XD<1-2 digits>` nor `<digits><letter?>-<N|S|E|W>`.
pub fn validate_dockmaster_id(raw: &str) -> Result<String, ZoneIdError> {
    let formatted = format_dockmaster_id(raw);
    if xd_canonical().is_match(&formatted) || regular_canonical().is_match(&formatted) {
        Ok(formatted)
    } else {
        Err(ZoneIdError::InvalidFormat {
            input: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_xd_strips_hyphen_and_spaces() {
        assert_eq!(format_dockmaster_id("xd-7"), "XD7");
        assert_eq!(format_dockmaster_id(" XD 12 "), "XD12");
        assert_eq!(format_dockmaster_id("XD3"), "XD3");
    }

    #[test]
    fn test_format_regular_inserts_hyphen_and_uppercases() {
        assert_eq!(format_dockmaster_id("1as"), "1A-S");
        assert_eq!(format_dockmaster_id("1a-s"), "1A-S");
        assert_eq!(format_dockmaster_id("12w"), "12-W");
        assert_eq!(format_dockmaster_id("7B-S"), "7B-S");
    }

    #[test]
    fn test_format_leaves_unrecognised_input_uppercased() {
        assert_eq!(format_dockmaster_id("gg-shelter"), "GG-SHELTER");
        assert_eq!(format_dockmaster_id("19B-Q"), "19B-Q");
    }

    #[test]
    fn test_validate_accepts_both_shapes() {
        assert_eq!(validate_dockmaster_id("XD1"), Ok("XD1".to_string()));
        assert_eq!(validate_dockmaster_id("xd-11"), Ok("XD11".to_string()));
        assert_eq!(validate_dockmaster_id("1A-S"), Ok("1A-S".to_string()));
        assert_eq!(validate_dockmaster_id("3an"), Ok("3A-N".to_string()));
    }

    #[test]
    fn test_validate_rejects_three_digit_xd() {
        assert!(validate_dockmaster_id("XD123").is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_shapes_with_example_message() {
        let err = validate_dockmaster_id("The Gym").unwrap_err();
        assert_eq!(
            err,
            ZoneIdError::InvalidFormat {
                input: "The Gym".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.contains("'1A-S'"));
        assert!(message.contains("'XD1'"));
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        assert!(validate_dockmaster_id("   ").is_err());
    }
}
