//! Line-level parsing of the registry text.
//!
//! Registry format:
//! ```text
//! # comment / header
//! <zone_id>\t<x>\t<y>\t<map>\t<enabled>
//! ```
//!
//! Historical edits left three row shapes in the file, all of which are still
//! accepted:
//!
//! | Tokens | Shape                              | Defaults               |
//! |--------|------------------------------------|------------------------|
//! | 3      | `zone_id x y`                      | map `7`, enabled `true` |
//! | 4      | `zone_id x y enabled`              | map `7`                |
//! | 5+     | `zone_id x y map enabled [extra…]` | extras ignored         |
//!
//! Rows may be separated by tabs or by runs of spaces, and rows pasted from a
//! diff may carry a leading `+`.

use std::fmt;

/// Map token written when a row does not carry one.
pub const DEFAULT_MAP_TOKEN: &str = "7";

const ENABLED_TOKENS: [&str; 5] = ["true", "1", "yes", "enabled", "on"];
const DISABLED_TOKENS: [&str; 5] = ["false", "0", "no", "disabled", "off"];

/// How one line of registry text was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Blank or `#` line, kept verbatim.
    Header(&'a str),
    /// A data row.  `cleaned` is the line after trimming and marker removal.
    Row { cleaned: &'a str, row: RawRow<'a> },
    /// Fewer than three tokens.
    Unparsable { cleaned: &'a str },
}

/// A data row in one of its historical shapes, tokens borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow<'a> {
    Short {
        zone_id: &'a str,
        x: &'a str,
        y: &'a str,
    },
    Legacy {
        zone_id: &'a str,
        x: &'a str,
        y: &'a str,
        enabled: &'a str,
    },
    Full {
        zone_id: &'a str,
        x: &'a str,
        y: &'a str,
        map: &'a str,
        enabled: &'a str,
    },
}

impl<'a> RawRow<'a> {
    /// Picks the row shape from the token count.  Returns `None` for fewer
    /// than three tokens.
    pub fn from_tokens(tokens: &[&'a str]) -> Option<Self> {
        match *tokens {
            [zone_id, x, y] => Some(RawRow::Short { zone_id, x, y }),
            [zone_id, x, y, enabled] => Some(RawRow::Legacy {
                zone_id,
                x,
                y,
                enabled,
            }),
            [zone_id, x, y, map, enabled, ..] => Some(RawRow::Full {
                zone_id,
                x,
                y,
                map,
                enabled,
            }),
            _ => None,
        }
    }

    pub fn zone_id(&self) -> &'a str {
        match *self {
            RawRow::Short { zone_id, .. }
            | RawRow::Legacy { zone_id, .. }
            | RawRow::Full { zone_id, .. } => zone_id,
        }
    }

    /// Returns `(x, y, map)` tokens, with the default map filled in.
    pub fn coordinates(&self) -> (&'a str, &'a str, &'a str) {
        match *self {
            RawRow::Short { x, y, .. } | RawRow::Legacy { x, y, .. } => (x, y, DEFAULT_MAP_TOKEN),
            RawRow::Full { x, y, map, .. } => (x, y, map),
        }
    }

    /// Canonical enabled flag for the row.
    pub fn enabled(&self) -> bool {
        match *self {
            RawRow::Short { .. } => true,
            RawRow::Legacy { enabled, .. } | RawRow::Full { enabled, .. } => {
                canonical_enabled(enabled)
            }
        }
    }

    /// Resolves the row into the canonical five-field form.
    pub fn normalize(&self) -> RegistryLine {
        let (x, y, map) = self.coordinates();
        RegistryLine {
            zone_id: self.zone_id().to_string(),
            x: x.to_string(),
            y: y.to_string(),
            map: map.to_string(),
            enabled: self.enabled(),
        }
    }
}

/// A normalised registry row.
///
/// Coordinates and map are kept as the text found in the file so that
/// rewriting the registry never alters values it does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryLine {
    pub zone_id: String,
    pub x: String,
    pub y: String,
    pub map: String,
    pub enabled: bool,
}

impl RegistryLine {
    pub fn new(zone_id: impl Into<String>, x: i32, y: i32, map: i32, enabled: bool) -> Self {
        Self {
            zone_id: zone_id.into(),
            x: x.to_string(),
            y: y.to_string(),
            map: map.to_string(),
            enabled,
        }
    }
}

impl fmt::Display for RegistryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.zone_id, self.x, self.y, self.map, self.enabled
        )
    }
}

/// Maps a free-form enabled token to a flag.
///
/// Recognised "off" spellings give `false`; everything else, including
/// unrecognised text, gives `true`.
pub fn canonical_enabled(token: &str) -> bool {
    let lowered = token.to_lowercase();
    if ENABLED_TOKENS.contains(&lowered.as_str()) {
        return true;
    }
    if DISABLED_TOKENS.contains(&lowered.as_str()) {
        return false;
    }
    true
}

/// Returns `true` for blank lines and `#` comments.
pub fn is_header(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

/// Trims a data line and removes one leading `+` diff marker.
pub fn clean_data_line(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_prefix('+').map_or(trimmed, str::trim)
}

/// Splits a cleaned data line into non-empty tokens.
///
/// Tabs are the separator when present; otherwise any run of whitespace.
pub fn tokenize(cleaned: &str) -> Vec<&str> {
    if cleaned.contains('\t') {
        cleaned
            .split('\t')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    } else {
        cleaned.split_whitespace().collect()
    }
}

/// Classifies and parses one line of registry text.
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    if is_header(line) {
        return ParsedLine::Header(line);
    }

    let cleaned = clean_data_line(line);
    let tokens = tokenize(cleaned);
    match RawRow::from_tokens(&tokens) {
        Some(row) => ParsedLine::Row { cleaned, row },
        None => ParsedLine::Unparsable { cleaned },
    }
}
