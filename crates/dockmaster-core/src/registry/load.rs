//! Reading the registry into typed [`DockmasterEntry`] values.
//!
//! Unlike [`reconcile`](super::reconcile), which must preserve every row, the
//! loader skips rows it cannot type and reports each one as a
//! [`LineDiagnostic`] so callers can surface them.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entry::DockmasterEntry;
use crate::registry::line::{parse_line, ParsedLine, RawRow};

/// Why one registry line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiagnostic {
    /// 1-based, counted after trimming the whole text.
    pub line_number: usize,
    pub raw: String,
    pub cleaned: String,
    pub reason: String,
}

/// Outcome of [`load_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub entries: Vec<DockmasterEntry>,
    pub diagnostics: Vec<LineDiagnostic>,
}

fn parse_field(field: &str, token: &str) -> Result<i32, String> {
    token
        .parse::<i32>()
        .map_err(|e| format!("invalid {field} '{token}': {e}"))
}

fn to_entry(row: &RawRow<'_>) -> Result<DockmasterEntry, String> {
    let (x, y, map) = row.coordinates();
    let mut entry = DockmasterEntry::new(
        row.zone_id(),
        parse_field("x", x)?,
        parse_field("y", y)?,
    );
    entry.map = parse_field("map", map)?;
    entry.enabled = row.enabled();
    Ok(entry)
}

/// Parses registry text into entries, in file order.
///
/// Header lines and lines with fewer than three tokens are skipped silently.
/// Rows whose x, y or map is not an integer are skipped with a diagnostic.
pub fn load_entries(text: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut total = 0usize;

    for (index, raw) in text.trim().lines().enumerate() {
        total += 1;
        let ParsedLine::Row { cleaned, row } = parse_line(raw) else {
            continue;
        };

        match to_entry(&row) {
            Ok(entry) => report.entries.push(entry),
            Err(reason) => {
                warn!(line_number = index + 1, line = cleaned, %reason, "skipping registry line");
                report.diagnostics.push(LineDiagnostic {
                    line_number: index + 1,
                    raw: raw.to_string(),
                    cleaned: cleaned.to_string(),
                    reason,
                });
            }
        }
    }

    info!(
        entries = report.entries.len(),
        lines = total,
        skipped = report.diagnostics.len(),
        "loaded dockmaster registry"
    );
    report
}
