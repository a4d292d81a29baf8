//! Applying a change to the registry text.
//!
//! # How it works (for beginners)
//!
//! The registry is a plain-text file edited by hand as well as by this tool,
//! so it arrives in mixed shapes.  Rather than patching the file line by line,
//! we:
//!
//! 1. Parse it into a [`RegistryDocument`]: header lines kept verbatim, data
//!    rows normalised into [`RegistryLine`]s.
//! 2. Apply the [`RegistryChange`] to the in-memory rows.
//! 3. Optionally sort and deduplicate.
//! 4. Render: headers first, then rows, one per line, with a trailing newline.
//!
//! Comments that were interleaved with data therefore move to the top of the
//! file.  Coordinates that are not integers are passed through unchanged and
//! reported with a warning.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::suggestion::RegistryChange;
use crate::registry::line::{parse_line, ParsedLine, RawRow, RegistryLine};
use crate::registry::sort::sort_zone_id;

/// Default lower bound on the line count produced by [`full_format_fix`].
pub const DEFAULT_MIN_LINES: usize = 10;

/// Errors produced when rewriting the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The rewrite would leave fewer lines than the configured minimum,
    /// which usually means the input was truncated.
    #[error("refusing to write registry: output has {produced} lines, minimum is {minimum}")]
    SafetyCheckFailed { produced: usize, minimum: usize },
}

/// Options for [`full_format_fix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatFixOptions {
    /// Sort data rows with [`sort_zone_id`].
    pub sort: bool,
    /// Drop rows that repeat an earlier row exactly.
    pub dedupe: bool,
    /// Minimum number of output lines, headers included.
    pub min_lines: usize,
}

impl Default for FormatFixOptions {
    fn default() -> Self {
        Self {
            sort: false,
            dedupe: true,
            min_lines: DEFAULT_MIN_LINES,
        }
    }
}

// ── RegistryDocument ──────────────────────────────────────────────────────────

/// Parsed registry: verbatim headers plus normalised rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDocument {
    headers: Vec<String>,
    lines: Vec<RegistryLine>,
}

impl RegistryDocument {
    /// Parses registry text.  Lines with fewer than three tokens are dropped.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();

        for (index, raw) in text.trim().lines().enumerate() {
            match parse_line(raw) {
                ParsedLine::Header(header) => doc.headers.push(header.to_string()),
                ParsedLine::Row { row, .. } => {
                    warn_on_non_numeric(index + 1, &row);
                    doc.lines.push(row.normalize());
                }
                ParsedLine::Unparsable { cleaned } => {
                    debug!(line_number = index + 1, line = cleaned, "dropping short registry line");
                }
            }
        }

        doc
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn lines(&self) -> &[RegistryLine] {
        &self.lines
    }

    /// Applies a change to the rows.
    ///
    /// `Add` appends a row without checking for an existing ID.  `Remove`
    /// drops every row whose zone ID is exactly the given one.
    pub fn apply(&mut self, change: &RegistryChange) {
        match change {
            RegistryChange::Add {
                zone_id,
                x,
                y,
                map,
                enabled,
            } => {
                self.lines
                    .push(RegistryLine::new(zone_id.clone(), *x, *y, *map, *enabled));
            }
            RegistryChange::Remove { zone_id } => {
                let before = self.lines.len();
                self.lines.retain(|line| line.zone_id != *zone_id);
                let removed = before - self.lines.len();
                if removed == 0 {
                    debug!(zone_id = %zone_id, "remove matched no registry rows");
                }
            }
        }
    }

    /// Stable sort of the rows by zone ID.
    pub fn sort(&mut self) {
        self.lines.sort_by_key(|line| sort_zone_id(&line.zone_id));
    }

    /// Drops exact repeats, keeping the first occurrence.
    pub fn dedupe(&mut self) {
        let mut seen: HashSet<RegistryLine> = HashSet::with_capacity(self.lines.len());
        self.lines.retain(|line| seen.insert(line.clone()));
    }

    /// Number of lines [`render`](Self::render) will emit.
    pub fn line_count(&self) -> usize {
        self.headers.len() + self.lines.len()
    }

    /// Renders headers then rows, newline-separated, with a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rows = self.lines.iter().map(ToString::to_string);
        let all: Vec<String> = self.headers.iter().cloned().chain(rows).collect();
        out.push_str(&all.join("\n"));
        out.push('\n');
        out
    }
}

fn warn_on_non_numeric(line_number: usize, row: &RawRow<'_>) {
    let (x, y, map) = row.coordinates();
    for (field, token) in [("x", x), ("y", y), ("map", map)] {
        if token.parse::<i32>().is_err() {
            warn!(
                line_number,
                zone_id = row.zone_id(),
                field,
                value = token,
                "non-numeric registry field kept verbatim"
            );
        }
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

/// Applies `change` to the registry text and returns the rewritten text.
///
/// All rows come out in the canonical five-field form, sorted by zone ID.
pub fn reconcile(current_text: &str, change: &RegistryChange) -> String {
    let mut doc = RegistryDocument::parse(current_text);
    doc.apply(change);
    doc.sort();
    doc.render()
}

/// Normalises the whole registry, optionally applying a change first.
///
/// Sorting is controlled by `options.sort`, deduplication by
/// `options.dedupe`.
///
/// # Errors
///
/// Returns [`ReconcileError::SafetyCheckFailed`] when the result has fewer
/// than `options.min_lines` lines.
pub fn full_format_fix(
    current_text: &str,
    change: Option<&RegistryChange>,
    options: &FormatFixOptions,
) -> Result<String, ReconcileError> {
    let mut doc = RegistryDocument::parse(current_text);
    if let Some(change) = change {
        doc.apply(change);
    }
    if options.dedupe {
        doc.dedupe();
    }
    if options.sort {
        doc.sort();
    }

    let produced = doc.line_count();
    if produced < options.min_lines {
        return Err(ReconcileError::SafetyCheckFailed {
            produced,
            minimum: options.min_lines,
        });
    }

    Ok(doc.render())
}
