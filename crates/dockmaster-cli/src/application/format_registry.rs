//! FormatRegistryUseCase: rewrite the whole registry in canonical form.

use dockmaster_core::{full_format_fix, ChangeDescription, FormatFixOptions};

use super::apply_suggestion::{publish_if_changed, ApplyError, ApplyOutcome};
use crate::infrastructure::registry::RegistrySource;

fn format_fix_description(options: &FormatFixOptions) -> ChangeDescription {
    let mut body = String::from(
        "## Registry Format Fix\n\nEvery row rewritten as `zone_id\\tx\\ty\\tmap\\tenabled`.\n",
    );
    if options.dedupe {
        body.push_str("Exact duplicate rows removed.\n");
    }
    if options.sort {
        body.push_str("Rows sorted by zone ID.\n");
    }
    body.push_str("\n*Auto-generated registry format fix*\n");

    ChangeDescription {
        branch_name: "format-fix-registry".to_string(),
        commit_message: "Fix DM registry format".to_string(),
        title: "Fix Dockmaster registry format".to_string(),
        body,
    }
}

/// Normalises the registry and publishes the result.
///
/// # Errors
///
/// - [`ApplyError::Reconcile`] when the output fails the minimum line check.
///   Nothing is published in that case.
/// - [`ApplyError::Registry`] when fetching or publishing fails.
pub fn format_registry<R: RegistrySource + ?Sized>(
    registry: &R,
    options: &FormatFixOptions,
    dry_run: bool,
) -> Result<ApplyOutcome, ApplyError> {
    let current = registry.fetch()?;
    let text = full_format_fix(&current, None, options)?;
    Ok(publish_if_changed(
        registry,
        &current,
        text,
        format_fix_description(options),
        dry_run,
    )?)
}
