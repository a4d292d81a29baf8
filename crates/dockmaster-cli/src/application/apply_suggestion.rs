//! ApplySuggestionUseCase: turn an approved suggestion into a new registry.
//!
//! # Flow
//!
//! ```text
//! Suggestion ──► validate zone ID (add only) ──► RegistryChange
//!                                                      │
//! registry.fetch() ──► reconcile(text, change) ──► registry.publish(text, description)
//! ```
//!
//! Nothing is published when the rewritten text equals the current text, or
//! when the caller asks for a dry run.

use dockmaster_core::{
    reconcile, validate_dockmaster_id, ChangeDescription, ReconcileError, Suggestion,
    SuggestionAction, SuggestionError, ZoneIdError,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::infrastructure::registry::{RegistryError, RegistrySource};

/// Errors from applying a suggestion or rewriting the registry.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("invalid zone ID: {0}")]
    ZoneId(#[from] ZoneIdError),

    #[error("incomplete suggestion: {0}")]
    Suggestion(#[from] SuggestionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// What a registry rewrite produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub description: ChangeDescription,
    /// Rewritten registry text.
    pub text: String,
    /// `false` for dry runs and for rewrites that changed nothing.
    pub published: bool,
}

/// Publishes `text` unless it is unchanged or `dry_run` is set.
pub(crate) fn publish_if_changed<R: RegistrySource + ?Sized>(
    registry: &R,
    current: &str,
    text: String,
    description: ChangeDescription,
    dry_run: bool,
) -> Result<ApplyOutcome, RegistryError> {
    let published = if text == current {
        info!(branch = %description.branch_name, "registry already up to date");
        false
    } else if dry_run {
        info!(branch = %description.branch_name, "dry run, registry not written");
        false
    } else {
        registry.publish(&text, &description)?;
        true
    };

    Ok(ApplyOutcome {
        description,
        text,
        published,
    })
}

/// Applies `suggestion` to the registry.
///
/// For an add, the zone ID is normalised first (`"xd-11"` becomes `"XD11"`),
/// so new rows always carry the canonical form.  A remove uses the zone ID
/// verbatim: it must equal the first field of the rows to drop, and the
/// registry holds IDs such as `M1` or `GH` that have no canonical form.
///
/// # Errors
///
/// - [`ApplyError::ZoneId`] when an added zone ID cannot be normalised.
/// - [`ApplyError::Suggestion`] when an add lacks coordinates.
/// - [`ApplyError::Registry`] when fetching or publishing fails.
pub fn apply_suggestion<R: RegistrySource + ?Sized>(
    registry: &R,
    suggestion: &Suggestion,
    dry_run: bool,
) -> Result<ApplyOutcome, ApplyError> {
    let mut suggestion = suggestion.clone();
    if suggestion.action == SuggestionAction::Add {
        suggestion.zone_id = validate_dockmaster_id(&suggestion.zone_id)?;
    }
    let change = suggestion.to_change()?;

    let current = registry.fetch()?;
    let text = reconcile(&current, &change);
    info!(
        action = suggestion.action.as_str(),
        zone_id = %suggestion.zone_id,
        "reconciled registry"
    );

    Ok(publish_if_changed(
        registry,
        &current,
        text,
        suggestion.describe(),
        dry_run,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::registry::mock::InMemoryRegistry;
    use crate::infrastructure::registry::MockRegistrySource;

    const REGISTRY: &str = "XD7\t3393\t3356\t7\ttrue\n";

    #[test]
    fn test_apply_add_publishes_reconciled_registry() {
        // Arrange
        let registry = InMemoryRegistry::new(REGISTRY);
        let suggestion = Suggestion::add("xd-11", 3000, 4000);

        // Act
        let outcome = apply_suggestion(&registry, &suggestion, false).expect("apply");

        // Assert
        assert!(outcome.published);
        assert_eq!(
            registry.text(),
            "XD7\t3393\t3356\t7\ttrue\nXD11\t3000\t4000\t7\ttrue\n"
        );
        let published = registry.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Add Dockmaster XD11");
    }

    #[test]
    fn test_apply_remove_restores_original() {
        let registry = InMemoryRegistry::new(REGISTRY);
        apply_suggestion(&registry, &Suggestion::add("XD11", 3000, 4000), false).expect("add");

        apply_suggestion(&registry, &Suggestion::remove("XD11"), false).expect("remove");

        assert_eq!(registry.text(), REGISTRY);
        assert_eq!(registry.published().len(), 2);
    }

    #[test]
    fn test_dry_run_leaves_registry_untouched() {
        let registry = InMemoryRegistry::new(REGISTRY);

        let outcome =
            apply_suggestion(&registry, &Suggestion::add("XD11", 3000, 4000), true).expect("apply");

        assert!(!outcome.published);
        assert!(outcome.text.contains("XD11"));
        assert_eq!(registry.text(), REGISTRY);
        assert!(registry.published().is_empty());
    }

    #[test]
    fn test_unchanged_registry_is_not_published() {
        let registry = InMemoryRegistry::new(REGISTRY);

        let outcome =
            apply_suggestion(&registry, &Suggestion::remove("XD99"), false).expect("apply");

        assert!(!outcome.published);
        assert!(registry.published().is_empty());
    }

    #[test]
    fn test_invalid_zone_id_is_rejected_before_fetch() {
        // Arrange: fetch must never be called.
        let mut registry = MockRegistrySource::new();
        registry.expect_fetch().times(0);

        // Act
        let result = apply_suggestion(&registry, &Suggestion::add("The Gym", 3000, 4000), false);

        // Assert
        assert!(matches!(result, Err(ApplyError::ZoneId(_))));
    }

    #[test]
    fn test_remove_marker_without_canonical_form() {
        // Arrange
        let registry = InMemoryRegistry::new("XD7\t3393\t3356\t7\ttrue\nM1\t100\t100\t7\ttrue\n");

        // Act
        let outcome = apply_suggestion(&registry, &Suggestion::remove("M1"), false).expect("remove");

        // Assert
        assert!(outcome.published);
        assert_eq!(registry.text(), REGISTRY);
        assert_eq!(registry.published()[0].commit_message, "Remove DM M1");
    }

    #[test]
    fn test_remove_matches_zone_id_case_sensitively() {
        let registry = InMemoryRegistry::new("1a-e\t3499\t1127\t7\ttrue\n1A-E\t3500\t1128\t7\ttrue\n");

        let outcome = apply_suggestion(&registry, &Suggestion::remove("1a-e"), false).expect("remove");

        assert!(outcome.published);
        assert_eq!(registry.text(), "1A-E\t3500\t1128\t7\ttrue\n");
    }

    #[test]
    fn test_remove_of_special_id_is_applied() {
        let registry = InMemoryRegistry::new("The Gym\t10\t20\t7\ttrue\nXD7\t3393\t3356\t7\ttrue\n");

        apply_suggestion(&registry, &Suggestion::remove("The Gym"), false).expect("remove");

        assert_eq!(registry.text(), REGISTRY);
    }

    #[test]
    fn test_add_without_coordinates_is_rejected() {
        let registry = InMemoryRegistry::new(REGISTRY);
        let mut suggestion = Suggestion::add("XD11", 0, 0);
        suggestion.y = None;

        let result = apply_suggestion(&registry, &suggestion, false);

        assert!(matches!(result, Err(ApplyError::Suggestion(_))));
    }

    #[test]
    fn test_publish_failure_is_propagated() {
        // Arrange
        let mut registry = MockRegistrySource::new();
        registry
            .expect_fetch()
            .returning(|| Ok(REGISTRY.to_string()));
        registry
            .expect_publish()
            .times(1)
            .returning(|_, _| Err(RegistryError::Rejected("read-only".to_string())));

        // Act
        let result = apply_suggestion(&registry, &Suggestion::add("XD11", 3000, 4000), false);

        // Assert
        assert!(matches!(
            result,
            Err(ApplyError::Registry(RegistryError::Rejected(_)))
        ));
    }
}
