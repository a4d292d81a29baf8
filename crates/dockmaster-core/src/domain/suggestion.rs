//! Suggestions and the registry changes they request.
//!
//! A [`Suggestion`] is what a player submits and an admin approves.  It is
//! loosely typed (coordinates are optional because a removal has none), so
//! before it touches the registry it is converted into a [`RegistryChange`],
//! which can only represent well-formed requests.
//!
//! [`Suggestion::describe`] produces the branch name, commit message and pull
//! request text that accompany the regenerated registry file.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entry::DEFAULT_MAP;

/// Errors raised when a suggestion cannot be turned into a registry change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("suggestion is missing a zone ID")]
    MissingZoneId,

    #[error("add suggestion for {zone_id} is missing coordinates")]
    MissingCoordinates { zone_id: String },
}

/// What the suggestion asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionAction {
    Add,
    Remove,
}

impl SuggestionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionAction::Add => "add",
            SuggestionAction::Remove => "remove",
        }
    }

    /// Capitalised form used in commit messages and PR titles.
    pub fn title(&self) -> &'static str {
        match self {
            SuggestionAction::Add => "Add",
            SuggestionAction::Remove => "Remove",
        }
    }
}

/// An approved change request from the suggestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub action: SuggestionAction,
    pub zone_id: String,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub map: Option<i32>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_name: Option<String>,
}

/// A single validated edit to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChange {
    /// Append a new entry.
    Add {
        zone_id: String,
        x: i32,
        y: i32,
        map: i32,
        enabled: bool,
    },
    /// Drop every entry whose zone ID is exactly `zone_id`.
    Remove { zone_id: String },
}

impl RegistryChange {
    pub fn zone_id(&self) -> &str {
        match self {
            RegistryChange::Add { zone_id, .. } | RegistryChange::Remove { zone_id } => zone_id,
        }
    }
}

/// Text that accompanies a published registry revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeDescription {
    pub branch_name: String,
    pub commit_message: String,
    pub title: String,
    pub body: String,
}

impl Suggestion {
    /// Builds an `add` suggestion with default map and enabled flags.
    pub fn add(zone_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: None,
            action: SuggestionAction::Add,
            zone_id: zone_id.into(),
            x: Some(x),
            y: Some(y),
            map: None,
            enabled: None,
            reason: String::new(),
            submitter_name: None,
        }
    }

    /// Builds a `remove` suggestion.
    pub fn remove(zone_id: impl Into<String>) -> Self {
        Self {
            id: None,
            action: SuggestionAction::Remove,
            zone_id: zone_id.into(),
            x: None,
            y: None,
            map: None,
            enabled: None,
            reason: String::new(),
            submitter_name: None,
        }
    }

    /// Converts the suggestion into a [`RegistryChange`].
    ///
    /// `map` defaults to 7 and `enabled` to `true` for additions.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::MissingZoneId`] for a blank zone ID and
    /// [`SuggestionError::MissingCoordinates`] for an `add` without both
    /// coordinates.
    pub fn to_change(&self) -> Result<RegistryChange, SuggestionError> {
        if self.zone_id.trim().is_empty() {
            return Err(SuggestionError::MissingZoneId);
        }

        match self.action {
            SuggestionAction::Add => {
                let (Some(x), Some(y)) = (self.x, self.y) else {
                    return Err(SuggestionError::MissingCoordinates {
                        zone_id: self.zone_id.clone(),
                    });
                };
                Ok(RegistryChange::Add {
                    zone_id: self.zone_id.clone(),
                    x,
                    y,
                    map: self.map.unwrap_or(DEFAULT_MAP),
                    enabled: self.enabled.unwrap_or(true),
                })
            }
            SuggestionAction::Remove => Ok(RegistryChange::Remove {
                zone_id: self.zone_id.clone(),
            }),
        }
    }

    /// Branch, commit and pull request text for this suggestion.
    pub fn describe(&self) -> ChangeDescription {
        let action = self.action.title();
        let short_id = match self.id {
            Some(id) => id.simple().to_string()[..8].to_string(),
            None => "local".to_string(),
        };

        let branch_name = format!(
            "suggestion-{short_id}-{}-{}",
            self.action.as_str(),
            self.zone_id
        );

        let reason = self.reason.trim();
        let mut commit_message = format!("{action} DM {}", self.zone_id);
        if !reason.is_empty() {
            commit_message.push_str(": ");
            commit_message.push_str(reason);
        }

        let mut body = format!(
            "## Dockmaster Suggestion\n\n**Action**: {action}\n**Zone ID**: {}\n**Reason**: {reason}\n",
            self.zone_id
        );
        if self.action == SuggestionAction::Add {
            let coord = |c: Option<i32>| c.map_or_else(|| "?".to_string(), |v| v.to_string());
            body.push_str(&format!(
                "\n**Coordinates**: X={}, Y={}, Map={}\n**Enabled**: {}\n",
                coord(self.x),
                coord(self.y),
                self.map.unwrap_or(DEFAULT_MAP),
                self.enabled.unwrap_or(true)
            ));
        }
        if let Some(name) = &self.submitter_name {
            body.push_str(&format!("\n**Submitted by**: {name}\n"));
        }
        match self.id {
            Some(id) => body.push_str(&format!("\n*Auto-generated from suggestion #{id}*\n")),
            None => body.push_str("\n*Auto-generated from a local suggestion*\n"),
        }

        ChangeDescription {
            branch_name,
            commit_message,
            title: format!("{action} Dockmaster {}", self.zone_id),
            body,
        }
    }
}
