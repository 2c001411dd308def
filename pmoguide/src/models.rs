//! Data models for the TV guide catalog
//!
//! This module contains the channel, program and group structures shared by
//! the catalog, the schedule resolver and the REST API.

use serde::{Deserialize, Serialize};

/// Label of the synthetic group matching every channel
pub const ALL_GROUP: &str = "all";

/// One scheduled slot in a channel's daily grid
///
/// Times are zero-padded `"HH:MM:SS"` wall-clock strings. Zero padding keeps
/// lexicographic order aligned with chronological order within one day, so
/// the resolver can compare them as plain strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "pmoserver", derive(utoipa::ToSchema))]
pub struct Program {
    /// Display name of the slot
    pub name: String,
    /// Start of the slot, `"HH:MM:SS"`
    pub start_time: String,
    /// End of the slot, `"HH:MM:SS"`; `"00:00:00"` means end of day
    pub end_time: String,
}

impl Program {
    /// Create a new program slot
    pub fn new(
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// A named content stream with a fixed daily schedule and group memberships
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "pmoserver", derive(utoipa::ToSchema))]
pub struct Channel {
    /// Stable slug identifier (e.g. "cinema", "news24")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Icon path served under `/public`
    pub icon: String,
    /// Group labels this channel belongs to
    pub groups: Vec<String>,
    /// Daily grid covering exactly one full day
    pub program: Vec<Program>,
}

impl Channel {
    /// Create a channel with no groups and an empty grid
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            groups: Vec::new(),
            program: Vec::new(),
        }
    }

    /// Add a group membership
    pub fn with_group(mut self, label: impl Into<String>) -> Self {
        self.groups.push(label.into());
        self
    }

    /// Append a slot to the daily grid
    pub fn with_slot(mut self, name: &str, start_time: &str, end_time: &str) -> Self {
        self.program.push(Program::new(name, start_time, end_time));
        self
    }

    /// Check membership in a group
    pub fn in_group(&self, label: &str) -> bool {
        self.groups.iter().any(|g| g == label)
    }
}

/// A group label used to filter channels
///
/// Groups are derived, not stored: the set of distinct labels across all
/// channels, plus the synthetic [`ALL_GROUP`]. Id and name are both the
/// label itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "pmoserver", derive(utoipa::ToSchema))]
pub struct Group {
    pub id: String,
    pub name: String,
}

impl Group {
    /// Build a group from its label
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            name: label,
        }
    }
}

/// A program resolved against a concrete calendar date
///
/// Start and end are full ISO-8601 local date-time strings
/// (`YYYY-MM-DDTHH:MM:SS`), placed on today or tomorrow by the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "pmoserver", derive(utoipa::ToSchema))]
pub struct ResolvedProgram {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// The currently airing program and the one following it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "pmoserver", derive(utoipa::ToSchema))]
pub struct ProgramWindow {
    pub current: ResolvedProgram,
    pub next: ResolvedProgram,
}

/// One channel as returned by group queries
///
/// `program` is serialized only when the caller asked for schedule
/// resolution; otherwise the field is omitted entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "pmoserver", derive(utoipa::ToSchema))]
pub struct ChannelListing {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<ProgramWindow>,
}
