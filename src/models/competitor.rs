//! Competitor model.
//!
//! A competitor is the unit placed into heats and bracket slots. The engine
//! never persists competitors — the caller supplies a snapshot per scheduling
//! call and owns the records afterwards.

use serde::{Deserialize, Serialize};

/// Competitor gender, used for gendered events and bracket segregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Men's field.
    M,
    /// Women's field.
    F,
}

/// Registration status. Scratched competitors are expected to be filtered
/// out before heat generation; the flag travels with the record so callers
/// can do that filtering uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompetitorStatus {
    /// Competing.
    #[default]
    Active,
    /// Withdrawn from the competition.
    Scratched,
}

/// A competitor entered in one or more events.
///
/// Partner and gear-sharing relations are ordered small lists keyed by
/// event ID. They are the raw registration data; constraint queries go
/// through [`crate::conflicts::ConflictRegistry`], which builds proper
/// relation graphs from these lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    /// Unique competitor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Partner relations: (event ID, partner competitor ID).
    pub partners: Vec<(String, String)>,
    /// Gear-sharing relations: (event ID, sharing competitor ID).
    pub gear_sharing: Vec<(String, String)>,
    /// Left-handed on handedness-constrained apparatus (e.g. springboard).
    pub left_handed: bool,
    /// Registration status.
    pub status: CompetitorStatus,
}

impl Competitor {
    /// Creates an active competitor with the given ID.
    pub fn new(id: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            gender,
            partners: Vec::new(),
            gear_sharing: Vec::new(),
            left_handed: false,
            status: CompetitorStatus::Active,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a partner for an event.
    pub fn with_partner(mut self, event_id: impl Into<String>, partner_id: impl Into<String>) -> Self {
        self.partners.push((event_id.into(), partner_id.into()));
        self
    }

    /// Registers a gear-sharing counterpart for an event.
    pub fn with_gear_sharing(
        mut self,
        event_id: impl Into<String>,
        sharer_id: impl Into<String>,
    ) -> Self {
        self.gear_sharing.push((event_id.into(), sharer_id.into()));
        self
    }

    /// Marks the competitor as left-handed.
    pub fn left_handed(mut self) -> Self {
        self.left_handed = true;
        self
    }

    /// Marks the competitor as scratched.
    pub fn scratched(mut self) -> Self {
        self.status = CompetitorStatus::Scratched;
        self
    }

    /// Whether the competitor is active (not scratched).
    pub fn is_active(&self) -> bool {
        self.status == CompetitorStatus::Active
    }

    /// Partner for a specific event, if registered.
    pub fn partner_for(&self, event_id: &str) -> Option<&str> {
        self.partners
            .iter()
            .find(|(e, _)| e == event_id)
            .map(|(_, p)| p.as_str())
    }

    /// Gear-sharing counterpart for a specific event, if registered.
    pub fn gear_sharer_for(&self, event_id: &str) -> Option<&str> {
        self.gear_sharing
            .iter()
            .find(|(e, _)| e == event_id)
            .map(|(_, p)| p.as_str())
    }
}
