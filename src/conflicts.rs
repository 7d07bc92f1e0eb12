//! Conflict registry: partner and gear-sharing relation graphs.
//!
//! Registration records carry partner and gear-sharing relations as small
//! per-competitor lists. This module normalizes them into two undirected
//! relation graphs keyed by (competitor, event), so constraint checks during
//! heat generation are O(1) lookups rather than re-derivations from raw
//! registration data.
//!
//! The registry is a pure lookup utility: no mutable state after
//! construction, no side effects, and absence of a relation is a valid
//! `false` answer, never a failure.

use std::collections::HashMap;

use crate::models::Competitor;

/// Partner ("must co-locate") and gear-sharing ("must not co-locate")
/// lookups for a competitor set.
#[derive(Debug, Clone, Default)]
pub struct ConflictRegistry {
    /// (competitor, event) → registered partner.
    partners: HashMap<(String, String), String>,
    /// (competitor, event) → gear-sharing counterpart.
    gear: HashMap<(String, String), String>,
}

impl ConflictRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from competitor registration records.
    ///
    /// Relations are inserted in both directions, so a one-sided
    /// registration still answers symmetrically. Asymmetric declarations
    /// are surfaced by [`crate::validation::validate_roster`], not here.
    pub fn from_competitors(competitors: &[Competitor]) -> Self {
        let mut registry = Self::new();
        for c in competitors {
            for (event_id, partner_id) in &c.partners {
                registry.add_partnership(event_id, &c.id, partner_id);
            }
            for (event_id, sharer_id) in &c.gear_sharing {
                registry.add_gear_sharing(event_id, &c.id, sharer_id);
            }
        }
        registry
    }

    /// Registers a partnership for an event (undirected).
    pub fn add_partnership(&mut self, event_id: &str, a: &str, b: &str) {
        self.partners
            .insert((a.to_string(), event_id.to_string()), b.to_string());
        self.partners
            .insert((b.to_string(), event_id.to_string()), a.to_string());
    }

    /// Registers a gear-sharing relation for an event (undirected).
    pub fn add_gear_sharing(&mut self, event_id: &str, a: &str, b: &str) {
        self.gear
            .insert((a.to_string(), event_id.to_string()), b.to_string());
        self.gear
            .insert((b.to_string(), event_id.to_string()), a.to_string());
    }

    /// True iff `a` and `b` are registered partners for the event.
    pub fn must_colocate(&self, a: &str, b: &str, event_id: &str) -> bool {
        self.partner_of(a, event_id) == Some(b)
    }

    /// True iff `a` and `b` share gear for the event and therefore cannot
    /// be scheduled into the same heat.
    pub fn must_not_colocate(&self, a: &str, b: &str, event_id: &str) -> bool {
        self.gear_sharer_of(a, event_id) == Some(b)
    }

    /// The registered partner of `a` for the event, if any.
    pub fn partner_of(&self, a: &str, event_id: &str) -> Option<&str> {
        self.partners
            .get(&(a.to_string(), event_id.to_string()))
            .map(String::as_str)
    }

    /// The gear-sharing counterpart of `a` for the event, if any.
    pub fn gear_sharer_of(&self, a: &str, event_id: &str) -> Option<&str> {
        self.gear
            .get(&(a.to_string(), event_id.to_string()))
            .map(String::as_str)
    }
}
