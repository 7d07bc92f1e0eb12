//! Heat model.
//!
//! A heat is one timed/scored group of competitors performing an event
//! simultaneously on separate stands. Heats are produced fresh by each
//! generation call; regeneration wholly replaces the prior set.
//!
//! The competitor list is the single authoritative representation of heat
//! membership — the stand map is keyed by the same IDs and is rebuilt
//! whenever membership changes, never written independently.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Execution status of a heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatStatus {
    /// Not yet run.
    #[default]
    Pending,
    /// Currently on the stands.
    InProgress,
    /// Scored and done.
    Completed,
}

/// One heat of an event.
///
/// Invariants (guaranteed by the generator):
/// - competitor count ≤ the stand type's capacity
/// - every registered partner pair is co-resident
/// - no gear-sharing pair is co-resident
/// - `stands` is a bijection from the competitors present onto valid stand
///   numbers for the event's stand type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heat {
    /// Owning event ID.
    pub event_id: String,
    /// Heat number within the event (1-based).
    pub heat_number: u32,
    /// Run number, 1 or 2 (2 only for dual-run events).
    pub run_number: u32,
    /// Competitor IDs in draft order.
    pub competitors: Vec<String>,
    /// Stand assignment: competitor ID → stand number (1-based).
    pub stands: HashMap<String, u32>,
    /// Execution status.
    pub status: HeatStatus,
}

impl Heat {
    /// Creates an empty pending heat.
    pub fn new(event_id: impl Into<String>, heat_number: u32, run_number: u32) -> Self {
        Self {
            event_id: event_id.into(),
            heat_number,
            run_number,
            competitors: Vec::new(),
            stands: HashMap::new(),
            status: HeatStatus::Pending,
        }
    }

    /// Number of competitors in this heat.
    pub fn competitor_count(&self) -> usize {
        self.competitors.len()
    }

    /// Stand number assigned to a competitor, if present.
    pub fn stand_for(&self, competitor_id: &str) -> Option<u32> {
        self.stands.get(competitor_id).copied()
    }

    /// Whether a competitor is in this heat.
    pub fn contains(&self, competitor_id: &str) -> bool {
        self.competitors.iter().any(|c| c == competitor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_accessors() {
        let mut h = Heat::new("underhand_m", 1, 1);
        h.competitors.push("C1".into());
        h.competitors.push("C2".into());
        h.stands.insert("C1".into(), 1);
        h.stands.insert("C2".into(), 2);

        assert_eq!(h.competitor_count(), 2);
        assert_eq!(h.stand_for("C2"), Some(2));
        assert_eq!(h.stand_for("C9"), None);
        assert!(h.contains("C1"));
        assert!(!h.contains("C9"));
        assert_eq!(h.status, HeatStatus::Pending);
    }
}
