//! Event specification model.
//!
//! An `EventSpec` carries everything the heat generator needs to know about
//! one event: which stand type it runs on, whether it is partnered and under
//! what gender-pairing rule, whether it is scored over two runs, and whether
//! the field is gender-segregated.

use serde::{Deserialize, Serialize};

use super::Gender;

/// Gender-pairing rule for partnered events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerRule {
    /// Both partners must be the same gender (e.g. Double Buck).
    SameGender,
    /// Partners must be opposite genders (e.g. Jack & Jill Sawing).
    MixedGender,
    /// No gender constraint on the pair.
    Any,
}

/// How an event is scored. Carried as metadata for the caller's scoring
/// subsystem; the scheduling engine does not interpret it except that
/// `Bracket` events are driven by [`crate::bracket::Bracket`] rather than
/// heat generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringType {
    /// Fastest time wins.
    Time,
    /// Most hits wins.
    Hits,
    /// Longest distance wins.
    Distance,
    /// Judged score.
    Score,
    /// Head-to-head elimination bracket.
    Bracket,
}

/// Configuration for a single event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSpec {
    /// Unique event identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Stand type this event runs on (key into the stand planner).
    pub stand_type: String,
    /// Scoring method.
    pub scoring: ScoringType,
    /// Whether the event is scored over two separate runs (best counted).
    pub dual_run: bool,
    /// Partner rule, if the event is partnered.
    pub partnered: Option<PartnerRule>,
    /// Restricts the field to one gender, if set.
    pub gendered: Option<Gender>,
}

impl EventSpec {
    /// Creates a new event spec.
    pub fn new(
        id: impl Into<String>,
        stand_type: impl Into<String>,
        scoring: ScoringType,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            stand_type: stand_type.into(),
            scoring,
            dual_run: false,
            partnered: None,
            gendered: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the event as dual-run.
    pub fn dual_run(mut self) -> Self {
        self.dual_run = true;
        self
    }

    /// Marks the event as partnered under the given rule.
    pub fn partnered(mut self, rule: PartnerRule) -> Self {
        self.partnered = Some(rule);
        self
    }

    /// Restricts the field to one gender.
    pub fn gendered(mut self, gender: Gender) -> Self {
        self.gendered = Some(gender);
        self
    }

    /// Whether the event is partnered.
    pub fn is_partnered(&self) -> bool {
        self.partnered.is_some()
    }
}
