//! Error taxonomy for the scheduling engine.
//!
//! Errors are structured values describing the kind of failure and the
//! offending entities. The engine never partially mutates caller-visible
//! state before failing: every operation returns either a complete result
//! or one of these errors. Spacing problems in flight building are *not*
//! errors — they are [`crate::models::SpacingWarning`]s on the plan.

use thiserror::Error;

/// Failures produced by the scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Missing or invalid stand/event configuration. Fatal; the caller must
    /// fix the configuration and re-invoke.
    #[error("no stand configuration for stand type '{0}'")]
    Configuration(String),

    /// The roster cannot fit within the available heats even after
    /// redistribution.
    #[error(
        "roster of {roster} does not fit {heats} heats of capacity {capacity} \
         ({overflow} unplaced)"
    )]
    Capacity {
        /// Total competitors on the roster.
        roster: usize,
        /// Per-heat capacity.
        capacity: usize,
        /// Number of heats available.
        heats: usize,
        /// Competitors left without a slot.
        overflow: usize,
    },

    /// A gear-sharing pair could not be separated into different heats.
    #[error("unresolvable gear-sharing conflict between '{a}' and '{b}'")]
    Conflict {
        /// First competitor of the colliding pair.
        a: String,
        /// Second competitor of the colliding pair.
        b: String,
    },

    /// Seed list size or shape unsupported for bracket construction.
    #[error("unsupported bracket field: {0}")]
    BracketStructure(String),

    /// A result was recorded against a match ID the bracket does not contain.
    #[error("match '{0}' not found in bracket")]
    UnknownMatch(String),

    /// A result was recorded against a match that is not ready (slots
    /// unfilled) or already decided.
    #[error("match '{0}' is not ready for a result")]
    MatchNotReady(String),

    /// The reported winner is not one of the match's competitors.
    #[error("competitor '{competitor}' is not in match '{match_id}'")]
    NotInMatch {
        /// The match the result targeted.
        match_id: String,
        /// The reported winner.
        competitor: String,
    },
}
