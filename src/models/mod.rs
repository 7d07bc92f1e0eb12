//! Scheduling domain models.
//!
//! Core data types for the competition scheduling engine: competitors and
//! their registration relations, event specifications, heats, and flights.
//! All types are plain in-memory records — persistence and wire formats are
//! the caller's concern.

mod competitor;
mod event;
mod flight;
mod heat;

pub use competitor::{Competitor, CompetitorStatus, Gender};
pub use event::{EventSpec, PartnerRule, ScoringType};
pub use flight::{Flight, FlightPlan, HeatRef, SpacingWarning};
pub use heat::{Heat, HeatStatus};
