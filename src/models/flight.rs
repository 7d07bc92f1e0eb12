//! Flight and flight plan models.
//!
//! A flight is an ordered group of heats, drawn from possibly different
//! events, run back-to-back as one show segment. The flight plan is the
//! complete output of the flight builder: every flight in show order plus
//! any spacing warnings the greedy ordering could not avoid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reference to a heat placed in a flight.
///
/// Flights reference heats rather than owning them; the heat set produced
/// by the generator remains the authoritative record of heat composition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeatRef {
    /// Owning event ID.
    pub event_id: String,
    /// Heat number within the event.
    pub heat_number: u32,
    /// Run number (1 or 2).
    pub run_number: u32,
}

/// One flight: an ordered sequence of heat references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    /// Flight number in show order (1-based).
    pub flight_number: u32,
    /// Heats in running order.
    pub heats: Vec<HeatRef>,
}

impl Flight {
    /// Creates an empty flight.
    pub fn new(flight_number: u32) -> Self {
        Self {
            flight_number,
            heats: Vec::new(),
        }
    }

    /// Number of heats in this flight.
    pub fn heat_count(&self) -> usize {
        self.heats.len()
    }

    /// Count of distinct events represented in this flight.
    pub fn event_variety(&self) -> usize {
        self.heats
            .iter()
            .map(|h| h.event_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// A competitor scheduled with less than the minimum rest between two
/// appearances. Non-fatal: the builder always emits a complete ordering
/// and annotates what it could not avoid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingWarning {
    /// Affected competitor.
    pub competitor_id: String,
    /// Position of the earlier appearance in the overall heat order (0-based).
    pub earlier_position: usize,
    /// Position of the later appearance.
    pub later_position: usize,
    /// Actual number of intervening heats plus one (`later - earlier`).
    pub gap: usize,
    /// The minimum that was required.
    pub required: usize,
}

/// Complete output of the flight builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Flights in show order.
    pub flights: Vec<Flight>,
    /// Spacing violations the ordering could not avoid.
    pub warnings: Vec<SpacingWarning>,
}

impl FlightPlan {
    /// Whether the plan meets all spacing requirements.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Total number of heats across all flights.
    pub fn heat_count(&self) -> usize {
        self.flights.iter().map(Flight::heat_count).sum()
    }

    /// All heat references in overall show order.
    pub fn ordered_heats(&self) -> impl Iterator<Item = &HeatRef> {
        self.flights.iter().flat_map(|f| f.heats.iter())
    }
}
