//! Flight construction: greedy interleaving of heats across events.
//!
//! # Algorithm
//!
//! Maintains the last-placement index of every competitor. At each step,
//! candidate heats are those not yet placed whose stand type is not
//! mutually exclusive with anything already in the flight being filled.
//! Eligible candidates keep every competitor at or above the minimum rest
//! spacing; among them the builder prefers the one closest to the *target*
//! spacing (over-spacing wastes show time), breaking ties toward event
//! variety, then run-pair completion, then input order. When nothing is
//! eligible, the least-violating heat is placed and the violation recorded
//! as a warning — a valid-but-suboptimal schedule always beats no schedule.
//!
//! The builder never fails: every input heat appears in the output exactly
//! once, and regeneration recomputes the whole plan from scratch.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::{EventSpec, Flight, FlightPlan, Heat, HeatRef, SpacingWarning};
use crate::ranking::RankingSource;
use crate::stands::StandPlanner;

/// Default number of heats per flight.
pub const DEFAULT_FLIGHT_SIZE: usize = 8;
/// Default minimum heats between a competitor's appearances.
pub const DEFAULT_MIN_SPACING: usize = 4;
/// Default target spacing the builder steers toward.
pub const DEFAULT_TARGET_SPACING: usize = 5;

/// One heat offered to the flight builder, denormalized with the event
/// facts the greedy ordering needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHeat {
    /// Owning event ID.
    pub event_id: String,
    /// Stand type the heat runs on.
    pub stand_type: String,
    /// Heat number within the event.
    pub heat_number: u32,
    /// Run number (1 or 2).
    pub run_number: u32,
    /// Whether the owning event is dual-run (couples run 1 and run 2).
    pub dual_run: bool,
    /// Competitor IDs in the heat.
    pub competitors: Vec<String>,
}

impl SessionHeat {
    /// Builds a session heat from a generated heat and its event spec.
    pub fn from_heat(event: &EventSpec, heat: &Heat) -> Self {
        Self {
            event_id: heat.event_id.clone(),
            stand_type: event.stand_type.clone(),
            heat_number: heat.heat_number,
            run_number: heat.run_number,
            dual_run: event.dual_run,
            competitors: heat.competitors.clone(),
        }
    }

    fn heat_ref(&self) -> HeatRef {
        HeatRef {
            event_id: self.event_id.clone(),
            heat_number: self.heat_number,
            run_number: self.run_number,
        }
    }
}

/// Greedy flight builder with rest-spacing and stand-exclusion constraints.
///
/// # Example
///
/// ```
/// use heatflight::flights::FlightBuilder;
/// use heatflight::stands::StandPlanner;
///
/// let builder = FlightBuilder::new()
///     .with_flight_size(6)
///     .with_min_spacing(3)
///     .with_target_spacing(4);
/// let plan = builder.build(&[], &StandPlanner::standard());
/// assert!(plan.flights.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FlightBuilder<'a> {
    flight_size: usize,
    min_spacing: usize,
    target_spacing: usize,
    ranking: Option<&'a dyn RankingSource>,
}

impl Default for FlightBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FlightBuilder<'a> {
    /// Creates a builder with the default parameters (8 heats per flight,
    /// minimum spacing 4, target spacing 5).
    pub fn new() -> Self {
        Self {
            flight_size: DEFAULT_FLIGHT_SIZE,
            min_spacing: DEFAULT_MIN_SPACING,
            target_spacing: DEFAULT_TARGET_SPACING,
            ranking: None,
        }
    }

    /// Installs an ability ranking source: among otherwise-equal
    /// candidates, heats containing stronger-ranked competitors run first.
    pub fn with_ranking(mut self, source: &'a dyn RankingSource) -> Self {
        self.ranking = Some(source);
        self
    }

    /// Sets the flight size.
    pub fn with_flight_size(mut self, size: usize) -> Self {
        self.flight_size = size.max(1);
        self
    }

    /// Sets the minimum spacing.
    pub fn with_min_spacing(mut self, spacing: usize) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Sets the target spacing.
    pub fn with_target_spacing(mut self, spacing: usize) -> Self {
        self.target_spacing = spacing;
        self
    }

    /// Orders all session heats and groups them into flights.
    ///
    /// Always produces a complete ordering covering every input heat
    /// exactly once; spacing problems become warnings on the plan, never
    /// errors.
    pub fn build(&self, heats: &[SessionHeat], stands: &StandPlanner) -> FlightPlan {
        let mut plan = FlightPlan::default();
        if heats.is_empty() {
            return plan;
        }
        debug!(
            "building flights: {} heats, flight size {}, spacing {}..{}",
            heats.len(),
            self.flight_size,
            self.min_spacing,
            self.target_spacing
        );

        let mut remaining: Vec<usize> = (0..heats.len()).collect();
        let mut last_pos: HashMap<&str, usize> = HashMap::new();
        let mut prev_event: Option<&str> = None;
        let mut position = 0usize;

        let mut current = Flight::new(1);
        let mut current_stand_types: HashSet<&str> = HashSet::new();

        while !remaining.is_empty() {
            // A run-2 heat may not run before its run-1 twin.
            let run_order_blocked = |i: usize| {
                let h = &heats[i];
                h.dual_run
                    && h.run_number == 2
                    && remaining.iter().any(|&j| {
                        heats[j].event_id == h.event_id
                            && heats[j].heat_number == h.heat_number
                            && heats[j].run_number == 1
                    })
            };
            let candidates: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&i| {
                    !run_order_blocked(i)
                        && !current_stand_types
                            .iter()
                            .any(|t| stands.mutually_exclusive(t, &heats[i].stand_type))
                })
                .collect();

            // Everything left is excluded by this flight's stand types:
            // close the flight early and retry with a fresh one.
            if candidates.is_empty() {
                let number = current.flight_number;
                plan.flights.push(std::mem::replace(&mut current, Flight::new(number + 1)));
                current_stand_types.clear();
                continue;
            }

            let chosen = self.select(heats, &candidates, &last_pos, position, prev_event, &current, &remaining);
            let heat = &heats[chosen];

            // Record any under-spaced appearances this placement creates.
            for id in &heat.competitors {
                if let Some(&earlier) = last_pos.get(id.as_str()) {
                    let gap = position - earlier;
                    if gap < self.min_spacing {
                        warn!(
                            "spacing violation: {id} gap {gap} < {} at heat position {position}",
                            self.min_spacing
                        );
                        plan.warnings.push(SpacingWarning {
                            competitor_id: id.clone(),
                            earlier_position: earlier,
                            later_position: position,
                            gap,
                            required: self.min_spacing,
                        });
                    }
                }
            }

            for id in &heat.competitors {
                last_pos.insert(id.as_str(), position);
            }
            prev_event = Some(&heat.event_id);
            position += 1;
            current.heats.push(heat.heat_ref());
            current_stand_types.insert(heat.stand_type.as_str());
            remaining.retain(|&i| i != chosen);

            if current.heats.len() >= self.flight_size {
                let number = current.flight_number;
                plan.flights.push(std::mem::replace(&mut current, Flight::new(number + 1)));
                current_stand_types.clear();
            }
        }

        if !current.heats.is_empty() {
            plan.flights.push(current);
        }
        plan
    }

    /// Picks the next heat among non-excluded candidates.
    #[allow(clippy::too_many_arguments)]
    fn select(
        &self,
        heats: &[SessionHeat],
        candidates: &[usize],
        last_pos: &HashMap<&str, usize>,
        position: usize,
        prev_event: Option<&str>,
        current: &Flight,
        remaining: &[usize],
    ) -> usize {
        let min_gap = |i: usize| -> Option<usize> {
            heats[i]
                .competitors
                .iter()
                .filter_map(|id| last_pos.get(id.as_str()).map(|&p| position - p))
                .min()
        };

        let completes_pending_pair = |i: usize| {
            let h = &heats[i];
            h.dual_run
                && h.run_number == 2
                && current.heats.iter().any(|r| {
                    r.event_id == h.event_id
                        && r.heat_number == h.heat_number
                        && r.run_number == 1
                })
        };

        let boundary_slot = current.heats.len() + 1 == self.flight_size;

        // At the last slot of a flight, a run-1 heat already placed in the
        // flight pulls its run-2 twin in so the pair is never split across
        // the boundary when that is avoidable.
        if boundary_slot {
            if let Some(&completer) = candidates.iter().find(|&&i| completes_pending_pair(i)) {
                return completer;
            }
        }

        let mut eligible: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| min_gap(i).is_none_or(|g| g >= self.min_spacing))
            .collect();

        // Symmetrically, avoid *starting* a pair at the last slot if any
        // alternative exists.
        if boundary_slot && eligible.len() > 1 {
            let splits_pair = |i: usize| {
                let h = &heats[i];
                h.dual_run
                    && h.run_number == 1
                    && remaining.iter().any(|&j| {
                        j != i
                            && heats[j].event_id == h.event_id
                            && heats[j].heat_number == h.heat_number
                            && heats[j].run_number == 2
                    })
            };
            let keep: Vec<usize> = eligible
                .iter()
                .copied()
                .filter(|&i| !splits_pair(i))
                .collect();
            if !keep.is_empty() {
                eligible = keep;
            }
        }

        // Strongest rank present in the heat; no source or no opinion
        // degrades to a neutral value, leaving input order untouched.
        let heat_rank = |i: usize| -> i64 {
            match self.ranking {
                Some(source) => heats[i]
                    .competitors
                    .iter()
                    .filter_map(|id| source.rank(id, &heats[i].event_id))
                    .min()
                    .unwrap_or(i64::MAX),
                None => i64::MAX,
            }
        };

        let tie_breaks = |i: usize| -> (usize, usize, i64, usize) {
            let different_event = usize::from(prev_event == Some(heats[i].event_id.as_str()));
            // Completing a dual-run pair whose run 1 already sits in this
            // flight keeps the pair together.
            let completes_pair = usize::from(!completes_pending_pair(i));
            (different_event, completes_pair, heat_rank(i), i)
        };

        if !eligible.is_empty() {
            // Closest to the target spacing wins; all-fresh heats have no
            // constrained competitors and count as on-target.
            return eligible
                .iter()
                .copied()
                .min_by_key(|&i| {
                    let distance = min_gap(i)
                        .map(|g| g.abs_diff(self.target_spacing))
                        .unwrap_or(0);
                    let (ev, pair, rank, idx) = tie_breaks(i);
                    (distance, ev, pair, rank, idx)
                })
                .unwrap_or(candidates[0]);
        }

        // Nothing eligible: least-violating heat (largest minimum gap).
        candidates
            .iter()
            .copied()
            .max_by_key(|&i| {
                let gap = min_gap(i).unwrap_or(usize::MAX);
                let (ev, pair, rank, idx) = tie_breaks(i);
                // Reverse the tie-break sense for max_by_key.
                (
                    gap,
                    usize::MAX - ev,
                    usize::MAX - pair,
                    Reverse(rank),
                    usize::MAX - idx,
                )
            })
            .unwrap_or(candidates[0])
    }
}

/// Recomputes spacing warnings for an already-ordered heat sequence.
///
/// Audit counterpart to [`FlightBuilder::build`]: callers that rearrange
/// flights by hand can re-validate the result against the same rule.
pub fn audit_spacing(ordered: &[&SessionHeat], min_spacing: usize) -> Vec<SpacingWarning> {
    let mut last_pos: HashMap<&str, usize> = HashMap::new();
    let mut warnings = Vec::new();
    for (position, heat) in ordered.iter().enumerate() {
        for id in &heat.competitors {
            if let Some(&earlier) = last_pos.get(id.as_str()) {
                let gap = position - earlier;
                if gap < min_spacing {
                    warnings.push(SpacingWarning {
                        competitor_id: id.clone(),
                        earlier_position: earlier,
                        later_position: position,
                        gap,
                        required: min_spacing,
                    });
                }
            }
            last_pos.insert(id.as_str(), position);
        }
    }
    warnings
}
