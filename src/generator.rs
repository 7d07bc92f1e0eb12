//! Heat generation via snake-draft distribution.
//!
//! # Algorithm
//!
//! 1. Order the roster (ranking source if installed, else input order).
//! 2. Fuse registered partner pairs into two-person units.
//! 3. Distribute units across heats with a snake draft (forward, then
//!    backward, repeating) so heat sizes stay balanced.
//! 4. Repair pass: relocate any unit that landed with a gear-sharing
//!    counterpart into the nearest conflict-free heat, swapping if no heat
//!    has room. An unresolvable conflict is a hard failure, never a
//!    silently invalid heat.
//! 5. Assign stands 1..k per heat; grouped stand types alternate sub-groups
//!    between consecutive heats so one group resets while the other runs.
//! 6. Dual-run events get a mirrored second run: identical groupings,
//!    stand assignments rotated by one so nobody repeats their stand.
//!
//! Generation is deterministic: identical roster and configuration produce
//! a structurally identical heat set. Regeneration wholly replaces the
//! previous result — there is no incremental patching.

use std::collections::HashSet;

use log::debug;

use crate::conflicts::ConflictRegistry;
use crate::error::ScheduleError;
use crate::models::{Competitor, EventSpec, Heat};
use crate::ranking::{self, RankingSource};
use crate::stands::{StandConfig, StandPlanner};

/// A draft unit: one competitor, or a partner pair placed together.
type Unit = Vec<String>;

/// Generates the heat list for one event.
///
/// # Example
///
/// ```
/// use heatflight::generator::HeatGenerator;
/// use heatflight::conflicts::ConflictRegistry;
/// use heatflight::models::{Competitor, EventSpec, Gender, ScoringType};
/// use heatflight::stands::StandPlanner;
///
/// let planner = StandPlanner::standard();
/// let event = EventSpec::new("underhand_m", "underhand", ScoringType::Time);
/// let roster: Vec<Competitor> = (1..=12)
///     .map(|n| Competitor::new(format!("C{n}"), Gender::M))
///     .collect();
/// let registry = ConflictRegistry::from_competitors(&roster);
///
/// let heats = HeatGenerator::new(&planner)
///     .generate(&event, &roster, &registry)
///     .unwrap();
/// assert_eq!(heats.len(), 3); // 12 competitors, 5 stands
/// ```
#[derive(Debug)]
pub struct HeatGenerator<'a> {
    stands: &'a StandPlanner,
    ranking: Option<&'a dyn RankingSource>,
}

impl<'a> HeatGenerator<'a> {
    /// Creates a generator over the given stand configuration.
    pub fn new(stands: &'a StandPlanner) -> Self {
        Self {
            stands,
            ranking: None,
        }
    }

    /// Installs an ability ranking source consulted for draft order.
    pub fn with_ranking(mut self, source: &'a dyn RankingSource) -> Self {
        self.ranking = Some(source);
        self
    }

    /// Generates all heats for an event from an active roster.
    ///
    /// The roster must already be filtered to active, non-scratched
    /// competitors (and to the event's gender for gendered events). An
    /// empty roster yields an empty heat set.
    pub fn generate(
        &self,
        event: &EventSpec,
        roster: &[Competitor],
        registry: &ConflictRegistry,
    ) -> Result<Vec<Heat>, ScheduleError> {
        let config = self
            .stands
            .config(&event.stand_type)
            .ok_or_else(|| ScheduleError::Configuration(event.stand_type.clone()))?;

        let capacity = effective_capacity(config);
        if capacity == 0 {
            return Err(ScheduleError::Configuration(event.stand_type.clone()));
        }
        if roster.is_empty() {
            return Ok(Vec::new());
        }

        let units = self.draft_units(event, roster, registry);
        let total: usize = units.iter().map(Vec::len).sum();
        let num_heats = total.div_ceil(capacity);

        debug!(
            "generating heats for '{}': {total} competitors, {num_heats} heats of {capacity}",
            event.id
        );

        // Within-unit gear conflicts (a partner pair that also shares gear)
        // cannot be repaired by moving the unit.
        for unit in &units {
            if unit.len() == 2 && registry.must_not_colocate(&unit[0], &unit[1], &event.id) {
                return Err(ScheduleError::Conflict {
                    a: unit[0].clone(),
                    b: unit[1].clone(),
                });
            }
        }

        let left_handed: HashSet<&str> = if config.supports_handedness {
            roster
                .iter()
                .filter(|c| c.left_handed)
                .map(|c| c.id.as_str())
                .collect()
        } else {
            HashSet::new()
        };

        let mut heats = self.place_units(units, num_heats, capacity, total, &left_handed)?;
        self.repair_conflicts(&mut heats, event, registry, capacity)?;

        Ok(self.assign_stands(event, config, capacity, &heats, &left_handed))
    }

    /// Orders the roster and fuses partner pairs into units.
    fn draft_units(
        &self,
        event: &EventSpec,
        roster: &[Competitor],
        registry: &ConflictRegistry,
    ) -> Vec<Unit> {
        let ids: Vec<&str> = roster.iter().map(|c| c.id.as_str()).collect();
        let present: HashSet<&str> = ids.iter().copied().collect();
        let order = ranking::draft_order(&ids, &event.id, self.ranking);

        let mut consumed: HashSet<String> = HashSet::new();
        let mut units = Vec::new();
        for i in order {
            let c = &roster[i];
            if consumed.contains(&c.id) {
                continue;
            }
            consumed.insert(c.id.clone());
            let mut unit = vec![c.id.clone()];
            if let Some(partner) = registry.partner_of(&c.id, &event.id) {
                if present.contains(partner) && !consumed.contains(partner) {
                    consumed.insert(partner.to_string());
                    unit.push(partner.to_string());
                }
            }
            units.push(unit);
        }
        units
    }

    /// Distributes units across heats: left-handed competitors round-robin
    /// first (one per heat, pinned to the dedicated stand later), then the
    /// rest by snake draft.
    fn place_units(
        &self,
        units: Vec<Unit>,
        num_heats: usize,
        capacity: usize,
        total: usize,
        left_handed: &HashSet<&str>,
    ) -> Result<Vec<Vec<Unit>>, ScheduleError> {
        let (pinned, rest): (Vec<Unit>, Vec<Unit>) = units
            .into_iter()
            .partition(|u| u.len() == 1 && left_handed.contains(u[0].as_str()));

        let mut heats: Vec<Vec<Unit>> = vec![Vec::new(); num_heats];
        for (i, unit) in pinned.into_iter().enumerate() {
            heats[i % num_heats].push(unit);
        }

        let mut idx = 0usize;
        let mut dir = 1i64;
        for (u_idx, unit) in rest.iter().enumerate() {
            let mut attempts = 0;
            while occupancy(&heats[idx]) + unit.len() > capacity {
                snake_advance(&mut idx, &mut dir, num_heats);
                attempts += 1;
                if attempts > 2 * num_heats {
                    let overflow = rest[u_idx..].iter().map(Vec::len).sum();
                    return Err(ScheduleError::Capacity {
                        roster: total,
                        capacity,
                        heats: num_heats,
                        overflow,
                    });
                }
            }
            heats[idx].push(unit.clone());
            snake_advance(&mut idx, &mut dir, num_heats);
        }
        Ok(heats)
    }

    /// Moves or swaps units until no heat contains a gear-sharing pair.
    fn repair_conflicts(
        &self,
        heats: &mut [Vec<Unit>],
        event: &EventSpec,
        registry: &ConflictRegistry,
        capacity: usize,
    ) -> Result<(), ScheduleError> {
        let total_units: usize = heats.iter().map(Vec::len).sum();
        let mut guard = 0;

        while let Some((h, ui, a, b)) = find_conflict(heats, event, registry) {
            guard += 1;
            if guard > total_units * heats.len() + 1 {
                return Err(ScheduleError::Conflict { a, b });
            }

            let unit = heats[h][ui].clone();

            // Nearest heat with room and no conflict for this unit.
            let relocation = nearest_heats(h, heats.len()).into_iter().find(|&t| {
                occupancy(&heats[t]) + unit.len() <= capacity
                    && !unit_conflicts_with_heat(&unit, &heats[t], event, registry)
            });
            if let Some(t) = relocation {
                heats[h].remove(ui);
                heats[t].push(unit);
                continue;
            }

            // No heat has room: look for a conflict-free swap partner.
            let swap = nearest_heats(h, heats.len()).into_iter().find_map(|t| {
                (0..heats[t].len()).find_map(|vi| {
                    let other = &heats[t][vi];
                    let here_fits =
                        occupancy(&heats[h]) - unit.len() + other.len() <= capacity;
                    let there_fits =
                        occupancy(&heats[t]) - other.len() + unit.len() <= capacity;
                    let unit_ok = !unit_conflicts_with_heat_except(
                        &unit, &heats[t], vi, event, registry,
                    );
                    let other_ok = !unit_conflicts_with_heat_except(
                        other, &heats[h], ui, event, registry,
                    );
                    (here_fits && there_fits && unit_ok && other_ok).then_some((t, vi))
                })
            });
            match swap {
                Some((t, vi)) => {
                    let other = std::mem::replace(&mut heats[t][vi], unit);
                    heats[h][ui] = other;
                }
                None => return Err(ScheduleError::Conflict { a, b }),
            }
        }
        Ok(())
    }

    /// Flattens units and assigns stand numbers; builds run-2 heats for
    /// dual-run events.
    fn assign_stands(
        &self,
        event: &EventSpec,
        config: &StandConfig,
        capacity: usize,
        heats: &[Vec<Unit>],
        left_handed: &HashSet<&str>,
    ) -> Vec<Heat> {
        let mut run1: Vec<Heat> = Vec::new();

        for (h, units) in heats.iter().enumerate() {
            let mut heat = Heat::new(&event.id, h as u32 + 1, 1);

            // Left-handed competitors lead so they land on the dedicated
            // first stand of the apparatus.
            let mut ordered: Vec<&str> = Vec::new();
            for unit in units {
                for id in unit {
                    if left_handed.contains(id.as_str()) {
                        ordered.insert(0, id);
                    } else {
                        ordered.push(id);
                    }
                }
            }

            let stand_numbers = heat_stand_numbers(config, capacity, h);
            for (i, id) in ordered.iter().enumerate() {
                heat.competitors.push((*id).to_string());
                heat.stands.insert((*id).to_string(), stand_numbers[i]);
            }
            run1.push(heat);
        }

        if !event.dual_run {
            return run1;
        }

        // Run 2: same groupings, stands rotated by one among non-pinned
        // competitors. Pinned handedness stands stay put.
        let mut run2: Vec<Heat> = Vec::new();
        for heat in &run1 {
            let mut second = Heat::new(&event.id, heat.heat_number, 2);
            second.competitors = heat.competitors.clone();

            let movable: Vec<&str> = heat
                .competitors
                .iter()
                .map(String::as_str)
                .filter(|id| !left_handed.contains(id))
                .collect();
            let old: Vec<u32> = movable.iter().map(|id| heat.stands[*id]).collect();
            if old.len() == 1 {
                // A lone movable competitor rotates onto a vacant stand of
                // the heat's group rather than back onto their own.
                let taken: HashSet<u32> = heat
                    .competitors
                    .iter()
                    .filter(|id| left_handed.contains(id.as_str()))
                    .map(|id| heat.stands[id])
                    .collect();
                let available =
                    heat_stand_numbers(config, capacity, heat.heat_number as usize - 1);
                let next = available
                    .iter()
                    .copied()
                    .find(|s| *s != old[0] && !taken.contains(s))
                    .unwrap_or(old[0]);
                second.stands.insert(movable[0].to_string(), next);
            } else {
                for (i, id) in movable.iter().enumerate() {
                    second
                        .stands
                        .insert((*id).to_string(), old[(i + 1) % old.len()]);
                }
            }
            for id in &heat.competitors {
                if left_handed.contains(id.as_str()) {
                    second.stands.insert(id.clone(), heat.stands[id]);
                }
            }
            run2.push(second);
        }

        run1.extend(run2);
        run1
    }
}

/// Per-heat capacity: the smallest rotating sub-group when stands run in
/// groups, otherwise the full stand count.
fn effective_capacity(config: &StandConfig) -> usize {
    if config.groups.is_empty() {
        config.capacity as usize
    } else {
        config.groups.iter().map(Vec::len).min().unwrap_or(0)
    }
}

/// Stand numbers available to heat `h` (0-based). Grouped stand types
/// alternate sub-groups between consecutive heats.
fn heat_stand_numbers(config: &StandConfig, capacity: usize, h: usize) -> Vec<u32> {
    if config.groups.is_empty() {
        (1..=capacity as u32).collect()
    } else {
        config.groups[h % config.groups.len()].clone()
    }
}

fn occupancy(units: &[Unit]) -> usize {
    units.iter().map(Vec::len).sum()
}

/// Snake draft step: forward to the last heat, then backward to the first,
/// repeating. End heats are revisited once on each turn.
fn snake_advance(idx: &mut usize, dir: &mut i64, n: usize) {
    let next = *idx as i64 + *dir;
    if next >= n as i64 {
        *dir = -1;
        *idx = n - 1;
    } else if next < 0 {
        *dir = 1;
        *idx = 0;
    } else {
        *idx = next as usize;
    }
}

/// Other heat indices ordered by distance from `h` (lower index first on
/// ties), so repairs disturb the draft as little as possible.
fn nearest_heats(h: usize, n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).filter(|&t| t != h).collect();
    order.sort_by_key(|&t| (t.abs_diff(h), t));
    order
}

/// First gear-sharing collision between two distinct units of one heat.
/// Returns the heat, the index of the later unit, and the colliding pair.
fn find_conflict(
    heats: &[Vec<Unit>],
    event: &EventSpec,
    registry: &ConflictRegistry,
) -> Option<(usize, usize, String, String)> {
    for (h, units) in heats.iter().enumerate() {
        for (i, u1) in units.iter().enumerate() {
            for (j, u2) in units.iter().enumerate().skip(i + 1) {
                for a in u1 {
                    for b in u2 {
                        if registry.must_not_colocate(a, b, &event.id) {
                            return Some((h, j, a.clone(), b.clone()));
                        }
                    }
                }
            }
        }
    }
    None
}

fn unit_conflicts_with_heat(
    unit: &Unit,
    heat: &[Unit],
    event: &EventSpec,
    registry: &ConflictRegistry,
) -> bool {
    heat.iter().any(|other| {
        unit.iter().any(|a| {
            other
                .iter()
                .any(|b| registry.must_not_colocate(a, b, &event.id))
        })
    })
}

/// Like [`unit_conflicts_with_heat`], ignoring the unit at `skip` (the swap
/// partner that is about to leave).
fn unit_conflicts_with_heat_except(
    unit: &Unit,
    heat: &[Unit],
    skip: usize,
    event: &EventSpec,
    registry: &ConflictRegistry,
) -> bool {
    heat.iter().enumerate().any(|(i, other)| {
        i != skip
            && unit.iter().any(|a| {
                other
                    .iter()
                    .any(|b| registry.must_not_colocate(a, b, &event.id))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, ScoringType};
    use std::collections::BTreeSet;

    fn roster_of(n: usize) -> Vec<Competitor> {
        (1..=n)
            .map(|i| Competitor::new(format!("C{i}"), Gender::M))
            .collect()
    }

    fn event(id: &str, stand_type: &str) -> EventSpec {
        EventSpec::new(id, stand_type, ScoringType::Time)
    }

    #[test]
    fn test_capacity_and_bijection() {
        let planner = StandPlanner::standard();
        let roster = roster_of(12);
        let registry = ConflictRegistry::from_competitors(&roster);
        let heats = HeatGenerator::new(&planner)
            .generate(&event("underhand_m", "underhand"), &roster, &registry)
            .unwrap();

        assert_eq!(heats.len(), 3);
        for heat in &heats {
            assert!(heat.competitor_count() <= 5);
            // Bijection: distinct stands, one per competitor, all in 1..=5.
            let stands: BTreeSet<u32> = heat.stands.values().copied().collect();
            assert_eq!(stands.len(), heat.competitor_count());
            assert!(stands.iter().all(|&s| (1..=5).contains(&s)));
        }
        // Everyone placed exactly once.
        let placed: Vec<&String> = heats.iter().flat_map(|h| &h.competitors).collect();
        assert_eq!(placed.len(), 12);
    }

    #[test]
    fn test_snake_draft_balances_heats() {
        let planner = StandPlanner::standard();
        let roster = roster_of(11);
        let registry = ConflictRegistry::from_competitors(&roster);
        let heats = HeatGenerator::new(&planner)
            .generate(&event("underhand_m", "underhand"), &roster, &registry)
            .unwrap();

        // 11 into 3 heats: sizes differ by at most one.
        let sizes: Vec<usize> = heats.iter().map(Heat::competitor_count).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 11);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
    }

    #[test]
    fn test_partner_pairs_stay_together() {
        let planner = StandPlanner::standard();
        let mut roster = roster_of(10);
        roster[0] = roster[0].clone().with_partner("double_buck", "C6");
        roster[2] = roster[2].clone().with_partner("double_buck", "C8");
        let registry = ConflictRegistry::from_competitors(&roster);
        let spec = event("double_buck", "saw_hand");
        let heats = HeatGenerator::new(&planner)
            .generate(&spec, &roster, &registry)
            .unwrap();

        for (a, b) in [("C1", "C6"), ("C3", "C8")] {
            let heat_a = heats.iter().position(|h| h.contains(a)).unwrap();
            let heat_b = heats.iter().position(|h| h.contains(b)).unwrap();
            assert_eq!(heat_a, heat_b, "{a} and {b} split across heats");
        }
    }

    #[test]
    fn test_gear_sharing_pair_separated() {
        let planner = StandPlanner::standard();
        let mut roster = roster_of(4);
        roster[0] = roster[0].clone().with_gear_sharing("hot_saw_e", "C2");
        let registry = ConflictRegistry::from_competitors(&roster);
        // Capacity 4 would put all four in one heat; the shared saw forces
        // a second heat to exist only if generation had more heats. With
        // one heat there is no repair target.
        let err = HeatGenerator::new(&planner)
            .generate(&event("hot_saw_e", "hot_saw"), &roster, &registry)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Conflict { .. }));
    }

    #[test]
    fn test_gear_sharing_repair_moves_to_other_heat() {
        let planner = StandPlanner::standard();
        let mut roster = roster_of(4);
        // Stock saw: capacity 2, so 4 competitors → 2 heats. The snake puts
        // C1,C4 in heat 1 and C2,C3 in heat 2; make C1/C4 share gear.
        roster[0] = roster[0].clone().with_gear_sharing("stock_m", "C4");
        let registry = ConflictRegistry::from_competitors(&roster);
        let heats = HeatGenerator::new(&planner)
            .generate(&event("stock_m", "stock_saw"), &roster, &registry)
            .unwrap();

        for heat in &heats {
            assert!(
                !(heat.contains("C1") && heat.contains("C4")),
                "gear-sharing pair co-resident in heat {}",
                heat.heat_number
            );
        }
    }

    #[test]
    fn test_unknown_stand_type_is_configuration_error() {
        let planner = StandPlanner::standard();
        let roster = roster_of(2);
        let registry = ConflictRegistry::from_competitors(&roster);
        let err = HeatGenerator::new(&planner)
            .generate(&event("mystery", "bungee"), &roster, &registry)
            .unwrap_err();
        assert_eq!(err, ScheduleError::Configuration("bungee".into()));
    }

    #[test]
    fn test_partner_pair_exceeding_capacity_is_capacity_error() {
        let planner = StandPlanner::standard();
        // Axe throw has a single target: a fused pair can never fit.
        let mut roster = roster_of(2);
        roster[0] = roster[0].clone().with_partner("axe_p", "C2");
        let registry = ConflictRegistry::from_competitors(&roster);
        let err = HeatGenerator::new(&planner)
            .generate(&event("axe_p", "axe_throw"), &roster, &registry)
            .unwrap_err();
        match err {
            ScheduleError::Capacity { overflow, .. } => assert_eq!(overflow, 2),
            other => panic!("expected capacity error, got {other:?}"),
        }
    }

    #[test]
    fn test_dual_run_same_groupings_rotated_stands() {
        let planner = StandPlanner::standard();
        let roster = roster_of(4);
        let registry = ConflictRegistry::from_competitors(&roster);
        let spec = event("chokerman_m", "chokerman").dual_run();
        let heats = HeatGenerator::new(&planner)
            .generate(&spec, &roster, &registry)
            .unwrap();

        let run1: Vec<&Heat> = heats.iter().filter(|h| h.run_number == 1).collect();
        let run2: Vec<&Heat> = heats.iter().filter(|h| h.run_number == 2).collect();
        assert_eq!(run1.len(), 2);
        assert_eq!(run2.len(), 2);

        for (first, second) in run1.iter().zip(run2.iter()) {
            assert_eq!(first.heat_number, second.heat_number);
            assert_eq!(first.competitors, second.competitors);
            for id in &first.competitors {
                assert_ne!(
                    first.stand_for(id),
                    second.stand_for(id),
                    "{id} repeated a stand across runs"
                );
            }
        }
    }

    #[test]
    fn test_dual_run_singleton_heat_still_changes_stand() {
        let planner = StandPlanner::standard();
        // 3 competitors on a capacity-2 stand type leave one heat with a
        // single competitor; that competitor must still move for run 2.
        let roster = roster_of(3);
        let registry = ConflictRegistry::from_competitors(&roster);
        let spec = event("chokerman_m", "chokerman").dual_run();
        let heats = HeatGenerator::new(&planner)
            .generate(&spec, &roster, &registry)
            .unwrap();

        let run1: Vec<&Heat> = heats.iter().filter(|h| h.run_number == 1).collect();
        let run2: Vec<&Heat> = heats.iter().filter(|h| h.run_number == 2).collect();
        assert!(run1.iter().any(|h| h.competitor_count() == 1));

        for (first, second) in run1.iter().zip(run2.iter()) {
            for id in &first.competitors {
                assert_ne!(
                    first.stand_for(id),
                    second.stand_for(id),
                    "{id} repeated a stand across runs (heat {})",
                    first.heat_number
                );
            }
        }
    }

    #[test]
    fn test_springboard_left_handed_pinned_and_spread() {
        let planner = StandPlanner::standard();
        let mut roster = roster_of(8);
        roster[3] = roster[3].clone().left_handed();
        roster[6] = roster[6].clone().left_handed();
        let registry = ConflictRegistry::from_competitors(&roster);
        let heats = HeatGenerator::new(&planner)
            .generate(&event("springboard", "springboard"), &roster, &registry)
            .unwrap();

        assert_eq!(heats.len(), 2);
        // One left-handed cutter per heat, both on the dedicated dummy.
        for heat in &heats {
            let lh: Vec<&str> = heat
                .competitors
                .iter()
                .filter(|id| *id == "C4" || *id == "C7")
                .map(String::as_str)
                .collect();
            assert_eq!(lh.len(), 1);
            assert_eq!(heat.stand_for(lh[0]), Some(1));
        }
    }

    #[test]
    fn test_saw_heats_alternate_groups() {
        let planner = StandPlanner::standard();
        let roster = roster_of(8);
        let registry = ConflictRegistry::from_competitors(&roster);
        let heats = HeatGenerator::new(&planner)
            .generate(&event("single_buck_m", "saw_hand"), &roster, &registry)
            .unwrap();

        // 8 competitors at 4 per group → 2 heats on alternating groups.
        assert_eq!(heats.len(), 2);
        let first: BTreeSet<u32> = heats[0].stands.values().copied().collect();
        let second: BTreeSet<u32> = heats[1].stands.values().copied().collect();
        assert!(first.iter().all(|s| (1..=4).contains(s)));
        assert!(second.iter().all(|s| (5..=8).contains(s)));
    }

    #[test]
    fn test_ranking_source_drives_draft_order() {
        use crate::ranking::RankingSource;

        #[derive(Debug)]
        struct SingleRank(&'static str);

        impl RankingSource for SingleRank {
            fn name(&self) -> &'static str {
                "single"
            }

            fn rank(&self, competitor_id: &str, _event_id: &str) -> Option<i64> {
                (competitor_id == self.0).then_some(1)
            }
        }

        let planner = StandPlanner::standard();
        let roster = roster_of(6);
        let registry = ConflictRegistry::from_competitors(&roster);
        let spec = event("underhand_m", "underhand");

        // Unranked: input order puts C6 in the second heat.
        let heats = HeatGenerator::new(&planner)
            .generate(&spec, &roster, &registry)
            .unwrap();
        assert!(heats[1].contains("C6"));

        // Ranked first overall, C6 is the opening snake pick of heat 1.
        let ranks = SingleRank("C6");
        let heats = HeatGenerator::new(&planner)
            .with_ranking(&ranks)
            .generate(&spec, &roster, &registry)
            .unwrap();
        assert!(heats[0].contains("C6"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let planner = StandPlanner::standard();
        let mut roster = roster_of(13);
        roster[1] = roster[1].clone().with_gear_sharing("underhand_m", "C7");
        let registry = ConflictRegistry::from_competitors(&roster);
        let spec = event("underhand_m", "underhand");
        let gen = HeatGenerator::new(&planner);

        let first = gen.generate(&spec, &roster, &registry).unwrap();
        let second = gen.generate(&spec, &roster, &registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_roster_yields_no_heats() {
        let planner = StandPlanner::standard();
        let registry = ConflictRegistry::new();
        let heats = HeatGenerator::new(&planner)
            .generate(&event("underhand_m", "underhand"), &[], &registry)
            .unwrap();
        assert!(heats.is_empty());
    }
}
