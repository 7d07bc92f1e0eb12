//! Stand planner: physical stand configuration per stand type.
//!
//! Maps each stand type to its capacity, handedness support, rotating
//! sub-groups (e.g. eight saw stands split into two groups of four so one
//! group resets while the other competes), display labels, and the set of
//! other stand types it mutually excludes (two events sharing the same
//! physical stands can never run heats concurrently).
//!
//! Configuration is static per competition, supplied at construction, and
//! never mutated after load.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Configuration for one stand type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandConfig {
    /// Total number of stands.
    pub capacity: u32,
    /// Rotating sub-groups of stand numbers. Empty when all stands run
    /// every heat.
    pub groups: Vec<Vec<u32>>,
    /// Whether the apparatus has a dedicated left-handed slot.
    pub supports_handedness: bool,
    /// Display labels, one per stand.
    pub labels: Vec<String>,
    /// Stand types that cannot run concurrently with this one.
    pub excludes: Vec<String>,
}

impl StandConfig {
    /// Creates a config with the given capacity and default labels.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            labels: (1..=capacity).map(|n| format!("Stand {n}")).collect(),
            ..Self::default()
        }
    }

    /// Sets rotating sub-groups.
    pub fn with_groups(mut self, groups: Vec<Vec<u32>>) -> Self {
        self.groups = groups;
        self
    }

    /// Marks the apparatus as handedness-constrained.
    pub fn with_handedness(mut self) -> Self {
        self.supports_handedness = true;
        self
    }

    /// Sets display labels.
    pub fn with_labels(mut self, labels: Vec<&str>) -> Self {
        self.labels = labels.into_iter().map(String::from).collect();
        self
    }

    /// Adds a mutually-excluded stand type.
    pub fn excluding(mut self, stand_type: &str) -> Self {
        self.excludes.push(stand_type.to_string());
        self
    }
}

/// Lookup table of stand configurations for a competition.
#[derive(Debug, Clone, Default)]
pub struct StandPlanner {
    configs: HashMap<String, StandConfig>,
}

impl StandPlanner {
    /// Creates an empty planner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stand type configuration. Exclusions are made symmetric:
    /// if `a` excludes `b`, `b` excludes `a` once both are inserted.
    pub fn with_stand_type(mut self, stand_type: &str, config: StandConfig) -> Self {
        for other in config.excludes.clone() {
            if let Some(other_cfg) = self.configs.get_mut(&other) {
                if !other_cfg.excludes.iter().any(|e| e == stand_type) {
                    other_cfg.excludes.push(stand_type.to_string());
                }
            }
        }
        self.configs.insert(stand_type.to_string(), config);
        self
    }

    /// Full configuration for a stand type.
    pub fn config(&self, stand_type: &str) -> Option<&StandConfig> {
        self.configs.get(stand_type)
    }

    /// Stand capacity for a stand type.
    pub fn capacity(&self, stand_type: &str) -> Option<u32> {
        self.config(stand_type).map(|c| c.capacity)
    }

    /// Rotating sub-groups for a stand type (empty slice when ungrouped).
    pub fn groups(&self, stand_type: &str) -> &[Vec<u32>] {
        self.config(stand_type).map(|c| c.groups.as_slice()).unwrap_or(&[])
    }

    /// Stand types mutually excluded with the given one.
    pub fn excludes(&self, stand_type: &str) -> HashSet<&str> {
        self.config(stand_type)
            .map(|c| c.excludes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether two stand types may never appear in the same flight.
    /// Symmetric by construction.
    pub fn mutually_exclusive(&self, a: &str, b: &str) -> bool {
        self.excludes(a).contains(b) || self.excludes(b).contains(a)
    }

    /// Whether the stand type has a dedicated left-handed slot.
    pub fn supports_handedness(&self, stand_type: &str) -> bool {
        self.config(stand_type).is_some_and(|c| c.supports_handedness)
    }

    /// Display label for a stand number (1-based).
    pub fn label(&self, stand_type: &str, stand_number: u32) -> Option<&str> {
        self.config(stand_type)
            .and_then(|c| {
                (stand_number as usize)
                    .checked_sub(1)
                    .and_then(|i| c.labels.get(i))
            })
            .map(String::as_str)
    }

    /// The standard two-day competition stand table.
    pub fn standard() -> Self {
        Self::new()
            .with_stand_type(
                "springboard",
                StandConfig::new(4)
                    .with_handedness()
                    .with_labels(vec!["Dummy 1", "Dummy 2", "Dummy 3", "Dummy 4"]),
            )
            .with_stand_type("underhand", StandConfig::new(5))
            .with_stand_type(
                "standing_block",
                StandConfig::new(5).excluding("cookie_stack"),
            )
            .with_stand_type(
                "cookie_stack",
                StandConfig::new(5).excluding("standing_block"),
            )
            .with_stand_type(
                "saw_hand",
                StandConfig::new(8).with_groups(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]),
            )
            .with_stand_type("stock_saw", StandConfig::new(2))
            .with_stand_type("hot_saw", StandConfig::new(4))
            .with_stand_type(
                "obstacle_pole",
                StandConfig::new(2).with_labels(vec!["Pole 1", "Pole 2"]),
            )
            .with_stand_type(
                "speed_climb",
                StandConfig::new(2).with_labels(vec!["Pole 2", "Pole 4"]),
            )
            .with_stand_type(
                "chokerman",
                StandConfig::new(2).with_labels(vec!["Course 1", "Course 2"]),
            )
            .with_stand_type("axe_throw", StandConfig::new(1).with_labels(vec!["Target"]))
            .with_stand_type("caber", StandConfig::new(1).with_labels(vec!["Field"]))
            .with_stand_type("peavey", StandConfig::new(1).with_labels(vec!["Log"]))
            .with_stand_type(
                "pulp_toss",
                StandConfig::new(1).with_labels(vec!["Platform"]),
            )
            .with_stand_type("birling", StandConfig::new(1).with_labels(vec!["Pond"]))
    }
}
