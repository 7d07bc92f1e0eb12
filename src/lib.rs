//! Scheduling engine for timbersports-style field competitions.
//!
//! Turns a roster of competitors and a set of event definitions into a
//! runnable show: seeded heats per event, an interleaved flight order that
//! guarantees rest between a competitor's appearances, and double-elimination
//! brackets for head-to-head events.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Competitor`, `EventSpec`, `Heat`,
//!   `Flight`, `FlightPlan`
//! - **`stands`**: Per-stand-type capacity, grouping, handedness, and
//!   mutual-exclusion configuration
//! - **`conflicts`**: Partnership (must co-locate) and gear-sharing
//!   (must separate) relation graphs
//! - **`ranking`**: Seeding source trait used for the snake draft
//! - **`generator`**: Snake-draft heat generation with conflict repair
//! - **`flights`**: Greedy flight ordering under rest-spacing constraints
//! - **`bracket`**: Double-elimination bracket construction and advancement
//! - **`validation`**: Roster integrity checks (duplicate IDs, one-sided
//!   partnerships, gender rules)
//!
//! # Pipeline
//!
//! Validate the roster, generate heats per event, flatten them into session
//! heats, and build the flight plan. Bracket events bypass heat generation
//! and are driven match by match.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod bracket;
pub mod conflicts;
pub mod error;
pub mod flights;
pub mod generator;
pub mod models;
pub mod ranking;
pub mod stands;
pub mod validation;
