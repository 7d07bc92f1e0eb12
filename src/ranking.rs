//! Pluggable ability ranking.
//!
//! Extension point for ability-based ordering: the heat generator's draft
//! step and the flight builder's tie-break may consult a ranking source.
//! When no source is installed, or a source has no opinion on a competitor,
//! both fall back to deterministic input order — absence degrades, it never
//! crashes.

use std::fmt::Debug;

/// A source of ability rankings for competitors within an event.
///
/// # Score Convention
/// **Lower ordinal = stronger competitor** (drafted earlier). Returning
/// `None` means "no opinion"; the caller keeps input order for that
/// competitor.
pub trait RankingSource: Debug {
    /// Source name (for diagnostics).
    fn name(&self) -> &'static str;

    /// Rank of a competitor within an event, if known.
    fn rank(&self, competitor_id: &str, event_id: &str) -> Option<i64>;
}

/// Orders a roster's indices by ranking, falling back to input order.
///
/// Competitors the source knows come first (by ascending ordinal); unknown
/// competitors follow in input order. With no source, this is the identity
/// permutation.
pub(crate) fn draft_order(
    competitor_ids: &[&str],
    event_id: &str,
    source: Option<&dyn RankingSource>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..competitor_ids.len()).collect();
    if let Some(source) = source {
        indices.sort_by_key(|&i| {
            match source.rank(competitor_ids[i], event_id) {
                Some(ordinal) => (0, ordinal, i),
                None => (1, 0, i),
            }
        });
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct FixedRanks(HashMap<String, i64>);

    impl RankingSource for FixedRanks {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn rank(&self, competitor_id: &str, _event_id: &str) -> Option<i64> {
            self.0.get(competitor_id).copied()
        }
    }

    #[test]
    fn test_no_source_keeps_input_order() {
        let ids = ["C1", "C2", "C3"];
        assert_eq!(draft_order(&ids, "e", None), vec![0, 1, 2]);
    }

    #[test]
    fn test_ranked_before_unranked() {
        let ranks = FixedRanks(HashMap::from([("C3".to_string(), 1), ("C1".to_string(), 2)]));
        let ids = ["C1", "C2", "C3"];
        // C3 (rank 1), C1 (rank 2), then unranked C2 in input order.
        assert_eq!(draft_order(&ids, "e", Some(&ranks)), vec![2, 0, 1]);
    }

    #[test]
    fn test_rank_ties_stable_by_input_order() {
        let ranks = FixedRanks(HashMap::from([("C1".to_string(), 5), ("C2".to_string(), 5)]));
        let ids = ["C1", "C2"];
        assert_eq!(draft_order(&ids, "e", Some(&ranks)), vec![0, 1]);
    }
}
