//! Weighted rank ladder used for ranked-boost price interpolation.
//!
//! Every rank/division combination is a node in one monotonic sequence from
//! Bronze I up to Unreal. Stepping from node `i` to `i+1` costs
//! `step_weights[i]`; price for a range is the accumulated step weight scaled
//! against two fixed anchors (Bronze I -> Unreal = $30, Elite -> Unreal = $15).

use crate::domain::{Division, Rank};
use std::sync::OnceLock;

/// Each division step (I->II, II->III) costs this share of the rank's weight;
/// the promotion step (III -> next rank) costs the rest. The three sum to 1.0.
const DIV_STEP_FACTOR: f64 = 0.28;
const PROMO_STEP_FACTOR: f64 = 0.44;

pub const PRICE_BRONZE_TO_UNREAL: f64 = 30.0;
pub const PRICE_ELITE_TO_UNREAL: f64 = 15.0;
pub const PRICE_BRONZE_TO_ELITE: f64 = PRICE_BRONZE_TO_UNREAL - PRICE_ELITE_TO_UNREAL;

const RANKS_WITH_DIVS: [Rank; 5] = [
    Rank::Bronze,
    Rank::Silver,
    Rank::Gold,
    Rank::Platinum,
    Rank::Diamond,
];
const RANKS_NO_DIVS: [Rank; 3] = [Rank::Elite, Rank::Champion, Rank::Unreal];
const DIVS: [Division; 3] = [Division::I, Division::II, Division::III];

/// The ladder: ordered nodes plus the weight of each inter-node step.
#[derive(Debug)]
pub struct RankLadder {
    nodes: Vec<(Rank, Option<Division>)>,
    step_weights: Vec<f64>,
    elite_idx: usize,
    unreal_idx: usize,
}

impl RankLadder {
    fn build() -> Self {
        let mut nodes = Vec::new();
        let mut step_weights = Vec::new();

        for rank in RANKS_WITH_DIVS {
            for div in DIVS {
                nodes.push((rank, Some(div)));
            }
            let w = rank.base_weight();
            step_weights.push(w * DIV_STEP_FACTOR);
            step_weights.push(w * DIV_STEP_FACTOR);
            step_weights.push(w * PROMO_STEP_FACTOR);
        }

        // Elite, champion, unreal are single nodes; stepping out of one costs
        // the current rank's full base weight.
        for rank in RANKS_NO_DIVS {
            nodes.push((rank, None));
        }
        step_weights.push(Rank::Elite.base_weight());
        step_weights.push(Rank::Champion.base_weight());

        let elite_idx = nodes
            .iter()
            .position(|(r, _)| *r == Rank::Elite)
            .unwrap_or(0);
        let unreal_idx = nodes.len() - 1;

        RankLadder {
            nodes,
            step_weights,
            elite_idx,
            unreal_idx,
        }
    }

    /// Ladder index of a rank/division position, or None for an unknown
    /// combination. A missing division on a divided rank normalizes to I;
    /// a division on an undivided rank is ignored.
    pub fn index_of(&self, rank: Rank, div: Option<Division>) -> Option<usize> {
        let normalized = if rank.has_divisions() {
            (rank, Some(div.unwrap_or(Division::I)))
        } else {
            (rank, None)
        };
        self.nodes.iter().position(|n| *n == normalized)
    }

    pub fn elite_index(&self) -> usize {
        self.elite_idx
    }

    pub fn unreal_index(&self) -> usize {
        self.unreal_idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Accumulated step weight from node `from` to node `to`; 0 when the
    /// range does not advance.
    pub fn weight_between(&self, from: usize, to: usize) -> f64 {
        if to <= from {
            return 0.0;
        }
        self.step_weights[from..to.min(self.step_weights.len())]
            .iter()
            .sum()
    }

    /// Base (multiplier-free) price for climbing from node `from` to node
    /// `to`, interpolated against the two price anchors.
    pub fn base_price(&self, from: usize, to: usize) -> f64 {
        if to <= from {
            return 0.0;
        }

        let bronze_elite_total = self.weight_between(0, self.elite_idx);
        let elite_unreal_total = self.weight_between(self.elite_idx, self.unreal_idx);

        let segment = |seg_from: usize, seg_to: usize, total_weight: f64, total_price: f64| {
            if total_weight <= 0.0 {
                return 0.0;
            }
            self.weight_between(seg_from, seg_to) / total_weight * total_price
        };

        if to <= self.elite_idx {
            segment(from, to, bronze_elite_total, PRICE_BRONZE_TO_ELITE)
        } else if from < self.elite_idx {
            segment(from, self.elite_idx, bronze_elite_total, PRICE_BRONZE_TO_ELITE)
                + segment(self.elite_idx, to, elite_unreal_total, PRICE_ELITE_TO_UNREAL)
        } else {
            segment(from, to, elite_unreal_total, PRICE_ELITE_TO_UNREAL)
        }
    }
}

/// Process-wide ladder, built once and read-only thereafter.
pub fn ladder() -> &'static RankLadder {
    static LADDER: OnceLock<RankLadder> = OnceLock::new();
    LADDER.get_or_init(RankLadder::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_shape() {
        let l = ladder();
        // 5 divided ranks x 3 nodes + 3 single-node ranks.
        assert_eq!(l.node_count(), 18);
        assert_eq!(l.elite_index(), 15);
        assert_eq!(l.unreal_index(), 17);
    }

    #[test]
    fn test_index_normalization() {
        let l = ladder();
        assert_eq!(l.index_of(Rank::Bronze, Some(Division::I)), Some(0));
        assert_eq!(l.index_of(Rank::Bronze, None), Some(0));
        assert_eq!(l.index_of(Rank::Bronze, Some(Division::III)), Some(2));
        assert_eq!(l.index_of(Rank::Silver, Some(Division::I)), Some(3));
        // Division on an undivided rank is ignored.
        assert_eq!(l.index_of(Rank::Elite, Some(Division::II)), Some(15));
        assert_eq!(l.index_of(Rank::Unreal, None), Some(17));
    }

    #[test]
    fn test_division_steps_sum_to_base_weight() {
        let l = ladder();
        for (i, rank) in [
            Rank::Bronze,
            Rank::Silver,
            Rank::Gold,
            Rank::Platinum,
            Rank::Diamond,
        ]
        .iter()
        .enumerate()
        {
            let start = i * 3;
            let total = l.weight_between(start, start + 3);
            assert!(
                (total - rank.base_weight()).abs() < 1e-9,
                "rank {:?}: {} != {}",
                rank,
                total,
                rank.base_weight()
            );
        }
    }

    #[test]
    fn test_top_tier_step_weights() {
        let l = ladder();
        let elite_to_champion = l.weight_between(15, 16);
        let champion_to_unreal = l.weight_between(16, 17);
        assert!((elite_to_champion - 2.0).abs() < 1e-9);
        assert!((champion_to_unreal - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_prices() {
        let l = ladder();
        let full = l.base_price(0, l.unreal_index());
        let upper = l.base_price(l.elite_index(), l.unreal_index());
        let lower = l.base_price(0, l.elite_index());
        assert!((full - 30.0).abs() < 1e-9);
        assert!((upper - 15.0).abs() < 1e-9);
        assert!((lower - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_advancing_range_is_free() {
        let l = ladder();
        assert_eq!(l.base_price(5, 5), 0.0);
        assert_eq!(l.base_price(10, 3), 0.0);
        assert_eq!(l.weight_between(4, 4), 0.0);
    }

    #[test]
    fn test_price_monotonic_in_distance() {
        let l = ladder();
        let mut last = 0.0;
        for to in 1..l.node_count() {
            let p = l.base_price(0, to);
            assert!(p > last, "price must grow with distance (to={})", to);
            last = p;
        }
    }

    #[test]
    fn test_straddling_segment_is_sum_of_parts() {
        let l = ladder();
        let straddle = l.base_price(12, 17);
        let parts = l.base_price(12, 15) + l.base_price(15, 17);
        assert!((straddle - parts).abs() < 1e-9);
    }
}
