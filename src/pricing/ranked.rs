//! Ranked-boost pricing: ladder interpolation plus compounding multipliers.

use super::ladder::ladder;
use super::to_price;
use crate::domain::RankedConfig;
use rust_decimal::Decimal;

/// Price a ranked boost. Returns 0 for a non-advancing or unknown range.
///
/// Multipliers compound in a fixed order: region, mode, platform, then the
/// streaming / express-delivery / coaching-duo options. Playing offline is
/// free.
pub fn calculate_ranked_price(config: &RankedConfig) -> Decimal {
    let l = ladder();

    let from = match l.index_of(config.current_rank, config.current_div) {
        Some(idx) => idx,
        None => return Decimal::ZERO,
    };
    let to = match l.index_of(config.desired_rank, config.desired_div) {
        Some(idx) => idx,
        None => return Decimal::ZERO,
    };
    if to <= from {
        return Decimal::ZERO;
    }

    let mut price = l.base_price(from, to);

    price *= config.region.multiplier();
    price *= config.mode.multiplier();
    price *= config.platform.multiplier();
    if config.options.streaming {
        price *= 1.1;
    }
    if config.options.express_delivery {
        price *= 1.2;
    }
    if config.options.coaching_duo {
        price *= 1.2;
    }

    to_price(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Division, GameMode, Platform, Rank, RankedOptions, Region};
    use std::str::FromStr;

    fn config(
        current_rank: Rank,
        current_div: Option<Division>,
        desired_rank: Rank,
        desired_div: Option<Division>,
    ) -> RankedConfig {
        RankedConfig {
            current_rank,
            current_div,
            desired_rank,
            desired_div,
            region: Region::Europe,
            mode: GameMode::BattleRoyale,
            platform: Platform::Pc,
            options: RankedOptions::default(),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_full_climb_is_thirty_dollars() {
        let cfg = config(Rank::Bronze, Some(Division::I), Rank::Unreal, None);
        assert_eq!(calculate_ranked_price(&cfg), dec("30.00"));
    }

    #[test]
    fn test_anchor_segments_are_fifteen_each() {
        let lower = config(Rank::Bronze, Some(Division::I), Rank::Elite, None);
        assert_eq!(calculate_ranked_price(&lower), dec("15.00"));

        let upper = config(Rank::Elite, None, Rank::Unreal, None);
        assert_eq!(calculate_ranked_price(&upper), dec("15.00"));
    }

    #[test]
    fn test_non_advancing_range_is_zero() {
        let same = config(Rank::Gold, Some(Division::II), Rank::Gold, Some(Division::II));
        assert_eq!(calculate_ranked_price(&same), Decimal::ZERO);

        let backwards = config(Rank::Diamond, Some(Division::I), Rank::Silver, Some(Division::III));
        assert_eq!(calculate_ranked_price(&backwards), Decimal::ZERO);
    }

    #[test]
    fn test_monotonic_in_ladder_distance() {
        let l = ladder();
        let mut last = Decimal::ZERO;
        for rank in [
            Rank::Bronze,
            Rank::Silver,
            Rank::Gold,
            Rank::Platinum,
            Rank::Diamond,
            Rank::Elite,
            Rank::Champion,
            Rank::Unreal,
        ] {
            if l.index_of(rank, None) == Some(0) {
                continue;
            }
            let cfg = config(Rank::Bronze, Some(Division::I), rank, Some(Division::I));
            let price = calculate_ranked_price(&cfg);
            assert!(price >= last, "price must not decrease ({:?})", rank);
            last = price;
        }
    }

    #[test]
    fn test_multipliers_compound_in_order() {
        let base = config(Rank::Bronze, Some(Division::I), Rank::Unreal, None);
        let mut cfg = base.clone();
        cfg.region = Region::Oce;
        cfg.mode = GameMode::ZeroBuild;
        cfg.platform = Platform::Switch;
        cfg.options = RankedOptions {
            play_offline: true,
            streaming: true,
            express_delivery: true,
            coaching_duo: true,
        };

        // 30 * 1.08 * 1.05 * 1.1 * 1.1 * 1.2 * 1.2 = 59.276448 -> 59.28
        assert_eq!(calculate_ranked_price(&cfg), dec("59.28"));
    }

    #[test]
    fn test_play_offline_is_free() {
        let mut cfg = config(Rank::Bronze, Some(Division::I), Rank::Unreal, None);
        cfg.options.play_offline = true;
        assert_eq!(calculate_ranked_price(&cfg), dec("30.00"));
    }

    #[test]
    fn test_console_platform_surcharge() {
        let mut cfg = config(Rank::Elite, None, Rank::Unreal, None);
        cfg.platform = Platform::Xbox;
        // 15 * 1.08 = 16.20
        assert_eq!(calculate_ranked_price(&cfg), dec("16.20"));
    }

    #[test]
    fn test_short_division_climb() {
        // Bronze I -> Bronze II: one division step of weight 0.28 out of the
        // bronze->elite pool.
        let cfg = config(
            Rank::Bronze,
            Some(Division::I),
            Rank::Bronze,
            Some(Division::II),
        );
        let l = ladder();
        let expected = 0.28 / l.weight_between(0, l.elite_index()) * 15.0;
        assert_eq!(calculate_ranked_price(&cfg), super::super::to_price(expected));
        assert!(calculate_ranked_price(&cfg) > Decimal::ZERO);
    }
}
