//! Win-boost pricing: per-win rate with add-ons and a bulk discount.

use super::to_price;
use crate::domain::{WinBoostConfig, WinType};
use rust_decimal::Decimal;

/// Per-win add-on price for duo queue and for self-play. Additive and
/// independent.
const ADDON_PER_WIN: f64 = 1.0;

fn base_rate(win_type: WinType) -> f64 {
    match win_type {
        WinType::Regular => 4.0,
        WinType::Pub => 3.0,
        WinType::Blitz => 2.0,
    }
}

/// Bulk discount multiplier, highest threshold first.
fn bulk_multiplier(wins: i64) -> f64 {
    if wins >= 50 {
        0.80
    } else if wins >= 20 {
        0.85
    } else if wins >= 10 {
        0.90
    } else if wins >= 5 {
        0.95
    } else {
        1.0
    }
}

/// Price a win boost. Zero requested wins price to 0.
pub fn calculate_win_boost_price(config: &WinBoostConfig) -> Decimal {
    let wins = config.wins_requested();
    if wins <= 0 {
        return Decimal::ZERO;
    }

    let mut per_win = base_rate(config.win_type);
    if config.options.duo {
        per_win += ADDON_PER_WIN;
    }
    if config.options.self_play {
        per_win += ADDON_PER_WIN;
    }

    to_price(wins as f64 * per_win * bulk_multiplier(wins))
}
