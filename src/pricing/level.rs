//! Level-boost pricing: linear in level distance.

use super::to_price;
use crate::domain::LevelConfig;
use rust_decimal::Decimal;

const LEVEL_MIN: i64 = 1;
const LEVEL_MAX: i64 = 200;

/// Steps between level 1 and level 100, the $10 reference climb.
const BASE_STEPS: f64 = 99.0;
const BASE_PRICE: f64 = 10.0;

/// Price a level boost. Levels clamp to [1, 200]; a non-advancing range
/// prices to 0.
pub fn calculate_level_price(config: &LevelConfig) -> Decimal {
    let current = config.current_level.clamp(LEVEL_MIN, LEVEL_MAX);
    let desired = config.desired_level.clamp(LEVEL_MIN, LEVEL_MAX);

    if desired <= current {
        return Decimal::ZERO;
    }

    let steps = (desired - current) as f64;
    to_price(steps / BASE_STEPS * BASE_PRICE)
}
