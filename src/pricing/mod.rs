//! Pricing engine: three pure calculators over the boost configurations.
//!
//! All calculators are total, side-effect free, and return a non-negative
//! price rounded to two decimal places. A zero price means the configuration
//! is invalid or non-advancing; callers decide whether that is billable.

pub mod ladder;
pub mod level;
pub mod ranked;
pub mod wins;

pub use ladder::{ladder, RankLadder};
pub use level::calculate_level_price;
pub use ranked::calculate_ranked_price;
pub use wins::calculate_win_boost_price;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a raw price to the cent, half away from zero.
pub(crate) fn to_price(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
