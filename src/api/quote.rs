//! Price quote endpoint: runs a configuration through the pricing engine
//! without creating an order.

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{LevelConfig, RankedConfig, WinBoostConfig};
use crate::error::AppError;
use crate::pricing::{calculate_level_price, calculate_ranked_price, calculate_win_boost_price};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub ranked_config: Option<RankedConfig>,
    pub level_config: Option<LevelConfig>,
    pub win_config: Option<WinBoostConfig>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

pub async fn get_quote(
    State(_state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let price = match (req.ranked_config, req.level_config, req.win_config) {
        (Some(cfg), None, None) => calculate_ranked_price(&cfg),
        (None, Some(cfg), None) => calculate_level_price(&cfg),
        (None, None, Some(cfg)) => calculate_win_boost_price(&cfg),
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of rankedConfig, levelConfig, winConfig".to_string(),
            ))
        }
    };

    Ok(Json(QuoteResponse { price }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_price_serializes_as_json_number() {
        let value = serde_json::to_value(QuoteResponse {
            price: Decimal::new(3600, 2),
        })
        .unwrap();
        assert!(value["price"].is_number());
        assert_eq!(value["price"].as_f64(), Some(36.0));
    }
}
