//! Order creation and proof submission handlers.

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::catalog::{self, SLUG_LEVEL_BOOST, SLUG_RANKED_BOOST, SLUG_WIN_BOOST};
use crate::domain::{LevelConfig, Order, PaymentInfo, RankedConfig, WinBoostConfig};
use crate::domain::OrderItem;
use crate::error::AppError;
use crate::notify::{order_created_message, proof_submitted_message};
use crate::orders::{NewOrder, ProofSubmission};
use crate::pricing::{calculate_level_price, calculate_ranked_price, calculate_win_boost_price};

/// Payment rails handled out-of-band; order creation refuses them.
const MANUAL_PAYMENT_METHODS: [&str; 1] = ["paypal"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_slug: Option<String>,
    pub variant_id: Option<String>,
    pub email: Option<String>,
    pub payment_method: Option<String>,
    pub coin: Option<String>,
    pub ranked_config: Option<RankedConfig>,
    pub level_config: Option<LevelConfig>,
    pub win_config: Option<WinBoostConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub expires_at: i64,
    pub payment: PaymentInfo,
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    let product_slug = required(req.product_slug, "productSlug")?;
    let variant_id = required(req.variant_id, "variantId")?;
    let email = required(req.email, "email")?;
    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email".to_string()));
    }

    if let Some(method) = req.payment_method.as_deref() {
        if MANUAL_PAYMENT_METHODS.contains(&method.to_lowercase().as_str()) {
            return Err(AppError::BadRequest(
                "PayPal is currently available via Discord only.".to_string(),
            ));
        }
    }

    let (_, variant) = catalog::find_variant(&product_slug, &variant_id)
        .ok_or_else(|| AppError::NotFound("Product/variant not found".to_string()))?;

    let (price, msrp, label, boost_summary) =
        priced_item(&product_slug, variant, &req.ranked_config, &req.level_config, &req.win_config)?;

    let coin = req
        .coin
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "USDT".to_string());
    let network = format!("{} ({})", coin, state.config.payment_network);

    let order = state
        .service
        .create(NewOrder {
            email,
            item: OrderItem {
                product_slug,
                variant_id,
                label,
                price,
                msrp,
            },
            payment_network: network,
            payment_address: state.config.payment_address.clone(),
        })
        .await?;

    state.notify_detached(order_created_message(&order, boost_summary.as_deref()));

    Ok(Json(CreateOrderResponse {
        order_id: order.id,
        expires_at: order.expires_at,
        payment: order.payment,
    }))
}

/// Resolve the billable price, the item label, and the notification summary
/// for the requested product. Configurable products price through the engine;
/// fixed bundles keep the catalog price.
fn priced_item(
    product_slug: &str,
    variant: &catalog::Variant,
    ranked: &Option<RankedConfig>,
    level: &Option<LevelConfig>,
    wins: &Option<WinBoostConfig>,
) -> Result<(Decimal, Option<Decimal>, String, Option<String>), AppError> {
    match (product_slug, ranked, level, wins) {
        (SLUG_RANKED_BOOST, Some(cfg), _, _) => {
            let price = calculate_ranked_price(cfg);
            if price <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "Invalid ranked boost configuration".to_string(),
                ));
            }
            let summary = cfg.summary();
            Ok((
                price,
                None,
                format!("Ranked Boost ({})", summary),
                Some(summary),
            ))
        }
        (SLUG_LEVEL_BOOST, _, Some(cfg), _) => {
            let price = calculate_level_price(cfg);
            if price <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "Invalid level boost configuration".to_string(),
                ));
            }
            let summary = format!("Level {} -> {}", cfg.current_level, cfg.desired_level);
            Ok((
                price,
                None,
                format!("Level Boost ({})", summary),
                Some(summary),
            ))
        }
        (SLUG_WIN_BOOST, _, _, Some(cfg)) => {
            let price = calculate_win_boost_price(cfg);
            if price <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "Invalid win boost configuration".to_string(),
                ));
            }
            let summary = format!("{} {} wins", cfg.wins_requested(), cfg.win_type.as_str());
            Ok((
                price,
                None,
                format!("Win Boost ({})", summary),
                Some(summary),
            ))
        }
        (SLUG_WIN_BOOST, _, _, None) => Err(AppError::BadRequest(
            "Win boost requires a configuration".to_string(),
        )),
        _ => Ok((
            variant.price,
            Some(variant.msrp),
            variant.label.to_string(),
            None,
        )),
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {}", field)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProofRequest {
    pub order_id: Option<String>,
    pub tx_hash: Option<String>,
    pub proof_link: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

pub async fn submit_proof(
    State(state): State<AppState>,
    Json(req): Json<SubmitProofRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let order_id = required(req.order_id, "orderId")?;

    let order = state
        .service
        .submit_proof(
            &order_id,
            ProofSubmission {
                tx_hash: req.tx_hash,
                proof_link: req.proof_link,
                contact: req.contact,
            },
        )
        .await?;

    state.notify_detached(proof_submitted_message(&order));

    Ok(Json(OrderResponse { order }))
}
