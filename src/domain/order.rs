//! The order entity and its persisted wire shape.
//!
//! Timestamps are epoch milliseconds throughout, matching the store format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status lifecycle.
///
/// `waiting_payment` is the only non-terminal state that auto-expires;
/// `expired`, `rejected`, and `completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    WaitingPayment,
    ProofSubmitted,
    Expired,
    Rejected,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::WaitingPayment => "waiting_payment",
            OrderStatus::ProofSubmitted => "proof_submitted",
            OrderStatus::Expired => "expired",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Completed => "completed",
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Expired | OrderStatus::Rejected | OrderStatus::Completed
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the purchased item, captured at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_slug: String,
    pub variant_id: String,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub msrp: Option<Decimal>,
}

/// Payment instructions shown to the customer. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub network: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// User-submitted evidence of an out-of-band payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProof {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub submitted_at: i64,
}

/// The central order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub email: String,
    pub status: OrderStatus,
    pub item: OrderItem,
    pub payment: PaymentInfo,
    pub created_at: i64,
    pub updated_at: i64,
    pub expires_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<OrderProof>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
}
