//! Outbound notification side-channel.
//!
//! Delivery is strictly best-effort: a failed or slow send must never fail or
//! delay the order mutation it accompanies. The Discord client carries a short
//! request timeout and swallows every error with a warning log.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::domain::Order;

const SEND_TIMEOUT: Duration = Duration::from_secs(3);

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the configured channel, best-effort.
    async fn send(&self, text: &str);
}

/// Posts messages to a Discord webhook.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String) -> Self {
        // A default client would lose the timeout, so builder failure is fatal.
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .expect("failed to build notification HTTP client");
        DiscordNotifier {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, text: &str) {
        let payload = serde_json::json!({ "content": text });
        let result = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "Discord webhook returned an error status");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Failed to deliver Discord notification");
            }
        }
    }
}

/// Used when no delivery channel is configured.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _text: &str) {}
}

// ---------------------------------------------------------------------------
// Message builders
// ---------------------------------------------------------------------------

/// Text for a freshly created order, with an optional boost summary line.
pub fn order_created_message(order: &Order, boost_summary: Option<&str>) -> String {
    let mut lines = vec![
        "**NEW ORDER**".to_string(),
        format!("Order: {}", order.id),
        format!("Email: {}", order.email),
        format!("Product: {}", order.item.product_slug),
        format!("Item: {}", order.item.label),
        format!("Price: ${}", order.payment.amount),
        format!("Pay: {}", order.payment.network),
        format!("Address: {}", order.payment.address),
        format!("Expires at: {}", order.expires_at),
    ];
    if let Some(summary) = boost_summary {
        lines.push(format!("Boost: {}", summary));
    }
    lines.join("\n")
}

pub fn proof_submitted_message(order: &Order) -> String {
    let mut lines = vec![
        "**PROOF SUBMITTED**".to_string(),
        format!("Order: {}", order.id),
        format!("Email: {}", order.email),
        format!("Item: {}", order.item.label),
        format!("Price: ${}", order.item.price),
        format!("Method: {}", order.payment.network),
    ];
    if let Some(proof) = &order.proof {
        if let Some(tx) = &proof.tx_hash {
            lines.push(format!("TX Hash: {}", tx));
        }
        if let Some(link) = &proof.proof_link {
            lines.push(format!("Proof Link: {}", link));
        }
        if let Some(contact) = &proof.contact {
            lines.push(format!("Contact: {}", contact));
        }
    }
    lines.join("\n")
}

pub fn status_changed_message(order: &Order) -> String {
    let mut lines = vec![
        format!("**{}**", order.status.as_str().to_uppercase()),
        format!("Order: {}", order.id),
        format!("Email: {}", order.email),
        format!("Item: {}", order.item.label),
    ];
    if let Some(reason) = &order.reject_reason {
        lines.push(format!("Reason: {}", reason));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderItem, OrderProof, OrderStatus, PaymentInfo};
    use rust_decimal::Decimal;

    fn sample_order() -> Order {
        Order {
            id: "ORD-1-abc".to_string(),
            email: "player@example.com".to_string(),
            status: OrderStatus::WaitingPayment,
            item: OrderItem {
                product_slug: "ranked-boost".to_string(),
                variant_id: "rank-gold-plat".to_string(),
                label: "Ranked Boost (Gold II -> Elite)".to_string(),
                price: Decimal::new(1234, 2),
                msrp: None,
            },
            payment: PaymentInfo {
                network: "USDT (TRC20)".to_string(),
                address: "TXabc".to_string(),
                amount: Decimal::new(1234, 2),
            },
            created_at: 1000,
            updated_at: 1000,
            expires_at: 301_000,
            proof: None,
            reject_reason: None,
        }
    }

    #[test]
    fn test_order_created_message_includes_boost_summary() {
        let order = sample_order();
        let msg = order_created_message(&order, Some("Gold II -> Elite"));
        assert!(msg.contains("NEW ORDER"));
        assert!(msg.contains("Order: ORD-1-abc"));
        assert!(msg.contains("Price: $12.34"));
        assert!(msg.contains("Boost: Gold II -> Elite"));

        let msg = order_created_message(&order, None);
        assert!(!msg.contains("Boost:"));
    }

    #[test]
    fn test_proof_message_lists_supplied_fields_only() {
        let mut order = sample_order();
        order.status = OrderStatus::ProofSubmitted;
        order.proof = Some(OrderProof {
            tx_hash: Some("0xabc".to_string()),
            proof_link: None,
            contact: Some("discord#1".to_string()),
            submitted_at: 2000,
        });

        let msg = proof_submitted_message(&order);
        assert!(msg.contains("TX Hash: 0xabc"));
        assert!(msg.contains("Contact: discord#1"));
        assert!(!msg.contains("Proof Link"));
    }

    #[test]
    fn test_status_message_carries_reason() {
        let mut order = sample_order();
        order.status = OrderStatus::Rejected;
        order.reject_reason = Some("chargeback risk".to_string());

        let msg = status_changed_message(&order);
        assert!(msg.starts_with("**REJECTED**"));
        assert!(msg.contains("Reason: chargeback risk"));
    }

    #[tokio::test]
    async fn test_null_notifier_is_a_no_op() {
        NullNotifier.send("anything").await;
    }

    #[tokio::test]
    async fn test_discord_notifier_swallows_unreachable_host() {
        let notifier = DiscordNotifier::new("http://127.0.0.1:1/webhook".to_string());
        // Must not panic or propagate the connection error.
        notifier.send("hello").await;
    }
}
