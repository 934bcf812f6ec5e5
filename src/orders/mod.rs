//! Order lifecycle manager: creation, expiry sweeping, proof submission, and
//! admin adjudication.
//!
//! Expiry is lazy by design: there is no background timer. Every entry point
//! runs `sweep_expired` before acting, so a timed-out order is guaranteed
//! correct by the time any operation returns. Mutations go through a
//! compare-and-swap retry loop against the store's version stamps.

pub mod clock;

pub use clock::{Clock, SystemClock};

use crate::domain::{Order, OrderItem, OrderProof, OrderStatus, PaymentInfo};
use crate::store::{OrderStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub const EXPIRED_REASON: &str = "Payment proof not submitted within time limit.";
pub const DEFAULT_REJECT_REASON: &str = "Rejected by admin.";
pub const DEFAULT_ADMIN_EXPIRE_REASON: &str = "Expired by admin.";

/// Attempts before giving up on a contended record.
const MAX_CAS_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Inputs for a new order; id, timestamps, and deadline are assigned here.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub email: String,
    pub item: OrderItem,
    pub payment_network: String,
    pub payment_address: String,
}

/// User-submitted proof fields, pre-trim.
#[derive(Debug, Clone, Default)]
pub struct ProofSubmission {
    pub tx_hash: Option<String>,
    pub proof_link: Option<String>,
    pub contact: Option<String>,
}

/// The subset of statuses an admin may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    Completed,
    Rejected,
    Expired,
}

impl AdminStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(AdminStatus::Completed),
            "rejected" => Some(AdminStatus::Rejected),
            "expired" => Some(AdminStatus::Expired),
            _ => None,
        }
    }

    fn as_order_status(&self) -> OrderStatus {
        match self {
            AdminStatus::Completed => OrderStatus::Completed,
            AdminStatus::Rejected => OrderStatus::Rejected,
            AdminStatus::Expired => OrderStatus::Expired,
        }
    }
}

pub struct OrderService {
    store: Arc<dyn OrderStore>,
    clock: Arc<dyn Clock>,
    expiry_window_ms: i64,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, clock: Arc<dyn Clock>, expiry_window_ms: i64) -> Self {
        OrderService {
            store,
            clock,
            expiry_window_ms,
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Flip every overdue `waiting_payment` order to `expired`. Runs at the
    /// start of every operation; a second pass over the same order is a no-op
    /// because the status filter no longer matches it.
    pub async fn sweep_expired(&self) -> Result<usize, OrderError> {
        let now = self.clock.now_ms();
        let overdue = self.store.list_expiring(now).await?;
        let mut flipped = 0usize;

        for mut versioned in overdue {
            versioned.order.status = OrderStatus::Expired;
            versioned.order.reject_reason = Some(EXPIRED_REASON.to_string());
            versioned.order.updated_at = now;

            // A concurrent writer may have touched the record since the
            // listing; losing the swap is fine, the next sweep will catch it.
            if self.store.update(&versioned.order, versioned.version).await? {
                flipped += 1;
            }
        }

        if flipped > 0 {
            info!(count = flipped, "Expired overdue orders");
        }
        Ok(flipped)
    }

    /// Create and persist a new `waiting_payment` order.
    pub async fn create(&self, input: NewOrder) -> Result<Order, OrderError> {
        self.sweep_expired().await?;

        let now = self.clock.now_ms();
        let order = Order {
            id: generate_order_id(now),
            email: input.email,
            status: OrderStatus::WaitingPayment,
            payment: PaymentInfo {
                network: input.payment_network,
                address: input.payment_address,
                amount: input.item.price,
            },
            item: input.item,
            created_at: now,
            updated_at: now,
            expires_at: now + self.expiry_window_ms,
            proof: None,
            reject_reason: None,
        };

        self.store.insert(&order).await?;
        info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    pub async fn get(&self, id: &str) -> Result<Order, OrderError> {
        self.sweep_expired().await?;
        self.store
            .get(id)
            .await?
            .map(|v| v.order)
            .ok_or(OrderError::NotFound)
    }

    /// All orders, newest first.
    pub async fn list(&self) -> Result<Vec<Order>, OrderError> {
        self.sweep_expired().await?;
        Ok(self.store.list_all().await?)
    }

    /// Attach payment proof. Requires a transaction hash or a proof link;
    /// fails on expired and completed orders. A repeat submission overwrites
    /// the stored proof (last write wins).
    pub async fn submit_proof(
        &self,
        id: &str,
        submission: ProofSubmission,
    ) -> Result<Order, OrderError> {
        self.sweep_expired().await?;

        let tx_hash = clean(submission.tx_hash);
        let proof_link = clean(submission.proof_link);
        let contact = clean(submission.contact);

        if tx_hash.is_none() && proof_link.is_none() {
            return Err(OrderError::Validation(
                "Provide tx hash or proof link".to_string(),
            ));
        }

        self.mutate(id, |order, now| {
            match order.status {
                OrderStatus::Expired => {
                    return Err(OrderError::Conflict("Order expired".to_string()))
                }
                OrderStatus::Completed => {
                    return Err(OrderError::Conflict("Order already completed".to_string()))
                }
                _ => {}
            }

            order.status = OrderStatus::ProofSubmitted;
            order.proof = Some(OrderProof {
                tx_hash: tx_hash.clone(),
                proof_link: proof_link.clone(),
                contact: contact.clone(),
                submitted_at: now,
            });
            order.updated_at = now;
            Ok(())
        })
        .await
    }

    /// Admin override into a terminal state. Only non-terminal orders can be
    /// adjudicated; `rejected` and `expired` store the supplied reason
    /// (trimmed) or a default, `completed` clears it.
    pub async fn set_status(
        &self,
        id: &str,
        status: AdminStatus,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        self.sweep_expired().await?;

        let reason = clean(reason);
        self.mutate(id, |order, now| {
            if order.status.is_terminal() {
                return Err(OrderError::Conflict(format!(
                    "Order already {}",
                    order.status
                )));
            }

            order.status = status.as_order_status();
            order.reject_reason = match status {
                AdminStatus::Completed => None,
                AdminStatus::Rejected => {
                    Some(reason.clone().unwrap_or_else(|| DEFAULT_REJECT_REASON.to_string()))
                }
                AdminStatus::Expired => Some(
                    reason
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ADMIN_EXPIRE_REASON.to_string()),
                ),
            };
            order.updated_at = now;
            Ok(())
        })
        .await
    }

    /// Read-apply-swap loop. `apply` sees a fresh copy on every attempt, so
    /// guard checks always run against current state.
    async fn mutate<F>(&self, id: &str, apply: F) -> Result<Order, OrderError>
    where
        F: Fn(&mut Order, i64) -> Result<(), OrderError>,
    {
        for attempt in 0..MAX_CAS_ATTEMPTS {
            let versioned = self.store.get(id).await?.ok_or(OrderError::NotFound)?;
            let mut order = versioned.order;
            apply(&mut order, self.clock.now_ms())?;

            if self.store.update(&order, versioned.version).await? {
                return Ok(order);
            }
            warn!(order_id = %id, attempt, "Concurrent order update, retrying");
        }

        Err(OrderError::Conflict(
            "Order is being modified concurrently".to_string(),
        ))
    }
}

fn generate_order_id(now_ms: i64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", now_ms, &suffix[..8])
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
