//! Persistence collaborator for order records.
//!
//! `OrderStore` is the seam between the lifecycle core and the storage
//! technology. Updates are per-record and optimistic: every stored order
//! carries a version stamp, and `update` only applies when the caller's
//! expected version still matches (compare-and-swap). This removes the
//! lost-update race a whole-snapshot write-back store would have.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryOrderStore;
pub use sqlite::SqliteOrderStore;

use crate::domain::Order;
use async_trait::async_trait;
use thiserror::Error;

/// An order together with its store version stamp.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedOrder {
    pub order: Order,
    pub version: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Duplicate order id: {0}")]
    DuplicateId(String),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order at version 1.
    async fn insert(&self, order: &Order) -> Result<(), StoreError>;

    /// Fetch one order by id. A corrupt record reads as absent.
    async fn get(&self, id: &str) -> Result<Option<VersionedOrder>, StoreError>;

    /// All orders, newest first. Corrupt records are skipped.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Orders still in `waiting_payment` whose deadline has passed.
    async fn list_expiring(&self, now_ms: i64) -> Result<Vec<VersionedOrder>, StoreError>;

    /// Compare-and-swap update: applies only if the stored version still
    /// equals `expected_version`. Returns false on a version miss.
    async fn update(&self, order: &Order, expected_version: i64) -> Result<bool, StoreError>;
}
