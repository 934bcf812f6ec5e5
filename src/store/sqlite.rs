//! SQLite-backed order store.
//!
//! Each order is stored as a JSON body column keyed by id, with `status`,
//! `expires_at`, and `version` mirrored into indexed columns for the expiry
//! sweep and the optimistic-concurrency check.

use super::{OrderStore, StoreError, VersionedOrder};
use crate::domain::Order;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::{info, warn};

pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Open (creating if necessary) the database at `db_path` and run the
    /// schema. Creates the parent directory if it is missing.
    pub async fn connect(db_path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas(conn).await }))
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await?;

        run_schema(&pool).await?;

        info!("Order store initialized at {}", db_path);
        Ok(SqliteOrderStore { pool })
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn run_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    Ok(())
}

async fn configure_pragmas(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the mode actually set; must use fetch.
    sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}

fn parse_body(id: &str, body: &str) -> Option<Order> {
    match serde_json::from_str::<Order>(body) {
        Ok(order) => Some(order),
        Err(e) => {
            warn!(order_id = %id, error = %e, "Skipping unreadable order record");
            None
        }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        let body = serde_json::to_string(order).map_err(|e| {
            StoreError::Database(sqlx::Error::Protocol(format!(
                "failed to serialize order {}: {}",
                order.id, e
            )))
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (id, status, created_at, expires_at, version, body)
            VALUES (?, ?, ?, ?, 1, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&order.id)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.expires_at)
        .bind(&body)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateId(order.id.clone()));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<VersionedOrder>, StoreError> {
        let row = sqlx::query("SELECT body, version FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|r| {
            let body: String = r.get("body");
            let version: i64 = r.get("version");
            parse_body(id, &body).map(|order| VersionedOrder { order, version })
        }))
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query("SELECT id, body FROM orders ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .filter_map(|r| {
                let id: String = r.get("id");
                let body: String = r.get("body");
                parse_body(&id, &body)
            })
            .collect())
    }

    async fn list_expiring(&self, now_ms: i64) -> Result<Vec<VersionedOrder>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, body, version
            FROM orders
            WHERE status = 'waiting_payment' AND expires_at < ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(now_ms)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|r| {
                let id: String = r.get("id");
                let body: String = r.get("body");
                let version: i64 = r.get("version");
                parse_body(&id, &body).map(|order| VersionedOrder { order, version })
            })
            .collect())
    }

    async fn update(&self, order: &Order, expected_version: i64) -> Result<bool, StoreError> {
        let body = serde_json::to_string(order).map_err(|e| {
            StoreError::Database(sqlx::Error::Protocol(format!(
                "failed to serialize order {}: {}",
                order.id, e
            )))
        })?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = ?, expires_at = ?, body = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(order.status.as_str())
        .bind(order.expires_at)
        .bind(&body)
        .bind(&order.id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderItem, OrderStatus, PaymentInfo};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    async fn setup_test_store() -> (SqliteOrderStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("orders.db")
            .to_string_lossy()
            .to_string();
        let store = SqliteOrderStore::connect(&db_path).await.expect("connect failed");
        (store, temp_dir)
    }

    fn sample_order(id: &str, created_at: i64) -> Order {
        Order {
            id: id.to_string(),
            email: "player@example.com".to_string(),
            status: OrderStatus::WaitingPayment,
            item: OrderItem {
                product_slug: "v-bucks".to_string(),
                variant_id: "1000".to_string(),
                label: "1000 V-Bucks".to_string(),
                price: Decimal::new(600, 2),
                msrp: Some(Decimal::new(899, 2)),
            },
            payment: PaymentInfo {
                network: "USDT (TRC20)".to_string(),
                address: "TXabc".to_string(),
                amount: Decimal::new(600, 2),
            },
            created_at,
            updated_at: created_at,
            expires_at: created_at + 300_000,
            proof: None,
            reject_reason: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let (store, _temp) = setup_test_store().await;
        let order = sample_order("ORD-1", 1000);

        store.insert(&order).await.unwrap();
        let fetched = store.get("ORD-1").await.unwrap().expect("order should exist");

        assert_eq!(fetched.order, order);
        assert_eq!(fetched.version, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let (store, _temp) = setup_test_store().await;
        assert!(store.get("ORD-missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let (store, _temp) = setup_test_store().await;
        let order = sample_order("ORD-1", 1000);

        store.insert(&order).await.unwrap();
        match store.insert(&order).await {
            Err(StoreError::DuplicateId(id)) => assert_eq!(id, "ORD-1"),
            other => panic!("expected DuplicateId, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let (store, _temp) = setup_test_store().await;
        store.insert(&sample_order("ORD-1", 1000)).await.unwrap();
        store.insert(&sample_order("ORD-2", 2000)).await.unwrap();
        store.insert(&sample_order("ORD-3", 1500)).await.unwrap();

        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["ORD-2", "ORD-3", "ORD-1"]);
    }

    #[tokio::test]
    async fn test_cas_update_bumps_version_and_detects_conflict() {
        let (store, _temp) = setup_test_store().await;
        let mut order = sample_order("ORD-1", 1000);
        store.insert(&order).await.unwrap();

        order.status = OrderStatus::ProofSubmitted;
        order.updated_at = 2000;
        assert!(store.update(&order, 1).await.unwrap());

        // Stale version loses.
        order.status = OrderStatus::Completed;
        assert!(!store.update(&order, 1).await.unwrap());

        let fetched = store.get("ORD-1").await.unwrap().unwrap();
        assert_eq!(fetched.order.status, OrderStatus::ProofSubmitted);
        assert_eq!(fetched.version, 2);
    }

    #[tokio::test]
    async fn test_list_expiring_matches_only_overdue_waiting_orders() {
        let (store, _temp) = setup_test_store().await;
        let waiting_overdue = sample_order("ORD-1", 1000); // expires at 301000
        let mut waiting_fresh = sample_order("ORD-2", 1000);
        waiting_fresh.expires_at = 999_999_999;
        let mut proof_overdue = sample_order("ORD-3", 1000);
        proof_overdue.status = OrderStatus::ProofSubmitted;

        store.insert(&waiting_overdue).await.unwrap();
        store.insert(&waiting_fresh).await.unwrap();
        store.insert(&proof_overdue).await.unwrap();

        let expiring = store.list_expiring(400_000).await.unwrap();
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].order.id, "ORD-1");
    }

    #[tokio::test]
    async fn test_corrupt_record_degrades_to_absent() {
        let (store, _temp) = setup_test_store().await;
        store.insert(&sample_order("ORD-1", 1000)).await.unwrap();

        // Simulate on-disk corruption of one record.
        sqlx::query("UPDATE orders SET body = 'not json' WHERE id = 'ORD-1'")
            .execute(store.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO orders (id, status, created_at, expires_at, version, body)
             VALUES ('ORD-bad', 'waiting_payment', 500, 900, 1, '{\"broken\":')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        assert!(store.get("ORD-1").await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.list_expiring(1_000_000).await.unwrap().is_empty());
    }
}
