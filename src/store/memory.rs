//! In-memory order store for tests and local experimentation.

use super::{OrderStore, StoreError, VersionedOrder};
use crate::domain::{Order, OrderStatus};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryOrderStore {
    // (order, version), insertion order preserved.
    records: Mutex<Vec<(Order, i64)>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|(o, _)| o.id == order.id) {
            return Err(StoreError::DuplicateId(order.id.clone()));
        }
        records.push((order.clone(), 1));
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<VersionedOrder>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|(o, _)| o.id == id).map(|(o, v)| {
            VersionedOrder {
                order: o.clone(),
                version: *v,
            }
        }))
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let records = self.records.lock().unwrap();
        let mut orders: Vec<Order> = records.iter().map(|(o, _)| o.clone()).collect();
        orders.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        Ok(orders)
    }

    async fn list_expiring(&self, now_ms: i64) -> Result<Vec<VersionedOrder>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|(o, _)| o.status == OrderStatus::WaitingPayment && now_ms > o.expires_at)
            .map(|(o, v)| VersionedOrder {
                order: o.clone(),
                version: *v,
            })
            .collect())
    }

    async fn update(&self, order: &Order, expected_version: i64) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|(o, v)| o.id == order.id && *v == expected_version)
        {
            Some(slot) => {
                slot.0 = order.clone();
                slot.1 += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
