use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewReading, Reading};

/// Process-local reading store.
///
/// Wrapped in `Arc` so it can be cheaply cloned into the router state.
/// Readings are kept in insertion order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Vec<Reading>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, new: NewReading) -> Reading {
        let reading = Reading {
            id: Uuid::new_v4(),
            temperature: new.temperature,
            humidity: new.humidity,
            recorded_at: new.recorded_at,
        };
        self.inner.write().await.push(reading.clone());
        reading
    }

    /// All readings, newest `recorded_at` first. Equal timestamps come back
    /// latest-inserted first.
    pub async fn list(&self) -> Vec<Reading> {
        let mut readings: Vec<Reading> = self.inner.read().await.iter().rev().cloned().collect();
        readings.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        readings
    }

    pub async fn count(&self) -> i64 {
        self.inner.read().await.len() as i64
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn new_reading(temperature: f64, offset_secs: i64) -> NewReading {
        NewReading {
            temperature,
            humidity: 50.0,
            recorded_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn empty_store_returns_nothing() {
        let store = MemoryStore::new();
        assert!(store.list().await.is_empty());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(new_reading(20.0, 0)).await;
        let b = store.insert(new_reading(20.0, 0)).await;

        assert_ne!(a.id, b.id);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn insert_keeps_values_and_timestamp() {
        let store = MemoryStore::new();
        let new = new_reading(23.5, 0);
        let stored = store.insert(new).await;

        assert_eq!(stored.temperature, 23.5);
        assert_eq!(stored.humidity, 50.0);
        assert_eq!(stored.recorded_at, new.recorded_at);
    }

    #[tokio::test]
    async fn list_is_newest_first_regardless_of_insert_order() {
        let store = MemoryStore::new();
        store.insert(new_reading(1.0, -60)).await;
        store.insert(new_reading(3.0, 60)).await;
        store.insert(new_reading(2.0, 0)).await;

        let temps: Vec<f64> = store.list().await.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn equal_timestamps_list_latest_insert_first() {
        let store = MemoryStore::new();
        let at = Utc::now();
        for temperature in [1.0, 2.0, 3.0] {
            store
                .insert(NewReading {
                    temperature,
                    humidity: 40.0,
                    recorded_at: at,
                })
                .await;
        }

        let temps: Vec<f64> = store.list().await.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.insert(new_reading(21.0, 0)).await;

        assert_eq!(clone.count().await, 1);
        assert_eq!(clone.list().await[0].temperature, 21.0);
    }
}
