use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One temperature/humidity sample as stored. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Server time at which the reading was received.
    pub recorded_at: DateTime<Utc>,
}

/// A reading that has passed validation but has no id yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewReading {
    pub temperature: f64,
    pub humidity: f64,
    pub recorded_at: DateTime<Utc>,
}

impl NewReading {
    /// Stamp a sample with the current server time.
    pub fn received_now(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            recorded_at: Utc::now(),
        }
    }
}
