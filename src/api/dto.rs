use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::AppError;

/// Request body for `POST /api/telemetry`.
///
/// Fields are optional at the serde level so that a missing value is reported
/// by name instead of as a generic deserialization failure. Any other field,
/// including a device timestamp, is rejected.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TelemetryRequest {
    /// Degrees Celsius
    #[schema(required = true)]
    pub temperature: Option<f64>,
    /// Relative humidity percentage
    #[schema(required = true)]
    pub humidity: Option<f64>,
}

impl TelemetryRequest {
    /// Returns `(temperature, humidity)`, or a validation error naming every
    /// missing field.
    pub fn into_values(self) -> Result<(f64, f64), AppError> {
        match (self.temperature, self.humidity) {
            (Some(temperature), Some(humidity)) => Ok((temperature, humidity)),
            (temperature, humidity) => {
                let missing: Vec<&str> = [
                    temperature.is_none().then_some("temperature"),
                    humidity.is_none().then_some("humidity"),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(AppError::Validation(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Response for a stored reading.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TelemetryCreatedDto {
    pub message: String,
    pub id: Uuid,
    /// Server time assigned to the reading.
    pub server_timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub recorded_at: DateTime<Utc>,
}

impl From<crate::db::models::Reading> for ReadingDto {
    fn from(r: crate::db::models::Reading) -> Self {
        Self {
            id: r.id,
            temperature: r.temperature,
            humidity: r.humidity,
            recorded_at: r.recorded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub total_records: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}
