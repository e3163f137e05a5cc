use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::info;

use super::{
    models::{NewReading, Reading},
    StoreError,
};

/// Reading store backed by the `telemetry_readings` table.
///
/// The schema is applied on first use and retried on every call until it
/// succeeds, so a database that comes up after the service does is picked up
/// without a restart.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: Arc<OnceCell<()>>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// Run pending migrations unless a previous call already succeeded.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema
            .get_or_try_init(|| async {
                sqlx::migrate!("./migrations").run(&self.pool).await?;
                info!("Database schema ready");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema.initialized()
    }

    pub async fn insert(&self, new: NewReading) -> Result<Reading, StoreError> {
        self.ensure_schema().await?;
        let reading = sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO telemetry_readings (temperature, humidity, recorded_at)
            VALUES ($1, $2, $3)
            RETURNING id, temperature, humidity, recorded_at
            "#,
        )
        .bind(new.temperature)
        .bind(new.humidity)
        .bind(new.recorded_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(reading)
    }

    pub async fn list(&self) -> Result<Vec<Reading>, StoreError> {
        self.ensure_schema().await?;
        let rows = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, temperature, humidity, recorded_at
            FROM telemetry_readings
            ORDER BY recorded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        self.ensure_schema().await?;
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM telemetry_readings")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
