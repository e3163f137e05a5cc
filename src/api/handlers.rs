use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;
use utoipa::OpenApi;

use super::{
    dto::{CountDto, ErrorDto, ReadingDto, TelemetryCreatedDto, TelemetryRequest},
    errors::AppError,
};
use crate::db::{models::NewReading, Store};

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

/// Store one reading sent by a device. `recorded_at` is always the server's
/// receipt time.
#[utoipa::path(
    post,
    path = "/api/telemetry",
    request_body = TelemetryRequest,
    responses(
        (status = 201, description = "Reading stored", body = TelemetryCreatedDto),
        (status = 400, description = "Missing or malformed fields", body = ErrorDto),
        (status = 500, description = "Store failure", body = ErrorDto),
    ),
    tag = "telemetry"
)]
pub async fn create_reading(
    State(store): State<Store>,
    payload: Result<Json<TelemetryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TelemetryCreatedDto>), AppError> {
    let Json(request) = payload?;
    let (temperature, humidity) = request.into_values()?;

    let reading = store
        .insert(NewReading::received_now(temperature, humidity))
        .await?;

    info!(
        id = %reading.id,
        temperature,
        humidity,
        recorded_at = %reading.recorded_at.to_rfc3339(),
        "Reading stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(TelemetryCreatedDto {
            message: "Reading stored".to_owned(),
            id: reading.id,
            server_timestamp: reading.recorded_at,
        }),
    ))
}

/// Every stored reading, most recent first. No pagination.
#[utoipa::path(
    get,
    path = "/api/telemetry",
    responses(
        (status = 200, description = "All readings ordered by recorded_at DESC", body = Vec<ReadingDto>),
        (status = 500, description = "Store failure", body = ErrorDto),
    ),
    tag = "telemetry"
)]
pub async fn list_readings(State(store): State<Store>) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let rows = store.list().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/telemetry/count",
    responses(
        (status = 200, description = "Number of stored readings", body = CountDto),
        (status = 500, description = "Store failure", body = ErrorDto),
    ),
    tag = "telemetry"
)]
pub async fn count_readings(State(store): State<Store>) -> Result<Json<CountDto>, AppError> {
    let total_records = store.count().await?;
    Ok(Json(CountDto { total_records }))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(create_reading, list_readings, count_readings, health),
    components(schemas(TelemetryRequest, TelemetryCreatedDto, ReadingDto, CountDto, ErrorDto)),
    tags(
        (name = "telemetry", description = "Temperature/humidity reading endpoints"),
        (name = "system", description = "System endpoints"),
    ),
    info(
        title = "Telemetry Service API",
        version = "0.1.0",
        description = "Ingests and serves temperature/humidity readings from sensor devices"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
