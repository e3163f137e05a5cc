pub mod dto;
pub mod errors;
pub mod handlers;
pub mod status;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::db::Store;
use handlers::ApiDoc;

pub fn router(store: Store) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/api/telemetry",
            get(handlers::list_readings).post(handlers::create_reading),
        )
        .route("/api/telemetry/count", get(handlers::count_readings))
        .with_state(store)
        .split_for_parts();

    router
        .route("/", get(status::status_page))
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
