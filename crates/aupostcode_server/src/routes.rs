//! HTTP routes for the postcode API.
//!
//! # Responsibility
//! - Map `GET /api/v0/aust-postcode/{locality}` onto the search service.
//! - Serialize every outcome as a `StatusEnvelope` with a matching HTTP status,
//!   including paths that fail to decode.

use aupostcode_core::{PostcodeService, StatusEnvelope};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: PostcodeService,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v0/aust-postcode/:locality", get(search_locality))
        .route("/api/v0/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn search_locality(
    State(state): State<AppState>,
    locality: Result<Path<String>, PathRejection>,
) -> (StatusCode, Json<StatusEnvelope>) {
    let envelope = match locality {
        Ok(Path(locality)) => state.service.search_by_locality(&locality),
        Err(rejection) => {
            log::warn!(
                "event=path_rejected module=server status={} error={}",
                rejection.status().as_u16(),
                rejection.body_text()
            );
            StatusEnvelope::status(rejection.status().as_u16(), rejection.body_text())
        }
    };
    (to_status_code(envelope.code()), Json(envelope))
}

async fn health_check(State(state): State<AppState>) -> Json<StatusEnvelope> {
    log::debug!(
        "event=health_check module=server status=ok count={}",
        state.service.pool().count()
    );
    Json(StatusEnvelope::status(200, "ok"))
}

fn to_status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
