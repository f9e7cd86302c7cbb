pub mod auth;
pub mod drugs;
pub mod health;
pub mod vaccinations;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::domain::ServiceError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        // Drugs
        .route("/drugs", get(drugs::list_drugs).post(drugs::create_drug))
        .route(
            "/drugs/:id",
            put(drugs::update_drug).delete(drugs::delete_drug),
        )
        // Vaccination records
        .route(
            "/vaccination",
            get(vaccinations::list_vaccinations).post(vaccinations::create_vaccination),
        )
        .route(
            "/vaccination/:id",
            put(vaccinations::update_vaccination).delete(vaccinations::delete_vaccination),
        )
        .with_state(state)
}

/// One mapping from service outcomes to wire responses; every kind is
/// mutually exclusive, and Timeout stays distinguishable from Internal.
pub(crate) fn error_response(err: ServiceError) -> Response {
    match err {
        // An empty store renders as an empty collection, never as an error.
        ServiceError::NoRecords => {
            (StatusCode::OK, Json(json!({ "data": [] }))).into_response()
        }
        ServiceError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(json!({ "error": "request deadline exceeded" })),
        )
            .into_response(),
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "record not found" })),
        )
            .into_response(),
        ServiceError::Duplicate => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "record already exists" })),
        )
            .into_response(),
        ServiceError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
            .into_response(),
        ServiceError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
        ServiceError::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal error, please try again later" })),
        )
            .into_response(),
    }
}
