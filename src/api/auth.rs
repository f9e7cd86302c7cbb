use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::error_response;
use crate::domain::ServiceError;
use crate::infrastructure::AppState;
use crate::models::{AuthForm, RegisterForm};

pub async fn sign_up(State(state): State<AppState>, Json(form): Json<RegisterForm>) -> Response {
    let new_user = match form.into_new() {
        Ok(new_user) => new_user,
        Err(msg) => return error_response(ServiceError::Validation(msg)),
    };

    tracing::info!("sign-up attempt for {}", new_user.email);

    match state.auth.sign_up(new_user).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "account created" })),
        )
            .into_response(),
        Err(ServiceError::Duplicate) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "an account with this email already exists" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn sign_in(State(state): State<AppState>, Json(form): Json<AuthForm>) -> Response {
    let credentials = match form.into_credentials() {
        Ok(credentials) => credentials,
        Err(msg) => return error_response(ServiceError::Validation(msg)),
    };

    tracing::info!("sign-in attempt for {}", credentials.email);

    match state.auth.sign_in(credentials).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}
