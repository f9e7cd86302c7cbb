use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::error_response;
use crate::auth::Claims;
use crate::domain::ServiceError;
use crate::infrastructure::AppState;
use crate::models::VaccinationForm;

pub async fn list_vaccinations(_claims: Claims, State(state): State<AppState>) -> Response {
    match state.vaccinations.list_vaccinations().await {
        Ok(records) => (StatusCode::OK, Json(json!({ "data": records }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn create_vaccination(
    _claims: Claims,
    State(state): State<AppState>,
    Json(form): Json<VaccinationForm>,
) -> Response {
    let new_vaccination = match form.into_new() {
        Ok(new_vaccination) => new_vaccination,
        Err(msg) => return error_response(ServiceError::Validation(msg)),
    };

    match state.vaccinations.create_vaccination(new_vaccination).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "vaccination registered" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn update_vaccination(
    _claims: Claims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<VaccinationForm>,
) -> Response {
    match state.vaccinations.update_vaccination(id, form).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "vaccination updated" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_vaccination(
    _claims: Claims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    match state.vaccinations.delete_vaccination(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "vaccination deleted" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
