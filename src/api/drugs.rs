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
use crate::models::DrugForm;

pub async fn list_drugs(_claims: Claims, State(state): State<AppState>) -> Response {
    match state.drugs.list_drugs().await {
        Ok(drugs) => (StatusCode::OK, Json(json!({ "data": drugs }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn create_drug(
    _claims: Claims,
    State(state): State<AppState>,
    Json(form): Json<DrugForm>,
) -> Response {
    let new_drug = match form.into_new() {
        Ok(new_drug) => new_drug,
        Err(msg) => return error_response(ServiceError::Validation(msg)),
    };

    match state.drugs.create_drug(new_drug).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "drug registered" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn update_drug(
    _claims: Claims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<DrugForm>,
) -> Response {
    match state.drugs.update_drug(id, form).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "drug updated" }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_drug(
    _claims: Claims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    match state.drugs.delete_drug(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "drug deleted" }))).into_response(),
        Err(err) => error_response(err),
    }
}
