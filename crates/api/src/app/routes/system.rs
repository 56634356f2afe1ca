use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::{dto, services::AppServices};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn master(Extension(services): Extension<AppServices>) -> impl IntoResponse {
    Json(dto::MasterSummaryResponse::from(services.master()))
}
