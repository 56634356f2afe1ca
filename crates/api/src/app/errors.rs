use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sortiment_core::DomainError;
use sortiment_infra::LoadError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Load(LoadError::Domain(e @ DomainError::Schema { .. })) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "schema_error", e.to_string())
        }
        ServiceError::Load(LoadError::Domain(e)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", e.to_string())
        }
        ServiceError::Load(
            e @ (LoadError::Workbook(_) | LoadError::Xlsx(_) | LoadError::EmptyWorkbook),
        ) => json_error(StatusCode::BAD_REQUEST, "invalid_workbook", e.to_string()),
        ServiceError::Timeout(limit) => json_error(
            StatusCode::GATEWAY_TIMEOUT,
            "timeout",
            format!("document generation exceeded {}s", limit.as_secs()),
        ),
        other => {
            tracing::error!(error = %other, "request failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", other.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
