use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::{HeaderName, HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use sortiment_observability::{RequestId, request_span};

use crate::app::{dto, errors, services::AppServices};

/// File name of the spreadsheet download.
pub const XLSX_FILE_NAME: &str = "Herzstuecke-Negativliste.xlsx";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn as_json(Extension(services): Extension<AppServices>, body: Bytes) -> Response {
    let (request_id, span) = request_span("negative_list.json");
    let response = async move {
        match services.negative_list(body.to_vec()).await {
            Ok(list) => Json(dto::NegativeListResponse::from(list)).into_response(),
            Err(e) => errors::service_error_to_response(e),
        }
    }
    .instrument(span)
    .await;
    with_request_id(response, request_id)
}

pub async fn as_pdf(Extension(services): Extension<AppServices>, body: Bytes) -> Response {
    let (request_id, span) = request_span("negative_list.pdf");
    let response = async move {
        match services.negative_list_pdf(body.to_vec()).await {
            Ok(doc) => {
                let summary = doc.summary;
                (
                    [
                        (header::CONTENT_TYPE, "application/pdf".to_string()),
                        (
                            HeaderName::from_static("x-negative-list-entries"),
                            summary.entries.to_string(),
                        ),
                        (
                            HeaderName::from_static("x-barcode-placeholders"),
                            summary.placeholders.len().to_string(),
                        ),
                        (HeaderName::from_static("x-pages"), summary.pages.to_string()),
                    ],
                    doc.bytes,
                )
                    .into_response()
            }
            Err(e) => errors::service_error_to_response(e),
        }
    }
    .instrument(span)
    .await;
    with_request_id(response, request_id)
}

pub async fn as_xlsx(Extension(services): Extension<AppServices>, body: Bytes) -> Response {
    let (request_id, span) = request_span("negative_list.xlsx");
    let response = async move {
        match services.negative_list_xlsx(body.to_vec()).await {
            Ok(bytes) => (
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{XLSX_FILE_NAME}\""),
                    ),
                ],
                bytes,
            )
                .into_response(),
            Err(e) => errors::service_error_to_response(e),
        }
    }
    .instrument(span)
    .await;
    with_request_id(response, request_id)
}

fn with_request_id(mut response: Response, request_id: RequestId) -> Response {
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    response
}
