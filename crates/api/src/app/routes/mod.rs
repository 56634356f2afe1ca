use axum::{
    Router,
    routing::{get, post},
};

pub mod negative_list;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/master", get(system::master))
        .route("/negative-list", post(negative_list::as_json))
        .route("/negative-list/pdf", post(negative_list::as_pdf))
        .route("/negative-list/xlsx", post(negative_list::as_xlsx))
}
