pub mod comprovante;
pub mod download;
pub mod metrics;

use axum::http::StatusCode;

pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}
