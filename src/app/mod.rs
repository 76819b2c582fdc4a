pub mod config;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::handlers::{comprovante, download, health_handler, metrics};
use crate::services::ComprovanteService;

pub fn router(service: Arc<ComprovanteService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/comprovante", post(comprovante::create_comprovante))
        .route("/comprovante/download", get(download::download_comprovante))
        .route("/metrics", get(metrics::get_metrics))
        .with_state(service)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let cause = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    AppError::Internal(cause).into_response()
}
