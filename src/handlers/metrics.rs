use axum::{extract::State, response::Json};
use std::sync::Arc;
use crate::services::ComprovanteService;

pub async fn get_metrics(
    State(service): State<Arc<ComprovanteService>>,
) -> Json<serde_json::Value> {
    Json(service.metrics_json())
}
