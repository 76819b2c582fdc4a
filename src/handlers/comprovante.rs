use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::comprovante::{ComprovanteRequest, ComprovanteResponse};
use crate::services::ComprovanteService;

/// `POST /comprovante`
pub async fn create_comprovante(
    State(service): State<Arc<ComprovanteService>>,
    body: Bytes,
) -> Result<Json<ComprovanteResponse>, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        service.metrics().increment_received();

        let result = handle(&service, &body).await;
        match &result {
            Ok(_) => {
                service.metrics().increment_delivered();
                info!("comprovante delivered");
            }
            Err(err) => {
                service.metrics().increment_failed();
                warn!(status = err.status_code().as_u16(), motivo = %err, "comprovante request failed");
            }
        }

        result.map(Json)
    }
    .instrument(info_span!("comprovante", %request_id))
    .await
}

async fn handle(
    service: &ComprovanteService,
    body: &[u8],
) -> Result<ComprovanteResponse, AppError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|err| AppError::Validation(format!("JSON inválido: {err}")))?;
    let request = ComprovanteRequest::from_json(&payload)?;

    info!(documento = %request.numero_do_documento, banco = %request.cod_ban, "received comprovante request");
    service.fetch_comprovante(&request).await
}
