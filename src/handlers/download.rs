use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{error, info};

use crate::services::ComprovanteService;

/// `GET /comprovante/download`: último PDF gerado pelo processo.
pub async fn download_comprovante(State(service): State<Arc<ComprovanteService>>) -> Response {
    match service.pdfs().latest_bytes() {
        None => (
            StatusCode::NOT_FOUND,
            "Nenhum comprovante foi gerado ainda",
        )
            .into_response(),
        Some(Err(err)) => {
            error!(error = %err, "stored comprovante is not valid base64");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Comprovante armazenado está corrompido",
            )
                .into_response()
        }
        Some(Ok(bytes)) => {
            info!(bytes = bytes.len(), "serving last comprovante");
            (
                [
                    (header::CONTENT_TYPE, "application/pdf"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"comprovante.pdf\"",
                    ),
                ],
                bytes,
            )
                .into_response()
        }
    }
}
