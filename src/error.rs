//! Erros da aplicação e sua tradução para respostas HTTP.
//!
//! Cada etapa do fluxo devolve um [`AppError`]; o status HTTP é decidido em um
//! único lugar, no `IntoResponse` abaixo.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Limite de caracteres do corpo upstream repassado em `detalhes`.
const MAX_DETAIL_LEN: usize = 512;

#[derive(Error, Debug)]
pub enum AppError {
    /// Campo obrigatório ausente ou com tipo inválido.
    #[error("{0}")]
    Validation(String),

    /// Data ou valor fora do formato brasileiro esperado.
    #[error("{0}")]
    Format(String),

    /// Falha ao obter o token no emissor.
    #[error("Falha ao gerar token")]
    UpstreamAuth(String),

    /// A API de comprovantes recusou o token (401/403).
    #[error("Token recusado pela API de comprovantes")]
    TokenRejected { details: Option<String> },

    #[error("Comprovante não encontrado")]
    UpstreamNotFound { details: Option<String> },

    /// Qualquer outra falha da API de comprovantes.
    #[error("{reason}")]
    Upstream {
        reason: &'static str,
        details: Option<String>,
    },

    #[error("Tempo esgotado aguardando a API de comprovantes")]
    UpstreamTimeout,

    #[error("Erro interno")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Format(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamAuth(_)
            | AppError::TokenRejected { .. }
            | AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            AppError::UpstreamAuth(details) => Some(details.as_str()),
            AppError::TokenRejected { details }
            | AppError::UpstreamNotFound { details }
            | AppError::Upstream { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(cause) = &self {
            error!(%cause, "internal error while handling request");
        }

        let status = self.status_code();
        let mut body = json!({
            "Resultado": "Erro",
            "motivo": self.to_string(),
        });
        if let Some(details) = self.details().filter(|d| !d.is_empty()) {
            body["detalhes"] = json!(truncate(details, MAX_DETAIL_LEN));
        }

        (status, Json(body)).into_response()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
