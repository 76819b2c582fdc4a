use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{error, info, warn};
use url::Url;

use crate::app::config::Config;
use crate::error::AppError;
use crate::models::comprovante::{NormalizedRequest, ReceiptEnvelope, TokenEnvelope};
use crate::services::http_client::{HttpClient, RetryPolicy, TransportError};
use crate::services::token_cache::TokenSource;

/// Fala com os dois serviços externos: o emissor de token e a API de
/// comprovantes.
pub struct UpstreamClient {
    http: HttpClient,
    token_url: Url,
    comprovante_url: Url,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let policy = RetryPolicy::new(config.retry_max_attempts, config.retry_backoff);
        let http = HttpClient::new(config.connect_timeout, config.read_timeout, policy)?;

        Ok(Self {
            http,
            token_url: config.token_url.clone(),
            comprovante_url: config.comprovante_url.clone(),
        })
    }

    /// Busca o PDF (base64) do comprovante.
    pub async fn fetch_receipt(
        &self,
        token: &str,
        request: &NormalizedRequest,
    ) -> Result<String, AppError> {
        let builder = self
            .http
            .post(self.comprovante_url.clone())
            .header("token", token)
            .json(request);

        let response = self.http.send(builder).await.map_err(|err| match err {
            TransportError::Timeout(_) => {
                error!(documento = %request.numero_documento, "comprovante request timed out");
                AppError::UpstreamTimeout
            }
            other => {
                error!(documento = %request.numero_documento, error = %other, "comprovante request failed");
                AppError::Upstream {
                    reason: "Falha de comunicação com a API de comprovantes",
                    details: None,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, documento = %request.numero_documento, "comprovante API returned an error");
            return Err(match status {
                StatusCode::NOT_FOUND => AppError::UpstreamNotFound {
                    details: Some(body),
                },
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::TokenRejected {
                    details: Some(body),
                },
                _ => AppError::Upstream {
                    reason: "Erro na API de comprovantes",
                    details: Some(format!("HTTP {}: {}", status.as_u16(), body)),
                },
            });
        }

        let envelope: ReceiptEnvelope = response.json().await.map_err(|err| {
            if err.is_timeout() {
                return AppError::UpstreamTimeout;
            }
            warn!(error = %err, "comprovante response is not valid JSON");
            missing_pdf()
        })?;

        match envelope.pdf {
            Some(pdf) if !pdf.is_empty() => {
                info!(documento = %request.numero_documento, bytes = pdf.len(), "comprovante received");
                Ok(pdf)
            }
            _ => Err(missing_pdf()),
        }
    }
}

fn missing_pdf() -> AppError {
    AppError::Upstream {
        reason: "Resposta sem campo PDF",
        details: None,
    }
}

#[async_trait]
impl TokenSource for UpstreamClient {
    async fn fetch_token(&self) -> Result<String, AppError> {
        let response = self
            .http
            .send(self.http.get(self.token_url.clone()))
            .await
            .map_err(|err| {
                error!(error = %err, "token request failed");
                AppError::UpstreamAuth("falha de conexão com o emissor de token".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "token issuer returned an error");
            return Err(AppError::UpstreamAuth(format!(
                "emissor de token respondeu HTTP {}",
                status.as_u16()
            )));
        }

        let envelope: TokenEnvelope = response.json().await.map_err(|err| {
            warn!(error = %err, "token response is malformed");
            AppError::UpstreamAuth("resposta do emissor de token inválida".to_string())
        })?;

        envelope.into_token().ok_or_else(|| {
            warn!("token response has no success[0].cod");
            AppError::UpstreamAuth("resposta do emissor sem success[0].cod".to_string())
        })
    }
}
