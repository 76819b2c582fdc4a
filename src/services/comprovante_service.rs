use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::config::{Config, ResponseMode};
use crate::error::AppError;
use crate::models::comprovante::{ComprovanteRequest, ComprovanteResponse};
use crate::services::atomic_metrics::AtomicMetrics;
use crate::services::pdf_store::LastPdfStore;
use crate::services::token_cache::TokenCache;
use crate::services::upstream_client::UpstreamClient;

/// Orquestra token, normalização e chamada à API de comprovantes.
pub struct ComprovanteService {
    upstream: Arc<UpstreamClient>,
    tokens: TokenCache,
    pdfs: LastPdfStore,
    metrics: AtomicMetrics,
    response_mode: ResponseMode,
    download_link: String,
}

impl ComprovanteService {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let upstream = Arc::new(UpstreamClient::new(config)?);
        let tokens = TokenCache::new(upstream.clone(), config.token_ttl);

        Ok(Self {
            upstream,
            tokens,
            pdfs: LastPdfStore::new(),
            metrics: AtomicMetrics::new(),
            response_mode: config.response_mode,
            download_link: config.download_link(),
        })
    }

    pub async fn fetch_comprovante(
        &self,
        request: &ComprovanteRequest,
    ) -> Result<ComprovanteResponse, AppError> {
        let credential = self.tokens.get_or_fetch_token().await?;
        let normalized = request.normalize()?;

        match self
            .upstream
            .fetch_receipt(credential.value(), &normalized)
            .await
        {
            Ok(pdf) => {
                self.pdfs.store(pdf.clone());
                info!(documento = %normalized.numero_documento, "comprovante ready");
                Ok(ComprovanteResponse::build(
                    self.response_mode,
                    pdf,
                    &self.download_link,
                ))
            }
            Err(err @ AppError::TokenRejected { .. }) => {
                warn!("comprovante API rejected the cached token");
                self.tokens.invalidate().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    pub fn pdfs(&self) -> &LastPdfStore {
        &self.pdfs
    }

    pub fn metrics(&self) -> &AtomicMetrics {
        &self.metrics
    }

    pub fn metrics_json(&self) -> serde_json::Value {
        let snapshot = self.metrics.snapshot();
        json!({
            "requests_received": snapshot.received,
            "receipts_delivered": snapshot.delivered,
            "requests_failed": snapshot.failed,
            "success_rate": snapshot.success_rate,
            "token_fetches": self.tokens.fetch_count(),
        })
    }
}
