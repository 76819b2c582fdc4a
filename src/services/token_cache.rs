use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::AppError;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Origem de tokens novos. Implementada pelo cliente upstream.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<String, AppError>;
}

/// Token emitido pelo upstream, com o instante em que foi obtido.
#[derive(Clone)]
pub struct Credential {
    value: String,
    acquired_at: Instant,
    ttl: Duration,
}

impl Credential {
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            acquired_at: Instant::now(),
            ttl,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn age(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.age() >= self.ttl
    }
}

// Nunca expõe o valor do token em logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("age", &self.age())
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Guarda no máximo um token válido.
///
/// O mutex fica preso durante a renovação: chamadas concorrentes que
/// encontram o token vencido esperam a mesma busca em vez de disparar várias.
pub struct TokenCache {
    source: Arc<dyn TokenSource>,
    ttl: Duration,
    slot: Mutex<Option<Credential>>,
    fetches: AtomicU64,
}

impl TokenCache {
    pub fn new(source: Arc<dyn TokenSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: Mutex::new(None),
            fetches: AtomicU64::new(0),
        }
    }

    pub async fn get_or_fetch_token(&self) -> Result<Credential, AppError> {
        let mut slot = self.slot.lock().await;

        if let Some(credential) = slot.as_ref() {
            if !credential.is_expired() {
                debug!(age = ?credential.age(), "reusing cached token");
                return Ok(credential.clone());
            }
            debug!("cached token expired");
        }
        *slot = None;

        self.fetches.fetch_add(1, Ordering::Relaxed);
        let value = self.source.fetch_token().await?;
        let credential = Credential::new(value, self.ttl);
        *slot = Some(credential.clone());
        info!(ttl = ?self.ttl, "fetched new upstream token");

        Ok(credential)
    }

    /// Descarta o token atual; a próxima chamada busca um novo.
    pub async fn invalidate(&self) {
        if self.slot.lock().await.take().is_some() {
            info!("cached token invalidated");
        }
    }

    /// Quantas buscas ao emissor foram feitas desde a criação.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}
