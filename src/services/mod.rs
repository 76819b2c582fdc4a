pub mod atomic_metrics;
pub mod comprovante_service;
pub mod http_client;
pub mod pdf_store;
pub mod token_cache;
pub mod upstream_client;

pub use comprovante_service::ComprovanteService;
pub use upstream_client::UpstreamClient;
