//! Adaptador HTTP para emissão de comprovantes de pagamento.
//!
//! Recebe o pedido em formato brasileiro (`DD/MM/AAAA`, `1.234,56`), obtém um
//! token no emissor, consulta a API de comprovantes e devolve o PDF.

pub mod app;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;
