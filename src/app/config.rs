use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;
use url::Url;

const DEFAULT_TOKEN_URL: &str = "https://grupobmg.zeev.it/api/internal/legacy/1.0/datasource/get/1.0/qw0Xk6xWKL563BI8VvBqJiKXDN4jyNDKsseOvLMXi1FEXDGwfsSSDRJdTRFco2SrBbrg3l33pGO3FkkeH5yEuw__";
const DEFAULT_COMPROVANTE_URL: &str = "https://www.accesstage.com.br/apidoc/public/v1/comprovantes";

/// Formato do corpo devolvido em `POST /comprovante` quando o PDF é encontrado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// `{"pdf": "<base64>"}`
    Base64,
    /// `{"Resultado": "Comprovante encontrado", "link": "data:application/pdf;base64,..."}`
    DataUri,
    /// `{"pdfBase64": "...", "pdfLink": "<base>/comprovante/download"}`
    Link,
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(Self::Base64),
            "data_uri" | "data-uri" | "datauri" => Ok(Self::DataUri),
            "link" => Ok(Self::Link),
            other => Err(format!("unknown response mode: {other}")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub token_url: Url,
    pub comprovante_url: Url,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub retry_max_attempts: usize,
    pub retry_backoff: Duration,
    pub token_ttl: Duration,
    pub response_mode: ResponseMode,
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port: u16 = parse_var("PORT", 5000);

        Ok(Self {
            server_port,
            token_url: url_var("TOKEN_URL", DEFAULT_TOKEN_URL)?,
            comprovante_url: url_var("COMPROVANTE_URL", DEFAULT_COMPROVANTE_URL)?,
            connect_timeout: Duration::from_secs(parse_var("CONNECT_TIMEOUT_SECS", 5)),
            read_timeout: Duration::from_secs(parse_var("READ_TIMEOUT_SECS", 30)),
            retry_max_attempts: parse_var("RETRY_MAX_ATTEMPTS", 3),
            retry_backoff: Duration::from_millis(parse_var("RETRY_BACKOFF_MS", 1000)),
            token_ttl: Duration::from_secs(parse_var("TOKEN_TTL_SECS", 3600)),
            response_mode: parse_var("RESPONSE_MODE", ResponseMode::DataUri),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{server_port}")),
        })
    }

    /// Configuração apontando para upstreams arbitrários, usada em testes.
    pub fn for_upstreams(token_url: Url, comprovante_url: Url) -> Self {
        Self {
            server_port: 5000,
            token_url,
            comprovante_url,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            retry_max_attempts: 3,
            retry_backoff: Duration::from_millis(1000),
            token_ttl: Duration::from_secs(3600),
            response_mode: ResponseMode::DataUri,
            public_base_url: "http://localhost:5000".to_string(),
        }
    }

    pub fn download_link(&self) -> String {
        format!("{}/comprovante/download", self.public_base_url)
    }
}

fn parse_var<T>(name: &'static str, default: T) -> T
where
    T: FromStr,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn url_var(name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_mode_parsing() {
        assert_eq!("base64".parse::<ResponseMode>(), Ok(ResponseMode::Base64));
        assert_eq!("DATA_URI".parse::<ResponseMode>(), Ok(ResponseMode::DataUri));
        assert_eq!(" link ".parse::<ResponseMode>(), Ok(ResponseMode::Link));
        assert!("pdf".parse::<ResponseMode>().is_err());
    }

    #[test]
    fn test_download_link_uses_public_base() {
        let mut config = Config::for_upstreams(
            Url::parse("http://token.local/").unwrap(),
            Url::parse("http://comprovante.local/").unwrap(),
        );
        config.public_base_url = "https://adapter.example.com".to_string();
        assert_eq!(
            config.download_link(),
            "https://adapter.example.com/comprovante/download"
        );
    }

    #[test]
    fn test_defaults_match_reference_service() {
        let config = Config::for_upstreams(
            Url::parse(DEFAULT_TOKEN_URL).unwrap(),
            Url::parse(DEFAULT_COMPROVANTE_URL).unwrap(),
        );
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.response_mode, ResponseMode::DataUri);
    }
}
