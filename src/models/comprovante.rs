use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::config::ResponseMode;
use crate::error::AppError;

/// Campos obrigatórios do corpo de `POST /comprovante`, na ordem em que são
/// reportados quando ausentes.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "tipoDePagamento",
    "codBan",
    "numeroDoDocumento",
    "valorDoPagamento",
    "dataDoPagamento",
];

/// Pedido de comprovante como enviado pelo chamador, ainda no formato brasileiro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComprovanteRequest {
    pub tipo_de_pagamento: String,
    pub cod_ban: String,
    pub numero_do_documento: String,
    pub valor_do_pagamento: String,
    pub data_do_pagamento: String,
}

impl ComprovanteRequest {
    /// Extrai os cinco campos de um corpo JSON.
    ///
    /// Chaves ausentes ou `null` são reunidas em uma única mensagem. Números
    /// são aceitos e convertidos para texto; qualquer outro tipo é rejeitado.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let object = body
            .as_object()
            .ok_or_else(|| AppError::Validation("Corpo deve ser um objeto JSON".to_string()))?;

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| object.get(*field).map_or(true, Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Campos faltando: {}",
                missing.join(", ")
            )));
        }

        let field = |name: &str| -> Result<String, AppError> {
            match &object[name] {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(AppError::Validation(format!("Campo inválido: {name}"))),
            }
        };

        Ok(Self {
            tipo_de_pagamento: field("tipoDePagamento")?,
            cod_ban: field("codBan")?,
            numero_do_documento: field("numeroDoDocumento")?,
            valor_do_pagamento: field("valorDoPagamento")?,
            data_do_pagamento: field("dataDoPagamento")?,
        })
    }

    pub fn normalize(&self) -> Result<NormalizedRequest, AppError> {
        let (valor, data) =
            crate::utils::normalize(&self.valor_do_pagamento, &self.data_do_pagamento)?;
        Ok(NormalizedRequest {
            tipo_pagamento: self.tipo_de_pagamento.clone(),
            codigo_banco_pagador: self.cod_ban.clone(),
            numero_documento: self.numero_do_documento.clone(),
            valor_pagamento: valor,
            data_pagamento: data,
        })
    }
}

// Payload enviado à API de comprovantes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRequest {
    pub tipo_pagamento: String,
    pub codigo_banco_pagador: String,
    pub numero_documento: String,
    pub valor_pagamento: String,
    pub data_pagamento: String,
}

/// Resposta do emissor de token: `{"success": [{"cod": "<token>"}]}`.
#[derive(Debug, Deserialize)]
pub struct TokenEnvelope {
    #[serde(default)]
    pub success: Vec<TokenEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TokenEntry {
    pub cod: Option<String>,
}

impl TokenEnvelope {
    pub fn into_token(self) -> Option<String> {
        self.success
            .into_iter()
            .next()
            .and_then(|entry| entry.cod)
            .filter(|cod| !cod.trim().is_empty())
    }
}

/// Resposta de sucesso da API de comprovantes.
#[derive(Debug, Deserialize)]
pub struct ReceiptEnvelope {
    pub pdf: Option<String>,
}

/// Corpo de sucesso de `POST /comprovante`, conforme o modo configurado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ComprovanteResponse {
    Base64 {
        pdf: String,
    },
    DataUri {
        #[serde(rename = "Resultado")]
        resultado: String,
        link: String,
    },
    Link {
        #[serde(rename = "pdfBase64")]
        pdf_base64: String,
        #[serde(rename = "pdfLink")]
        pdf_link: String,
    },
}

impl ComprovanteResponse {
    pub fn build(mode: ResponseMode, pdf_base64: String, download_link: &str) -> Self {
        match mode {
            ResponseMode::Base64 => Self::Base64 { pdf: pdf_base64 },
            ResponseMode::DataUri => Self::DataUri {
                resultado: "Comprovante encontrado".to_string(),
                link: format!("data:application/pdf;base64,{pdf_base64}"),
            },
            ResponseMode::Link => Self::Link {
                pdf_base64,
                pdf_link: download_link.to_string(),
            },
        }
    }
}
