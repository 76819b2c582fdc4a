use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::RwLock;

/// Último PDF gerado, em base64.
///
/// Um único slot, sem chave: cada comprovante gerado sobrescreve o anterior,
/// então downloads concorrentes podem receber o PDF de outro pedido.
#[derive(Default)]
pub struct LastPdfStore {
    slot: RwLock<Option<String>>,
}

impl LastPdfStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, pdf_base64: String) {
        *self.slot.write() = Some(pdf_base64);
    }

    /// Bytes do último PDF. `None` se nada foi gerado ainda.
    pub fn latest_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        self.slot
            .read()
            .as_deref()
            .map(|encoded| STANDARD.decode(encoded.trim()))
    }
}
