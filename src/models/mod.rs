pub mod comprovante;
