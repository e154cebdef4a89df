//! Ingestion error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("failed to read purchase-order PDF: {0}")]
    PdfParse(String),

    #[error("document contains no extractable text")]
    EmptyDocument,
}
