//! Purchase-order PDF ingestion
//!
//! Turns raw purchase-order documents into structured order drafts:
//! - PDF text extraction with lopdf, preserving line structure
//! - Header and line-item scraping with regex patterns matching the
//!   hospital network's purchase-order layout
//!
//! Extraction is lenient on purpose: missing or malformed fields resolve
//! to absent values in the draft, which is surfaced to the user for
//! review before anything is persisted.

mod errors;
mod extract;
mod pdf;

pub use errors::IngestionError;
pub use extract::{extract_order, parse_order_text, LineDraft, OrderDraft};
pub use pdf::extract_text;
