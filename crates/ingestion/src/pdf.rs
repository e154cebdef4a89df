//! PDF text extraction
//!
//! Extracts text from purchase-order documents with lopdf. Each BT..ET
//! text block becomes one output line: the downstream field scraping is
//! line-oriented, so line structure matters more than typography.

use crate::errors::IngestionError;
use tracing::{debug, warn};

/// Extract the text content of a PDF document from raw bytes.
///
/// Pages that fail to decode are skipped with a warning; a document
/// yielding no text at all is an error.
pub fn extract_text(bytes: &[u8]) -> Result<String, IngestionError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| IngestionError::PdfParse(e.to_string()))?;

    let pages = doc.get_pages();
    debug!(page_count = pages.len(), "Extracting text from purchase order");

    let mut text = String::new();
    for (page_num, page_id) in pages {
        match doc.get_page_content(page_id) {
            Ok(content) => append_content_text(&content, &mut text),
            Err(e) => {
                warn!(page = page_num, error = %e, "Failed to read page content, skipping");
            }
        }
    }

    if text.trim().is_empty() {
        return Err(IngestionError::EmptyDocument);
    }

    Ok(text)
}

/// Scan a page content stream and append its text, one line per text block.
fn append_content_text(content: &[u8], out: &mut String) {
    let stream = String::from_utf8_lossy(content);
    let mut block = String::new();
    let mut in_text = false;

    for line in stream.lines() {
        let op = line.trim();
        match op {
            "BT" => {
                in_text = true;
                block.clear();
            }
            "ET" => {
                in_text = false;
                let trimmed = block.trim();
                if !trimmed.is_empty() {
                    out.push_str(trimmed);
                    out.push('\n');
                }
            }
            _ if in_text => {
                if let Some(shown) = operator_text(op) {
                    if !block.is_empty() && !block.ends_with(' ') {
                        block.push(' ');
                    }
                    block.push_str(&shown);
                }
            }
            _ => {}
        }
    }
}

/// Text shown by a single content-stream operator (Tj, TJ, ' or "),
/// if the line carries one.
fn operator_text(line: &str) -> Option<String> {
    let shows_text = line.ends_with("Tj")
        || line.ends_with("TJ")
        || line.ends_with('\'')
        || line.ends_with('"');
    if !shows_text {
        return None;
    }

    // Both the single-string and the array form reduce to collecting
    // every (...) group on the line
    let mut result = String::new();
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch != '(' {
            continue;
        }
        let mut literal = String::new();
        while let Some(inner) = chars.next() {
            match inner {
                ')' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        literal.push(unescape(escaped));
                    }
                }
                _ => literal.push(inner),
            }
        }
        result.push_str(&literal);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_text_single_string() {
        assert_eq!(operator_text("(Hello) Tj"), Some("Hello".to_string()));
        assert_eq!(
            operator_text("(Nota\\(1\\)) Tj"),
            Some("Nota(1)".to_string())
        );
    }

    #[test]
    fn test_operator_text_array_form() {
        assert_eq!(
            operator_text("[(Pedido) -250 (de) -250 (Compra)] TJ"),
            Some("PedidodeCompra".to_string())
        );
    }

    #[test]
    fn test_operator_text_ignores_positioning() {
        assert_eq!(operator_text("1 0 0 1 72 720 Tm"), None);
        assert_eq!(operator_text("/F1 12 Tf"), None);
    }

    #[test]
    fn test_content_blocks_become_lines() {
        let content = b"BT\n(Dados de Faturamento) Tj\nET\nBT\n(HOSPITAL GERAL) Tj\nET\n";
        let mut out = String::new();
        append_content_text(content, &mut out);
        assert_eq!(out, "Dados de Faturamento\nHOSPITAL GERAL\n");
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let err = extract_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, IngestionError::PdfParse(_)));
    }
}
