//! Purchase-order field scraping
//!
//! The hospital network's procurement system emits purchase orders with a
//! fixed textual layout. Header fields and line items are scraped with
//! anchored patterns; anything that fails to match resolves to an absent
//! value so the draft can be reviewed and corrected before persistence.

use chrono::NaiveDate;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::IngestionError;
use crate::pdf;

// Anchor lines of the purchase-order layout
const BILLING_HEADER: &str = "Dados de Faturamento";
const DELIVERY_SITE: &str = "HAM - HOSPITAL ILHA DO LEITE";
const DELIVERY_CITY: &str = "RECIFE";
const DELIVERY_STATE: &str = "Pernambuco";
const DELIVERY_STATE_CODE: &str = "PE";

// Dates on the document are dd.mm.yyyy
const PO_DATE_FORMAT: &str = "%d.%m.%Y";

/// Extracted order header plus line items, pending user review
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub order_number: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub hospital: Option<String>,
    pub delivery_address: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub lines: Vec<LineDraft>,
}

impl OrderDraft {
    /// Header fields that could not be extracted, for the review step
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.order_number.is_none() {
            missing.push("order_number");
        }
        if self.issued_on.is_none() {
            missing.push("issued_on");
        }
        if self.hospital.is_none() {
            missing.push("hospital");
        }
        if self.delivery_address.is_none() {
            missing.push("delivery_address");
        }
        missing
    }
}

/// One extracted line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDraft {
    pub material_code: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub requested_delivery: Option<NaiveDate>,
}

/// Extract an order draft from raw purchase-order PDF bytes
pub fn extract_order(bytes: &[u8]) -> Result<OrderDraft, IngestionError> {
    let text = pdf::extract_text(bytes)?;
    let draft = parse_order_text(&text);
    debug!(
        order_number = ?draft.order_number,
        line_count = draft.lines.len(),
        "Purchase order extracted"
    );
    Ok(draft)
}

/// Scrape an order draft from already-extracted document text
pub fn parse_order_text(text: &str) -> OrderDraft {
    let order_number = capture(text, r"Pedido de Compra\s+Nº Pedido:\s*(\d+)");
    let issued_on = capture(text, r"Data Emiss.o:\s*(\d{2}\.\d{2}\.\d{4})")
        .and_then(|s| parse_po_date(&s));
    let hospital = capture(text, &format!(r"{}\n(.+)", BILLING_HEADER));
    let delivery_address = capture(
        text,
        &format!(r"(?s){}\n(.*?)\n{}", DELIVERY_SITE, DELIVERY_CITY),
    )
    .map(|block| {
        block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });

    OrderDraft {
        order_number,
        issued_on,
        hospital,
        delivery_address,
        state: Some(DELIVERY_STATE.to_string()),
        state_code: Some(DELIVERY_STATE_CODE.to_string()),
        lines: parse_lines(text),
    }
}

// Item rows: position, requested delivery date, material code,
// description, quantity, unit marker, unit price
const ITEM_PATTERN: &str =
    r"\d{5}\s+(\d{2}\.\d{2}\.\d{4})\s+(\d+)\s+(.*?)\s+(\d+,\d{3})\s+UD\s+(\d+,\d{3})";

fn parse_lines(text: &str) -> Vec<LineDraft> {
    let re = match Regex::new(ITEM_PATTERN) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    re.captures_iter(text)
        .filter_map(|cap| {
            Some(LineDraft {
                requested_delivery: parse_po_date(&cap[1]),
                material_code: cap[2].to_string(),
                description: cap[3].trim().to_string(),
                quantity: parse_quantity(&cap[4])?,
                unit_price: parse_decimal(&cap[5])?,
            })
        })
        .collect()
}

fn capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .map(|cap| cap[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_po_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, PO_DATE_FORMAT).ok()
}

/// Parse a Brazilian-format decimal: `.` groups thousands, `,` marks the
/// fraction (`1.234,500` -> 1234.5)
fn parse_decimal(s: &str) -> Option<f64> {
    s.replace('.', "").replace(',', ".").parse().ok()
}

/// Quantities are printed as decimals but are integral in practice;
/// the fraction is truncated
fn parse_quantity(s: &str) -> Option<i32> {
    parse_decimal(s).map(|v| v as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Pedido de Compra
Nº Pedido: 4500123456
Data Emissão: 05.03.2024
Dados de Faturamento
HOSPITAL GERAL DA ENCRUZILHADA
HAM - HOSPITAL ILHA DO LEITE
RUA CORONEL SUASSUNA, 323
ILHA DO LEITE
RECIFE
00010 05.04.2024 401234 CAMISOLA PACIENTE ADULTO GG 1200,000 UD 15,500
00020 10.04.2024 401567 LENCOL HOSPITALAR SOLTEIRO 350,000 UD 22,900
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_header_extraction() {
        let draft = parse_order_text(SAMPLE);

        assert_eq!(draft.order_number.as_deref(), Some("4500123456"));
        assert_eq!(draft.issued_on, Some(date(2024, 3, 5)));
        assert_eq!(
            draft.hospital.as_deref(),
            Some("HOSPITAL GERAL DA ENCRUZILHADA")
        );
        assert_eq!(
            draft.delivery_address.as_deref(),
            Some("RUA CORONEL SUASSUNA, 323 ILHA DO LEITE")
        );
        assert_eq!(draft.state.as_deref(), Some("Pernambuco"));
        assert_eq!(draft.state_code.as_deref(), Some("PE"));
        assert!(draft.missing_fields().is_empty());
    }

    #[test]
    fn test_line_item_extraction() {
        let draft = parse_order_text(SAMPLE);
        assert_eq!(draft.lines.len(), 2);

        let first = &draft.lines[0];
        assert_eq!(first.material_code, "401234");
        assert_eq!(first.description, "CAMISOLA PACIENTE ADULTO GG");
        assert_eq!(first.quantity, 1200);
        assert_eq!(first.unit_price, 15.5);
        assert_eq!(first.requested_delivery, Some(date(2024, 4, 5)));

        let second = &draft.lines[1];
        assert_eq!(second.material_code, "401567");
        assert_eq!(second.quantity, 350);
        assert_eq!(second.unit_price, 22.9);
        assert_eq!(second.requested_delivery, Some(date(2024, 4, 10)));
    }

    #[test]
    fn test_missing_header_fields_resolve_to_absent() {
        let text = "00010 05.04.2024 401234 CAMISOLA PACIENTE 100,000 UD 9,990\n";
        let draft = parse_order_text(text);

        assert_eq!(draft.order_number, None);
        assert_eq!(draft.issued_on, None);
        assert_eq!(draft.hospital, None);
        assert_eq!(draft.delivery_address, None);
        assert_eq!(
            draft.missing_fields(),
            vec!["order_number", "issued_on", "hospital", "delivery_address"]
        );
        // Line items still come through for review
        assert_eq!(draft.lines.len(), 1);
    }

    #[test]
    fn test_malformed_issuance_date_is_absent_not_fatal() {
        let text = "Pedido de Compra\nNº Pedido: 99\nData Emissão: 99.99.2024\n";
        let draft = parse_order_text(text);

        assert_eq!(draft.order_number.as_deref(), Some("99"));
        assert_eq!(draft.issued_on, None);
    }

    #[test]
    fn test_brazilian_decimal_parsing() {
        assert_eq!(parse_decimal("15,500"), Some(15.5));
        assert_eq!(parse_decimal("1.234,500"), Some(1234.5));
        assert_eq!(parse_decimal("0,010"), Some(0.01));
        assert_eq!(parse_decimal("abc"), None);

        assert_eq!(parse_quantity("1200,000"), Some(1200));
        assert_eq!(parse_quantity("350,900"), Some(350));
    }

    #[test]
    fn test_po_date_parsing() {
        assert_eq!(parse_po_date("05.03.2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_po_date("31.02.2024"), None);
        assert_eq!(parse_po_date("2024-03-05"), None);
    }
}
