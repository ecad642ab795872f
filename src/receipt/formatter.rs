//! Sale → [`PrintableReceipt`].

use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, warn};

use super::model::{PrintableReceipt, ReceiptHeader, ReceiptLine, Sale, SaleItem, StoreInfo, Totals};
use crate::error::{MizanError, Result};
use crate::fiscal::{self, FiscalQrFields};
use crate::money::{format3, round3};

/// Printed when the store has no footer of its own.
pub const DEFAULT_FOOTER: [&str; 2] = ["Thank you for your visit!", "شكراً لزيارتكم"];

/// Builds printable receipts from completed sales.
///
/// ```
/// use mizan::receipt::{ReceiptFormatter, Sale, StoreInfo};
///
/// let store: StoreInfo = serde_json::from_str(r#"{"name":"ACME","taxId":"123"}"#)?;
/// let sale: Sale = serde_json::from_str(r#"{
///     "invoiceNumber": "INV-7",
///     "timestamp": "2024-01-15T10:30:00Z",
///     "items": [{"name": "Milk", "quantity": "2", "unitPrice": "0.500"}],
///     "subtotal": "1.000", "taxAmount": "0.150", "total": "1.150"
/// }"#)?;
///
/// let receipt = ReceiptFormatter::format_with_fiscal_qr(&store, &sale);
/// assert_eq!(receipt.line_items()[0].unit_total().to_string(), "1.000");
/// assert!(receipt.qr_payload().starts_with("AQRBQ01F"));
/// # Ok::<(), serde_json::Error>(())
/// ```
pub struct ReceiptFormatter;

impl ReceiptFormatter {
    /// Assemble a receipt carrying `qr` as its payload.
    ///
    /// Without a precomputed payload the receipt carries a JSON description
    /// of the sale instead, so it always has something scannable.
    pub fn format(store: &StoreInfo, sale: &Sale, qr: Option<String>) -> PrintableReceipt {
        let qr_payload_base64 = match qr {
            Some(payload) => payload,
            None => fallback_payload(store, sale),
        };

        let footer = match &store.footer {
            Some(text) => text.lines().map(str::to_string).collect(),
            None => DEFAULT_FOOTER.iter().map(|s| s.to_string()).collect(),
        };

        debug!(
            invoice = %sale.invoice_number,
            items = sale.items.len(),
            "formatted receipt"
        );

        PrintableReceipt {
            header: ReceiptHeader {
                store_name: store.name.clone(),
                tax_id: store.tax_id.clone(),
                invoice_number: sale.invoice_number.clone(),
                timestamp: sale.timestamp,
            },
            line_items: sale.items.iter().map(line).collect(),
            totals: Totals {
                subtotal: round3(sale.subtotal),
                discount: round3(sale.discount),
                tax_amount: round3(sale.tax_amount),
                total: round3(sale.total),
            },
            qr_payload_base64,
            footer,
        }
    }

    /// Assemble a receipt with the fiscal TLV payload.
    ///
    /// A field over 255 bytes degrades the payload to the JSON fallback
    /// rather than failing the print.
    pub fn format_with_fiscal_qr(store: &StoreInfo, sale: &Sale) -> PrintableReceipt {
        let qr = match fiscal::encode(&fiscal_fields(store, sale)) {
            Ok(payload) => Some(payload),
            Err(e @ MizanError::FieldTooLong { .. }) => {
                warn!(error = %e, invoice = %sale.invoice_number, "fiscal QR rejected, using fallback payload");
                None
            }
            Err(e) => {
                warn!(error = %e, "fiscal QR encoding failed, using fallback payload");
                None
            }
        };
        Self::format(store, sale, qr)
    }

    /// Fiscal payload for a sale, or the encoding error.
    pub fn fiscal_payload(store: &StoreInfo, sale: &Sale) -> Result<String> {
        fiscal::encode(&fiscal_fields(store, sale))
    }
}

/// The five fiscal QR fields for a sale.
///
/// The timestamp is UTC with second precision (`2024-01-15T10:30:00Z`);
/// amounts carry 3 decimal places.
pub fn fiscal_fields(store: &StoreInfo, sale: &Sale) -> FiscalQrFields {
    FiscalQrFields {
        seller_name: store.name.clone(),
        tax_id: store.tax_id.clone(),
        timestamp_iso8601: sale.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        total_with_tax: format3(sale.total),
        tax_amount: format3(sale.tax_amount),
    }
}

fn fallback_payload(store: &StoreInfo, sale: &Sale) -> String {
    json!({
        "seller": store.name,
        "taxId": store.tax_id,
        "invoice": sale.invoice_number,
        "timestamp": sale.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        "total": format3(sale.total),
        "tax": format3(sale.tax_amount),
    })
    .to_string()
}

fn line(item: &SaleItem) -> ReceiptLine {
    let total: Decimal = item.total.unwrap_or_else(|| {
        item.quantity.checked_mul(item.unit_price).unwrap_or_else(|| {
            warn!(item = %item.name, "line total overflows, printing maximum");
            Decimal::MAX
        })
    });
    ReceiptLine {
        name: item.name.clone(),
        localized_name: item.localized_name.clone(),
        quantity: item.quantity,
        unit_total: round3(total),
    }
}
