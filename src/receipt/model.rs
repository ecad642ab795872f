//! Sale input records and the immutable printable receipt.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// INPUT
// ============================================================================

/// The selling store, as printed in the header and encoded in the fiscal QR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub tax_id: String,
    /// Replaces the default bilingual thank-you lines when set
    #[serde(default)]
    pub footer: Option<String>,
}

/// One line of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub name: String,
    #[serde(default)]
    pub localized_name: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Line total from checkout; computed from quantity and unit price when absent
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// A completed sale handed over by checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub invoice_number: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptHeader {
    pub(super) store_name: String,
    pub(super) tax_id: String,
    pub(super) invoice_number: String,
    pub(super) timestamp: DateTime<Utc>,
}

impl ReceiptHeader {
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub(super) name: String,
    pub(super) localized_name: Option<String>,
    pub(super) quantity: Decimal,
    pub(super) unit_total: Decimal,
}

impl ReceiptLine {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn localized_name(&self) -> Option<&str> {
        self.localized_name.as_deref()
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Line total at 3 decimal places.
    pub fn unit_total(&self) -> Decimal {
        self.unit_total
    }
}

/// Receipt totals, each rounded to 3 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub(super) subtotal: Decimal,
    pub(super) discount: Decimal,
    pub(super) tax_amount: Decimal,
    pub(super) total: Decimal,
}

impl Totals {
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// A receipt ready for printing or on-screen display.
///
/// Built once per sale by [`ReceiptFormatter`](super::ReceiptFormatter) and
/// never changed afterwards. Line order is the sale's item order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableReceipt {
    pub(super) header: ReceiptHeader,
    pub(super) line_items: Vec<ReceiptLine>,
    pub(super) totals: Totals,
    pub(super) qr_payload_base64: String,
    pub(super) footer: Vec<String>,
}

impl PrintableReceipt {
    pub fn header(&self) -> &ReceiptHeader {
        &self.header
    }

    pub fn line_items(&self) -> &[ReceiptLine] {
        &self.line_items
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Fiscal TLV payload, or the JSON fallback when none was available.
    pub fn qr_payload(&self) -> &str {
        &self.qr_payload_base64
    }

    pub fn footer(&self) -> &[String] {
        &self.footer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_from_json_defaults_optional_fields() {
        let json = r#"{
            "invoiceNumber": "INV-1",
            "timestamp": "2024-03-01T09:15:00Z",
            "items": [{"name": "Tea", "quantity": "1", "unitPrice": "0.250"}],
            "subtotal": "0.250",
            "taxAmount": "0.000",
            "total": "0.250"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();

        assert_eq!(sale.discount, Decimal::ZERO);
        assert_eq!(sale.items[0].total, None);
        assert_eq!(sale.items[0].localized_name, None);
        assert!(sale.payment_method.is_none());
    }

    #[test]
    fn test_store_from_json() {
        let store: StoreInfo =
            serde_json::from_str(r#"{"name": "Corner Shop", "taxId": "300000000000003"}"#)
                .unwrap();
        assert_eq!(store.tax_id, "300000000000003");
        assert!(store.footer.is_none());
    }
}
