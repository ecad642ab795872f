//! # Receipt Layout
//!
//! Lays a [`PrintableReceipt`] out as components and serializes it to one
//! contiguous ESC/POS buffer. Text is encoded for the profile's code page,
//! selected right after `ESC @`. Chunking for the BLE link is left to the
//! transport.
//!
//! ```text
//!           CORNER SHOP            <- centered, double, bold
//! Tax ID: 300000000000003
//! Invoice: INV-42
//! Date: 2024-01-15 10:30
//! --------------------------------
//! ITEM                QTY    TOTAL
//! Bread                 1    0.350
//! --------------------------------
//!                 Subtotal: 0.350
//!                      Tax: 0.053   <- right-aligned
//!                    TOTAL: 0.403   <- bold
//!     [ e-invoice QR ]
//!   Thank you for your visit!
//! ```

use super::model::PrintableReceipt;
use crate::components::{
    BlankLines, ComponentExt, Divider, ItemRow, QrBlock, Receipt, Text, TotalLine,
};
use crate::ir::Program;
use crate::money::format3;
use crate::printer::PrinterProfile;

/// Receipt as a component tree.
pub fn layout(receipt: &PrintableReceipt, profile: &PrinterProfile) -> Receipt {
    let header = receipt.header();
    let totals = receipt.totals();

    let mut doc = Receipt::new()
        .code_page(profile.code_page)
        .child(Text::new(header.store_name()).center().double().bold())
        .child(Text::new(format!("Tax ID: {}", header.tax_id())).left())
        .child(Text::new(format!("Invoice: {}", header.invoice_number())))
        .child(Text::new(format!(
            "Date: {}",
            header.timestamp().format("%Y-%m-%d %H:%M")
        )))
        .child(Divider::new(profile.columns))
        .child(ItemRow::header())
        .children(receipt.line_items().iter().map(|line| {
            ItemRow::new(
                line.name(),
                line.quantity().normalize().to_string(),
                format3(line.unit_total()),
            )
        }))
        .child(Divider::new(profile.columns))
        .child(TotalLine::new("Subtotal", format3(totals.subtotal())));

    if !totals.discount().is_zero() {
        doc = doc.child(TotalLine::new("Discount", format3(totals.discount())));
    }

    doc.child(TotalLine::new("Tax", format3(totals.tax_amount())))
        .child(TotalLine::new("TOTAL", format3(totals.total())).bold())
        .child(
            QrBlock::new(receipt.qr_payload(), profile.qr).module_size(profile.qr_module_size),
        )
        .children(receipt.footer().iter().map(|line| Text::new(line.as_str()).center()))
        .child(BlankLines::new(profile.trailer_lines))
        .cut(profile.cut)
}

/// Compile the receipt to IR.
pub fn program(receipt: &PrintableReceipt, profile: &PrinterProfile) -> Program {
    layout(receipt, profile).compile()
}

/// Render the receipt to ESC/POS bytes.
pub fn render(receipt: &PrintableReceipt, profile: &PrinterProfile) -> Vec<u8> {
    program(receipt, profile).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Op;
    use crate::printer::CutMode;
    use crate::receipt::{ReceiptFormatter, Sale, SaleItem, StoreInfo};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn receipt(discount: i64) -> PrintableReceipt {
        let store = StoreInfo {
            name: "CORNER SHOP".into(),
            tax_id: "300000000000003".into(),
            footer: None,
        };
        let sale = Sale {
            invoice_number: "INV-42".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            items: vec![SaleItem {
                name: "Bread".into(),
                localized_name: Some("خبز".into()),
                quantity: Decimal::ONE,
                unit_price: Decimal::new(350, 3),
                total: None,
            }],
            subtotal: Decimal::new(350, 3),
            discount: Decimal::new(discount, 3),
            tax_amount: Decimal::new(53, 3),
            total: Decimal::new(403, 3),
            payment_method: None,
            customer: None,
        };
        ReceiptFormatter::format(&store, &sale, Some("AQRBQ01F".into()))
    }

    #[test]
    fn test_text_lines_in_order() {
        let ir = program(&receipt(0), &PrinterProfile::GENERIC_58MM);
        assert_eq!(
            ir.texts(),
            vec![
                "CORNER SHOP",
                "Tax ID: 300000000000003",
                "Invoice: INV-42",
                "Date: 2024-01-15 10:30",
                "--------------------------------",
                "ITEM                QTY    TOTAL",
                "Bread                 1    0.350",
                "--------------------------------",
                "Subtotal: 0.350",
                "Tax: 0.053",
                "TOTAL: 0.403",
                "[ e-invoice QR ]",
                "Thank you for your visit!",
                "شكراً لزيارتكم",
            ]
        );
    }

    #[test]
    fn test_discount_printed_only_when_non_zero() {
        let ir = program(&receipt(50), &PrinterProfile::GENERIC_58MM);
        assert!(ir.texts().contains(&"Discount: 0.050"));
    }

    #[test]
    fn test_80mm_separator_width() {
        let ir = program(&receipt(0), &PrinterProfile::GENERIC_80MM);
        assert!(ir.texts().contains(&"-".repeat(48).as_str()));
    }

    #[test]
    fn test_starts_with_init_and_ends_with_trailer() {
        let bytes = render(&receipt(0), &PrinterProfile::GENERIC_58MM);
        assert_eq!(&bytes[..5], &[0x1B, 0x40, 0x1B, 0x74, 50]);
        assert!(bytes.ends_with(&[0x0A, 0x0A, 0x0A, 0x0A]));
    }

    #[test]
    fn test_arabic_footer_is_encoded_not_utf8() {
        let bytes = render(&receipt(0), &PrinterProfile::GENERIC_58MM);
        let footer = [0xD4, 0xDF, 0xD1, 0xC7, 0xF0, 0x20];
        assert!(bytes.windows(footer.len()).any(|w| w == footer));
        assert!(!bytes.windows(2).any(|w| w == "ش".as_bytes()));
    }

    #[test]
    fn test_cut_follows_trailer() {
        let profile = PrinterProfile {
            cut: Some(CutMode::Partial),
            ..PrinterProfile::GENERIC_58MM
        };
        let ir = program(&receipt(0), &profile);
        assert_eq!(ir.ops.last(), Some(&Op::Cut { partial: true }));
    }
}
