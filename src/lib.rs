//! # Mizan - Retail Encode/Decode Toolkit
//!
//! Mizan translates between physical point-of-sale artifacts and structured
//! sale data:
//!
//! - **Scale barcodes**: decode and encode GS1 EAN-13 codes with an embedded
//!   weight or price
//! - **Fiscal QR**: Tag-Length-Value e-invoice payloads, Base64-encoded
//! - **Receipts**: sale → printable receipt → ESC/POS bytes
//! - **Transport**: Bluetooth LE GATT delivery to generic thermal printers
//!
//! ## Quick Start
//!
//! ```
//! use mizan::{barcode, printer::PrinterProfile, receipt::{escpos, ReceiptFormatter}};
//!
//! let scanned = barcode::decode("2212345015005")?;
//! assert_eq!(scanned.weight_kg.map(|w| w.to_string()), Some("1.500".into()));
//!
//! let store = serde_json::from_str(r#"{"name":"ACME","taxId":"123"}"#)?;
//! let sale = serde_json::from_str(r#"{
//!     "invoiceNumber": "INV-1", "timestamp": "2024-01-15T10:30:00Z",
//!     "items": [{"name": "Apples", "quantity": "1.5", "unitPrice": "0.800"}],
//!     "subtotal": "1.200", "taxAmount": "0.180", "total": "1.380"
//! }"#)?;
//!
//! let receipt = ReceiptFormatter::format_with_fiscal_qr(&store, &sale);
//! let bytes = escpos::render(&receipt, &PrinterProfile::default());
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`barcode`] | Weight/price-embedded EAN-13 codec |
//! | [`fiscal`] | TLV fiscal QR payloads |
//! | [`receipt`] | Receipt model, formatter and ESC/POS layout |
//! | [`components`] | Declarative receipt building blocks |
//! | [`ir`] | Typed command ops and byte generation |
//! | [`protocol`] | ESC/POS command builders |
//! | [`transport`] | BLE discovery, sessions and chunked writes |
//! | [`printer`] | Paper profiles |
//! | [`config`] | JSON configuration |
//! | [`error`] | Error types |

pub mod barcode;
pub mod components;
pub mod config;
pub mod error;
pub mod fiscal;
pub mod ir;
pub mod money;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod transport;

// Re-exports for convenience
pub use config::MizanConfig;
pub use error::{MizanError, Result};
pub use printer::PrinterProfile;
pub use transport::PrinterSession;
