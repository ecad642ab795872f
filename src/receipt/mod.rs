//! # Receipts
//!
//! Turns a completed [`Sale`] into an immutable [`PrintableReceipt`] and lays
//! it out as ESC/POS bytes.
//!
//! ```text
//! StoreInfo + Sale ──► ReceiptFormatter ──► PrintableReceipt ──► escpos::render ──► Vec<u8>
//!                           │
//!                           └── fiscal::encode (TLV → Base64)
//! ```

pub mod escpos;
mod formatter;
mod model;

pub use formatter::{DEFAULT_FOOTER, ReceiptFormatter, fiscal_fields};
pub use model::{
    PrintableReceipt, ReceiptHeader, ReceiptLine, Sale, SaleItem, StoreInfo, Totals,
};
