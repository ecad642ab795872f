//! # Fiscal QR Payload (TLV)
//!
//! Serializes the five e-invoice verification fields into Tag-Length-Value
//! records and Base64-encodes the result for embedding in a QR code.
//!
//! ## Record Layout
//!
//! ```text
//! ┌──────┬────────┬─────────────────────┐
//! │ tag  │ length │ value (UTF-8 bytes) │
//! │ 1 B  │  1 B   │   0..=255 bytes     │
//! └──────┴────────┴─────────────────────┘
//! ```
//!
//! | Tag | Field |
//! |-----|-------|
//! | 1 | Seller name |
//! | 2 | Tax registration number |
//! | 3 | Invoice timestamp (ISO 8601) |
//! | 4 | Invoice total including tax |
//! | 5 | Tax amount |
//!
//! Records are always emitted in tag order. The length byte counts UTF-8
//! bytes, not characters, so Arabic seller names use roughly twice as many
//! bytes as they have letters.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{MizanError, Result};

/// Largest value a one-byte length slot can describe
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// TLV tags, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FiscalTag {
    SellerName = 1,
    TaxId = 2,
    Timestamp = 3,
    TotalWithTax = 4,
    TaxAmount = 5,
}

impl FiscalTag {
    /// All tags in emission order.
    pub const ALL: [FiscalTag; 5] = [
        FiscalTag::SellerName,
        FiscalTag::TaxId,
        FiscalTag::Timestamp,
        FiscalTag::TotalWithTax,
        FiscalTag::TaxAmount,
    ];

    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// The five fields carried by a fiscal QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalQrFields {
    pub seller_name: String,
    pub tax_id: String,
    pub timestamp_iso8601: String,
    pub total_with_tax: String,
    pub tax_amount: String,
}

impl FiscalQrFields {
    /// Value for a tag.
    pub fn get(&self, tag: FiscalTag) -> &str {
        match tag {
            FiscalTag::SellerName => &self.seller_name,
            FiscalTag::TaxId => &self.tax_id,
            FiscalTag::Timestamp => &self.timestamp_iso8601,
            FiscalTag::TotalWithTax => &self.total_with_tax,
            FiscalTag::TaxAmount => &self.tax_amount,
        }
    }

    fn slot(&mut self, tag: FiscalTag) -> &mut String {
        match tag {
            FiscalTag::SellerName => &mut self.seller_name,
            FiscalTag::TaxId => &mut self.tax_id,
            FiscalTag::Timestamp => &mut self.timestamp_iso8601,
            FiscalTag::TotalWithTax => &mut self.total_with_tax,
            FiscalTag::TaxAmount => &mut self.tax_amount,
        }
    }

    fn empty() -> Self {
        Self {
            seller_name: String::new(),
            tax_id: String::new(),
            timestamp_iso8601: String::new(),
            total_with_tax: String::new(),
            tax_amount: String::new(),
        }
    }
}

/// Serialize the fields to raw TLV bytes.
///
/// ## Errors
///
/// [`MizanError::FieldTooLong`] if any value exceeds 255 UTF-8 bytes.
pub fn encode_tlv(fields: &FiscalQrFields) -> Result<Vec<u8>> {
    let capacity = FiscalTag::ALL
        .iter()
        .map(|&tag| 2 + fields.get(tag).len())
        .sum();
    let mut out = Vec::with_capacity(capacity);

    for tag in FiscalTag::ALL {
        let value = fields.get(tag).as_bytes();
        let len = u8::try_from(value.len()).map_err(|_| MizanError::FieldTooLong {
            tag: tag.byte(),
            len: value.len(),
        })?;
        out.push(tag.byte());
        out.push(len);
        out.extend_from_slice(value);
    }

    Ok(out)
}

/// Serialize the fields to TLV and Base64-encode them.
///
/// Pure and deterministic: identical fields always yield identical output.
///
/// ```
/// use mizan::fiscal::{self, FiscalQrFields};
///
/// let fields = FiscalQrFields {
///     seller_name: "ACME".into(),
///     tax_id: "OM123".into(),
///     timestamp_iso8601: "2024-01-01T10:00:00Z".into(),
///     total_with_tax: "10.500".into(),
///     tax_amount: "0.500".into(),
/// };
/// let payload = fiscal::encode(&fields)?;
/// assert!(payload.starts_with("AQRBQ01F"));
/// # Ok::<(), mizan::MizanError>(())
/// ```
pub fn encode(fields: &FiscalQrFields) -> Result<String> {
    Ok(STANDARD.encode(encode_tlv(fields)?))
}

/// Replay a Base64 TLV payload back into its five fields.
///
/// The records must appear exactly once each, in tag order.
pub fn decode(payload: &str) -> Result<FiscalQrFields> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| MizanError::InvalidQrPayload(format!("base64: {e}")))?;
    decode_tlv(&bytes)
}

/// Replay raw TLV bytes back into their five fields.
pub fn decode_tlv(bytes: &[u8]) -> Result<FiscalQrFields> {
    let mut fields = FiscalQrFields::empty();
    let mut rest = bytes;

    for expected in FiscalTag::ALL {
        let [tag, len, tail @ ..] = rest else {
            return Err(MizanError::InvalidQrPayload(format!(
                "missing record for tag {}",
                expected.byte()
            )));
        };
        if *tag != expected.byte() {
            return Err(MizanError::InvalidQrPayload(format!(
                "expected tag {}, found {tag}",
                expected.byte()
            )));
        }
        let len = usize::from(*len);
        if tail.len() < len {
            return Err(MizanError::InvalidQrPayload(format!(
                "tag {tag} declares {len} bytes, {} remain",
                tail.len()
            )));
        }
        let (value, next) = tail.split_at(len);
        *fields.slot(expected) = String::from_utf8(value.to_vec())
            .map_err(|e| MizanError::InvalidQrPayload(format!("tag {tag}: {e}")))?;
        rest = next;
    }

    if !rest.is_empty() {
        return Err(MizanError::InvalidQrPayload(format!(
            "{} trailing bytes after tag 5",
            rest.len()
        )));
    }

    Ok(fields)
}
