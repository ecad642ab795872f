//! # Scale Barcode Codec
//!
//! Interprets scanned strings as either plain product codes or GS1
//! variable-measure (weight/price embedded) EAN-13 barcodes printed by
//! retail scales.
//!
//! ## Layout
//!
//! ```text
//!  2 2 0 0 0 0 1 0 0 5 0 0 0
//!  └┬┘ └───┬───┘ └───┬───┘ └─ check digit (ignored)
//! prefix  product   payload
//! ```
//!
//! | Prefix | Payload meaning |
//! |--------|-----------------|
//! | 20–21 | Price in minor units (1/1000 of the major unit) |
//! | 22–29 | Weight in grams |
//!
//! Anything that is not 13 characters starting with `2`, or whose prefix
//! falls outside `20`–`29`, is a [`CodeKind::Standard`] code.
//!
//! ## Check Digit
//!
//! [`decode`] never validates the trailing check digit and the encoders
//! write a constant `'0'` placeholder. Real EAN-13 checksums live in
//! [`checksum`] and must be applied explicitly.

pub mod checksum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MizanError, Result};
use crate::money;

pub use checksum::{ean13_check_digit, has_valid_check_digit, with_check_digit};

/// Total length of an EAN-13 scale barcode
pub const EAN13_LEN: usize = 13;

/// Width of the product code and payload fields
pub const FIELD_WIDTH: usize = 5;

/// Prefix written by [`encode_weight_barcode`]
pub const WEIGHT_PREFIX: &str = "22";

/// Prefix written by [`encode_price_barcode`]
pub const PRICE_PREFIX: &str = "20";

/// Placeholder written in the check digit position
pub const PLACEHOLDER_CHECK_DIGIT: char = '0';

/// Classification of a scanned code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeKind {
    /// Plain product code, looked up as-is
    Standard,
    /// Scale label carrying a weight or a price
    WeightEmbedded,
}

/// What the payload of a variable-measure barcode carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedField {
    /// Price in minor currency units (prefix 20–21)
    Price,
    /// Weight in grams (prefix 22–29)
    Weight,
}

impl EmbeddedField {
    /// Classify a two-character prefix. Returns `None` outside `"20"`–`"29"`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.as_bytes() {
            [b'2', b'0' | b'1'] => Some(EmbeddedField::Price),
            [b'2', b'2'..=b'9'] => Some(EmbeddedField::Weight),
            _ => None,
        }
    }
}

/// Result of decoding a scanned string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedCode {
    /// The scanned string, trimmed
    pub raw: String,
    pub kind: CodeKind,
    pub product_code: Option<String>,
    /// Set only for weight labels (prefix 22–29)
    pub weight_kg: Option<Decimal>,
    /// Set only for price labels (prefix 20–21)
    pub price: Option<Decimal>,
}

impl ScannedCode {
    fn standard(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            kind: CodeKind::Standard,
            product_code: Some(raw.to_string()),
            weight_kg: None,
            price: None,
        }
    }

    /// Whether this code came off a scale label.
    pub fn is_weight_embedded(&self) -> bool {
        self.kind == CodeKind::WeightEmbedded
    }
}

/// Decode a scanned string.
///
/// ## Errors
///
/// Returns [`MizanError::InvalidBarcodeFormat`] when the code has a
/// variable-measure prefix but the 5-digit payload is not numeric.
/// Callers usually fall back to treating the input as a standard code.
///
/// ## Example
///
/// ```
/// use mizan::barcode::{self, CodeKind};
/// use rust_decimal::Decimal;
///
/// let code = barcode::decode("2200001005000")?;
/// assert_eq!(code.kind, CodeKind::WeightEmbedded);
/// assert_eq!(code.product_code.as_deref(), Some("00001"));
/// assert_eq!(code.weight_kg, Some(Decimal::new(5, 1)));
/// # Ok::<(), mizan::MizanError>(())
/// ```
pub fn decode(raw: &str) -> Result<ScannedCode> {
    let raw = raw.trim();

    if raw.chars().count() != EAN13_LEN || !raw.starts_with('2') {
        return Ok(ScannedCode::standard(raw));
    }

    // Second character may be multi-byte; only ASCII digits form a prefix
    let Some(field) = raw.get(0..2).and_then(EmbeddedField::from_prefix) else {
        return Ok(ScannedCode::standard(raw));
    };

    let (product_code, payload) = match (raw.get(2..7), raw.get(7..12)) {
        (Some(product), Some(payload)) if product.is_ascii() && payload.is_ascii() => {
            (product, payload)
        }
        _ => {
            return Err(MizanError::InvalidBarcodeFormat(format!(
                "non-ASCII characters in scale barcode {raw:?}"
            )));
        }
    };

    let value = parse_payload(payload)?;
    debug!(code = raw, ?field, value, "decoded scale barcode");

    let (weight_kg, price) = match field {
        EmbeddedField::Price => (None, Some(money::from_minor_units(value))),
        EmbeddedField::Weight => (Some(money::from_minor_units(value)), None),
    };

    Ok(ScannedCode {
        raw: raw.to_string(),
        kind: CodeKind::WeightEmbedded,
        product_code: Some(product_code.to_string()),
        weight_kg,
        price,
    })
}

fn parse_payload(payload: &str) -> Result<u64> {
    if payload.len() != FIELD_WIDTH || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MizanError::InvalidBarcodeFormat(format!(
            "payload {payload:?} is not {FIELD_WIDTH} digits"
        )));
    }
    payload
        .parse()
        .map_err(|e| MizanError::InvalidBarcodeFormat(format!("payload {payload:?}: {e}")))
}

/// Build a weight label barcode (prefix `22`) for manual entry or testing.
///
/// The weight is converted to grams (rounded to nearest). The check digit is
/// the `'0'` placeholder; see [`with_check_digit`].
pub fn encode_weight_barcode(product_code: &str, weight_kg: Decimal) -> Result<String> {
    encode(WEIGHT_PREFIX, product_code, weight_kg)
}

/// Build a price label barcode (prefix `20`) for manual entry or testing.
///
/// The price is converted to minor units (rounded to nearest). The check
/// digit is the `'0'` placeholder; see [`with_check_digit`].
pub fn encode_price_barcode(product_code: &str, price_major: Decimal) -> Result<String> {
    encode(PRICE_PREFIX, product_code, price_major)
}

fn encode(prefix: &str, product_code: &str, value: Decimal) -> Result<String> {
    let minor = money::to_minor_units(value).ok_or_else(|| {
        MizanError::InvalidBarcodeFormat(format!("cannot embed value {value} in a barcode"))
    })?;

    let mut code = String::with_capacity(EAN13_LEN);
    code.push_str(prefix);
    code.push_str(&fit_field(product_code));
    code.push_str(&fit_field(&minor.to_string()));
    code.push(PLACEHOLDER_CHECK_DIGIT);
    Ok(code)
}

/// Left-pad with `'0'` to the field width, keeping the first 5 characters.
fn fit_field(s: &str) -> String {
    let padded = format!("{s:0>width$}", width = FIELD_WIDTH);
    padded.chars().take(FIELD_WIDTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decode_weight_label() {
        let code = decode("2200001005000").unwrap();
        assert_eq!(code.kind, CodeKind::WeightEmbedded);
        assert_eq!(code.product_code.as_deref(), Some("00001"));
        assert_eq!(code.weight_kg, Some(d("0.5")));
        assert_eq!(code.price, None);
    }

    #[test]
    fn test_decode_price_label() {
        let code = decode("2000001012500").unwrap();
        assert_eq!(code.kind, CodeKind::WeightEmbedded);
        assert_eq!(code.product_code.as_deref(), Some("00001"));
        assert_eq!(code.price, Some(d("1.25")));
        assert_eq!(code.weight_kg, None);
    }

    #[test]
    fn test_decode_prefix_21_is_price() {
        let code = decode("2112345999990").unwrap();
        assert_eq!(code.price, Some(d("99.999")));
        assert_eq!(code.product_code.as_deref(), Some("12345"));
    }

    #[test]
    fn test_decode_prefix_29_is_weight() {
        let code = decode("2954321012340").unwrap();
        assert_eq!(code.weight_kg, Some(d("1.234")));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let code = decode("  2200001005000\n").unwrap();
        assert_eq!(code.raw, "2200001005000");
        assert!(code.is_weight_embedded());
    }

    #[test]
    fn test_decode_standard_ean13() {
        let code = decode("6291041500213").unwrap();
        assert_eq!(code.kind, CodeKind::Standard);
        assert_eq!(code.product_code.as_deref(), Some("6291041500213"));
        assert_eq!(code.weight_kg, None);
        assert_eq!(code.price, None);
    }

    #[test]
    fn test_decode_wrong_length_is_standard() {
        for raw in ["22000010050", "22000010050000", "", "ABC"] {
            let code = decode(raw).unwrap();
            assert_eq!(code.kind, CodeKind::Standard, "{raw}");
            assert_eq!(code.product_code.as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_decode_non_digit_second_char_is_standard() {
        let code = decode("2A00001005000").unwrap();
        assert_eq!(code.kind, CodeKind::Standard);
    }

    #[test]
    fn test_decode_non_numeric_payload_fails() {
        let err = decode("22000010X5000").unwrap_err();
        assert!(matches!(err, MizanError::InvalidBarcodeFormat(_)));
    }

    #[test]
    fn test_decode_non_ascii_fails() {
        let err = decode("22ééééé005000").unwrap_err();
        assert!(matches!(err, MizanError::InvalidBarcodeFormat(_)));
    }

    #[test]
    fn test_decode_non_ascii_check_digit_is_ignored() {
        let code = decode("221234501500é").unwrap();
        assert_eq!(code.product_code.as_deref(), Some("12345"));
        assert_eq!(code.weight_kg, Some(d("1.500")));
    }

    #[test]
    fn test_decode_ignores_check_digit() {
        let a = decode("2200001005000").unwrap();
        let b = decode("2200001005007").unwrap();
        assert_eq!(a.weight_kg, b.weight_kg);
    }

    #[test]
    fn test_prefix_outside_range_is_always_standard() {
        for prefix in 0..100u32 {
            if (20..=29).contains(&prefix) {
                continue;
            }
            let raw = format!("{prefix:02}00001005000");
            let code = decode(&raw).unwrap();
            assert_eq!(code.kind, CodeKind::Standard, "{raw}");
        }
    }

    #[test]
    fn test_encode_weight_layout() {
        let code = encode_weight_barcode("1", d("0.5")).unwrap();
        assert_eq!(code, "2200001005000");
    }

    #[test]
    fn test_encode_price_layout() {
        let code = encode_price_barcode("1", d("1.25")).unwrap();
        assert_eq!(code, "2000001012500");
    }

    #[test]
    fn test_encode_truncates_long_fields() {
        let code = encode_weight_barcode("1234567", d("123.456")).unwrap();
        assert_eq!(code.len(), EAN13_LEN);
        assert_eq!(&code[2..7], "12345");
        assert_eq!(&code[7..12], "12345");
    }

    #[test]
    fn test_encode_rounds_to_nearest_gram() {
        let code = encode_weight_barcode("42", d("0.4995")).unwrap();
        assert_eq!(&code[7..12], "00500");
        let code = encode_weight_barcode("42", d("0.4994")).unwrap();
        assert_eq!(&code[7..12], "00499");
    }

    #[test]
    fn test_encode_rejects_negative() {
        let err = encode_price_barcode("1", d("-1")).unwrap_err();
        assert!(matches!(err, MizanError::InvalidBarcodeFormat(_)));
    }

    #[test]
    fn test_encode_overflow_is_an_error() {
        let err = encode_weight_barcode("1", Decimal::MAX).unwrap_err();
        assert!(matches!(err, MizanError::InvalidBarcodeFormat(_)));
        let err = encode_price_barcode("1", Decimal::MAX).unwrap_err();
        assert!(matches!(err, MizanError::InvalidBarcodeFormat(_)));
    }

    #[test]
    fn test_weight_round_trip() {
        for w in ["0.001", "0.5", "1.234", "12.5", "99.999", "2.0004", "3.1415"] {
            let weight = d(w);
            let code = encode_weight_barcode("777", weight).unwrap();
            let decoded = decode(&code).unwrap();
            assert_eq!(decoded.kind, CodeKind::WeightEmbedded);
            assert_eq!(decoded.weight_kg, Some(money::round3(weight)), "{w}");
            assert_eq!(decoded.price, None);
        }
    }

    #[test]
    fn test_price_round_trip() {
        for p in ["0.005", "1.25", "10.5", "99.999", "0.1234"] {
            let price = d(p);
            let code = encode_price_barcode("00042", price).unwrap();
            let decoded = decode(&code).unwrap();
            assert_eq!(decoded.price, Some(money::round3(price)), "{p}");
            assert_eq!(decoded.product_code.as_deref(), Some("00042"));
        }
    }

    #[test]
    fn test_scanned_code_serializes_camel_case() {
        let code = decode("2200001005000").unwrap();
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json["kind"], "WeightEmbedded");
        assert_eq!(json["productCode"], "00001");
        assert!(json.get("weightKg").is_some());
    }
}
