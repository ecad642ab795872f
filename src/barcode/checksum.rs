//! EAN-13 check digit (GS1 mod-10).
//!
//! Not applied by [`super::decode`] or the scale-label encoders. Use
//! [`with_check_digit`] to turn a generated label into one that strict
//! scanners will accept.

use crate::error::{MizanError, Result};

/// Compute the check digit for the first 12 digits of an EAN-13 code.
///
/// Digits are weighted 1/3 alternating from the left (3/1 from the right of
/// the 12-digit body), summed, and the digit that brings the sum to a
/// multiple of ten is returned.
///
/// ```
/// use mizan::barcode::ean13_check_digit;
///
/// assert_eq!(ean13_check_digit("590123412345")?, '7');
/// # Ok::<(), mizan::MizanError>(())
/// ```
pub fn ean13_check_digit(body: &str) -> Result<char> {
    if body.len() != 12 || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MizanError::InvalidBarcodeFormat(format!(
            "EAN-13 body {body:?} must be 12 digits"
        )));
    }

    let sum: u32 = body
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit } else { digit * 3 }
        })
        .sum();

    let check = (10 - sum % 10) % 10;
    Ok(char::from(b'0' + check as u8))
}

/// Whether a 13-digit code carries a correct check digit.
pub fn has_valid_check_digit(code: &str) -> bool {
    if code.len() != 13 {
        return false;
    }
    match (code.get(..12), code.chars().last()) {
        (Some(body), Some(last)) => ean13_check_digit(body).is_ok_and(|c| c == last),
        _ => false,
    }
}

/// Replace the 13th character of a code with its computed check digit.
pub fn with_check_digit(code: &str) -> Result<String> {
    let body = code.get(..12).filter(|_| code.len() == 13).ok_or_else(|| {
        MizanError::InvalidBarcodeFormat(format!("{code:?} is not a 13-digit code"))
    })?;
    let check = ean13_check_digit(body)?;
    Ok(format!("{body}{check}"))
}
