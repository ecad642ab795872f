//! Fixed-point helpers for 3-decimal currency and weight values.
//!
//! The business currency has 1000 minor units per major unit (e.g. `0.500`),
//! and scale weights are carried in kilograms with gram precision, so both
//! share the same three decimal places.

use rust_decimal::prelude::*;

/// Decimal places for money and kilogram weights
pub const DECIMAL_PLACES: u32 = 3;

/// Minor units (or grams) per major unit (or kilogram)
pub const MINOR_PER_MAJOR: i64 = 1000;

/// Round to 3 decimal places, half away from zero.
#[inline]
pub fn round3(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format with exactly 3 decimal places (`0.5` → `"0.500"`).
pub fn format3(value: Decimal) -> String {
    format!("{:.3}", round3(value))
}

/// Convert a major-unit value to whole minor units, rounding to nearest.
///
/// Returns `None` for negative values or values that overflow `u64`.
pub fn to_minor_units(value: Decimal) -> Option<u64> {
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    value
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

/// Convert whole minor units back to a major-unit value.
#[inline]
pub fn from_minor_units(minor: u64) -> Decimal {
    Decimal::new(minor as i64, DECIMAL_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format3_pads_and_rounds() {
        assert_eq!(format3(d("0.5")), "0.500");
        assert_eq!(format3(d("10")), "10.000");
        assert_eq!(format3(d("1.2345")), "1.235");
        assert_eq!(format3(d("1.2344")), "1.234");
    }

    #[test]
    fn test_to_minor_units_rounds_half_up() {
        assert_eq!(to_minor_units(d("1.25")), Some(1250));
        assert_eq!(to_minor_units(d("0.0005")), Some(1));
        assert_eq!(to_minor_units(d("0.0004")), Some(0));
        assert_eq!(to_minor_units(Decimal::ZERO), Some(0));
    }

    #[test]
    fn test_to_minor_units_rejects_negative() {
        assert_eq!(to_minor_units(d("-0.5")), None);
    }

    #[test]
    fn test_to_minor_units_overflow_is_none() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
        assert_eq!(to_minor_units(d("18446744073709552")), None);
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(from_minor_units(500), d("0.5"));
        assert_eq!(from_minor_units(1250), d("1.25"));
    }
}
