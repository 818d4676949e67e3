//! Decimal amount parsing and base-unit scaling.

use crate::error::ValidationError;

/// Multiplicative factor converting a human-entered decimal amount into the
/// ledger's smallest unit.
pub const BASE_UNIT_SCALE: u64 = 1_000_000_000;

/// Parse a user-entered decimal string into base units.
///
/// Fails fast on anything that does not describe a finite, non-negative
/// value, so callers can reject bad input before touching the network.
/// `"1.5"` parses to `1_500_000_000`.
pub fn parse_amount(input: &str) -> Result<u64, ValidationError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount);
    }

    let scaled = value * BASE_UNIT_SCALE as f64;
    if scaled > u64::MAX as f64 {
        return Err(ValidationError::AmountOutOfRange(input.trim().to_string()));
    }
    Ok(scaled.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, BASE_UNIT_SCALE};
    use crate::error::ValidationError;

    #[test]
    fn scales_by_base_unit_factor() {
        assert_eq!(parse_amount("1.5").unwrap(), 1_500_000_000);
        assert_eq!(parse_amount("1").unwrap(), BASE_UNIT_SCALE);
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert_eq!(parse_amount("0.000000001").unwrap(), 1);
    }

    #[test]
    fn rejects_non_numeric_inputs() {
        for input in ["abc", "", "1.2.3", "one", "--1"] {
            assert_eq!(
                parse_amount(input),
                Err(ValidationError::InvalidAmount),
                "input {input:?} must be rejected"
            );
        }
    }

    #[test]
    fn rejects_nan_infinite_and_negative() {
        for input in ["NaN", "nan", "inf", "infinity", "-inf", "-1", "-0.5"] {
            assert_eq!(
                parse_amount(input),
                Err(ValidationError::InvalidAmount),
                "input {input:?} must be rejected"
            );
        }
    }

    #[test]
    fn rejects_amounts_that_overflow_base_units() {
        assert!(matches!(
            parse_amount("1e300"),
            Err(ValidationError::AmountOutOfRange(_))
        ));
    }
}
