use thiserror::Error;

use crate::pocket::Pocket;

/// Why a piece of typed input was not accepted as a pocket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("not a number")]
    NotANumber,
    #[error("not a whole number")]
    NotAWholeNumber,
    #[error("{0} is outside 0-36")]
    OutOfRange(i64),
}

/// Parse user-typed text into a pocket.
///
/// Checks run in order: is it a number at all, is it whole, is it on the wheel.
/// Surrounding whitespace is ignored.
pub fn validate(raw: &str) -> Result<Pocket, Rejection> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(Rejection::NotANumber);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Pocket::new(n);
    }
    let n: f64 = s.parse().map_err(|_| Rejection::NotANumber)?;
    if !n.is_finite() {
        return Err(Rejection::NotANumber);
    }
    if n.fract() != 0.0 {
        return Err(Rejection::NotAWholeNumber);
    }
    // Whole but possibly huge; clamp into i64 so the range error still carries a value.
    let whole = if n >= i64::MAX as f64 {
        i64::MAX
    } else if n <= i64::MIN as f64 {
        i64::MIN
    } else {
        n as i64
    };
    Pocket::new(whole)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(v: u8) -> Result<u8, Rejection> {
        Ok(v)
    }

    fn check(s: &str) -> Result<u8, Rejection> {
        validate(s).map(Pocket::value)
    }

    #[test]
    fn accepts_the_wheel() {
        assert_eq!(check("7"), ok(7));
        assert_eq!(check("0"), ok(0));
        assert_eq!(check("36"), ok(36));
        assert_eq!(check("  12 "), ok(12));
    }

    #[test]
    fn rejects_in_rule_order() {
        assert_eq!(check("37"), Err(Rejection::OutOfRange(37)));
        assert_eq!(check("3.5"), Err(Rejection::NotAWholeNumber));
        assert_eq!(check("abc"), Err(Rejection::NotANumber));
        // fractional wins over range
        assert_eq!(check("40.5"), Err(Rejection::NotAWholeNumber));
    }

    #[test]
    fn whole_decimals_are_integers() {
        assert_eq!(check("12.0"), ok(12));
        assert_eq!(check("1e1"), ok(10));
        assert_eq!(check("-0"), ok(0));
    }

    #[test]
    fn edge_inputs() {
        assert_eq!(check(""), Err(Rejection::NotANumber));
        assert_eq!(check("   "), Err(Rejection::NotANumber));
        assert_eq!(check("inf"), Err(Rejection::NotANumber));
        assert_eq!(check("NaN"), Err(Rejection::NotANumber));
        assert_eq!(check("-1"), Err(Rejection::OutOfRange(-1)));
        assert_eq!(check("1e30"), Err(Rejection::OutOfRange(i64::MAX)));
        assert_eq!(check("12abc"), Err(Rejection::NotANumber));
    }
}
