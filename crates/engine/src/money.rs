use std::{
    fmt,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use crate::EngineError;

/// Money amount represented as integer **minor units** (hundredths).
///
/// Use this type for all monetary values in the engine to avoid
/// floating-point drift. Floats only appear at the JSON boundary, where
/// [`Money::from_major`] and [`Money::to_major`] convert.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount: Money = "1234,5".parse().unwrap();
/// assert_eq!(amount.minor(), 123_450);
/// assert_eq!(amount.format("₹"), "₹1,234.50");
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single value may carry, in minor units (10^13 major).
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a decimal in major units (as received over JSON).
    ///
    /// Rejects non-finite values, values with more than two decimals and
    /// values beyond [`Money::MAX`].
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount("amount must be a number".to_string()));
        }
        let scaled = value * 100.0;
        let rounded = scaled.round();
        if rounded.abs() > Self::MAX.0 as f64 {
            return Err(too_large());
        }
        if (scaled - rounded).abs() > 1e-6 {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }
        Ok(Self(rounded as i64))
    }

    /// Decimal in major units, for the JSON boundary.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Integer division by `count`, rounding half away from zero.
    ///
    /// Returns zero when `count` is zero.
    #[must_use]
    pub fn average(self, count: u64) -> Money {
        if count == 0 {
            return Money::ZERO;
        }
        let count = count as i64;
        let half = count / 2;
        let value = if self.0 >= 0 {
            self.0.saturating_add(half) / count
        } else {
            self.0.saturating_sub(half) / count
        };
        Money(value)
    }

    /// Rounds to whole major units, half away from zero.
    #[must_use]
    pub fn round_to_unit(self) -> Money {
        Money(self.average(100).0 * 100)
    }

    /// Formats with a currency symbol and thousands separators, e.g. `₹1,234.50`.
    #[must_use]
    pub fn format(self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!(
            "{sign}{symbol}{}.{:02}",
            group_thousands(abs / 100),
            abs % 100
        )
    }

    /// Like [`Money::format`] but rounded to whole units, e.g. `₹1,235`.
    #[must_use]
    pub fn format_whole(self, symbol: &str) -> String {
        let rounded = self.round_to_unit();
        let sign = if rounded.0 < 0 { "-" } else { "" };
        format!(
            "{sign}{symbol}{}",
            group_thousands(rounded.0.unsigned_abs() / 100)
        )
    }
}

fn too_large() -> EngineError {
    EngineError::InvalidAmount("amount too large".to_string())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

// Arithmetic saturates at the i64 bounds.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - magnitude at most [`Money::MAX`]
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| too_large())?;

        let fraction: i64 = match fraction_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .filter(|v| *v <= Self::MAX.0)
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(5).to_string(), "0.05");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(Money::new(15075).format("₹"), "₹150.75");
        assert_eq!(Money::new(123_456_789).format("$"), "$1,234,567.89");
        assert_eq!(Money::new(100_000).format("€"), "€1,000.00");
        assert_eq!(Money::new(-250).format("£"), "-£2.50");
    }

    #[test]
    fn format_whole_rounds_half_up() {
        assert_eq!(Money::new(25_450).format_whole("₹"), "₹255");
        assert_eq!(Money::new(25_449).format_whole("₹"), "₹254");
        assert_eq!(Money::new(0).format_whole("$"), "$0");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
        assert_eq!("7.".parse::<Money>().unwrap().minor(), 700);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
    }

    #[test]
    fn from_major_checks_precision() {
        assert_eq!(Money::from_major(150.75).unwrap().minor(), 15075);
        assert_eq!(Money::from_major(999.99).unwrap().minor(), 99999);
        assert_eq!(Money::from_major(0.1 + 0.2).unwrap().minor(), 30);
        assert!(Money::from_major(1.005).is_err());
        assert!(Money::from_major(f64::NAN).is_err());
        assert!(Money::from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn amounts_are_bounded() {
        assert_eq!(Money::from_major(1e13).unwrap(), Money::MAX);
        assert!(matches!(
            Money::from_major(1e13 + 0.01),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(Money::from_major(9e16).is_err());
        assert!(Money::from_major(-9e16).is_err());

        assert_eq!("10000000000000".parse::<Money>().unwrap(), Money::MAX);
        assert!("10000000000000.01".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn sums_at_the_bound_do_not_wrap() {
        let total: Money = std::iter::repeat_n(Money::MAX, 3).sum();
        assert_eq!(total.minor(), 3 * Money::MAX.minor());

        let huge = Money::new(i64::MAX - 1) + Money::MAX;
        assert_eq!(huge.minor(), i64::MAX);
        let mut acc = Money::new(i64::MAX);
        acc += Money::MAX;
        assert_eq!(acc.minor(), i64::MAX);
        assert_eq!(Money::new(i64::MIN) - Money::MAX, Money::new(i64::MIN));
        assert!(Money::new(i64::MAX).average(2).minor() > 0);
    }

    #[test]
    fn average_rounds_and_handles_empty() {
        assert_eq!(Money::new(1000).average(3).minor(), 333);
        assert_eq!(Money::new(1001).average(2).minor(), 501);
        assert_eq!(Money::new(1000).average(0), Money::ZERO);
    }
}
