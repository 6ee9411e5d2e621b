//! Integer-cents arithmetic shared by every calculation module.
//!
//! All money in the engine is an `i64` count of cents. Rates are
//! [`Decimal`] values; the only place a rate meets an amount is
//! [`multiply_cents`], which rounds the product back to whole cents.

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// A monetary amount in whole cents.
pub type Cents = i64;

/// Converts whole dollars to cents. Intended for table constants.
pub const fn dollars(amount: i64) -> Cents {
    amount * 100
}

/// Sums any number of amounts, saturating at the `i64` range instead of
/// overflowing.
///
/// # Examples
///
/// ```
/// use tax_core::money::add_cents;
///
/// assert_eq!(add_cents(&[100, 250, -50]), 300);
/// assert_eq!(add_cents(&[i64::MAX, 1]), i64::MAX);
/// ```
pub fn add_cents(values: &[Cents]) -> Cents {
    sum_cents(values.iter().copied())
}

/// [`add_cents`] over an iterator.
pub fn sum_cents(values: impl IntoIterator<Item = Cents>) -> Cents {
    values.into_iter().fold(0, Cents::saturating_add)
}

/// Clamps a negative amount to zero.
///
/// # Examples
///
/// ```
/// use tax_core::money::max0;
///
/// assert_eq!(max0(-1), 0);
/// assert_eq!(max0(42), 42);
/// ```
pub fn max0(value: Cents) -> Cents {
    value.max(0)
}

/// Rounds a decimal value to whole units using half-up rounding
/// (ties move away from zero).
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiplies an amount by a rate and rounds to the nearest cent, half-up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::money::multiply_cents;
///
/// assert_eq!(multiply_cents(4_500_000, dec!(0.0425)), 191_250);
/// assert_eq!(multiply_cents(5, dec!(0.5)), 3); // 2.5 rounds up
/// ```
pub fn multiply_cents(
    cents: Cents,
    rate: Decimal,
) -> Cents {
    match Decimal::from(cents).checked_mul(rate) {
        Some(product) => decimal_to_cents(product),
        None if (cents < 0) != (rate < Decimal::ZERO) => Cents::MIN,
        None => Cents::MAX,
    }
}

/// Rounds a cent-denominated decimal to an integer amount, saturating when
/// it does not fit in `i64`.
pub fn decimal_to_cents(value: Decimal) -> Cents {
    round_half_up(value).to_i64().unwrap_or(if value.is_sign_negative() {
        Cents::MIN
    } else {
        Cents::MAX
    })
}

/// Returns `numerator / denominator` as a decimal ratio, or zero when the
/// denominator is not positive.
pub fn ratio(
    numerator: Cents,
    denominator: Cents,
) -> Decimal {
    if denominator <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(numerator) / Decimal::from(denominator)
}

/// A dollar value as it arrives from the user-facing edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrencyValue<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl<'a> From<&'a str> for CurrencyValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CurrencyValue<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<'a, T: Into<CurrencyValue<'a>>> From<Option<T>> for CurrencyValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Parses a dollar amount into cents. Never fails: missing, `NaN`, infinite
/// or malformed input yields 0.
///
/// Accepts an optional leading `-`, a `$` sign, thousands separators and
/// surrounding whitespace. Fractions of a cent are rounded half-up.
///
/// # Examples
///
/// ```
/// use tax_core::money::safe_currency_to_cents;
///
/// assert_eq!(safe_currency_to_cents("$1,234.56"), 123_456);
/// assert_eq!(safe_currency_to_cents("-20.005"), -2_001);
/// assert_eq!(safe_currency_to_cents(12.5), 1_250);
/// assert_eq!(safe_currency_to_cents("twelve"), 0);
/// assert_eq!(safe_currency_to_cents(f64::NAN), 0);
/// ```
pub fn safe_currency_to_cents<'a>(value: impl Into<CurrencyValue<'a>>) -> Cents {
    let dollars = match value.into() {
        CurrencyValue::Missing => return 0,
        CurrencyValue::Number(n) if !n.is_finite() => return 0,
        CurrencyValue::Number(n) => match Decimal::from_f64(n) {
            Some(d) => d,
            None => return 0,
        },
        CurrencyValue::Text(text) => match parse_dollar_text(text) {
            Some(d) => d,
            None => return 0,
        },
    };
    dollars
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(decimal_to_cents)
        .unwrap_or(0)
}

fn parse_dollar_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let body = body.strip_prefix('$').unwrap_or(body);
    let cleaned: String = body.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty()
        || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.')
        || cleaned.matches('.').count() > 1
    {
        return None;
    }
    let parsed = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -parsed } else { parsed })
}

/// Formats cents as a dollar string with a `$` sign and thousands
/// separators, e.g. `-$1,234.05`.
pub fn format_cents_as_dollars(cents: Cents) -> String {
    let negative = cents < 0;
    let magnitude = cents.unsigned_abs();
    let whole = (magnitude / 100).to_string();
    let fraction = magnitude % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up / multiply_cents
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.5)), dec!(124));
    }

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.49)), dec!(123));
    }

    #[test]
    fn multiply_cents_rounds_half_up() {
        // 1,000.05 × 10% = 100.005 → 100.01
        assert_eq!(multiply_cents(100_005, dec!(0.10)), 10_001);
    }

    #[test]
    fn multiply_cents_handles_zero_rate() {
        assert_eq!(multiply_cents(987_654, Decimal::ZERO), 0);
    }

    #[test]
    fn multiply_cents_saturates_on_overflow() {
        assert_eq!(multiply_cents(i64::MAX, dec!(1000)), i64::MAX);
    }

    // =========================================================================
    // add_cents / max0
    // =========================================================================

    #[test]
    fn add_cents_sums_values() {
        assert_eq!(add_cents(&[1, 2, 3]), 6);
    }

    #[test]
    fn add_cents_of_nothing_is_zero() {
        assert_eq!(add_cents(&[]), 0);
    }

    #[test]
    fn add_cents_saturates_at_minimum() {
        assert_eq!(add_cents(&[i64::MIN, -5]), i64::MIN);
    }

    #[test]
    fn max0_clamps_negative() {
        assert_eq!(max0(-500), 0);
    }

    // =========================================================================
    // safe_currency_to_cents
    // =========================================================================

    #[test]
    fn parses_plain_dollars() {
        assert_eq!(safe_currency_to_cents("50000"), 5_000_000);
    }

    #[test]
    fn parses_dollar_sign_and_commas() {
        assert_eq!(safe_currency_to_cents(" $12,345.67 "), 1_234_567);
    }

    #[test]
    fn parses_negative_amounts() {
        assert_eq!(safe_currency_to_cents("-$3,000"), -300_000);
    }

    #[test]
    fn rounds_fractional_cents_half_up() {
        assert_eq!(safe_currency_to_cents("0.005"), 1);
    }

    #[test]
    fn malformed_text_is_zero() {
        assert_eq!(safe_currency_to_cents("1.2.3"), 0);
        assert_eq!(safe_currency_to_cents("abc"), 0);
        assert_eq!(safe_currency_to_cents(""), 0);
        assert_eq!(safe_currency_to_cents("$"), 0);
    }

    #[test]
    fn missing_and_non_finite_are_zero() {
        assert_eq!(safe_currency_to_cents(None::<&str>), 0);
        assert_eq!(safe_currency_to_cents(f64::INFINITY), 0);
        assert_eq!(safe_currency_to_cents(f64::NAN), 0);
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(safe_currency_to_cents(1999.99), 199_999);
    }

    // =========================================================================
    // format_cents_as_dollars
    // =========================================================================

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_cents_as_dollars(123_456_789), "$1,234,567.89");
    }

    #[test]
    fn formats_small_amounts() {
        assert_eq!(format_cents_as_dollars(5), "$0.05");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_cents_as_dollars(-100_000), "-$1,000.00");
    }

    proptest! {
        #[test]
        fn formatted_dollars_parse_back_to_the_same_cents(x in 0i64..=i64::MAX / 1000) {
            prop_assert_eq!(safe_currency_to_cents(format_cents_as_dollars(x).as_str()), x);
        }
    }
}
