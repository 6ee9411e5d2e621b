//! Progressive bracket and linear phase-out arithmetic shared by the federal
//! and state calculators.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TaxBracket;
use crate::money::{Cents, decimal_to_cents, multiply_cents};

/// Structural problems with a bracket schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstMinNotZero(Cents),

    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Cents,
        found: Cents,
    },

    #[error("bracket {index} has max {max} not above its min {min}")]
    EmptyBand { index: usize, min: Cents, max: Cents },

    #[error("bracket {index} is not the last bracket but has no upper bound")]
    OpenBandBeforeEnd { index: usize },

    #[error("last bracket must be unbounded")]
    BoundedTopBand,

    #[error("bracket {index} rate {rate} is outside [0, 1]")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// Checks that a schedule is sorted, contiguous from zero, non-overlapping and
/// ends in an unbounded band.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketError> {
    let first = brackets.first().ok_or(BracketError::Empty)?;
    if first.min != 0 {
        return Err(BracketError::FirstMinNotZero(first.min));
    }

    let last_index = brackets.len() - 1;
    let mut expected_min = 0;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(BracketError::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }
        if bracket.min != expected_min {
            return Err(BracketError::NotContiguous {
                index,
                expected: expected_min,
                found: bracket.min,
            });
        }
        match bracket.max {
            Some(max) if max <= bracket.min => {
                return Err(BracketError::EmptyBand {
                    index,
                    min: bracket.min,
                    max,
                });
            }
            Some(_) if index == last_index => return Err(BracketError::BoundedTopBand),
            Some(max) => expected_min = max,
            None if index != last_index => return Err(BracketError::OpenBandBeforeEnd { index }),
            None => {}
        }
    }
    Ok(())
}

/// Tax on `taxable_income` under a progressive schedule.
///
/// Each band taxes the slice of income that falls inside it; the products
/// are summed exactly and rounded once, so the result is non-decreasing in
/// income and moves by at most one marginal rate per cent at a boundary.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::brackets::tax_from_brackets;
/// use tax_core::models::schedule;
///
/// let brackets = schedule(&[(1_000_000, dec!(0.10)), (0, dec!(0.20))]);
///
/// assert_eq!(tax_from_brackets(500_000, &brackets), 50_000);
/// assert_eq!(tax_from_brackets(1_500_000, &brackets), 200_000);
/// ```
pub fn tax_from_brackets(
    taxable_income: Cents,
    brackets: &[TaxBracket],
) -> Cents {
    if taxable_income <= 0 {
        return 0;
    }
    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        if taxable_income <= bracket.min {
            break;
        }
        let slice = taxable_income.min(bracket.upper()) - bracket.min;
        if slice > 0 {
            tax += Decimal::from(slice) * bracket.rate;
        }
        if taxable_income <= bracket.upper() {
            break;
        }
    }
    decimal_to_cents(tax)
}

/// Rate of the band `taxable_income` falls in, or zero for no income.
pub fn marginal_rate(
    taxable_income: Cents,
    brackets: &[TaxBracket],
) -> Decimal {
    if taxable_income <= 0 {
        return Decimal::ZERO;
    }
    brackets
        .iter()
        .find(|b| taxable_income > b.min && taxable_income <= b.upper())
        .or(brackets.last())
        .map_or(Decimal::ZERO, |b| b.rate)
}

/// Reduces `base` linearly as `agi` moves from `start` to `end`.
///
/// Returns `base` at or below `start`, zero at or above `end`, and
/// `base × (1 − (agi − start) / (end − start))` in between, clamped to
/// `[0, base]`. A degenerate range (`end <= start`) acts as a cliff at
/// `start`.
///
/// # Examples
///
/// ```
/// use tax_core::calculations::brackets::linear_phase_out;
///
/// assert_eq!(linear_phase_out(1_000, 50, 100, 200), 1_000);
/// assert_eq!(linear_phase_out(1_000, 150, 100, 200), 500);
/// assert_eq!(linear_phase_out(1_000, 250, 100, 200), 0);
/// ```
pub fn linear_phase_out(
    base: Cents,
    agi: Cents,
    start: Cents,
    end: Cents,
) -> Cents {
    if base <= 0 || agi <= start {
        return base.max(0);
    }
    if agi >= end || end <= start {
        return 0;
    }
    let into_range = Decimal::from(agi.saturating_sub(start));
    let remaining = Decimal::ONE - into_range / Decimal::from(end.saturating_sub(start));
    multiply_cents(base, remaining).clamp(0, base)
}

/// Fraction of a phase-in range covered by `amount`, clamped to `[0, 1]`.
pub fn phase_in_fraction(
    amount: Cents,
    start: Cents,
    range: Cents,
) -> Decimal {
    if amount <= start {
        return Decimal::ZERO;
    }
    if range <= 0 || amount >= start.saturating_add(range) {
        return Decimal::ONE;
    }
    Decimal::from(amount.saturating_sub(start)) / Decimal::from(range)
}
