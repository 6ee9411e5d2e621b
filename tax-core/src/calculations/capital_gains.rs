//! Qualified Dividends and Capital Gain Tax Worksheet.
//!
//! Preferential income sits on top of ordinary income. Each dollar is taxed
//! at the rate of the 0%/15%/20% band it lands in once the whole stack is
//! laid out, not at one flat rate.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Taxable income |
//! | 4    | Qualified dividends + net capital gain (limited to line 1) |
//! | 5    | Ordinary income: line 1 − line 4 |
//! | 6-9  | Portion of the stack inside the 0% band |
//! | 12-17| Portion inside the 15% band |
//! | 20   | Remainder taxed at 20% |
//! | 22   | Regular tax on line 5 |
//! | 24   | Line 22 + 15% and 20% amounts |
//! | 25   | Regular tax on line 1 |
//! | 26   | Smaller of line 24 or line 25 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::brackets::tax_from_brackets;
use crate::models::{FilingStatus, TaxBracket};
use crate::money::{Cents, max0, multiply_cents};
use crate::tables::CapitalGainBreakpoints;

/// Breakpoints for one filing status.
#[derive(Debug, Clone, Copy)]
pub struct PreferentialBands {
    pub zero_rate_max: Cents,
    pub fifteen_rate_max: Cents,
    pub fifteen_rate: Decimal,
    pub twenty_rate: Decimal,
}

impl PreferentialBands {
    pub fn for_status(
        breakpoints: &CapitalGainBreakpoints,
        status: FilingStatus,
    ) -> Self {
        Self {
            zero_rate_max: breakpoints.zero_rate_max.get(status),
            fifteen_rate_max: breakpoints.fifteen_rate_max.get(status),
            fifteen_rate: breakpoints.fifteen_rate,
            twenty_rate: breakpoints.twenty_rate,
        }
    }
}

/// How preferential income split across the bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferentialSplit {
    pub at_zero: Cents,
    pub at_fifteen: Cents,
    pub at_twenty: Cents,
    pub tax: Cents,
}

/// Lines 6 through 21: tax on `preferential` stacked above `ordinary`.
pub fn stack_preferential(
    ordinary: Cents,
    preferential: Cents,
    bands: &PreferentialBands,
) -> PreferentialSplit {
    let ordinary = max0(ordinary);
    let preferential = max0(preferential);
    if preferential == 0 {
        return PreferentialSplit::default();
    }
    let total = ordinary.saturating_add(preferential);

    let zero_band_top = total.min(bands.zero_rate_max);
    let at_zero = max0(zero_band_top - ordinary).min(preferential);

    let fifteen_band_top = total.min(bands.fifteen_rate_max);
    let room_in_fifteen = max0(fifteen_band_top - (ordinary + at_zero));
    let at_fifteen = (preferential - at_zero).min(room_in_fifteen);

    let at_twenty = preferential - at_zero - at_fifteen;

    let tax = multiply_cents(at_fifteen, bands.fifteen_rate)
        .saturating_add(multiply_cents(at_twenty, bands.twenty_rate));

    PreferentialSplit {
        at_zero,
        at_fifteen,
        at_twenty,
        tax,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxMethod {
    /// No preferential income; tax comes straight from the schedule.
    #[default]
    RateSchedule,
    /// Qualified Dividends and Capital Gain Tax Worksheet.
    PreferentialWorksheet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxComputation {
    pub taxable_income: Cents,
    pub ordinary_income: Cents,
    pub preferential_income: Cents,
    pub ordinary_tax: Cents,
    pub preferential: PreferentialSplit,
    /// Line 25, used as the ceiling.
    pub regular_tax_on_all_income: Cents,
    pub tax: Cents,
    pub method: TaxMethod,
}

/// Tax on taxable income with preferential stacking, never above regular tax
/// on the whole amount.
pub fn income_tax(
    taxable_income: Cents,
    preferential_income: Cents,
    brackets: &[TaxBracket],
    bands: &PreferentialBands,
) -> IncomeTaxComputation {
    let taxable_income = max0(taxable_income);
    let regular = tax_from_brackets(taxable_income, brackets);
    let preferential_income = max0(preferential_income).min(taxable_income);

    if preferential_income == 0 {
        return IncomeTaxComputation {
            taxable_income,
            ordinary_income: taxable_income,
            preferential_income: 0,
            ordinary_tax: regular,
            preferential: PreferentialSplit::default(),
            regular_tax_on_all_income: regular,
            tax: regular,
            method: TaxMethod::RateSchedule,
        };
    }

    let ordinary_income = taxable_income - preferential_income;
    let ordinary_tax = tax_from_brackets(ordinary_income, brackets);
    let preferential = stack_preferential(ordinary_income, preferential_income, bands);
    let stacked = ordinary_tax.saturating_add(preferential.tax);
    let tax = stacked.min(regular);

    debug!(
        taxable_income,
        preferential_income, stacked, regular, "preferential worksheet applied"
    );

    IncomeTaxComputation {
        taxable_income,
        ordinary_income,
        preferential_income,
        ordinary_tax,
        preferential,
        regular_tax_on_all_income: regular,
        tax,
        method: TaxMethod::PreferentialWorksheet,
    }
}
