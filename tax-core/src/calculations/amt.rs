//! Alternative minimum tax hook.
//!
//! [`AmtMode::Simplified`] runs a reduced Form 6251: the only adjustment is
//! adding back state and local taxes deducted on Schedule A. The exemption
//! phases out at 25 cents per dollar above the threshold, ordinary AMT
//! income is taxed at 26%/28%, and preferential income keeps its capital
//! gain rates. [`AmtMode::NotModeled`] skips the computation and says so in
//! the diagnostics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::capital_gains::{PreferentialBands, stack_preferential};
use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{AmtMode, FilingStatus};
use crate::money::{Cents, max0, multiply_cents};
use crate::tables::AmtParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmtResult {
    pub mode: AmtMode,
    pub amti: Cents,
    pub exemption: Cents,
    pub tentative_minimum_tax: Cents,
    pub amt: Cents,
}

#[derive(Debug, Clone, Copy)]
pub struct AmtInput {
    pub taxable_income: Cents,
    /// SALT deducted on Schedule A; zero when the standard deduction is used.
    pub salt_addback: Cents,
    pub preferential_income: Cents,
    pub regular_tax: Cents,
    pub status: FilingStatus,
}

/// 26% up to the breakpoint, 28% above.
fn ordinary_tmt(
    amount: Cents,
    breakpoint: Cents,
    params: &AmtParameters,
) -> Cents {
    let amount = max0(amount);
    let low = amount.min(breakpoint);
    multiply_cents(low, params.low_rate)
        .saturating_add(multiply_cents(amount - low, params.high_rate))
}

pub fn alternative_minimum_tax(
    input: &AmtInput,
    params: &AmtParameters,
    bands: &PreferentialBands,
    mode: AmtMode,
    diagnostics: &mut Diagnostics,
) -> AmtResult {
    if mode == AmtMode::NotModeled {
        diagnostics.warn(
            codes::AMT_NOT_MODELED,
            Phase::AdditionalTaxes,
            "alternative minimum tax is not computed for this return",
        );
        return AmtResult {
            mode,
            amti: 0,
            exemption: 0,
            tentative_minimum_tax: 0,
            amt: 0,
        };
    }

    let status = input.status;
    let amti = max0(input.taxable_income).saturating_add(max0(input.salt_addback));
    let phase_out = multiply_cents(
        max0(amti - params.phase_out_start.get(status)),
        params.phase_out_rate,
    );
    let exemption = max0(params.exemption.get(status) - phase_out);
    let base = max0(amti - exemption);

    let breakpoint = params.rate_breakpoint.get(status);
    let preferential = max0(input.preferential_income).min(base);
    let tentative_minimum_tax = if preferential > 0 {
        let ordinary = base - preferential;
        let stacked = ordinary_tmt(ordinary, breakpoint, params)
            .saturating_add(stack_preferential(ordinary, preferential, bands).tax);
        stacked.min(ordinary_tmt(base, breakpoint, params))
    } else {
        ordinary_tmt(base, breakpoint, params)
    };
    let amt = max0(tentative_minimum_tax - max0(input.regular_tax));

    debug!(amti, exemption, tentative_minimum_tax, amt, "AMT computed");

    AmtResult {
        mode,
        amti,
        exemption,
        tentative_minimum_tax,
        amt,
    }
}
