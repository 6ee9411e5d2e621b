//! Additional Medicare Tax (Form 8959) and Net Investment Income Tax
//! (Form 8960).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::FilingStatus;
use crate::money::{Cents, max0, multiply_cents};
use crate::tables::SurtaxThreshold;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalMedicareTax {
    pub threshold: Cents,
    /// Part I: wages above the threshold.
    pub wages_over_threshold: Cents,
    /// Part II: SE earnings above the threshold left after wages.
    pub se_earnings_over_threshold: Cents,
    pub tax: Cents,
}

/// 0.9% on Medicare wages and SE earnings above the filing-status
/// threshold. Wages use the threshold first; SE earnings get what is left.
pub fn additional_medicare_tax(
    medicare_wages: Cents,
    se_net_earnings: Cents,
    status: FilingStatus,
    params: &SurtaxThreshold,
) -> AdditionalMedicareTax {
    let threshold = params.threshold.get(status);
    let wages = max0(medicare_wages);
    let wages_over_threshold = max0(wages - threshold);
    let se_threshold = max0(threshold - wages);
    let se_earnings_over_threshold = max0(max0(se_net_earnings) - se_threshold);
    let tax = multiply_cents(wages_over_threshold, params.rate)
        .saturating_add(multiply_cents(se_earnings_over_threshold, params.rate));

    debug!(wages_over_threshold, se_earnings_over_threshold, tax, "Additional Medicare Tax");

    AdditionalMedicareTax {
        threshold,
        wages_over_threshold,
        se_earnings_over_threshold,
        tax,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetInvestmentIncomeTax {
    pub net_investment_income: Cents,
    pub magi_over_threshold: Cents,
    pub tax: Cents,
}

/// 3.8% of the smaller of net investment income or MAGI above the
/// threshold.
pub fn net_investment_income_tax(
    net_investment_income: Cents,
    magi: Cents,
    status: FilingStatus,
    params: &SurtaxThreshold,
) -> NetInvestmentIncomeTax {
    let net_investment_income = max0(net_investment_income);
    let magi_over_threshold = max0(magi.saturating_sub(params.threshold.get(status)));
    let tax = multiply_cents(net_investment_income.min(magi_over_threshold), params.rate);

    debug!(net_investment_income, magi_over_threshold, tax, "NIIT");

    NetInvestmentIncomeTax {
        net_investment_income,
        magi_over_threshold,
        tax,
    }
}
