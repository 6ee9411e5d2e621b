//! Net operating loss carryforwards.
//!
//! Carryforwards are consumed oldest first. The caller's list is never
//! touched; the result carries an updated copy with each record's remaining
//! amount reduced by what this year used.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{NolCarryforward, NolSource};
use crate::money::{Cents, format_cents_as_dollars, max0, multiply_cents, sum_cents};

/// Share of pre-NOL taxable income an NOL may offset in `tax_year`.
///
/// 2018 through 2020 allowed the full amount; other years cap the deduction
/// at 80%.
pub fn nol_limit_rate(tax_year: i32) -> Decimal {
    if (2018..=2020).contains(&tax_year) {
        Decimal::ONE
    } else {
        dec!(0.80)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NolUsage {
    pub origin_year: i32,
    pub used: Cents,
    pub remaining_after: Cents,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NolResult {
    pub taxable_income_before_nol: Cents,
    pub available: Cents,
    pub limit: Cents,
    pub deduction: Cents,
    pub usages: Vec<NolUsage>,
    /// Input carryforwards, oldest first, with remaining amounts reduced,
    /// plus any loss generated this year.
    pub updated_carryforwards: Vec<NolCarryforward>,
    pub generated: Option<NolCarryforward>,
    pub explanation: String,
}

/// Applies available carryforwards against `taxable_income_before_nol`
/// (AGI less the chosen deduction).
///
/// When `agi` is negative and `business_loss` is a loss, a carryforward for
/// `tax_year` is generated, limited to the business portion of the loss. If
/// the caller already holds a business record for `tax_year`, the generated
/// amount is added to that record instead of appending a second one;
/// `generated` always reports only this year's new loss.
pub fn apply_nol(
    carryforwards: &[NolCarryforward],
    taxable_income_before_nol: Cents,
    agi: Cents,
    business_loss: Cents,
    tax_year: i32,
    diagnostics: &mut Diagnostics,
) -> NolResult {
    let mut updated: Vec<NolCarryforward> = carryforwards
        .iter()
        .map(|nol| NolCarryforward {
            remaining_amount: nol.remaining_amount.clamp(0, max0(nol.original_amount)),
            ..nol.clone()
        })
        .collect();
    updated.sort_by_key(|nol| nol.origin_year);

    let base = max0(taxable_income_before_nol);
    let available = sum_cents(
        updated
            .iter()
            .filter(|nol| nol.origin_year < tax_year)
            .map(|nol| nol.remaining_amount),
    );
    let limit = multiply_cents(base, nol_limit_rate(tax_year));

    let mut to_use = available.min(limit);
    let deduction = to_use;
    let mut usages = Vec::new();
    for nol in updated.iter_mut().filter(|nol| nol.origin_year < tax_year) {
        if to_use == 0 {
            break;
        }
        let used = nol.remaining_amount.min(to_use);
        if used == 0 {
            continue;
        }
        nol.remaining_amount -= used;
        to_use -= used;
        usages.push(NolUsage {
            origin_year: nol.origin_year,
            used,
            remaining_after: nol.remaining_amount,
        });
    }

    if available > limit && limit > 0 {
        diagnostics.warn(
            codes::NOL_LIMITED,
            Phase::Nol,
            format!(
                "NOL deduction limited to {} of taxable income; {} carries forward",
                nol_limit_rate(tax_year),
                format_cents_as_dollars(available - deduction)
            ),
        );
    }

    let generated = if agi < 0 && business_loss < 0 {
        let amount = agi.saturating_neg().min(business_loss.saturating_neg());
        let nol = NolCarryforward {
            origin_year: tax_year,
            original_amount: amount,
            remaining_amount: amount,
            source: NolSource::Business,
        };
        diagnostics.warn(
            codes::NOL_GENERATED,
            Phase::Nol,
            format!(
                "{} net operating loss generated for carryforward",
                format_cents_as_dollars(amount)
            ),
        );
        match updated
            .iter_mut()
            .find(|held| held.origin_year == tax_year && held.source == NolSource::Business)
        {
            Some(held) => {
                held.original_amount = held.original_amount.saturating_add(amount);
                held.remaining_amount = held.remaining_amount.saturating_add(amount);
            }
            None => updated.push(nol.clone()),
        }
        Some(nol)
    } else {
        None
    };

    debug!(available, limit, deduction, "NOL applied");

    NolResult {
        taxable_income_before_nol: base,
        available,
        limit,
        deduction,
        explanation: format!(
            "{} of {} available NOL used across {} carryforward years (limit {})",
            deduction,
            available,
            usages.len(),
            limit
        ),
        usages,
        updated_carryforwards: updated,
        generated,
    }
}
