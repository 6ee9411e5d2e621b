//! Child tax credit, credit for other dependents, and the refundable
//! additional child tax credit (Schedule 8812).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{FilingStatus, TaxpayerProfile};
use crate::money::{Cents, max0, multiply_cents};
use crate::tables::ChildTaxCreditParameters;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTaxCreditResult {
    pub qualifying_children: usize,
    pub other_dependents: usize,
    /// $2,000 per child plus $500 per other dependent, before phase-out.
    pub initial_credit: Cents,
    pub phase_out_reduction: Cents,
    /// CTC and ODC allowed against tax.
    pub nonrefundable: Cents,
    /// ACTC.
    pub refundable: Cents,
    pub explanation: String,
}

/// Phase-out reduction: a fixed amount for each step, or part of a step, of
/// MAGI above the threshold.
pub fn ctc_phase_out_reduction(
    magi: Cents,
    status: FilingStatus,
    params: &ChildTaxCreditParameters,
) -> Cents {
    let excess = max0(magi.saturating_sub(params.phase_out_threshold.get(status)));
    if excess == 0 || params.phase_out_step <= 0 {
        return 0;
    }
    let steps = excess / params.phase_out_step + i64::from(excess % params.phase_out_step != 0);
    steps.saturating_mul(params.phase_out_reduction)
}

/// Computes the credits given the tax still available to absorb
/// nonrefundable credits.
pub fn child_tax_credit(
    profile: &TaxpayerProfile,
    tax_year: i32,
    magi: Cents,
    earned_income: Cents,
    tax_available: Cents,
    params: &ChildTaxCreditParameters,
) -> ChildTaxCreditResult {
    let children = profile.ctc_children(tax_year);
    let others = profile.other_dependents(tax_year);
    if children == 0 && others == 0 {
        return ChildTaxCreditResult {
            explanation: "no qualifying children or other dependents".to_string(),
            ..Default::default()
        };
    }

    let child_credit = params.per_child.saturating_mul(children as i64);
    let initial_credit =
        child_credit.saturating_add(params.per_other_dependent.saturating_mul(others as i64));
    let phase_out_reduction =
        ctc_phase_out_reduction(magi, profile.filing_status, params).min(initial_credit);
    let after_phase_out = initial_credit - phase_out_reduction;

    let nonrefundable = after_phase_out.min(max0(tax_available));
    let unused = after_phase_out - nonrefundable;

    // Only the child portion of the unused credit can be refunded.
    let child_after_phase_out = after_phase_out.min(child_credit);
    let earned_based = multiply_cents(
        max0(earned_income.saturating_sub(params.earned_income_floor)),
        params.refundable_rate,
    );
    let refundable = unused
        .min(child_after_phase_out)
        .min(params.refundable_max_per_child.saturating_mul(children as i64))
        .min(earned_based);

    debug!(
        children,
        others, initial_credit, phase_out_reduction, nonrefundable, refundable, "CTC computed"
    );

    ChildTaxCreditResult {
        qualifying_children: children,
        other_dependents: others,
        initial_credit,
        phase_out_reduction,
        nonrefundable,
        refundable,
        explanation: format!(
            "{children} children and {others} other dependents: {initial_credit} less \
             {phase_out_reduction} phase-out; {nonrefundable} against tax, {refundable} refundable"
        ),
    }
}
