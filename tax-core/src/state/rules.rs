//! Evaluator for the condition and calculation-method variants in a
//! [`StateTaxConfig`](super::config::StateTaxConfig).
//!
//! The interpreter is flat: every variant is matched here and nowhere else.

use rust_decimal::Decimal;
use tracing::debug;

use super::StateInput;
use super::config::{
    AgiModification, AmountField, Condition, CreditMethod, CreditRule, CreditUnit,
    FederalCreditKind, PhaseOut,
};
use crate::calculations::brackets::linear_phase_out;
use crate::money::{Cents, max0, multiply_cents};

/// Amounts known at the current point of a state calculation. Fields that
/// are computed later read as zero until they are filled in.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub input: &'a StateInput<'a>,
    pub state_agi: Cents,
    pub state_taxable_income: Cents,
    pub state_income_tax: Cents,
}

impl<'a> RuleContext<'a> {
    pub fn new(input: &'a StateInput<'a>) -> Self {
        Self {
            input,
            state_agi: input.federal.agi,
            state_taxable_income: 0,
            state_income_tax: 0,
        }
    }

    pub fn amount(
        &self,
        field: AmountField,
    ) -> Cents {
        let tax_return = self.input.tax_return;
        let income = &tax_return.income;
        let federal = self.input.federal;
        match field {
            AmountField::FederalAgi => federal.agi,
            AmountField::FederalTaxableIncome => federal.taxable_income,
            AmountField::StateAgi => self.state_agi,
            AmountField::StateTaxableIncome => self.state_taxable_income,
            AmountField::StateIncomeTax => self.state_income_tax,
            AmountField::Wages => income.wages,
            AmountField::EarnedIncome => income.earned_income(),
            AmountField::TaxableInterest => income.taxable_interest,
            AmountField::OrdinaryDividends => income.ordinary_dividends,
            AmountField::CapitalGains => federal.income.capital_gain_or_loss,
            AmountField::BusinessIncome => income.business_income,
            AmountField::RetirementIncome => income.retirement.total(),
            AmountField::PrimaryRetirementIncome => income.retirement.primary,
            AmountField::SpouseRetirementIncome => income.retirement.spouse,
            AmountField::UnemploymentCompensation => income.unemployment_compensation,
            AmountField::RealEstateTax => tax_return.itemized.real_estate_tax,
            AmountField::StateAndLocalIncomeTax => tax_return.itemized.state_and_local_income_tax,
        }
    }

    pub fn federal_credit(
        &self,
        kind: FederalCreditKind,
    ) -> Cents {
        let credits = &self.input.federal.credits;
        match kind {
            FederalCreditKind::EarnedIncomeCredit => credits.earned_income_credit,
            FederalCreditKind::ChildTaxCredit => {
                credits
                    .child_tax_credit
                    .saturating_add(credits.additional_child_tax_credit)
            }
            FederalCreditKind::AmericanOpportunityCredit => credits.american_opportunity_credit,
            FederalCreditKind::LifetimeLearningCredit => credits.lifetime_learning_credit,
            FederalCreditKind::ForeignTaxCredit => credits.foreign_tax_credit,
        }
    }

    pub fn units(
        &self,
        unit: CreditUnit,
    ) -> i64 {
        let profile = &self.input.tax_return.profile;
        let filers = i64::from(profile.filer_count());
        let dependents = profile.dependents.len() as i64;
        match unit {
            CreditUnit::Return => 1,
            CreditUnit::Filer => filers,
            CreditUnit::Dependent => dependents,
            CreditUnit::Exemption => filers + dependents,
        }
    }
}

pub fn condition_holds(
    condition: &Condition,
    ctx: &RuleContext<'_>,
) -> bool {
    let tax_return = ctx.input.tax_return;
    let profile = &tax_return.profile;
    let year = tax_return.tax_year;
    match condition {
        Condition::FilingStatus { any_of } => any_of.contains(&profile.filing_status),
        Condition::Amount { field, op, value } => op.holds(ctx.amount(*field), *value),
        Condition::PrimaryAgeAtLeast { age } => {
            profile.primary.age(year).is_some_and(|a| a >= *age)
        }
        Condition::SpouseAgeAtLeast { age } => profile
            .joint_spouse()
            .and_then(|s| s.age(year))
            .is_some_and(|a| a >= *age),
        Condition::DependentsAtLeast { count } => profile.dependents.len() >= *count,
    }
}

/// All conditions hold; an empty list always holds.
pub fn conditions_hold(
    conditions: &[Condition],
    ctx: &RuleContext<'_>,
) -> bool {
    conditions.iter().all(|c| condition_holds(c, ctx))
}

pub fn apply_phase_out(
    amount: Cents,
    phase_out: Option<&PhaseOut>,
    ctx: &RuleContext<'_>,
) -> Cents {
    let Some(phase_out) = phase_out else {
        return amount;
    };
    let status = ctx.input.tax_return.filing_status();
    linear_phase_out(
        amount,
        ctx.amount(phase_out.field),
        phase_out.start.get(status),
        phase_out.end.get(status),
    )
}

/// Amount of an addition or subtraction: the base times the percentage,
/// capped, then phased out. Zero when a condition fails.
pub fn modification_amount(
    rule: &AgiModification,
    ctx: &RuleContext<'_>,
) -> Cents {
    if !conditions_hold(&rule.conditions, ctx) {
        return 0;
    }
    let status = ctx.input.tax_return.filing_status();
    let mut amount = multiply_cents(max0(ctx.amount(rule.base)), rule.percentage);
    if let Some(cap) = &rule.cap {
        amount = amount.min(cap.get(status));
    }
    apply_phase_out(amount, rule.phase_out.as_ref(), ctx)
}

/// Looks up the first row whose inclusive bound covers `value`.
fn first_covering<T>(
    value: Cents,
    rows: &[T],
    bound: impl Fn(&T) -> Option<Cents>,
) -> Option<&T> {
    rows.iter()
        .find(|row| bound(row).is_none_or(|limit| value <= limit))
}

/// Credit before the cap and before it is split into refundable and
/// nonrefundable buckets.
pub fn credit_amount(
    rule: &CreditRule,
    ctx: &RuleContext<'_>,
) -> Cents {
    if !conditions_hold(&rule.conditions, ctx) {
        debug!(credit = %rule.id, "state credit conditions not met");
        return 0;
    }
    let base = match &rule.method {
        CreditMethod::Fixed { amount, per } => amount.saturating_mul(ctx.units(*per)),
        CreditMethod::Percentage { base, rate } => multiply_cents(max0(ctx.amount(*base)), *rate),
        CreditMethod::Tiered { field, per, tiers } => {
            first_covering(ctx.amount(*field), tiers, |t| t.up_to)
                .map_or(0, |tier| tier.amount.saturating_mul(ctx.units(*per)))
        }
        CreditMethod::Table { field, rows } => first_covering(ctx.amount(*field), rows, |r| r.up_to)
            .and_then(|row| {
                let dependents = ctx.input.tax_return.profile.dependents.len();
                let column = dependents.min(row.amounts.len().saturating_sub(1));
                row.amounts.get(column).copied()
            })
            .unwrap_or(0),
        CreditMethod::FederalPercentage { credit, rate } => {
            multiply_cents(max0(ctx.federal_credit(*credit)), *rate)
        }
    };
    let phased = apply_phase_out(max0(base), rule.phase_out.as_ref(), ctx);
    debug!(credit = %rule.id, amount = phased, "state credit evaluated");
    phased
}

/// Rate-based surtax on the part of `base` above `threshold`.
pub fn surtax_on_excess(
    base: Cents,
    threshold: Cents,
    rate: Decimal,
) -> Cents {
    multiply_cents(max0(base.saturating_sub(threshold)), rate)
}
