//! Table-driven state calculator.
//!
//! Runs the same nine steps as the federal pipeline, reading every rule
//! from a [`StateTaxConfig`]:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | AGI additions and subtractions |
//! | 2    | Standard or itemized deduction |
//! | 3    | Exemptions and taxable income |
//! | 4    | Flat or bracket tax |
//! | 5    | Surtaxes above a threshold |
//! | 6    | Credits, split into refundable and nonrefundable |
//! | 7    | Local tax by county |
//! | 8    | Net liability |
//! | 9    | Refund or amount owed |

use rust_decimal::Decimal;
use tracing::debug;

use super::config::{
    ItemizedRule, LocalTaxRule, StateConfigError, StateTaxConfig, SurtaxMethod, TaxStructure,
};
use super::rules::{RuleContext, credit_amount, modification_amount, surtax_on_excess};
use super::{StateCalculator, StateComputation, StateInput};
use crate::calculations::brackets::tax_from_brackets;
use crate::diagnostics::{Phase, codes};
use crate::money::{Cents, add_cents, format_cents_as_dollars, max0, multiply_cents};
use crate::results::{
    ModificationKind, StateCreditLine, StateDeductionType, StateModificationLine, StateResult,
};

/// [`StateCalculator`] for any state described by a validated document.
#[derive(Debug, Clone)]
pub struct GenericStateCalculator {
    config: StateTaxConfig,
}

impl GenericStateCalculator {
    /// Validates the document; an invalid one is never wrapped.
    pub fn new(config: StateTaxConfig) -> Result<Self, StateConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StateTaxConfig {
        &self.config
    }

    fn itemized_amount(
        &self,
        input: &StateInput<'_>,
    ) -> Option<Cents> {
        match self.config.deduction.itemized {
            ItemizedRule::NotAllowed => None,
            ItemizedRule::FederalLessIncomeTax => Some(input.itemized_less_income_tax()),
        }
    }

    fn exemptions(
        &self,
        input: &StateInput<'_>,
        computation: &mut StateComputation,
    ) -> Cents {
        let rules = &self.config.exemptions;
        let profile = &input.tax_return.profile;
        let year = input.tax_year();
        let filers: Vec<_> = std::iter::once(&profile.primary)
            .chain(profile.joint_spouse())
            .collect();

        let seniors = filers.iter().filter(|p| p.is_65_or_older(year)).count() as i64;
        let blind = filers.iter().filter(|p| p.is_blind).count() as i64;
        let total = add_cents(&[
            rules.personal.saturating_mul(filers.len() as i64),
            rules.dependent.saturating_mul(profile.dependents.len() as i64),
            rules.age_65.saturating_mul(seniors),
            rules.blind.saturating_mul(blind),
        ]);

        if let Some(limit) = &rules.agi_limit {
            let limit = limit.get(input.status());
            if total > 0 && input.federal.agi > limit {
                computation.diagnostics.warn(
                    codes::STATE_EXEMPTIONS_ZEROED,
                    Phase::State,
                    format!(
                        "{} exemptions are not allowed above AGI of {}",
                        self.config.state_code,
                        format_cents_as_dollars(limit)
                    ),
                );
                return 0;
            }
        }
        total
    }

    /// County rate, else the default rate with a warning.
    fn local_rate(
        &self,
        local: &LocalTaxRule,
        input: &StateInput<'_>,
        computation: &mut StateComputation,
    ) -> Option<Decimal> {
        let county = input.tax_return.profile.location.county.as_deref();
        if let Some(rate) = county.and_then(|c| local.rate_for(c)) {
            return Some(rate);
        }
        let state = &self.config.state_code;
        match county {
            Some(county) => computation.diagnostics.warn(
                codes::UNKNOWN_COUNTY,
                Phase::State,
                format!("{state} has no local rate for county '{county}'"),
            ),
            None => computation.diagnostics.warn(
                codes::LOCAL_RATE_MISSING,
                Phase::State,
                format!("{state} local tax needs a county"),
            ),
        }
        local.default_rate
    }
}

impl StateCalculator for GenericStateCalculator {
    fn state_code(&self) -> &str {
        &self.config.state_code
    }

    fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    fn calculate(
        &self,
        input: &StateInput<'_>,
    ) -> StateResult {
        let config = &self.config;
        let status = input.status();
        let mut ctx = RuleContext::new(input);
        let mut computation = StateComputation::new(input.federal.agi);

        // Step 1
        for modification in &config.modifications {
            let amount = modification_amount(modification, &ctx);
            if amount == 0 {
                continue;
            }
            ctx.state_agi = match modification.kind {
                ModificationKind::Addition => ctx.state_agi.saturating_add(amount),
                ModificationKind::Subtraction => ctx.state_agi.saturating_sub(amount),
            };
            computation.modifications.push(StateModificationLine {
                id: modification.id.clone(),
                kind: modification.kind,
                amount,
            });
        }
        computation.state_agi = ctx.state_agi;

        // Step 2
        let standard = config.deduction.standard.get(status);
        let (deduction_type, deduction) = match self.itemized_amount(input) {
            Some(itemized) if itemized > standard => (StateDeductionType::Itemized, itemized),
            _ if standard > 0 => (StateDeductionType::Standard, standard),
            _ => (StateDeductionType::None, 0),
        };
        computation.deduction_type = deduction_type;
        computation.state_deduction = deduction;

        // Step 3
        computation.exemptions = self.exemptions(input, &mut computation);
        computation.taxable_income = max0(
            ctx.state_agi
                .saturating_sub(deduction)
                .saturating_sub(computation.exemptions),
        );
        ctx.state_taxable_income = computation.taxable_income;

        // Step 4
        computation.income_tax = match &config.structure {
            TaxStructure::Flat { rate } => multiply_cents(computation.taxable_income, *rate),
            TaxStructure::Progressive { brackets } => {
                tax_from_brackets(computation.taxable_income, brackets.get_ref(status))
            }
            TaxStructure::Hybrid {
                brackets,
                rate,
                flat_above,
            } => {
                let bracket_tax =
                    tax_from_brackets(computation.taxable_income, brackets.get_ref(status));
                if computation.taxable_income > flat_above.get(status) {
                    bracket_tax.max(multiply_cents(computation.taxable_income, *rate))
                } else {
                    bracket_tax
                }
            }
        };
        ctx.state_income_tax = computation.income_tax;

        // Step 5
        for surtax in &config.surtaxes {
            let base = ctx.amount(surtax.base);
            let threshold = surtax.threshold.get(status);
            let amount = match surtax.method {
                SurtaxMethod::Percentage { rate } => surtax_on_excess(base, threshold, rate),
                SurtaxMethod::Fixed { amount } if base > threshold => amount,
                SurtaxMethod::Fixed { .. } => 0,
            };
            debug!(surtax = %surtax.id, amount, "state surtax evaluated");
            computation.surtax = computation.surtax.saturating_add(amount);
        }

        // Step 6
        for credit in &config.credits {
            let mut amount = credit_amount(credit, &ctx);
            if let Some(cap) = credit.cap
                && amount > cap
            {
                computation.diagnostics.warn(
                    codes::STATE_CREDIT_CAPPED,
                    Phase::State,
                    format!(
                        "{} credit '{}' limited to {}",
                        config.state_code,
                        credit.id,
                        format_cents_as_dollars(cap)
                    ),
                );
                amount = cap;
            }
            if amount > 0 {
                computation.credits.push(StateCreditLine {
                    id: credit.id.clone(),
                    refundable: credit.refundable,
                    amount,
                });
            }
        }

        // Step 7
        if let Some(local) = &config.local_tax {
            let rate = self.local_rate(local, input, &mut computation);
            if let Some(rate) = rate {
                computation.local_tax = multiply_cents(max0(ctx.amount(local.base)), rate);
            }
        }

        // Steps 8 and 9
        computation.finish(&config.state_code, config.tax_year, input)
    }
}
