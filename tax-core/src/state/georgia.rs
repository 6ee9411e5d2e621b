//! Georgia: flat rate after an age-tiered retirement income exclusion that
//! is capped separately for each spouse.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{StateCalculator, StateComputation, StateInput};
use crate::calculations::DeductionType;
use crate::models::{FilingStatus, Person};
use crate::money::{Cents, dollars, max0, multiply_cents};
use crate::results::{ModificationKind, StateDeductionType, StateModificationLine, StateResult};

const DEPENDENT_EXEMPTION: Cents = dollars(4_000);

fn flat_rate(tax_year: i32) -> Decimal {
    if tax_year <= 2024 { dec!(0.0539) } else { dec!(0.0519) }
}

fn standard_deduction(status: FilingStatus) -> Cents {
    match status {
        FilingStatus::MarriedJointly => dollars(24_000),
        _ => dollars(12_000),
    }
}

/// Exclusion ceiling for a filer's age at year end.
fn retirement_exclusion_cap(age: Option<i32>) -> Cents {
    match age {
        Some(65..) => dollars(65_000),
        Some(62..=64) => dollars(35_000),
        _ => 0,
    }
}

/// The filer's own retirement income, up to the cap for their age.
fn retirement_exclusion(
    person: &Person,
    retirement_income: Cents,
    tax_year: i32,
) -> Cents {
    max0(retirement_income).min(retirement_exclusion_cap(person.age(tax_year)))
}

#[derive(Debug, Clone, Copy)]
pub struct GeorgiaCalculator {
    tax_year: i32,
}

impl GeorgiaCalculator {
    pub fn new(tax_year: i32) -> Self {
        Self { tax_year }
    }
}

impl StateCalculator for GeorgiaCalculator {
    fn state_code(&self) -> &str {
        "GA"
    }

    fn tax_year(&self) -> i32 {
        self.tax_year
    }

    fn calculate(
        &self,
        input: &StateInput<'_>,
    ) -> StateResult {
        let year = input.tax_year();
        let tax_return = input.tax_return;
        let profile = &tax_return.profile;
        let retirement = &tax_return.income.retirement;
        let mut computation = StateComputation::new(input.federal.agi);

        let exclusions = [
            ("retirement_exclusion_primary", Some((&profile.primary, retirement.primary))),
            (
                "retirement_exclusion_spouse",
                profile.joint_spouse().map(|s| (s, retirement.spouse)),
            ),
        ];
        for (id, filer) in exclusions {
            let Some((person, income)) = filer else {
                continue;
            };
            let amount = retirement_exclusion(person, income, year);
            if amount > 0 {
                debug!(id, amount, "GA retirement exclusion");
                computation.state_agi = computation.state_agi.saturating_sub(amount);
                computation.modifications.push(StateModificationLine {
                    id: id.to_string(),
                    kind: ModificationKind::Subtraction,
                    amount,
                });
            }
        }

        let standard = standard_deduction(input.status());
        let itemized = if input.federal.deduction.deduction_type == DeductionType::Itemized {
            input.itemized_less_income_tax()
        } else {
            0
        };
        (computation.deduction_type, computation.state_deduction) = if itemized > standard {
            (StateDeductionType::Itemized, itemized)
        } else {
            (StateDeductionType::Standard, standard)
        };

        computation.exemptions =
            DEPENDENT_EXEMPTION.saturating_mul(profile.dependents.len() as i64);
        computation.taxable_income = max0(
            computation
                .state_agi
                .saturating_sub(computation.state_deduction)
                .saturating_sub(computation.exemptions),
        );
        computation.income_tax =
            multiply_cents(computation.taxable_income, flat_rate(self.tax_year));

        computation.finish("GA", self.tax_year, input)
    }
}
