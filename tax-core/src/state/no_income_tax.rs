//! States without a broad-based tax on wage income.

use super::{StateCalculator, StateInput};
use crate::results::StateResult;

/// Postal codes of states that levy no wage income tax.
pub const STATES: [&str; 9] = ["AK", "FL", "NH", "NV", "SD", "TN", "TX", "WA", "WY"];

#[derive(Debug, Clone, Copy)]
pub struct NoIncomeTaxCalculator {
    state_code: &'static str,
    tax_year: i32,
}

impl NoIncomeTaxCalculator {
    pub fn new(
        state_code: &'static str,
        tax_year: i32,
    ) -> Self {
        Self {
            state_code,
            tax_year,
        }
    }
}

impl StateCalculator for NoIncomeTaxCalculator {
    fn state_code(&self) -> &str {
        self.state_code
    }

    fn tax_year(&self) -> i32 {
        self.tax_year
    }

    fn calculate(
        &self,
        input: &StateInput<'_>,
    ) -> StateResult {
        let payments = &input.tax_return.payments;
        let mut result = StateResult::no_income_tax(
            self.state_code,
            input.tax_year(),
            input.federal.agi,
            payments.state_withholding,
            payments.state_estimated_payments,
        );
        result.rules_year = self.tax_year;
        result
    }
}
