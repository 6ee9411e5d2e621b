//! Michigan: flat rate on AGI less a fixed amount per exemption, plus the
//! City of Detroit resident income tax.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{StateCalculator, StateComputation, StateInput};
use crate::money::{Cents, dollars, max0, multiply_cents};
use crate::results::StateResult;

const RATE: Decimal = dec!(0.0425);
const EXEMPTION: Cents = dollars(5_000);

const DETROIT_RATE: Decimal = dec!(0.024);
const DETROIT_EXEMPTION: Cents = dollars(600);

#[derive(Debug, Clone, Copy)]
pub struct MichiganCalculator {
    tax_year: i32,
}

impl MichiganCalculator {
    pub fn new(tax_year: i32) -> Self {
        Self { tax_year }
    }
}

fn lives_in_detroit(input: &StateInput<'_>) -> bool {
    input
        .tax_return
        .profile
        .location
        .city
        .as_deref()
        .is_some_and(|city| city.trim().eq_ignore_ascii_case("detroit"))
}

impl StateCalculator for MichiganCalculator {
    fn state_code(&self) -> &str {
        "MI"
    }

    fn tax_year(&self) -> i32 {
        self.tax_year
    }

    fn calculate(
        &self,
        input: &StateInput<'_>,
    ) -> StateResult {
        let agi = input.federal.agi;
        let exemptions = input.exemption_count();
        let mut computation = StateComputation::new(agi);

        computation.exemptions = EXEMPTION.saturating_mul(exemptions);
        computation.taxable_income = max0(agi.saturating_sub(computation.exemptions));
        computation.income_tax = multiply_cents(computation.taxable_income, RATE);

        if lives_in_detroit(input) {
            let city_exemptions = DETROIT_EXEMPTION.saturating_mul(exemptions);
            let city_taxable = max0(agi.saturating_sub(city_exemptions));
            computation.local_tax = multiply_cents(city_taxable, DETROIT_RATE);
            debug!(city_taxable, local_tax = computation.local_tax, "Detroit city tax");
        }

        computation.finish("MI", self.tax_year, input)
    }
}
