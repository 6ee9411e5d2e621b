//! State income tax layer.
//!
//! Every state is a [`StateCalculator`]. Hand-written calculators cover
//! states with rules that do not fit a table; everything else runs through
//! [`GenericStateCalculator`] driven by a validated [`StateTaxConfig`].
//! A [`StateRegistry`] maps `(state code, tax year)` to a calculator.

pub mod config;
pub mod generic;
pub mod georgia;
pub mod maryland;
pub mod michigan;
pub mod no_income_tax;
pub mod rules;

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::{debug, info};

pub use config::{StateConfigError, StateTaxConfig};
pub use generic::GenericStateCalculator;

use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{FilingStatus, TaxReturn};
use crate::money::{Cents, add_cents, max0};
use crate::results::{
    FederalResult, PaymentBreakdown, StateCreditLine, StateDeductionType, StateModificationLine,
    StateResult,
};
use crate::tables::SUPPORTED_YEARS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateLayerError {
    #[error("unknown state '{requested}'; available: {available:?}")]
    UnknownState {
        requested: String,
        available: Vec<String>,
    },

    #[error("return has no state of residence")]
    NoResidence,
}

/// Everything a state calculation reads: the return and its finished
/// federal result.
#[derive(Debug, Clone, Copy)]
pub struct StateInput<'a> {
    pub tax_return: &'a TaxReturn,
    pub federal: &'a FederalResult,
}

impl StateInput<'_> {
    pub fn status(&self) -> FilingStatus {
        self.tax_return.filing_status()
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_return.tax_year
    }

    /// Filers plus dependents.
    pub fn exemption_count(&self) -> i64 {
        let profile = &self.tax_return.profile;
        i64::from(profile.filer_count()) + profile.dependents.len() as i64
    }

    /// Federal Schedule A total less the state and local income tax it
    /// included; the usual starting point for a state itemized deduction.
    pub fn itemized_less_income_tax(&self) -> Cents {
        let schedule_a = &self.federal.worksheets.itemized_deductions;
        let income_tax = schedule_a
            .salt_deducted
            .min(max0(self.tax_return.itemized.state_and_local_income_tax));
        max0(schedule_a.total - income_tax)
    }
}

/// One implementation per state (or per group of states sharing rules).
pub trait StateCalculator: Send + Sync {
    /// Two-letter postal code.
    fn state_code(&self) -> &str;

    /// Tax year these rules were written for.
    fn tax_year(&self) -> i32;

    fn calculate(
        &self,
        input: &StateInput<'_>,
    ) -> StateResult;
}

/// Intermediate state figures, turned into a [`StateResult`] by
/// [`StateComputation::finish`].
#[derive(Debug, Clone)]
pub struct StateComputation {
    pub modifications: Vec<StateModificationLine>,
    pub state_agi: Cents,
    pub deduction_type: StateDeductionType,
    pub state_deduction: Cents,
    pub exemptions: Cents,
    pub taxable_income: Cents,
    pub income_tax: Cents,
    pub surtax: Cents,
    pub credits: Vec<StateCreditLine>,
    pub local_tax: Cents,
    pub diagnostics: Diagnostics,
}

impl StateComputation {
    pub fn new(state_agi: Cents) -> Self {
        Self {
            modifications: Vec::new(),
            state_agi,
            deduction_type: StateDeductionType::None,
            state_deduction: 0,
            exemptions: 0,
            taxable_income: 0,
            income_tax: 0,
            surtax: 0,
            credits: Vec::new(),
            local_tax: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Nonrefundable credits reduce income tax plus surtax to no less than
    /// zero; refundable credits count as payments.
    pub fn finish(
        self,
        state_code: &str,
        rules_year: i32,
        input: &StateInput<'_>,
    ) -> StateResult {
        let nonrefundable_total: Cents = add_cents(
            &self
                .credits
                .iter()
                .filter(|c| !c.refundable)
                .map(|c| c.amount)
                .collect::<Vec<_>>(),
        );
        let refundable_credits: Cents = add_cents(
            &self
                .credits
                .iter()
                .filter(|c| c.refundable)
                .map(|c| c.amount)
                .collect::<Vec<_>>(),
        );
        let tax_before_credits = self.income_tax.saturating_add(self.surtax);
        let nonrefundable_credits = nonrefundable_total.min(tax_before_credits);
        let state_tax = max0(tax_before_credits.saturating_sub(nonrefundable_credits));
        let total_tax = state_tax.saturating_add(self.local_tax);

        let payments = &input.tax_return.payments;
        let payments = PaymentBreakdown::new(
            payments.state_withholding,
            payments.state_estimated_payments,
            refundable_credits,
        );

        StateResult {
            state_code: state_code.to_string(),
            tax_year: input.tax_year(),
            rules_year,
            federal_agi: input.federal.agi,
            modifications: self.modifications,
            state_agi: self.state_agi,
            deduction_type: self.deduction_type,
            state_deduction: self.state_deduction,
            exemptions: self.exemptions,
            taxable_income: self.taxable_income,
            income_tax: self.income_tax,
            surtax: self.surtax,
            credits: self.credits,
            nonrefundable_credits,
            refundable_credits,
            state_tax,
            local_tax: self.local_tax,
            total_tax,
            total_payments: payments.total,
            refund_or_owe: payments.total.saturating_sub(total_tax),
            payments,
            diagnostics: self.diagnostics,
        }
    }
}

/// Registry of [`StateCalculator`]s keyed by state code, then tax year.
///
/// Typical lifetime:
/// 1. Create with [`StateRegistry::with_builtin_states`] (or `new` for an
///    empty one).
/// 2. Add validated documents with [`StateRegistry::register_config`].
/// 3. Call [`StateRegistry::calculate`] once per return.
pub struct StateRegistry {
    calculators: HashMap<String, BTreeMap<i32, Box<dyn StateCalculator>>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self {
            calculators: HashMap::new(),
        }
    }

    /// Every hand-written calculator, registered for each supported year.
    pub fn with_builtin_states() -> Self {
        let mut registry = Self::new();
        for year in SUPPORTED_YEARS {
            for code in no_income_tax::STATES {
                registry.register(Box::new(no_income_tax::NoIncomeTaxCalculator::new(code, year)));
            }
            registry.register(Box::new(michigan::MichiganCalculator::new(year)));
            registry.register(Box::new(maryland::MarylandCalculator::new(year)));
            registry.register(Box::new(georgia::GeorgiaCalculator::new(year)));
        }
        registry
    }

    /// Registers a calculator for its state and year, replacing any
    /// calculator already registered for that pair.
    pub fn register(
        &mut self,
        calculator: Box<dyn StateCalculator>,
    ) {
        let code = calculator.state_code().to_ascii_uppercase();
        let year = calculator.tax_year();
        self.calculators
            .entry(code)
            .or_default()
            .insert(year, calculator);
    }

    /// Validates `config` and registers a generic calculator for it.
    pub fn register_config(
        &mut self,
        config: StateTaxConfig,
    ) -> Result<(), StateConfigError> {
        let calculator = GenericStateCalculator::new(config)?;
        self.register(Box::new(calculator));
        Ok(())
    }

    /// Registered state codes, sorted.
    pub fn available_states(&self) -> Vec<String> {
        let mut codes: Vec<_> = self.calculators.keys().cloned().collect();
        codes.sort_unstable();
        codes
    }

    /// Calculator for `state_code` in `tax_year`: the exact year if present,
    /// else the latest earlier year, else the earliest year registered.
    pub fn resolve(
        &self,
        state_code: &str,
        tax_year: i32,
    ) -> Result<&dyn StateCalculator, StateLayerError> {
        let unknown = || StateLayerError::UnknownState {
            requested: state_code.to_string(),
            available: self.available_states(),
        };
        let by_year = self
            .calculators
            .get(&state_code.trim().to_ascii_uppercase())
            .ok_or_else(unknown)?;
        by_year
            .range(..=tax_year)
            .next_back()
            .or_else(|| by_year.iter().next())
            .map(|(_, calculator)| calculator.as_ref())
            .ok_or_else(unknown)
    }

    /// Runs the state calculation for `state_code`.
    ///
    /// # Errors
    /// [`StateLayerError::UnknownState`] when no calculator is registered
    /// for the code. A missing year is not an error: the nearest year's rules
    /// are used and a warning is attached.
    pub fn calculate(
        &self,
        state_code: &str,
        input: &StateInput<'_>,
    ) -> Result<StateResult, StateLayerError> {
        let calculator = self.resolve(state_code, input.tax_year())?;
        debug!(
            state = calculator.state_code(),
            rules_year = calculator.tax_year(),
            "state calculator resolved"
        );
        let mut result = calculator.calculate(input);
        if calculator.tax_year() != input.tax_year() {
            result.diagnostics.warn(
                codes::STATE_YEAR_FALLBACK,
                Phase::State,
                format!(
                    "no {} rules for {}; using {} rules",
                    calculator.state_code(),
                    input.tax_year(),
                    calculator.tax_year()
                ),
            );
        }
        info!(
            state = %result.state_code,
            total_tax = result.total_tax,
            refund_or_owe = result.refund_or_owe,
            "state return calculated"
        );
        Ok(result)
    }

    /// Runs the calculation for the state of residence on the return.
    pub fn calculate_residence(
        &self,
        input: &StateInput<'_>,
    ) -> Result<StateResult, StateLayerError> {
        let state = input
            .tax_return
            .profile
            .location
            .state
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(StateLayerError::NoResidence)?;
        self.calculate(state, input)
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
