//! Schedule SE self-employment tax.
//!
//! Business profit and SE partnership earnings are combined (line 2) and
//! scaled by the net earnings share (line 3). The Medicare part taxes all of
//! line 3. The social security part taxes only what is left of the wage base
//! after W-2 wages (lines 5 to 9). Half of the total (line 10) comes back as
//! an above-the-line adjustment (line 11). Net earnings under the filing
//! minimum owe nothing.
//!
//! # Example
//!
//! ```
//! use tax_core::calculations::self_employment::SeWorksheet;
//! use tax_core::tables::federal_tables;
//!
//! let tables = federal_tables(2025).unwrap();
//! let result = SeWorksheet::new(&tables.self_employment).calculate(
//!     10_000_000, // $100,000 net profit
//!     5_000_000,  // $50,000 W-2 wages
//! );
//!
//! assert_eq!(result.self_employment_tax, 1_412_955);
//! assert_eq!(result.se_tax_deduction, 706_478);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::money::{Cents, max0, multiply_cents};
use crate::tables::SelfEmploymentRates;

/// A Schedule SE rate or limit outside the range a real year could have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeRatesError {
    #[error("net earnings share {0} is outside (0, 1]")]
    NetEarningsShare(Decimal),

    #[error("social security rate {0} is outside [0, 1]")]
    SocialSecurityRate(Decimal),

    #[error("Medicare rate {0} is outside [0, 1]")]
    MedicareRate(Decimal),

    #[error("deductible share of SE tax {0} is outside [0, 1]")]
    DeductibleShare(Decimal),

    #[error("social security wage base of {0} cents is not positive")]
    WageBase(Cents),

    #[error("filing minimum of {0} cents is negative")]
    FilingMinimum(Cents),
}

impl SelfEmploymentRates {
    /// Rejects the first rate or limit outside its range. Run on every
    /// federal calculation through [`FederalTables::validate`].
    ///
    /// [`FederalTables::validate`]: crate::tables::FederalTables::validate
    pub fn validate(&self) -> Result<(), SeRatesError> {
        let unit = Decimal::ZERO..=Decimal::ONE;
        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(SeRatesError::NetEarningsShare(self.net_earnings_factor));
        }
        if !unit.contains(&self.ss_rate) {
            return Err(SeRatesError::SocialSecurityRate(self.ss_rate));
        }
        if !unit.contains(&self.medicare_rate) {
            return Err(SeRatesError::MedicareRate(self.medicare_rate));
        }
        if !unit.contains(&self.deduction_factor) {
            return Err(SeRatesError::DeductibleShare(self.deduction_factor));
        }
        if self.ss_wage_base <= 0 {
            return Err(SeRatesError::WageBase(self.ss_wage_base));
        }
        if self.min_net_earnings < 0 {
            return Err(SeRatesError::FilingMinimum(self.min_net_earnings));
        }
        Ok(())
    }
}

/// Every line of Schedule SE, in cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeWorksheetResult {
    /// Line 2, before the net earnings factor. May be negative.
    pub combined_se_income: Cents,
    /// Line 3.
    pub net_earnings: Cents,
    /// Line 4.
    pub medicare_tax: Cents,
    /// Line 8.
    pub ss_taxable_earnings: Cents,
    /// Line 9.
    pub social_security_tax: Cents,
    /// Line 10.
    pub self_employment_tax: Cents,
    /// Line 11, an above-the-line adjustment.
    pub se_tax_deduction: Cents,
    /// Net earnings were under the filing minimum, so no tax is due.
    pub below_threshold: bool,
}

impl SeWorksheetResult {
    fn below_threshold(
        combined_se_income: Cents,
        net_earnings: Cents,
    ) -> Self {
        Self {
            combined_se_income,
            net_earnings: max0(net_earnings),
            below_threshold: true,
            ..Default::default()
        }
    }
}

/// Schedule SE calculator for one year's rates.
#[derive(Debug, Clone, Copy)]
pub struct SeWorksheet<'a> {
    rates: &'a SelfEmploymentRates,
}

impl<'a> SeWorksheet<'a> {
    pub fn new(rates: &'a SelfEmploymentRates) -> Self {
        Self { rates }
    }

    /// Runs lines 2 through 11.
    ///
    /// `se_income` is combined net profit subject to SE tax; `ss_wages` is
    /// W-2 wages already taxed for social security, which reduce the wage
    /// base left for Line 8.
    pub fn calculate(
        &self,
        se_income: Cents,
        ss_wages: Cents,
    ) -> SeWorksheetResult {
        if se_income < 0 {
            warn!(se_income, "self-employment income is a loss; no SE tax due");
        }

        // Line 3
        let net_earnings = self.net_earnings(se_income);
        if net_earnings < self.rates.min_net_earnings {
            debug!(
                net_earnings,
                minimum = self.rates.min_net_earnings,
                "net SE earnings below filing minimum"
            );
            return SeWorksheetResult::below_threshold(se_income, net_earnings);
        }

        // Line 4
        let medicare_tax = multiply_cents(net_earnings, self.rates.medicare_rate);

        // Lines 5-8
        let remaining_base = self.remaining_wage_base(ss_wages);
        let ss_taxable_earnings = net_earnings.min(remaining_base);

        // Line 9
        let social_security_tax = multiply_cents(ss_taxable_earnings, self.rates.ss_rate);

        // Line 10
        let self_employment_tax = medicare_tax.saturating_add(social_security_tax);

        // Line 11
        let se_tax_deduction = multiply_cents(self_employment_tax, self.rates.deduction_factor);

        debug!(
            net_earnings,
            ss_taxable_earnings, self_employment_tax, se_tax_deduction, "Schedule SE computed"
        );

        SeWorksheetResult {
            combined_se_income: se_income,
            net_earnings,
            medicare_tax,
            ss_taxable_earnings,
            social_security_tax,
            self_employment_tax,
            se_tax_deduction,
            below_threshold: false,
        }
    }

    fn net_earnings(
        &self,
        se_income: Cents,
    ) -> Cents {
        if se_income <= 0 {
            return 0;
        }
        multiply_cents(se_income, self.rates.net_earnings_factor)
    }

    fn remaining_wage_base(
        &self,
        ss_wages: Cents,
    ) -> Cents {
        let remaining = self.rates.ss_wage_base - max0(ss_wages);
        if remaining <= 0 {
            debug!(
                ss_wages,
                wage_base = self.rates.ss_wage_base,
                "wages exhaust the social security wage base"
            );
        }
        max0(remaining)
    }
}
