//! Immutable per-year federal constants.
//!
//! Each supported year lives in its own module and is built once on first
//! use. Nothing here is mutated after construction, so calculations for
//! different years can run side by side.

mod y2024;
mod y2025;

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::brackets::{BracketError, validate_brackets};
use crate::calculations::self_employment::SeRatesError;
use crate::models::{FilingStatus, PerFilingStatus, TaxBracket};
use crate::money::Cents;

static TABLES_2024: LazyLock<FederalTables> = LazyLock::new(y2024::tables);
static TABLES_2025: LazyLock<FederalTables> = LazyLock::new(y2025::tables);

pub const SUPPORTED_YEARS: [i32; 2] = [2024, 2025];

/// Rates and limits for Schedule SE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentRates {
    /// Maximum earnings subject to social security tax.
    pub ss_wage_base: Cents,
    /// Combined employer and employee social security rate (12.4%).
    pub ss_rate: Decimal,
    /// Combined Medicare rate (2.9%).
    pub medicare_rate: Decimal,
    /// Share of net profit treated as net earnings (92.35%).
    pub net_earnings_factor: Decimal,
    /// Deductible share of SE tax (50%).
    pub deduction_factor: Decimal,
    /// No SE tax when net earnings are below this amount.
    pub min_net_earnings: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurtaxThreshold {
    pub rate: Decimal,
    pub threshold: PerFilingStatus<Cents>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainBreakpoints {
    /// Top of the 0% band, measured on total taxable income.
    pub zero_rate_max: PerFilingStatus<Cents>,
    /// Top of the 15% band.
    pub fifteen_rate_max: PerFilingStatus<Cents>,
    pub fifteen_rate: Decimal,
    pub twenty_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QbiParameters {
    pub rate: Decimal,
    pub threshold: PerFilingStatus<Cents>,
    pub phase_in_range: PerFilingStatus<Cents>,
    pub wage_rate: Decimal,
    pub alt_wage_rate: Decimal,
    pub ubia_rate: Decimal,
}

/// EITC schedule for one qualifying-child count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EitcSchedule {
    pub phase_in_rate: Decimal,
    /// Earned income at which the maximum credit is reached.
    pub earned_income_amount: Cents,
    pub max_credit: Cents,
    pub phase_out_rate: Decimal,
    /// Phase-out start; married filing jointly uses `phase_out_start_joint`.
    pub phase_out_start: Cents,
    pub phase_out_start_joint: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EitcParameters {
    /// Indexed by qualifying children: 0, 1, 2, 3 or more.
    pub schedules: [EitcSchedule; 4],
    pub investment_income_limit: Cents,
    pub childless_min_age: i32,
    pub childless_max_age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCreditParameters {
    pub per_child: Cents,
    pub per_other_dependent: Cents,
    pub refundable_max_per_child: Cents,
    pub earned_income_floor: Cents,
    pub refundable_rate: Decimal,
    pub phase_out_threshold: PerFilingStatus<Cents>,
    /// Credit falls by `phase_out_reduction` for each `phase_out_step` (or
    /// fraction) of MAGI above the threshold.
    pub phase_out_step: Cents,
    pub phase_out_reduction: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationParameters {
    pub aotc_full_rate_expenses: Cents,
    pub aotc_partial_rate_expenses: Cents,
    pub aotc_partial_rate: Decimal,
    pub aotc_refundable_rate: Decimal,
    pub llc_expense_cap: Cents,
    pub llc_rate: Decimal,
    pub phase_out_start: PerFilingStatus<Cents>,
    pub phase_out_end: PerFilingStatus<Cents>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemizedLimits {
    pub salt_cap: PerFilingStatus<Cents>,
    pub medical_floor_rate: Decimal,
    pub charitable_agi_limit: Decimal,
    pub casualty_per_event_floor: Cents,
    pub casualty_agi_floor_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmtParameters {
    pub exemption: PerFilingStatus<Cents>,
    pub phase_out_start: PerFilingStatus<Cents>,
    pub phase_out_rate: Decimal,
    /// AMTI above this amount is taxed at `high_rate`.
    pub rate_breakpoint: PerFilingStatus<Cents>,
    pub low_rate: Decimal,
    pub high_rate: Decimal,
}

/// Every federal constant the pipeline reads for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTables {
    pub tax_year: i32,
    pub brackets: PerFilingStatus<Vec<TaxBracket>>,
    pub standard_deduction: PerFilingStatus<Cents>,
    /// Added once per box checked (65 or older, blind) for taxpayer and spouse.
    pub additional_standard_deduction: PerFilingStatus<Cents>,
    pub dependent_standard_deduction_floor: Cents,
    pub dependent_earned_income_addon: Cents,
    pub capital_gains: CapitalGainBreakpoints,
    pub capital_loss_limit: PerFilingStatus<Cents>,
    pub self_employment: SelfEmploymentRates,
    pub additional_medicare: SurtaxThreshold,
    pub net_investment_income: SurtaxThreshold,
    pub qbi: QbiParameters,
    pub eitc: EitcParameters,
    pub child_tax_credit: ChildTaxCreditParameters,
    pub education: EducationParameters,
    pub itemized: ItemizedLimits,
    pub ftc_simplified_limit: PerFilingStatus<Cents>,
    pub amt: AmtParameters,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TablesError {
    #[error("{year} {status:?} brackets: {source}")]
    Brackets {
        year: i32,
        status: FilingStatus,
        #[source]
        source: BracketError,
    },

    #[error("{year} self-employment rates: {source}")]
    SelfEmployment {
        year: i32,
        #[source]
        source: SeRatesError,
    },
}

impl FederalTables {
    /// Structural checks on the bracket schedules and Schedule SE rates.
    pub fn validate(&self) -> Result<(), TablesError> {
        let year = self.tax_year;
        for (status, brackets) in self.brackets.iter() {
            validate_brackets(brackets).map_err(|source| TablesError::Brackets {
                year,
                status,
                source,
            })?;
        }
        self.self_employment
            .validate()
            .map_err(|source| TablesError::SelfEmployment { year, source })
    }
}

/// Tables chosen for a requested year.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTables {
    pub tables: &'static FederalTables,
    pub requested_year: i32,
}

impl ResolvedTables {
    /// The requested year had no tables of its own.
    pub fn substituted(&self) -> bool {
        self.tables.tax_year != self.requested_year
    }
}

/// Tables for exactly `year`, if supported.
pub fn federal_tables(year: i32) -> Option<&'static FederalTables> {
    match year {
        2024 => Some(&*TABLES_2024),
        2025 => Some(&*TABLES_2025),
        _ => None,
    }
}

/// Tables for `year`, or for the nearest supported year when `year` has
/// none: the latest earlier year, else the earliest available.
pub fn resolve_federal_tables(year: i32) -> ResolvedTables {
    let chosen = SUPPORTED_YEARS
        .iter()
        .rev()
        .copied()
        .find(|y| *y <= year)
        .unwrap_or(SUPPORTED_YEARS[0]);
    let tables = federal_tables(chosen).unwrap_or(&*TABLES_2025);
    ResolvedTables {
        tables,
        requested_year: year,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::money::dollars;

    #[test]
    fn every_supported_year_is_valid() {
        for year in SUPPORTED_YEARS {
            assert_eq!(federal_tables(year).unwrap().validate(), Ok(()), "{year}");
        }
    }

    #[test]
    fn validate_reports_bad_self_employment_rates() {
        let mut tables = federal_tables(2025).unwrap().clone();
        tables.self_employment.ss_rate = dec!(1.24);

        assert_eq!(
            tables.validate(),
            Err(TablesError::SelfEmployment {
                year: 2025,
                source: SeRatesError::SocialSecurityRate(dec!(1.24)),
            })
        );
    }

    #[test]
    fn validate_reports_bad_brackets_with_status() {
        let mut tables = federal_tables(2024).unwrap().clone();
        tables.brackets.head_of_household.clear();

        assert_eq!(
            tables.validate(),
            Err(TablesError::Brackets {
                year: 2024,
                status: FilingStatus::HeadOfHousehold,
                source: BracketError::Empty,
            })
        );
    }

    #[test]
    fn standard_deduction_2025_single_is_15000() {
        let tables = federal_tables(2025).unwrap();

        assert_eq!(tables.standard_deduction.get(FilingStatus::Single), dollars(15_000));
    }

    #[test]
    fn resolve_exact_year() {
        let resolved = resolve_federal_tables(2024);

        assert_eq!(resolved.tables.tax_year, 2024);
        assert!(!resolved.substituted());
    }

    #[test]
    fn resolve_later_year_uses_latest_tables() {
        let resolved = resolve_federal_tables(2031);

        assert_eq!(resolved.tables.tax_year, 2025);
        assert!(resolved.substituted());
    }

    #[test]
    fn resolve_earlier_year_uses_earliest_tables() {
        let resolved = resolve_federal_tables(2019);

        assert_eq!(resolved.tables.tax_year, 2024);
    }
}
