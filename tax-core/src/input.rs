//! The user-facing input shape and its conversion to [`TaxReturn`].
//!
//! Every money leaf of a [`RawTaxReturn`] may be a dollar string
//! (`"$1,234.56"`) or a number. [`TaxReturn::from_raw`] converts each one
//! with [`safe_currency_to_cents`] and resolves the legacy dependent fields,
//! so no calculation module ever sees a dollar value or a fallback chain.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AdjustmentsProfile, CasualtyEvent, Dependent, DependentKind, EducationExpense, FilingOptions,
    FilingStatus, ForeignIncomeCategory, ForeignIncomeSource, ForeignTaxCarryover, IncomeProfile,
    ItemizedProfile, K1Income, Location, NolCarryforward, NolSource, Payments, Person, QbiBusiness,
    QbiProfile, RetirementIncome, SstbCategory, TaxReturn, TaxpayerProfile,
};
use crate::money::{Cents, safe_currency_to_cents};
use crate::tables::SUPPORTED_YEARS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown filing status '{0}'")]
    FilingStatus(String),
}

/// A dollar amount as typed: a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    pub fn to_cents(&self) -> Cents {
        match self {
            Self::Number(n) => safe_currency_to_cents(*n),
            Self::Text(text) => safe_currency_to_cents(text.as_str()),
        }
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A money leaf; absence means zero.
pub type Amount = Option<RawAmount>;

fn cents(amount: &Amount) -> Cents {
    amount.as_ref().map_or(0, RawAmount::to_cents)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawK1Income {
    pub ordinary_business_income: Amount,
    pub guaranteed_payments: Amount,
    pub net_rental_income: Amount,
    pub interest: Amount,
    pub dividends: Amount,
    pub general_partner: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRetirementIncome {
    pub primary: Amount,
    pub spouse: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIncome {
    pub wages: Amount,
    pub taxable_interest: Amount,
    pub ordinary_dividends: Amount,
    pub qualified_dividends: Amount,
    pub short_term_capital_gain: Amount,
    pub long_term_capital_gain: Amount,
    pub business_income: Amount,
    pub k1: RawK1Income,
    pub retirement: RawRetirementIncome,
    pub unemployment_compensation: Amount,
    pub other_income: BTreeMap<String, RawAmount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAdjustments {
    pub hsa_deduction: Amount,
    pub ira_deduction: Amount,
    pub student_loan_interest: Amount,
    pub educator_expenses: Amount,
    pub self_employed_health_insurance: Amount,
    pub other_adjustments: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItemized {
    pub state_and_local_income_tax: Amount,
    pub real_estate_tax: Amount,
    pub personal_property_tax: Amount,
    pub mortgage_interest: Amount,
    pub charitable_contributions: Amount,
    pub medical_expenses: Amount,
    pub other_itemized: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPayments {
    pub federal_withholding: Amount,
    pub estimated_payments: Amount,
    pub state_withholding: Amount,
    pub state_estimated_payments: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQbiBusiness {
    #[serde(default)]
    pub name: String,
    pub qualified_business_income: Amount,
    pub w2_wages: Amount,
    pub ubia: Amount,
    pub sstb: Option<SstbCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawQbi {
    pub businesses: Vec<RawQbiBusiness>,
    pub reit_dividends: Amount,
    pub ptp_income: Amount,
    pub prior_year_loss_carryforward: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForeignIncome {
    #[serde(default)]
    pub country: String,
    pub category: ForeignIncomeCategory,
    pub gross_income: Amount,
    pub foreign_tax_paid: Amount,
    pub allocable_expenses: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForeignTaxCarryover {
    pub category: ForeignIncomeCategory,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNolCarryforward {
    pub origin_year: i32,
    pub original_amount: Amount,
    /// Defaults to the original amount.
    pub remaining_amount: Amount,
    pub source: NolSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCasualtyEvent {
    #[serde(default)]
    pub description: String,
    pub fair_value_before: Amount,
    pub fair_value_after: Amount,
    pub adjusted_basis: Amount,
    pub reimbursement: Amount,
    pub federal_disaster_declaration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEducationExpense {
    #[serde(default)]
    pub student: String,
    pub qualified_expenses: Amount,
    #[serde(default)]
    pub at_least_half_time: bool,
    #[serde(default)]
    pub completed_first_four_years: bool,
    #[serde(default)]
    pub prior_aotc_years: u8,
    #[serde(default)]
    pub felony_drug_conviction: bool,
}

fn default_months() -> u8 {
    12
}

fn default_true() -> bool {
    true
}

fn default_kind() -> DependentKind {
    DependentKind::QualifyingChild
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDependent {
    #[serde(default = "default_kind")]
    pub kind: DependentKind,
    pub birth_date: Option<NaiveDate>,
    #[serde(default = "default_months")]
    pub months_lived_with_taxpayer: u8,
    #[serde(default)]
    pub is_full_time_student: bool,
    #[serde(default)]
    pub is_permanently_disabled: bool,
    #[serde(default = "default_true")]
    pub has_ssn: bool,
}

impl From<&RawDependent> for Dependent {
    fn from(raw: &RawDependent) -> Self {
        Self {
            kind: raw.kind,
            birth_date: raw.birth_date,
            months_lived_with_taxpayer: raw.months_lived_with_taxpayer.min(12),
            is_full_time_student: raw.is_full_time_student,
            is_permanently_disabled: raw.is_permanently_disabled,
            has_ssn: raw.has_ssn,
        }
    }
}

/// Dependents as either a bare count or a structured list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDependents {
    Count(u32),
    List(Vec<RawDependent>),
}

impl Default for RawDependents {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// A return as entered at the user-facing edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTaxReturn {
    pub tax_year: i32,
    /// `S`, `MFJ`, `MFS`, `HOH` or the camelCase status name.
    pub filing_status: String,
    pub primary: Person,
    pub spouse: Option<Person>,
    pub dependents: RawDependents,
    /// Older inputs carried only the number of CTC-qualifying children.
    pub legacy_child_tax_credit_children: u32,
    pub location: Location,
    pub income: RawIncome,
    pub adjustments: RawAdjustments,
    pub itemized: RawItemized,
    pub qbi: RawQbi,
    pub foreign_income: Vec<RawForeignIncome>,
    pub foreign_tax_carryovers: Vec<RawForeignTaxCarryover>,
    pub nol_carryforwards: Vec<RawNolCarryforward>,
    pub casualty_events: Vec<RawCasualtyEvent>,
    pub education: Vec<RawEducationExpense>,
    pub payments: RawPayments,
    pub options: FilingOptions,
}

impl Default for RawTaxReturn {
    fn default() -> Self {
        Self {
            tax_year: SUPPORTED_YEARS[SUPPORTED_YEARS.len() - 1],
            filing_status: FilingStatus::Single.as_str().to_string(),
            primary: Person::default(),
            spouse: None,
            dependents: RawDependents::default(),
            legacy_child_tax_credit_children: 0,
            location: Location::default(),
            income: RawIncome::default(),
            adjustments: RawAdjustments::default(),
            itemized: RawItemized::default(),
            qbi: RawQbi::default(),
            foreign_income: Vec::new(),
            foreign_tax_carryovers: Vec::new(),
            nol_carryforwards: Vec::new(),
            casualty_events: Vec::new(),
            education: Vec::new(),
            payments: RawPayments::default(),
            options: FilingOptions::default(),
        }
    }
}

impl RawTaxReturn {
    /// One canonical dependent list: the structured list when present,
    /// else the legacy count, else the legacy CTC child count. Legacy
    /// entries are qualifying children of unknown age.
    pub fn resolve_dependents(&self) -> Vec<Dependent> {
        let legacy_count = match &self.dependents {
            RawDependents::List(list) if !list.is_empty() => {
                return list.iter().map(Dependent::from).collect();
            }
            RawDependents::List(_) => 0,
            RawDependents::Count(count) => *count,
        };
        let count = if legacy_count > 0 {
            legacy_count
        } else {
            self.legacy_child_tax_credit_children
        };
        if count > 0 {
            debug!(count, "dependents resolved from a legacy count");
        }
        vec![Dependent::child_of_unknown_age(); count as usize]
    }

    fn income(&self) -> IncomeProfile {
        let raw = &self.income;
        IncomeProfile {
            wages: cents(&raw.wages),
            taxable_interest: cents(&raw.taxable_interest),
            ordinary_dividends: cents(&raw.ordinary_dividends),
            qualified_dividends: cents(&raw.qualified_dividends),
            short_term_capital_gain: cents(&raw.short_term_capital_gain),
            long_term_capital_gain: cents(&raw.long_term_capital_gain),
            business_income: cents(&raw.business_income),
            k1: K1Income {
                ordinary_business_income: cents(&raw.k1.ordinary_business_income),
                guaranteed_payments: cents(&raw.k1.guaranteed_payments),
                net_rental_income: cents(&raw.k1.net_rental_income),
                interest: cents(&raw.k1.interest),
                dividends: cents(&raw.k1.dividends),
                general_partner: raw.k1.general_partner,
            },
            retirement: RetirementIncome {
                primary: cents(&raw.retirement.primary),
                spouse: cents(&raw.retirement.spouse),
            },
            unemployment_compensation: cents(&raw.unemployment_compensation),
            other_income: raw
                .other_income
                .iter()
                .map(|(name, amount)| (name.clone(), amount.to_cents()))
                .collect(),
        }
    }

    fn adjustments(&self) -> AdjustmentsProfile {
        let raw = &self.adjustments;
        AdjustmentsProfile {
            hsa_deduction: cents(&raw.hsa_deduction),
            ira_deduction: cents(&raw.ira_deduction),
            student_loan_interest: cents(&raw.student_loan_interest),
            educator_expenses: cents(&raw.educator_expenses),
            self_employed_health_insurance: cents(&raw.self_employed_health_insurance),
            other_adjustments: cents(&raw.other_adjustments),
        }
    }

    fn itemized(&self) -> ItemizedProfile {
        let raw = &self.itemized;
        ItemizedProfile {
            state_and_local_income_tax: cents(&raw.state_and_local_income_tax),
            real_estate_tax: cents(&raw.real_estate_tax),
            personal_property_tax: cents(&raw.personal_property_tax),
            mortgage_interest: cents(&raw.mortgage_interest),
            charitable_contributions: cents(&raw.charitable_contributions),
            medical_expenses: cents(&raw.medical_expenses),
            other_itemized: cents(&raw.other_itemized),
        }
    }

    fn qbi(&self) -> QbiProfile {
        let raw = &self.qbi;
        QbiProfile {
            businesses: raw
                .businesses
                .iter()
                .map(|b| QbiBusiness {
                    name: b.name.clone(),
                    qualified_business_income: cents(&b.qualified_business_income),
                    w2_wages: cents(&b.w2_wages),
                    ubia: cents(&b.ubia),
                    sstb: b.sstb,
                })
                .collect(),
            reit_dividends: cents(&raw.reit_dividends),
            ptp_income: cents(&raw.ptp_income),
            prior_year_loss_carryforward: cents(&raw.prior_year_loss_carryforward),
        }
    }

    fn payments(&self) -> Payments {
        let raw = &self.payments;
        Payments {
            federal_withholding: cents(&raw.federal_withholding),
            estimated_payments: cents(&raw.estimated_payments),
            state_withholding: cents(&raw.state_withholding),
            state_estimated_payments: cents(&raw.state_estimated_payments),
        }
    }
}

impl TaxReturn {
    /// Converts an entered return to cents.
    ///
    /// # Errors
    /// [`InputError::FilingStatus`] when the filing status is not recognized.
    /// Malformed amounts are not errors; they read as zero.
    pub fn from_raw(raw: &RawTaxReturn) -> Result<Self, InputError> {
        let filing_status = FilingStatus::parse(raw.filing_status.trim())
            .ok_or_else(|| InputError::FilingStatus(raw.filing_status.clone()))?;

        let profile = TaxpayerProfile {
            filing_status,
            primary: raw.primary.clone(),
            spouse: raw.spouse.clone(),
            dependents: raw.resolve_dependents(),
            location: raw.location.clone(),
        };

        Ok(Self {
            tax_year: raw.tax_year,
            profile,
            income: raw.income(),
            adjustments: raw.adjustments(),
            itemized: raw.itemized(),
            qbi: raw.qbi(),
            foreign_income: raw
                .foreign_income
                .iter()
                .map(|f| ForeignIncomeSource {
                    country: f.country.clone(),
                    category: f.category,
                    gross_income: cents(&f.gross_income),
                    foreign_tax_paid: cents(&f.foreign_tax_paid),
                    allocable_expenses: cents(&f.allocable_expenses),
                })
                .collect(),
            foreign_tax_carryovers: raw
                .foreign_tax_carryovers
                .iter()
                .map(|c| ForeignTaxCarryover {
                    category: c.category,
                    amount: cents(&c.amount),
                })
                .collect(),
            nol_carryforwards: raw
                .nol_carryforwards
                .iter()
                .map(|n| {
                    let original_amount = cents(&n.original_amount);
                    NolCarryforward {
                        origin_year: n.origin_year,
                        original_amount,
                        remaining_amount: n
                            .remaining_amount
                            .as_ref()
                            .map_or(original_amount, RawAmount::to_cents),
                        source: n.source,
                    }
                })
                .collect(),
            casualty_events: raw
                .casualty_events
                .iter()
                .map(|c| CasualtyEvent {
                    description: c.description.clone(),
                    fair_value_before: cents(&c.fair_value_before),
                    fair_value_after: cents(&c.fair_value_after),
                    adjusted_basis: cents(&c.adjusted_basis),
                    reimbursement: cents(&c.reimbursement),
                    federal_disaster_declaration: c.federal_disaster_declaration.clone(),
                })
                .collect(),
            education: raw
                .education
                .iter()
                .map(|e| EducationExpense {
                    student: e.student.clone(),
                    qualified_expenses: cents(&e.qualified_expenses),
                    at_least_half_time: e.at_least_half_time,
                    completed_first_four_years: e.completed_first_four_years,
                    prior_aotc_years: e.prior_aotc_years,
                    felony_drug_conviction: e.felony_drug_conviction,
                })
                .collect(),
            payments: raw.payments(),
            options: raw.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculate_federal;
    use crate::money::dollars;

    fn amount(value: impl Into<RawAmount>) -> Amount {
        Some(value.into())
    }

    // ==========================================================================
    // Amounts
    // ==========================================================================

    #[test]
    fn strings_and_numbers_become_cents() {
        let mut raw = RawTaxReturn::default();
        raw.income.wages = amount("$52,500.25");
        raw.income.taxable_interest = amount(310.5);
        raw.income.other_income.insert("jury duty".to_string(), "40".into());
        raw.payments.federal_withholding = amount("6,000");

        let tax_return = TaxReturn::from_raw(&raw).unwrap();

        assert_eq!(tax_return.income.wages, 5_250_025);
        assert_eq!(tax_return.income.taxable_interest, 31_050);
        assert_eq!(tax_return.income.other_income["jury duty"], dollars(40));
        assert_eq!(tax_return.payments.federal_withholding, dollars(6_000));
    }

    #[test]
    fn malformed_and_missing_amounts_are_zero() {
        let mut raw = RawTaxReturn::default();
        raw.income.wages = amount("lots");
        raw.income.taxable_interest = amount(f64::NAN);

        let tax_return = TaxReturn::from_raw(&raw).unwrap();

        assert_eq!(tax_return.income.wages, 0);
        assert_eq!(tax_return.income.taxable_interest, 0);
        assert_eq!(tax_return.income.ordinary_dividends, 0);
    }

    #[test]
    fn filing_status_codes_and_names() {
        for (text, expected) in [
            ("MFJ", FilingStatus::MarriedJointly),
            ("headOfHousehold", FilingStatus::HeadOfHousehold),
            (" S ", FilingStatus::Single),
        ] {
            let raw = RawTaxReturn {
                filing_status: text.to_string(),
                ..RawTaxReturn::default()
            };
            assert_eq!(TaxReturn::from_raw(&raw).unwrap().filing_status(), expected);
        }

        let raw = RawTaxReturn {
            filing_status: "widow".to_string(),
            ..RawTaxReturn::default()
        };
        assert_eq!(
            TaxReturn::from_raw(&raw).unwrap_err(),
            InputError::FilingStatus("widow".to_string())
        );
    }

    #[test]
    fn nol_remaining_defaults_to_original() {
        let mut raw = RawTaxReturn::default();
        raw.nol_carryforwards.push(RawNolCarryforward {
            origin_year: 2022,
            original_amount: amount(25_000.0),
            remaining_amount: None,
            source: NolSource::Business,
        });

        let tax_return = TaxReturn::from_raw(&raw).unwrap();

        assert_eq!(tax_return.nol_carryforwards[0].remaining_amount, dollars(25_000));
    }

    // ==========================================================================
    // Legacy dependents
    // ==========================================================================

    #[test]
    fn legacy_count_becomes_children_of_unknown_age() {
        let raw = RawTaxReturn {
            dependents: RawDependents::Count(2),
            legacy_child_tax_credit_children: 5,
            ..RawTaxReturn::default()
        };

        assert_eq!(
            raw.resolve_dependents(),
            vec![Dependent::child_of_unknown_age(); 2]
        );
    }

    #[test]
    fn structured_list_wins_over_legacy_fields() {
        let raw = RawTaxReturn {
            dependents: RawDependents::List(vec![RawDependent {
                kind: DependentKind::QualifyingRelative,
                birth_date: NaiveDate::from_ymd_opt(1940, 3, 3),
                months_lived_with_taxpayer: 12,
                is_full_time_student: false,
                is_permanently_disabled: false,
                has_ssn: true,
            }]),
            legacy_child_tax_credit_children: 3,
            ..RawTaxReturn::default()
        };

        let dependents = raw.resolve_dependents();

        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].kind, DependentKind::QualifyingRelative);
    }

    #[test]
    fn legacy_ctc_children_used_only_without_dependents() {
        let raw = RawTaxReturn {
            legacy_child_tax_credit_children: 3,
            ..RawTaxReturn::default()
        };

        assert_eq!(raw.resolve_dependents().len(), 3);
    }

    #[test]
    fn converted_return_matches_hand_built_one() {
        let mut raw = RawTaxReturn {
            filing_status: "MFJ".to_string(),
            dependents: RawDependents::Count(1),
            ..RawTaxReturn::default()
        };
        raw.income.wages = amount("90000");

        let mut expected = TaxReturn::new(2025, FilingStatus::MarriedJointly);
        expected.income.wages = dollars(90_000);
        expected.profile.dependents = vec![Dependent::child_of_unknown_age()];

        let converted = TaxReturn::from_raw(&raw).unwrap();

        assert_eq!(converted, expected);
        assert_eq!(calculate_federal(&converted), calculate_federal(&expected));
    }
}
