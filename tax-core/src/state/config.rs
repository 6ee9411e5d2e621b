//! `StateTaxConfig`: the declarative description of a state's income tax
//! that the generic calculator executes.
//!
//! Documents are plain data. Money amounts are integer cents and rates are
//! decimal strings so nothing passes through floating point. A document is
//! checked once by [`StateTaxConfig::validate`] and never edited afterwards.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::brackets::{BracketError, validate_brackets};
use crate::models::{FilingStatus, PerFilingStatus, TaxBracket};
use crate::money::Cents;
use crate::results::ModificationKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateConfigError {
    #[error("state code '{0}' must be two uppercase letters")]
    InvalidStateCode(String),

    #[error("{state}: {status:?} brackets are invalid: {source}")]
    Brackets {
        state: String,
        status: FilingStatus,
        #[source]
        source: BracketError,
    },

    #[error("{state}: {context}: rate {rate} is outside [0, 1]")]
    RateOutOfRange {
        state: String,
        context: String,
        rate: Decimal,
    },

    #[error("{state}: {context}: phase-out end is below its start")]
    PhaseOutOrder { state: String, context: String },

    #[error("{state}: {context}: tiers must be ascending with only the last open-ended")]
    TiersNotAscending { state: String, context: String },

    #[error("{state}: {context}: table rows must all have {expected} columns")]
    TableNotRectangular {
        state: String,
        context: String,
        expected: usize,
    },

    #[error("{state}: {context} is empty")]
    Empty { state: String, context: String },

    #[error("{state}: duplicate id '{id}'")]
    DuplicateId { state: String, id: String },

    #[error("{state}: {context}: amount {amount} is negative")]
    NegativeAmount {
        state: String,
        context: String,
        amount: Cents,
    },
}

/// An amount that is either the same for every filing status or listed per
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByStatus {
    Uniform(Cents),
    PerStatus(PerFilingStatus<Cents>),
}

impl ByStatus {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> Cents {
        match self {
            Self::Uniform(amount) => *amount,
            Self::PerStatus(amounts) => amounts.get(status),
        }
    }

    fn values(&self) -> Vec<Cents> {
        match self {
            Self::Uniform(amount) => vec![*amount],
            Self::PerStatus(amounts) => amounts.iter().map(|(_, v)| *v).collect(),
        }
    }
}

impl Default for ByStatus {
    fn default() -> Self {
        Self::Uniform(0)
    }
}

/// Named amounts a rule can read. The set is closed; a document naming
/// anything else fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmountField {
    FederalAgi,
    FederalTaxableIncome,
    /// Federal AGI after the state additions and subtractions applied so far.
    StateAgi,
    StateTaxableIncome,
    /// State income tax before credits.
    StateIncomeTax,
    Wages,
    EarnedIncome,
    TaxableInterest,
    OrdinaryDividends,
    CapitalGains,
    BusinessIncome,
    RetirementIncome,
    PrimaryRetirementIncome,
    SpouseRetirementIncome,
    UnemploymentCompensation,
    RealEstateTax,
    StateAndLocalIncomeTax,
}

/// Federal credits a state credit can be a percentage of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FederalCreditKind {
    EarnedIncomeCredit,
    /// Nonrefundable CTC/ODC plus the refundable ACTC.
    ChildTaxCredit,
    AmericanOpportunityCredit,
    LifetimeLearningCredit,
    ForeignTaxCredit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
}

impl Comparison {
    pub fn holds(
        &self,
        left: Cents,
        right: Cents,
    ) -> bool {
        match self {
            Self::Gt => left > right,
            Self::Gte => left >= right,
            Self::Lt => left < right,
            Self::Lte => left <= right,
            Self::Eq => left == right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Condition {
    FilingStatus {
        #[serde(rename = "anyOf")]
        any_of: Vec<FilingStatus>,
    },
    Amount {
        field: AmountField,
        op: Comparison,
        value: Cents,
    },
    PrimaryAgeAtLeast { age: i32 },
    SpouseAgeAtLeast { age: i32 },
    DependentsAtLeast { count: usize },
}

/// Linear reduction to zero as `field` moves from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseOut {
    #[serde(default = "default_phase_out_field")]
    pub field: AmountField,
    pub start: ByStatus,
    pub end: ByStatus,
}

fn default_phase_out_field() -> AmountField {
    AmountField::FederalAgi
}

fn default_percentage() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TaxStructure {
    Flat { rate: Decimal },
    Progressive {
        brackets: PerFilingStatus<Vec<TaxBracket>>,
    },
    /// Brackets until taxable income passes `flat_above`, then `rate` on
    /// all of it (never less than the bracket tax).
    #[serde(rename_all = "camelCase")]
    Hybrid {
        brackets: PerFilingStatus<Vec<TaxBracket>>,
        rate: Decimal,
        flat_above: ByStatus,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemizedRule {
    /// State allows only its standard deduction.
    #[default]
    NotAllowed,
    /// Federal Schedule A total less the state and local income tax in it.
    FederalLessIncomeTax,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeductionRules {
    pub standard: ByStatus,
    pub itemized: ItemizedRule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExemptionRules {
    /// Per filer: one on most returns, two on a joint return.
    pub personal: Cents,
    pub dependent: Cents,
    /// Extra per filer aged 65 or older.
    pub age_65: Cents,
    pub blind: Cents,
    /// Exemptions are zeroed when federal AGI exceeds this amount.
    pub agi_limit: Option<ByStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgiModification {
    pub id: String,
    pub kind: ModificationKind,
    pub base: AmountField,
    /// Share of the base that is added or subtracted.
    #[serde(default = "default_percentage")]
    pub percentage: Decimal,
    #[serde(default)]
    pub cap: Option<ByStatus>,
    #[serde(default)]
    pub phase_out: Option<PhaseOut>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SurtaxMethod {
    Percentage { rate: Decimal },
    Fixed { amount: Cents },
}

/// Extra tax on the part of `base` above `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surtax {
    pub id: String,
    #[serde(default = "default_surtax_base")]
    pub base: AmountField,
    pub threshold: ByStatus,
    pub method: SurtaxMethod,
}

fn default_surtax_base() -> AmountField {
    AmountField::StateTaxableIncome
}

/// What a fixed or tiered amount is multiplied by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreditUnit {
    #[default]
    Return,
    Filer,
    Dependent,
    /// Filers plus dependents.
    Exemption,
}

/// One step of an AGI-tiered lookup. `up_to` is inclusive; `None` marks the
/// open top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditTier {
    #[serde(default)]
    pub up_to: Option<Cents>,
    pub amount: Cents,
}

/// One income band of a two-dimensional table; `amounts` is indexed by
/// dependent count, with the last column covering every larger count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub up_to: Option<Cents>,
    pub amounts: Vec<Cents>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CreditMethod {
    Fixed {
        amount: Cents,
        #[serde(default)]
        per: CreditUnit,
    },
    Percentage {
        base: AmountField,
        rate: Decimal,
    },
    Tiered {
        #[serde(default = "default_phase_out_field")]
        field: AmountField,
        #[serde(default)]
        per: CreditUnit,
        tiers: Vec<CreditTier>,
    },
    Table {
        #[serde(default = "default_phase_out_field")]
        field: AmountField,
        rows: Vec<TableRow>,
    },
    FederalPercentage {
        credit: FederalCreditKind,
        rate: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRule {
    pub id: String,
    #[serde(default)]
    pub refundable: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub method: CreditMethod,
    #[serde(default)]
    pub phase_out: Option<PhaseOut>,
    #[serde(default)]
    pub cap: Option<Cents>,
}

/// Local income tax at a flat rate chosen by county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTaxRule {
    #[serde(default = "default_surtax_base")]
    pub base: AmountField,
    #[serde(default)]
    pub default_rate: Option<Decimal>,
    #[serde(default)]
    pub county_rates: BTreeMap<String, Decimal>,
}

impl LocalTaxRule {
    /// Rate for `county`, matched case-insensitively.
    pub fn rate_for(
        &self,
        county: &str,
    ) -> Option<Decimal> {
        self.county_rates
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(county.trim()))
            .map(|(_, rate)| *rate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTaxConfig {
    pub state_code: String,
    pub name: String,
    pub tax_year: i32,
    pub structure: TaxStructure,
    #[serde(default)]
    pub deduction: DeductionRules,
    #[serde(default)]
    pub exemptions: ExemptionRules,
    #[serde(default)]
    pub modifications: Vec<AgiModification>,
    #[serde(default)]
    pub surtaxes: Vec<Surtax>,
    #[serde(default)]
    pub credits: Vec<CreditRule>,
    #[serde(default)]
    pub local_tax: Option<LocalTaxRule>,
}

/// Collects the checks for one document so each helper can name the state.
struct Validator<'a> {
    state: &'a str,
}

impl Validator<'_> {
    fn rate(
        &self,
        context: &str,
        rate: Decimal,
    ) -> Result<(), StateConfigError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(StateConfigError::RateOutOfRange {
                state: self.state.to_string(),
                context: context.to_string(),
                rate,
            });
        }
        Ok(())
    }

    fn non_negative(
        &self,
        context: &str,
        amount: Cents,
    ) -> Result<(), StateConfigError> {
        if amount < 0 {
            return Err(StateConfigError::NegativeAmount {
                state: self.state.to_string(),
                context: context.to_string(),
                amount,
            });
        }
        Ok(())
    }

    fn by_status(
        &self,
        context: &str,
        amounts: &ByStatus,
    ) -> Result<(), StateConfigError> {
        amounts
            .values()
            .into_iter()
            .try_for_each(|amount| self.non_negative(context, amount))
    }

    fn brackets(
        &self,
        brackets: &PerFilingStatus<Vec<TaxBracket>>,
    ) -> Result<(), StateConfigError> {
        for (status, schedule) in brackets.iter() {
            validate_brackets(schedule).map_err(|source| StateConfigError::Brackets {
                state: self.state.to_string(),
                status,
                source,
            })?;
        }
        Ok(())
    }

    fn phase_out(
        &self,
        context: &str,
        phase_out: &PhaseOut,
    ) -> Result<(), StateConfigError> {
        for status in FilingStatus::ALL {
            if phase_out.end.get(status) < phase_out.start.get(status) {
                return Err(StateConfigError::PhaseOutOrder {
                    state: self.state.to_string(),
                    context: context.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Every bound but the last is present and strictly increasing.
    fn ascending(
        &self,
        context: &str,
        bounds: &[Option<Cents>],
    ) -> Result<(), StateConfigError> {
        let not_ascending = || StateConfigError::TiersNotAscending {
            state: self.state.to_string(),
            context: context.to_string(),
        };
        if bounds.is_empty() {
            return Err(StateConfigError::Empty {
                state: self.state.to_string(),
                context: context.to_string(),
            });
        }
        let mut previous: Option<Cents> = None;
        for (i, bound) in bounds.iter().enumerate() {
            match bound {
                Some(value) => {
                    if previous.is_some_and(|p| *value <= p) {
                        return Err(not_ascending());
                    }
                    previous = Some(*value);
                }
                None if i + 1 != bounds.len() => return Err(not_ascending()),
                None => {}
            }
        }
        Ok(())
    }

    fn credit(
        &self,
        credit: &CreditRule,
    ) -> Result<(), StateConfigError> {
        let context = format!("credit '{}'", credit.id);
        match &credit.method {
            CreditMethod::Fixed { amount, .. } => self.non_negative(&context, *amount)?,
            CreditMethod::Percentage { rate, .. }
            | CreditMethod::FederalPercentage { rate, .. } => self.rate(&context, *rate)?,
            CreditMethod::Tiered { tiers, .. } => {
                let bounds: Vec<_> = tiers.iter().map(|t| t.up_to).collect();
                self.ascending(&context, &bounds)?;
                tiers
                    .iter()
                    .try_for_each(|t| self.non_negative(&context, t.amount))?;
            }
            CreditMethod::Table { rows, .. } => {
                let bounds: Vec<_> = rows.iter().map(|r| r.up_to).collect();
                self.ascending(&context, &bounds)?;
                let expected = rows[0].amounts.len();
                if expected == 0 || rows.iter().any(|r| r.amounts.len() != expected) {
                    return Err(StateConfigError::TableNotRectangular {
                        state: self.state.to_string(),
                        context,
                        expected,
                    });
                }
            }
        }
        if let Some(phase_out) = &credit.phase_out {
            self.phase_out(&context, phase_out)?;
        }
        if let Some(cap) = credit.cap {
            self.non_negative(&context, cap)?;
        }
        Ok(())
    }
}

impl StateTaxConfig {
    /// Checks the document's shape: bracket contiguity for every filing
    /// status, rates within [0, 1], ordered phase-outs, ascending tiers,
    /// rectangular tables and unique rule ids.
    pub fn validate(&self) -> Result<(), StateConfigError> {
        let code = self.state_code.as_str();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(StateConfigError::InvalidStateCode(self.state_code.clone()));
        }
        let v = Validator { state: code };

        match &self.structure {
            TaxStructure::Flat { rate } => v.rate("flat rate", *rate)?,
            TaxStructure::Progressive { brackets } => v.brackets(brackets)?,
            TaxStructure::Hybrid {
                brackets,
                rate,
                flat_above,
            } => {
                v.brackets(brackets)?;
                v.rate("hybrid flat rate", *rate)?;
                v.by_status("hybrid threshold", flat_above)?;
            }
        }

        v.by_status("standard deduction", &self.deduction.standard)?;
        let e = &self.exemptions;
        for (context, amount) in [
            ("personal exemption", e.personal),
            ("dependent exemption", e.dependent),
            ("age 65 exemption", e.age_65),
            ("blind exemption", e.blind),
        ] {
            v.non_negative(context, amount)?;
        }

        let mut ids = BTreeSet::new();
        let all_ids = self
            .modifications
            .iter()
            .map(|m| &m.id)
            .chain(self.surtaxes.iter().map(|s| &s.id))
            .chain(self.credits.iter().map(|c| &c.id));
        for id in all_ids {
            if !ids.insert(id.as_str()) {
                return Err(StateConfigError::DuplicateId {
                    state: code.to_string(),
                    id: id.clone(),
                });
            }
        }

        for modification in &self.modifications {
            let context = format!("modification '{}'", modification.id);
            v.rate(&context, modification.percentage)?;
            if let Some(cap) = &modification.cap {
                v.by_status(&context, cap)?;
            }
            if let Some(phase_out) = &modification.phase_out {
                v.phase_out(&context, phase_out)?;
            }
        }

        for surtax in &self.surtaxes {
            let context = format!("surtax '{}'", surtax.id);
            v.by_status(&context, &surtax.threshold)?;
            match surtax.method {
                SurtaxMethod::Percentage { rate } => v.rate(&context, rate)?,
                SurtaxMethod::Fixed { amount } => v.non_negative(&context, amount)?,
            }
        }

        self.credits.iter().try_for_each(|c| v.credit(c))?;

        if let Some(local) = &self.local_tax {
            if let Some(rate) = local.default_rate {
                v.rate("local default rate", rate)?;
            }
            for (county, rate) in &local.county_rates {
                v.rate(&format!("local rate for {county}"), *rate)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::schedule;
    use crate::money::dollars;

    fn flat(rate: Decimal) -> StateTaxConfig {
        StateTaxConfig {
            state_code: "ZZ".to_string(),
            name: "Test".to_string(),
            tax_year: 2025,
            structure: TaxStructure::Flat { rate },
            deduction: DeductionRules::default(),
            exemptions: ExemptionRules::default(),
            modifications: Vec::new(),
            surtaxes: Vec::new(),
            credits: Vec::new(),
            local_tax: None,
        }
    }

    fn credit(method: CreditMethod) -> CreditRule {
        CreditRule {
            id: "test".to_string(),
            refundable: false,
            conditions: Vec::new(),
            method,
            phase_out: None,
            cap: None,
        }
    }

    #[test]
    fn flat_rate_must_be_a_fraction() {
        assert_eq!(flat(dec!(0.05)).validate(), Ok(()));
        assert!(matches!(
            flat(dec!(5)).validate(),
            Err(StateConfigError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn state_code_is_two_uppercase_letters() {
        let mut config = flat(dec!(0.05));
        config.state_code = "zz".to_string();

        assert_eq!(
            config.validate(),
            Err(StateConfigError::InvalidStateCode("zz".to_string()))
        );
    }

    #[test]
    fn progressive_brackets_must_be_contiguous() {
        let good = schedule(&[(dollars(10_000), dec!(0.02)), (0, dec!(0.05))]);
        let gap = vec![
            TaxBracket {
                min: 0,
                max: Some(dollars(10_000)),
                rate: dec!(0.02),
            },
            TaxBracket {
                min: dollars(12_000),
                max: None,
                rate: dec!(0.05),
            },
        ];
        let mut config = flat(Decimal::ZERO);
        config.structure = TaxStructure::Progressive {
            brackets: PerFilingStatus {
                single: good.clone(),
                married_jointly: good.clone(),
                married_separately: gap,
                head_of_household: good,
            },
        };

        assert!(matches!(
            config.validate(),
            Err(StateConfigError::Brackets {
                status: FilingStatus::MarriedSeparately,
                ..
            })
        ));
    }

    #[test]
    fn phase_out_end_must_follow_start() {
        let mut config = flat(dec!(0.05));
        let mut rule = credit(CreditMethod::Fixed {
            amount: dollars(100),
            per: CreditUnit::Return,
        });
        rule.phase_out = Some(PhaseOut {
            field: AmountField::FederalAgi,
            start: ByStatus::Uniform(dollars(50_000)),
            end: ByStatus::Uniform(dollars(40_000)),
        });
        config.credits.push(rule);

        assert!(matches!(config.validate(), Err(StateConfigError::PhaseOutOrder { .. })));
    }

    #[test]
    fn tiers_must_ascend() {
        let mut config = flat(dec!(0.05));
        config.credits.push(credit(CreditMethod::Tiered {
            field: AmountField::FederalAgi,
            per: CreditUnit::Exemption,
            tiers: vec![
                CreditTier {
                    up_to: Some(dollars(40_000)),
                    amount: dollars(20),
                },
                CreditTier {
                    up_to: Some(dollars(30_000)),
                    amount: dollars(15),
                },
            ],
        }));

        assert!(matches!(
            config.validate(),
            Err(StateConfigError::TiersNotAscending { .. })
        ));
    }

    #[test]
    fn open_tier_must_be_last() {
        let v = Validator { state: "ZZ" };

        assert!(v.ascending("t", &[Some(1), Some(2), None]).is_ok());
        assert!(v.ascending("t", &[None, Some(2)]).is_err());
        assert!(v.ascending("t", &[]).is_err());
    }

    #[test]
    fn table_rows_must_be_rectangular() {
        let mut config = flat(dec!(0.05));
        config.credits.push(credit(CreditMethod::Table {
            field: AmountField::FederalAgi,
            rows: vec![
                TableRow {
                    up_to: Some(dollars(20_000)),
                    amounts: vec![dollars(100), dollars(200)],
                },
                TableRow {
                    up_to: None,
                    amounts: vec![dollars(50)],
                },
            ],
        }));

        assert!(matches!(
            config.validate(),
            Err(StateConfigError::TableNotRectangular { expected: 2, .. })
        ));
    }

    #[test]
    fn rule_ids_are_unique() {
        let mut config = flat(dec!(0.05));
        config.credits.push(credit(CreditMethod::Fixed {
            amount: dollars(10),
            per: CreditUnit::Return,
        }));
        config.credits.push(credit(CreditMethod::Fixed {
            amount: dollars(20),
            per: CreditUnit::Return,
        }));

        assert_eq!(
            config.validate(),
            Err(StateConfigError::DuplicateId {
                state: "ZZ".to_string(),
                id: "test".to_string(),
            })
        );
    }

    #[test]
    fn by_status_reads_uniform_or_per_status() {
        let uniform = ByStatus::Uniform(dollars(100));
        let per_status = ByStatus::PerStatus(PerFilingStatus {
            single: 1,
            married_jointly: 2,
            married_separately: 3,
            head_of_household: 4,
        });

        assert_eq!(uniform.get(FilingStatus::MarriedJointly), dollars(100));
        assert_eq!(per_status.get(FilingStatus::HeadOfHousehold), 4);
    }

    #[test]
    fn county_lookup_ignores_case() {
        let local = LocalTaxRule {
            base: AmountField::StateTaxableIncome,
            default_rate: None,
            county_rates: BTreeMap::from([("Marion".to_string(), dec!(0.0202))]),
        };

        assert_eq!(local.rate_for(" marion "), Some(dec!(0.0202)));
        assert_eq!(local.rate_for("Lake"), None);
    }
}
