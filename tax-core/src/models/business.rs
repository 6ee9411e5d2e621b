use serde::{Deserialize, Serialize};

use crate::money::{Cents, max0};

/// Specified service categories under §199A(d)(2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SstbCategory {
    Health,
    Law,
    Accounting,
    ActuarialScience,
    PerformingArts,
    Consulting,
    Athletics,
    FinancialServices,
    BrokerageServices,
    Investing,
    ReputationOrSkill,
}

/// One trade or business for the QBI deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QbiBusiness {
    pub name: String,
    pub qualified_business_income: Cents,
    pub w2_wages: Cents,
    /// Unadjusted basis immediately after acquisition of qualified property.
    pub ubia: Cents,
    pub sstb: Option<SstbCategory>,
}

impl QbiBusiness {
    pub fn is_sstb(&self) -> bool {
        self.sstb.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QbiProfile {
    pub businesses: Vec<QbiBusiness>,
    pub reit_dividends: Cents,
    pub ptp_income: Cents,
    /// Qualified business loss carried in from prior years (enter as a
    /// positive amount).
    pub prior_year_loss_carryforward: Cents,
}

/// Form 1116 income baskets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeignIncomeCategory {
    General,
    Passive,
    ForeignBranch,
    Section951A,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignIncomeSource {
    pub country: String,
    pub category: ForeignIncomeCategory,
    pub gross_income: Cents,
    pub foreign_tax_paid: Cents,
    pub allocable_expenses: Cents,
}

/// Unused foreign tax carried in from earlier years, per basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignTaxCarryover {
    pub category: ForeignIncomeCategory,
    pub amount: Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NolSource {
    Business,
    Farm,
    Casualty,
    Other,
}

/// A net operating loss available to carry forward.
///
/// Only the NOL module produces updated copies of these records; callers
/// pass them in and receive the updated list back in the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NolCarryforward {
    pub origin_year: i32,
    pub original_amount: Cents,
    pub remaining_amount: Cents,
    pub source: NolSource,
}

/// A single casualty or theft event for Form 4684.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasualtyEvent {
    pub description: String,
    pub fair_value_before: Cents,
    pub fair_value_after: Cents,
    pub adjusted_basis: Cents,
    pub reimbursement: Cents,
    /// FEMA disaster declaration number, if the loss is attributable to a
    /// federally declared disaster.
    pub federal_disaster_declaration: Option<String>,
}

impl CasualtyEvent {
    pub fn decrease_in_fair_value(&self) -> Cents {
        max0(self.fair_value_before.saturating_sub(self.fair_value_after))
    }
}

/// One student's qualified education expenses for Form 8863.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationExpense {
    pub student: String,
    pub qualified_expenses: Cents,
    pub at_least_half_time: bool,
    pub completed_first_four_years: bool,
    /// Number of earlier years the AOTC was claimed for this student.
    pub prior_aotc_years: u8,
    pub felony_drug_conviction: bool,
}

impl EducationExpense {
    pub fn aotc_eligible(&self) -> bool {
        self.at_least_half_time
            && !self.completed_first_four_years
            && self.prior_aotc_years < 4
            && !self.felony_drug_conviction
    }
}
