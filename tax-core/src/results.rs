//! Output records. Built once by a pipeline call and never mutated.
//!
//! Field names serialize in camelCase and are a stable contract for
//! exporters; every amount is in cents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::additional_taxes::{AdditionalMedicareTax, NetInvestmentIncomeTax};
use crate::calculations::amt::AmtResult;
use crate::calculations::capital_gains::IncomeTaxComputation;
use crate::calculations::casualty::CasualtyLossResult;
use crate::calculations::ctc::ChildTaxCreditResult;
use crate::calculations::deductions::{DeductionDecision, ItemizedBreakdown, StandardDeduction};
use crate::calculations::education::{EducationCredit, EducationCreditResult};
use crate::calculations::eitc::EitcResult;
use crate::calculations::foreign_tax::ForeignTaxCreditResult;
use crate::calculations::nol::NolResult;
use crate::calculations::qbi::QbiResult;
use crate::calculations::self_employment::SeWorksheetResult;
use crate::diagnostics::Diagnostics;
use crate::models::{FilingStatus, ForeignTaxCarryover, NolCarryforward};
use crate::money::{Cents, add_cents};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub wages: Cents,
    pub taxable_interest: Cents,
    pub ordinary_dividends: Cents,
    pub business_income: Cents,
    pub partnership_income: Cents,
    /// Net capital gain, or the loss allowed after the annual limit.
    pub capital_gain_or_loss: Cents,
    pub retirement_income: Cents,
    pub unemployment_compensation: Cents,
    pub other_income: Cents,
    pub total_income: Cents,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentBreakdown {
    pub se_tax_deduction: Cents,
    pub hsa_deduction: Cents,
    pub ira_deduction: Cents,
    pub student_loan_interest: Cents,
    pub educator_expenses: Cents,
    pub self_employed_health_insurance: Cents,
    pub other_adjustments: Cents,
    pub total: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBreakdown {
    pub earned_income_credit: Cents,
    pub child_tax_credit: Cents,
    pub additional_child_tax_credit: Cents,
    pub education: EducationCredit,
    pub american_opportunity_credit: Cents,
    pub lifetime_learning_credit: Cents,
    pub foreign_tax_credit: Cents,
    pub total_nonrefundable: Cents,
    pub total_refundable: Cents,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalTaxBreakdown {
    pub self_employment_tax: Cents,
    pub additional_medicare_tax: Cents,
    pub net_investment_income_tax: Cents,
    pub alternative_minimum_tax: Cents,
    pub total: Cents,
}

impl AdditionalTaxBreakdown {
    pub fn new(
        self_employment_tax: Cents,
        additional_medicare_tax: Cents,
        net_investment_income_tax: Cents,
        alternative_minimum_tax: Cents,
    ) -> Self {
        Self {
            self_employment_tax,
            additional_medicare_tax,
            net_investment_income_tax,
            alternative_minimum_tax,
            total: add_cents(&[
                self_employment_tax,
                additional_medicare_tax,
                net_investment_income_tax,
                alternative_minimum_tax,
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub withholding: Cents,
    pub estimated_payments: Cents,
    pub refundable_credits: Cents,
    pub total: Cents,
}

impl PaymentBreakdown {
    pub fn new(
        withholding: Cents,
        estimated_payments: Cents,
        refundable_credits: Cents,
    ) -> Self {
        Self {
            withholding,
            estimated_payments,
            refundable_credits,
            total: add_cents(&[withholding, estimated_payments, refundable_credits]),
        }
    }
}

/// Every intermediate worksheet, for display and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederalWorksheets {
    pub self_employment: SeWorksheetResult,
    pub standard_deduction: StandardDeduction,
    pub itemized_deductions: ItemizedBreakdown,
    pub casualty_loss: CasualtyLossResult,
    pub nol: NolResult,
    pub qbi: QbiResult,
    pub income_tax: IncomeTaxComputation,
    pub additional_medicare: AdditionalMedicareTax,
    pub net_investment_income: NetInvestmentIncomeTax,
    pub amt: AmtResult,
    pub eitc: EitcResult,
    pub child_tax_credit: ChildTaxCreditResult,
    pub education: EducationCreditResult,
    pub foreign_tax_credit: ForeignTaxCreditResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederalResult {
    pub tax_year: i32,
    /// Year of the tables actually used; differs from `tax_year` only when
    /// the requested year is unsupported.
    pub tables_year: i32,
    pub filing_status: FilingStatus,
    pub income: IncomeBreakdown,
    pub adjustments: AdjustmentBreakdown,
    pub agi: Cents,
    pub deduction: DeductionDecision,
    pub nol_deduction: Cents,
    pub qbi_deduction: Cents,
    pub taxable_income: Cents,
    pub tax_before_credits: Cents,
    pub credits: CreditBreakdown,
    pub tax_after_credits: Cents,
    pub additional_taxes: AdditionalTaxBreakdown,
    pub total_tax: Cents,
    pub payments: PaymentBreakdown,
    pub total_payments: Cents,
    /// Positive is a refund, negative is owed.
    pub refund_or_owe: Cents,
    pub marginal_rate: Decimal,
    pub effective_rate: Decimal,
    /// Carryforwards to feed into next year's return.
    pub nol_carryforwards: Vec<NolCarryforward>,
    pub foreign_tax_carryovers: Vec<ForeignTaxCarryover>,
    pub capital_loss_carryforward: Cents,
    pub worksheets: FederalWorksheets,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModificationKind {
    Addition,
    Subtraction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateModificationLine {
    pub id: String,
    pub kind: ModificationKind,
    pub amount: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateCreditLine {
    pub id: String,
    pub refundable: bool,
    pub amount: Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateDeductionType {
    None,
    Standard,
    Itemized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResult {
    pub state_code: String,
    pub tax_year: i32,
    /// Year of the state rules actually applied.
    pub rules_year: i32,
    pub federal_agi: Cents,
    pub modifications: Vec<StateModificationLine>,
    pub state_agi: Cents,
    pub deduction_type: StateDeductionType,
    pub state_deduction: Cents,
    pub exemptions: Cents,
    pub taxable_income: Cents,
    pub income_tax: Cents,
    pub surtax: Cents,
    pub credits: Vec<StateCreditLine>,
    pub nonrefundable_credits: Cents,
    pub refundable_credits: Cents,
    /// State income tax after nonrefundable credits.
    pub state_tax: Cents,
    pub local_tax: Cents,
    pub total_tax: Cents,
    pub payments: PaymentBreakdown,
    pub total_payments: Cents,
    /// Positive is a refund, negative is owed.
    pub refund_or_owe: Cents,
    pub diagnostics: Diagnostics,
}

impl StateResult {
    /// A state with no income tax: everything zero, payments come back.
    pub fn no_income_tax(
        state_code: &str,
        tax_year: i32,
        federal_agi: Cents,
        withholding: Cents,
        estimated_payments: Cents,
    ) -> Self {
        let payments = PaymentBreakdown::new(withholding, estimated_payments, 0);
        Self {
            state_code: state_code.to_string(),
            tax_year,
            rules_year: tax_year,
            federal_agi,
            modifications: Vec::new(),
            state_agi: federal_agi,
            deduction_type: StateDeductionType::None,
            state_deduction: 0,
            exemptions: 0,
            taxable_income: 0,
            income_tax: 0,
            surtax: 0,
            credits: Vec::new(),
            nonrefundable_credits: 0,
            refundable_credits: 0,
            state_tax: 0,
            local_tax: 0,
            total_tax: 0,
            total_payments: payments.total,
            payments,
            refund_or_owe: payments.total,
            diagnostics: Diagnostics::new(),
        }
    }
}
