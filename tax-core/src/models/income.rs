use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::{Cents, add_cents, sum_cents};

/// Schedule K-1 amounts from partnerships and S corporations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct K1Income {
    pub ordinary_business_income: Cents,
    pub guaranteed_payments: Cents,
    pub net_rental_income: Cents,
    pub interest: Cents,
    pub dividends: Cents,
    /// Ordinary business income is subject to SE tax (general partner).
    pub general_partner: bool,
}

impl K1Income {
    pub fn total(&self) -> Cents {
        add_cents(&[
            self.ordinary_business_income,
            self.guaranteed_payments,
            self.net_rental_income,
            self.interest,
            self.dividends,
        ])
    }

    pub fn self_employment_earnings(&self) -> Cents {
        let mut earnings = self.guaranteed_payments;
        if self.general_partner {
            earnings = earnings.saturating_add(self.ordinary_business_income);
        }
        earnings
    }
}

/// Taxable pension, annuity and IRA distributions, tracked per spouse so
/// state exclusions can apply separate caps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetirementIncome {
    pub primary: Cents,
    pub spouse: Cents,
}

impl RetirementIncome {
    pub fn total(&self) -> Cents {
        self.primary.saturating_add(self.spouse)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeProfile {
    pub wages: Cents,
    pub taxable_interest: Cents,
    pub ordinary_dividends: Cents,
    /// Portion of `ordinary_dividends` taxed at capital-gain rates.
    pub qualified_dividends: Cents,
    pub short_term_capital_gain: Cents,
    /// Net long-term gain or loss, signed.
    pub long_term_capital_gain: Cents,
    /// Schedule C / F net profit or loss.
    pub business_income: Cents,
    pub k1: K1Income,
    pub retirement: RetirementIncome,
    pub unemployment_compensation: Cents,
    pub other_income: BTreeMap<String, Cents>,
}

impl IncomeProfile {
    /// Net capital gain or loss before the annual loss limit.
    pub fn net_capital_gain_or_loss(&self) -> Cents {
        self.short_term_capital_gain
            .saturating_add(self.long_term_capital_gain)
    }

    /// Capital gain eligible for preferential rates: net long-term gain
    /// reduced by any net short-term loss, never negative.
    pub fn preferential_capital_gain(&self) -> Cents {
        self.long_term_capital_gain
            .min(self.net_capital_gain_or_loss())
            .max(0)
    }

    pub fn other_income_total(&self) -> Cents {
        sum_cents(self.other_income.values().copied())
    }

    /// Wages plus net self-employment profit, used by the earned-income tests.
    pub fn earned_income(&self) -> Cents {
        add_cents(&[
            self.wages,
            self.business_income,
            self.k1.self_employment_earnings(),
        ])
    }
}

/// Above-the-line adjustments (Schedule 1, Part II). The half-SE-tax
/// adjustment is computed by the pipeline and is not an input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentsProfile {
    pub hsa_deduction: Cents,
    pub ira_deduction: Cents,
    pub student_loan_interest: Cents,
    pub educator_expenses: Cents,
    pub self_employed_health_insurance: Cents,
    pub other_adjustments: Cents,
}

impl AdjustmentsProfile {
    pub fn total(&self) -> Cents {
        add_cents(&[
            self.hsa_deduction,
            self.ira_deduction,
            self.student_loan_interest,
            self.educator_expenses,
            self.self_employed_health_insurance,
            self.other_adjustments,
        ])
    }
}

/// Schedule A expenses as entered, before caps and floors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemizedProfile {
    pub state_and_local_income_tax: Cents,
    pub real_estate_tax: Cents,
    pub personal_property_tax: Cents,
    pub mortgage_interest: Cents,
    pub charitable_contributions: Cents,
    pub medical_expenses: Cents,
    pub other_itemized: Cents,
}

impl ItemizedProfile {
    pub fn salt_before_cap(&self) -> Cents {
        add_cents(&[
            self.state_and_local_income_tax,
            self.real_estate_tax,
            self.personal_property_tax,
        ])
    }
}
