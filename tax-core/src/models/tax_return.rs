use serde::{Deserialize, Serialize};

use super::{
    AdjustmentsProfile, CasualtyEvent, EducationExpense, FilingStatus, ForeignIncomeSource,
    ForeignTaxCarryover, IncomeProfile, ItemizedProfile, NolCarryforward, QbiProfile,
    TaxpayerProfile,
};
use crate::money::{Cents, add_cents};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeductionPreference {
    #[default]
    Auto,
    ForceStandard,
    ForceItemized,
}

/// How the Alternative Minimum Tax hook is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmtMode {
    /// Simplified Form 6251: SALT add-back, exemption phase-out, 26%/28%.
    #[default]
    Simplified,
    /// AMT is not computed; the result carries a warning saying so.
    NotModeled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilingOptions {
    pub deduction_preference: DeductionPreference,
    pub amt_mode: AmtMode,
    /// Married filing separately and the spouse itemizes.
    pub spouse_itemizes: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payments {
    pub federal_withholding: Cents,
    pub estimated_payments: Cents,
    pub state_withholding: Cents,
    pub state_estimated_payments: Cents,
}

impl Payments {
    /// Federal withholding plus federal estimated payments.
    pub fn total(&self) -> Cents {
        add_cents(&[self.federal_withholding, self.estimated_payments])
    }
}

/// Everything the federal pipeline needs for one return, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxReturn {
    pub tax_year: i32,
    pub profile: TaxpayerProfile,
    pub income: IncomeProfile,
    pub adjustments: AdjustmentsProfile,
    pub itemized: ItemizedProfile,
    pub qbi: QbiProfile,
    pub foreign_income: Vec<ForeignIncomeSource>,
    pub foreign_tax_carryovers: Vec<ForeignTaxCarryover>,
    pub nol_carryforwards: Vec<NolCarryforward>,
    pub casualty_events: Vec<CasualtyEvent>,
    pub education: Vec<EducationExpense>,
    pub payments: Payments,
    pub options: FilingOptions,
}

impl TaxReturn {
    /// An empty return for the given year and status.
    pub fn new(
        tax_year: i32,
        filing_status: FilingStatus,
    ) -> Self {
        Self {
            tax_year,
            profile: TaxpayerProfile::new(filing_status),
            income: IncomeProfile::default(),
            adjustments: AdjustmentsProfile::default(),
            itemized: ItemizedProfile::default(),
            qbi: QbiProfile::default(),
            foreign_income: Vec::new(),
            foreign_tax_carryovers: Vec::new(),
            nol_carryforwards: Vec::new(),
            casualty_events: Vec::new(),
            education: Vec::new(),
            payments: Payments::default(),
            options: FilingOptions::default(),
        }
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.profile.filing_status
    }
}
