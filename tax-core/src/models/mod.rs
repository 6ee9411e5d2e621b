mod business;
mod filing_status;
mod income;
mod tax_bracket;
mod tax_return;
mod taxpayer;

pub use business::{
    CasualtyEvent, EducationExpense, ForeignIncomeCategory, ForeignIncomeSource,
    ForeignTaxCarryover, NolCarryforward, NolSource, QbiBusiness, QbiProfile, SstbCategory,
};
pub use filing_status::{FilingStatus, PerFilingStatus};
pub use income::{AdjustmentsProfile, IncomeProfile, ItemizedProfile, K1Income, RetirementIncome};
pub use tax_bracket::{TaxBracket, schedule};
pub use tax_return::{AmtMode, DeductionPreference, FilingOptions, Payments, TaxReturn};
pub use taxpayer::{Dependent, DependentKind, Location, Person, TaxpayerProfile, age_at_year_end};
