//! Pure calculation modules used by the federal pipeline and the state
//! layer.
//!
//! Every function here takes cents and returns cents. None of them read
//! global state; per-year constants arrive as arguments from [`crate::tables`].

pub mod additional_taxes;
pub mod amt;
pub mod brackets;
pub mod capital_gains;
pub mod casualty;
pub mod ctc;
pub mod deductions;
pub mod education;
pub mod eitc;
pub mod foreign_tax;
pub mod nol;
pub mod qbi;
pub mod self_employment;

pub use brackets::{BracketError, linear_phase_out, tax_from_brackets, validate_brackets};
pub use deductions::{DeductionDecision, DeductionType};
pub use education::EducationCredit;
pub use self_employment::{SeWorksheet, SeWorksheetResult};
