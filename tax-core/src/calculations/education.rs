//! American opportunity and lifetime learning credits (Form 8863).
//!
//! Only one of the two is claimed per return. [`choose_education_credit`]
//! returns the choice as a tagged value; the AOTC wins whenever it is
//! nonzero after the phase-out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::brackets::linear_phase_out;
use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{EducationExpense, FilingStatus};
use crate::money::{Cents, max0, multiply_cents, sum_cents};
use crate::tables::EducationParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "credit", rename_all = "camelCase")]
pub enum EducationCredit {
    None,
    AmericanOpportunity {
        /// After the phase-out.
        total: Cents,
        refundable: Cents,
        nonrefundable: Cents,
    },
    LifetimeLearning {
        total: Cents,
        nonrefundable: Cents,
    },
}

impl EducationCredit {
    pub fn aotc(&self) -> Cents {
        match self {
            Self::AmericanOpportunity { total, .. } => *total,
            _ => 0,
        }
    }

    pub fn llc(&self) -> Cents {
        match self {
            Self::LifetimeLearning { total, .. } => *total,
            _ => 0,
        }
    }

    pub fn nonrefundable(&self) -> Cents {
        match self {
            Self::None => 0,
            Self::AmericanOpportunity { nonrefundable, .. }
            | Self::LifetimeLearning { nonrefundable, .. } => *nonrefundable,
        }
    }

    pub fn refundable(&self) -> Cents {
        match self {
            Self::AmericanOpportunity { refundable, .. } => *refundable,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCreditResult {
    pub aotc_before_phase_out: Cents,
    pub llc_before_phase_out: Cents,
    pub credit: EducationCredit,
    pub explanation: String,
}

/// AOTC for one student: 100% of the first tier plus 25% of the next.
pub fn aotc_for_student(
    expense: &EducationExpense,
    params: &EducationParameters,
) -> Cents {
    if !expense.aotc_eligible() {
        return 0;
    }
    let expenses = max0(expense.qualified_expenses);
    let first = expenses.min(params.aotc_full_rate_expenses);
    let second = max0(expenses.saturating_sub(params.aotc_full_rate_expenses))
        .min(params.aotc_partial_rate_expenses);
    first.saturating_add(multiply_cents(second, params.aotc_partial_rate))
}

pub fn choose_education_credit(
    students: &[EducationExpense],
    magi: Cents,
    status: FilingStatus,
    tax_available: Cents,
    params: &EducationParameters,
    diagnostics: &mut Diagnostics,
) -> EducationCreditResult {
    if students.is_empty() {
        return EducationCreditResult {
            aotc_before_phase_out: 0,
            llc_before_phase_out: 0,
            credit: EducationCredit::None,
            explanation: "no education expenses".to_string(),
        };
    }
    if status == FilingStatus::MarriedSeparately {
        diagnostics.warn(
            codes::EDUCATION_MFS_INELIGIBLE,
            Phase::Credits,
            "education credits are not available when married filing separately",
        );
        return EducationCreditResult {
            aotc_before_phase_out: 0,
            llc_before_phase_out: 0,
            credit: EducationCredit::None,
            explanation: "married filing separately".to_string(),
        };
    }

    let start = params.phase_out_start.get(status);
    let end = params.phase_out_end.get(status);
    let tax_available = max0(tax_available);

    let aotc_before_phase_out = sum_cents(students.iter().map(|s| aotc_for_student(s, params)));
    let llc_expenses = sum_cents(students.iter().map(|s| max0(s.qualified_expenses)));
    let llc_before_phase_out =
        multiply_cents(llc_expenses.min(params.llc_expense_cap), params.llc_rate);

    let aotc = linear_phase_out(aotc_before_phase_out, magi, start, end);
    let credit = if aotc > 0 {
        let refundable = multiply_cents(aotc, params.aotc_refundable_rate);
        EducationCredit::AmericanOpportunity {
            total: aotc,
            refundable,
            nonrefundable: (aotc - refundable).min(tax_available),
        }
    } else {
        let llc = linear_phase_out(llc_before_phase_out, magi, start, end);
        if llc > 0 {
            EducationCredit::LifetimeLearning {
                total: llc,
                nonrefundable: llc.min(tax_available),
            }
        } else {
            EducationCredit::None
        }
    };

    debug!(?credit, "education credit chosen");

    EducationCreditResult {
        aotc_before_phase_out,
        llc_before_phase_out,
        explanation: match credit {
            EducationCredit::None => "education credits fully phased out".to_string(),
            EducationCredit::AmericanOpportunity { total, .. } => {
                format!("American opportunity credit of {total}; lifetime learning not allowed")
            }
            EducationCredit::LifetimeLearning { total, .. } => {
                format!("no AOTC-eligible student; lifetime learning credit of {total}")
            }
        },
        credit,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::money::dollars;
    use crate::tables::federal_tables;

    fn params() -> EducationParameters {
        federal_tables(2025).unwrap().education.clone()
    }

    fn undergrad(expenses: Cents) -> EducationExpense {
        EducationExpense {
            student: "Sam".to_string(),
            qualified_expenses: expenses,
            at_least_half_time: true,
            completed_first_four_years: false,
            prior_aotc_years: 0,
            felony_drug_conviction: false,
        }
    }

    fn grad(expenses: Cents) -> EducationExpense {
        EducationExpense {
            completed_first_four_years: true,
            ..undergrad(expenses)
        }
    }

    #[test]
    fn aotc_per_student_tiers() {
        assert_eq!(aotc_for_student(&undergrad(dollars(1_500)), &params()), dollars(1_500));
        assert_eq!(aotc_for_student(&undergrad(dollars(3_000)), &params()), dollars(2_250));
        assert_eq!(aotc_for_student(&undergrad(dollars(9_000)), &params()), dollars(2_500));
        assert_eq!(aotc_for_student(&grad(dollars(9_000)), &params()), 0);
    }

    #[test]
    fn aotc_is_forty_percent_refundable() {
        let mut diagnostics = Diagnostics::new();

        let result = choose_education_credit(
            &[undergrad(dollars(5_000))],
            dollars(50_000),
            FilingStatus::Single,
            dollars(10_000),
            &params(),
            &mut diagnostics,
        );

        assert_eq!(
            result.credit,
            EducationCredit::AmericanOpportunity {
                total: dollars(2_500),
                refundable: dollars(1_000),
                nonrefundable: dollars(1_500),
            }
        );
    }

    #[test]
    fn aotc_excludes_llc() {
        let mut diagnostics = Diagnostics::new();

        let result = choose_education_credit(
            &[undergrad(dollars(4_000)), grad(dollars(10_000))],
            dollars(50_000),
            FilingStatus::Single,
            dollars(10_000),
            &params(),
            &mut diagnostics,
        );

        assert!(result.credit.aotc() > 0);
        assert_eq!(result.credit.llc(), 0);
    }

    #[test]
    fn graduate_student_gets_llc() {
        let mut diagnostics = Diagnostics::new();

        let result = choose_education_credit(
            &[grad(dollars(12_000))],
            dollars(50_000),
            FilingStatus::Single,
            dollars(10_000),
            &params(),
            &mut diagnostics,
        );

        assert_eq!(
            result.credit,
            EducationCredit::LifetimeLearning {
                total: dollars(2_000),
                nonrefundable: dollars(2_000),
            }
        );
    }

    #[test]
    fn credits_phase_out_over_magi_range() {
        let mut diagnostics = Diagnostics::new();

        let result = choose_education_credit(
            &[undergrad(dollars(4_000))],
            dollars(85_000),
            FilingStatus::Single,
            dollars(10_000),
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.credit.aotc(), dollars(1_250));
    }

    #[test]
    fn separate_filers_get_nothing() {
        let mut diagnostics = Diagnostics::new();

        let result = choose_education_credit(
            &[undergrad(dollars(4_000))],
            dollars(40_000),
            FilingStatus::MarriedSeparately,
            dollars(10_000),
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.credit, EducationCredit::None);
        assert!(diagnostics.has_code(codes::EDUCATION_MFS_INELIGIBLE));
    }

    proptest! {
        #[test]
        fn aotc_and_llc_are_never_both_nonzero(
            undergrad_expenses in 0i64..1_000_000,
            grad_expenses in 0i64..2_000_000,
            magi in 0i64..20_000_000,
        ) {
            let mut diagnostics = Diagnostics::new();
            let result = choose_education_credit(
                &[undergrad(undergrad_expenses), grad(grad_expenses)],
                magi,
                FilingStatus::MarriedJointly,
                dollars(5_000),
                &params(),
                &mut diagnostics,
            );

            prop_assert!(result.credit.aotc() == 0 || result.credit.llc() == 0);
        }
    }
}
