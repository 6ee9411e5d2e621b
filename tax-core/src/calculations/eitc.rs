//! Earned income tax credit (refundable).
//!
//! The credit phases in with earned income up to the maximum, holds on a
//! plateau, then phases out on the larger of AGI or earned income. The
//! schedule depends on the number of qualifying children, capped at three.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{FilingStatus, TaxpayerProfile};
use crate::money::{Cents, format_cents_as_dollars, max0, multiply_cents};
use crate::tables::EitcParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EitcPhase {
    Ineligible,
    PhaseIn,
    Plateau,
    PhaseOut,
    PhasedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EitcResult {
    pub qualifying_children: usize,
    pub phase: EitcPhase,
    pub credit: Cents,
    pub explanation: String,
}

impl EitcResult {
    fn ineligible(
        qualifying_children: usize,
        reason: &str,
    ) -> Self {
        Self {
            qualifying_children,
            phase: EitcPhase::Ineligible,
            credit: 0,
            explanation: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EitcInput<'a> {
    pub profile: &'a TaxpayerProfile,
    pub tax_year: i32,
    pub earned_income: Cents,
    pub agi: Cents,
    pub investment_income: Cents,
}

pub fn earned_income_credit(
    input: &EitcInput<'_>,
    params: &EitcParameters,
    diagnostics: &mut Diagnostics,
) -> EitcResult {
    let profile = input.profile;
    let children = profile.eitc_children(input.tax_year);

    if profile.filing_status == FilingStatus::MarriedSeparately {
        if input.earned_income > 0 {
            diagnostics.warn(
                codes::EITC_MFS_INELIGIBLE,
                Phase::Credits,
                "the earned income credit is not available when married filing separately",
            );
        }
        return EitcResult::ineligible(children, "married filing separately");
    }
    if input.investment_income > params.investment_income_limit {
        diagnostics.warn(
            codes::EITC_INVESTMENT_INCOME,
            Phase::Credits,
            format!(
                "investment income of {} exceeds the {} earned income credit limit",
                format_cents_as_dollars(input.investment_income),
                format_cents_as_dollars(params.investment_income_limit)
            ),
        );
        return EitcResult::ineligible(children, "investment income over limit");
    }
    if children == 0 && !childless_age_ok(input, params) {
        return EitcResult::ineligible(children, "no qualifying children and outside the age range");
    }

    let earned = max0(input.earned_income);
    if earned == 0 {
        return EitcResult::ineligible(children, "no earned income");
    }

    let schedule = params.schedules[children.min(3)];
    let phase_in_credit = multiply_cents(earned, schedule.phase_in_rate).min(schedule.max_credit);

    let start = if profile.filing_status.is_joint() {
        schedule.phase_out_start_joint
    } else {
        schedule.phase_out_start
    };
    let phase_out_income = max0(input.agi).max(earned);
    let reduction = multiply_cents(max0(phase_out_income - start), schedule.phase_out_rate);
    let credit = max0(phase_in_credit - reduction);

    let phase = if credit == 0 {
        EitcPhase::PhasedOut
    } else if reduction > 0 {
        EitcPhase::PhaseOut
    } else if phase_in_credit < schedule.max_credit {
        EitcPhase::PhaseIn
    } else {
        EitcPhase::Plateau
    };

    debug!(children, ?phase, credit, "EITC computed");

    EitcResult {
        qualifying_children: children,
        phase,
        credit,
        explanation: format!(
            "{children} qualifying children, {phase:?}: {} before a {} phase-out reduction",
            phase_in_credit, reduction
        ),
    }
}

/// Childless filers (or one spouse on a joint return) must fall inside the
/// age range. A missing birth date is not held against the filer.
fn childless_age_ok(
    input: &EitcInput<'_>,
    params: &EitcParameters,
) -> bool {
    let in_range = |age: Option<i32>| {
        age.is_none_or(|age| (params.childless_min_age..=params.childless_max_age).contains(&age))
    };
    let profile = input.profile;
    in_range(profile.primary.age(input.tax_year))
        || profile
            .joint_spouse()
            .is_some_and(|spouse| in_range(spouse.age(input.tax_year)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Dependent;
    use crate::money::dollars;
    use crate::tables::federal_tables;

    fn params() -> EitcParameters {
        federal_tables(2025).unwrap().eitc.clone()
    }

    fn profile(
        status: FilingStatus,
        children: usize,
    ) -> TaxpayerProfile {
        let mut profile = TaxpayerProfile::new(status);
        profile.primary.birth_date = NaiveDate::from_ymd_opt(1990, 6, 1);
        profile.dependents = vec![Dependent::child_of_unknown_age(); children];
        profile
    }

    fn run(
        profile: &TaxpayerProfile,
        earned: Cents,
        agi: Cents,
    ) -> (EitcResult, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let input = EitcInput {
            profile,
            tax_year: 2025,
            earned_income: earned,
            agi,
            investment_income: 0,
        };
        (earned_income_credit(&input, &params(), &mut diagnostics), diagnostics)
    }

    #[test]
    fn phase_in_with_one_child() {
        let (result, _) = run(&profile(FilingStatus::Single, 1), dollars(10_000), dollars(10_000));

        assert_eq!(result.phase, EitcPhase::PhaseIn);
        assert_eq!(result.credit, dollars(3_400));
    }

    #[test]
    fn plateau_with_two_children() {
        let (result, _) = run(&profile(FilingStatus::Single, 2), dollars(20_000), dollars(20_000));

        assert_eq!(result.phase, EitcPhase::Plateau);
        assert_eq!(result.credit, dollars(7_152));
    }

    #[test]
    fn phase_out_uses_joint_start() {
        let single = run(&profile(FilingStatus::Single, 1), dollars(28_000), dollars(28_000)).0;
        let joint =
            run(&profile(FilingStatus::MarriedJointly, 1), dollars(28_000), dollars(28_000)).0;

        // single: 4,328 − (28,000 − 23,350) × 15.98% = 4,328 − 743.07
        assert_eq!(single.credit, 358_493);
        assert_eq!(joint.credit, dollars(4_328));
        assert_eq!(single.phase, EitcPhase::PhaseOut);
    }

    #[test]
    fn more_than_three_children_uses_three_child_schedule() {
        let (result, _) =
            run(&profile(FilingStatus::HeadOfHousehold, 5), dollars(20_000), dollars(20_000));

        assert_eq!(result.qualifying_children, 5);
        assert_eq!(result.credit, dollars(8_046));
    }

    #[test]
    fn high_income_is_phased_out() {
        let (result, _) = run(&profile(FilingStatus::Single, 1), dollars(80_000), dollars(80_000));

        assert_eq!(result.credit, 0);
        assert_eq!(result.phase, EitcPhase::PhasedOut);
    }

    #[test]
    fn separate_filers_are_ineligible() {
        let (result, diagnostics) = run(
            &profile(FilingStatus::MarriedSeparately, 1),
            dollars(15_000),
            dollars(15_000),
        );

        assert_eq!(result.phase, EitcPhase::Ineligible);
        assert!(diagnostics.has_code(codes::EITC_MFS_INELIGIBLE));
    }

    #[test]
    fn childless_filer_under_25_is_ineligible() {
        let mut young = profile(FilingStatus::Single, 0);
        young.primary.birth_date = NaiveDate::from_ymd_opt(2003, 2, 1);

        let (result, _) = run(&young, dollars(8_000), dollars(8_000));

        assert_eq!(result.credit, 0);
    }

    #[test]
    fn investment_income_over_limit_disqualifies() {
        let mut diagnostics = Diagnostics::new();
        let profile = profile(FilingStatus::Single, 1);
        let input = EitcInput {
            profile: &profile,
            tax_year: 2025,
            earned_income: dollars(15_000),
            agi: dollars(27_000),
            investment_income: dollars(12_000),
        };

        let result = earned_income_credit(&input, &params(), &mut diagnostics);

        assert_eq!(result.credit, 0);
        assert!(diagnostics.has_code(codes::EITC_INVESTMENT_INCOME));
    }
}
