//! Maryland: progressive state brackets, a percentage standard deduction
//! with a floor and ceiling, income-tiered exemptions and a county income
//! tax on the same taxable income.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{StateCalculator, StateComputation, StateInput};
use crate::calculations::{DeductionType, tax_from_brackets};
use crate::diagnostics::{Phase, codes};
use crate::models::{FilingStatus, TaxBracket, schedule};
use crate::money::{Cents, dollars, format_cents_as_dollars, max0, multiply_cents};
use crate::results::{StateDeductionType, StateResult};

const STANDARD_DEDUCTION_RATE: Decimal = dec!(0.15);
const EXEMPTION: Cents = dollars(3_200);
const AGE_OR_BLIND_EXEMPTION: Cents = dollars(1_000);

/// Rate for a county that is missing or not listed.
const NONRESIDENT_COUNTY_RATE: Decimal = dec!(0.0225);

const COUNTY_RATES: [(&str, Decimal); 8] = [
    ("anne arundel", dec!(0.0281)),
    ("baltimore city", dec!(0.032)),
    ("baltimore county", dec!(0.032)),
    ("frederick", dec!(0.0296)),
    ("howard", dec!(0.032)),
    ("montgomery", dec!(0.032)),
    ("prince george's", dec!(0.032)),
    ("worcester", dec!(0.0225)),
];

#[derive(Debug, Clone, Copy)]
pub struct MarylandCalculator {
    tax_year: i32,
}

impl MarylandCalculator {
    pub fn new(tax_year: i32) -> Self {
        Self { tax_year }
    }
}

fn joint_schedule(status: FilingStatus) -> bool {
    matches!(status, FilingStatus::MarriedJointly | FilingStatus::HeadOfHousehold)
}

fn brackets(status: FilingStatus) -> Vec<TaxBracket> {
    let shared = [
        (dollars(1_000), dec!(0.02)),
        (dollars(2_000), dec!(0.03)),
        (dollars(3_000), dec!(0.04)),
    ];
    let upper: &[(Cents, Decimal)] = if joint_schedule(status) {
        &[
            (dollars(150_000), dec!(0.0475)),
            (dollars(175_000), dec!(0.05)),
            (dollars(225_000), dec!(0.0525)),
            (dollars(300_000), dec!(0.055)),
            (0, dec!(0.0575)),
        ]
    } else {
        &[
            (dollars(100_000), dec!(0.0475)),
            (dollars(125_000), dec!(0.05)),
            (dollars(150_000), dec!(0.0525)),
            (dollars(250_000), dec!(0.055)),
            (0, dec!(0.0575)),
        ]
    };
    let bands: Vec<_> = shared.iter().chain(upper).copied().collect();
    schedule(&bands)
}

/// 15% of Maryland AGI, clamped to the status floor and ceiling.
fn standard_deduction(
    state_agi: Cents,
    status: FilingStatus,
) -> Cents {
    let (floor, ceiling) = if joint_schedule(status) {
        (dollars(3_650), dollars(5_450))
    } else {
        (dollars(1_800), dollars(2_700))
    };
    multiply_cents(max0(state_agi), STANDARD_DEDUCTION_RATE).clamp(floor, ceiling)
}

/// Personal exemption amount for federal AGI; zero above the top tier.
fn exemption_amount(
    federal_agi: Cents,
    status: FilingStatus,
) -> Cents {
    let tiers = if joint_schedule(status) {
        [dollars(150_000), dollars(175_000), dollars(200_000)]
    } else {
        [dollars(100_000), dollars(125_000), dollars(150_000)]
    };
    let amounts = [EXEMPTION, EXEMPTION / 2, EXEMPTION / 4];
    tiers
        .iter()
        .zip(amounts)
        .find(|(limit, _)| federal_agi <= **limit)
        .map_or(0, |(_, amount)| amount)
}

/// County rate by name, accepting an optional trailing "County".
pub fn county_rate(county: &str) -> Option<Decimal> {
    let key = county.trim().to_ascii_lowercase();
    let lookup = |name: &str| {
        COUNTY_RATES
            .iter()
            .find(|(county, _)| *county == name)
            .map(|(_, rate)| *rate)
    };
    lookup(&key).or_else(|| key.strip_suffix(" county").and_then(lookup))
}

impl StateCalculator for MarylandCalculator {
    fn state_code(&self) -> &str {
        "MD"
    }

    fn tax_year(&self) -> i32 {
        self.tax_year
    }

    fn calculate(
        &self,
        input: &StateInput<'_>,
    ) -> StateResult {
        let status = input.status();
        let year = input.tax_year();
        let federal = input.federal;
        let profile = &input.tax_return.profile;
        let mut computation = StateComputation::new(federal.agi);

        let standard = standard_deduction(computation.state_agi, status);
        let itemized = if federal.deduction.deduction_type == DeductionType::Itemized {
            input.itemized_less_income_tax()
        } else {
            0
        };
        (computation.deduction_type, computation.state_deduction) = if itemized > standard {
            (StateDeductionType::Itemized, itemized)
        } else {
            (StateDeductionType::Standard, standard)
        };

        let per_exemption = exemption_amount(federal.agi, status);
        if per_exemption == 0 {
            computation.diagnostics.warn(
                codes::STATE_EXEMPTIONS_ZEROED,
                Phase::State,
                format!(
                    "MD personal exemptions are not allowed at federal AGI of {}",
                    format_cents_as_dollars(federal.agi)
                ),
            );
        }
        let filers: Vec<_> = std::iter::once(&profile.primary)
            .chain(profile.joint_spouse())
            .collect();
        let age_or_blind = filers
            .iter()
            .map(|p| i64::from(p.is_65_or_older(year)) + i64::from(p.is_blind))
            .sum::<i64>();
        computation.exemptions = per_exemption
            .saturating_mul(input.exemption_count())
            .saturating_add(AGE_OR_BLIND_EXEMPTION.saturating_mul(age_or_blind));

        computation.taxable_income = max0(
            computation
                .state_agi
                .saturating_sub(computation.state_deduction)
                .saturating_sub(computation.exemptions),
        );
        computation.income_tax = tax_from_brackets(computation.taxable_income, &brackets(status));

        let county = profile.location.county.as_deref();
        let local_rate = match county.map(|c| (c, county_rate(c))) {
            Some((_, Some(rate))) => rate,
            Some((name, None)) => {
                computation.diagnostics.warn(
                    codes::UNKNOWN_COUNTY,
                    Phase::State,
                    format!("unknown MD county '{name}'; using {NONRESIDENT_COUNTY_RATE}"),
                );
                NONRESIDENT_COUNTY_RATE
            }
            None => {
                computation.diagnostics.warn(
                    codes::LOCAL_RATE_MISSING,
                    Phase::State,
                    format!("no MD county on the return; using {NONRESIDENT_COUNTY_RATE}"),
                );
                NONRESIDENT_COUNTY_RATE
            }
        };
        computation.local_tax = multiply_cents(computation.taxable_income, local_rate);
        debug!(%local_rate, local_tax = computation.local_tax, "MD county tax");

        computation.finish("MD", self.tax_year, input)
    }
}
