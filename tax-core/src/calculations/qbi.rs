//! Qualified business income deduction (§199A, Forms 8995 / 8995-A).
//!
//! Three tiers by taxable income before the deduction:
//!
//! | Tier            | Taxable income      | SSTB           | Non-SSTB               |
//! |-----------------|---------------------|----------------|------------------------|
//! | Below threshold | ≤ threshold         | 20% of QBI     | 20% of QBI             |
//! | Phase-in        | inside the range    | inputs scaled  | wage/UBIA limit phased |
//! | Above range     | ≥ threshold + range | nothing        | min(20% QBI, limit)    |
//!
//! In the phase-in tier an SSTB's QBI, wages and UBIA are scaled down by the
//! applicable percentage before the limits apply.
//!
//! The wage/UBIA limit is the greater of 50% of W-2 wages or 25% of W-2
//! wages plus 2.5% of UBIA. REIT dividends and PTP income always receive a
//! flat 20%. The total is capped at 20% of taxable income less net capital
//! gain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::brackets::phase_in_fraction;
use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{FilingStatus, QbiProfile};
use crate::money::{Cents, format_cents_as_dollars, max0, multiply_cents, sum_cents};
use crate::tables::QbiParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QbiTier {
    BelowThreshold,
    PhaseIn,
    AboveRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QbiComponent {
    pub name: String,
    pub sstb: bool,
    /// QBI after netting losses from other businesses and prior years.
    pub qualified_business_income: Cents,
    pub tentative: Cents,
    pub wage_limit: Cents,
    pub component: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QbiResult {
    pub tier: QbiTier,
    pub businesses: Vec<QbiComponent>,
    pub reit_ptp_component: Cents,
    pub combined: Cents,
    pub income_limit: Cents,
    pub deduction: Cents,
    /// Net qualified business loss carried to next year.
    pub loss_carryforward: Cents,
    pub explanation: String,
}

/// Computes the deduction.
///
/// `taxable_income` is taxable income before the QBI deduction;
/// `net_capital_gain` is qualified dividends plus net long-term gain.
pub fn qbi_deduction(
    qbi: &QbiProfile,
    taxable_income: Cents,
    net_capital_gain: Cents,
    status: FilingStatus,
    params: &QbiParameters,
    diagnostics: &mut Diagnostics,
) -> QbiResult {
    let taxable_income = max0(taxable_income);
    let threshold = params.threshold.get(status);
    let range = params.phase_in_range.get(status);
    let phase_in = phase_in_fraction(taxable_income, threshold, range);
    let tier = if phase_in == Decimal::ZERO {
        QbiTier::BelowThreshold
    } else if phase_in == Decimal::ONE {
        QbiTier::AboveRange
    } else {
        QbiTier::PhaseIn
    };

    let (netted, loss_carryforward) = net_losses(qbi);
    if loss_carryforward > 0 {
        diagnostics.warn(
            codes::QBI_LOSS_CARRYFORWARD,
            Phase::Qbi,
            format!(
                "net qualified business loss of {} carries forward",
                format_cents_as_dollars(loss_carryforward)
            ),
        );
    }

    let mut businesses = Vec::with_capacity(qbi.businesses.len());
    for (business, adjusted_qbi) in qbi.businesses.iter().zip(netted) {
        let component = business_component(
            &business.name,
            business.is_sstb(),
            adjusted_qbi,
            max0(business.w2_wages),
            max0(business.ubia),
            tier,
            phase_in,
            params,
        );
        if business.is_sstb() && tier == QbiTier::AboveRange && adjusted_qbi > 0 {
            diagnostics.warn(
                codes::SSTB_DISALLOWED,
                Phase::Qbi,
                format!(
                    "'{}' is a specified service business above the phase-in range; QBI disallowed",
                    business.name
                ),
            );
        }
        businesses.push(component);
    }

    let reit_ptp_component = multiply_cents(
        max0(qbi.reit_dividends.saturating_add(qbi.ptp_income)),
        params.rate,
    );
    let combined =
        sum_cents(businesses.iter().map(|b| b.component)).saturating_add(reit_ptp_component);
    let income_limit = multiply_cents(
        max0(taxable_income.saturating_sub(max0(net_capital_gain))),
        params.rate,
    );
    let deduction = combined.min(income_limit);

    debug!(?tier, combined, income_limit, deduction, "QBI deduction computed");

    QbiResult {
        tier,
        explanation: format!(
            "{:?}: combined QBI amount {} limited to {} of income",
            tier, combined, income_limit
        ),
        businesses,
        reit_ptp_component,
        combined,
        income_limit,
        deduction,
        loss_carryforward,
    }
}

/// Spreads business losses and the prior-year carryforward across the
/// profitable businesses in proportion to their QBI. Returns each business's
/// adjusted QBI (zero for loss businesses) and any unabsorbed loss.
fn net_losses(qbi: &QbiProfile) -> (Vec<Cents>, Cents) {
    let positive_total =
        sum_cents(qbi.businesses.iter().map(|b| max0(b.qualified_business_income)));
    let loss_total = sum_cents(
        qbi.businesses
            .iter()
            .map(|b| max0(b.qualified_business_income.saturating_neg())),
    )
    .saturating_add(max0(qbi.prior_year_loss_carryforward));

    if loss_total == 0 {
        let adjusted = qbi
            .businesses
            .iter()
            .map(|b| max0(b.qualified_business_income))
            .collect();
        return (adjusted, 0);
    }
    if loss_total >= positive_total {
        return (vec![0; qbi.businesses.len()], loss_total - positive_total);
    }

    let remaining_share = Decimal::ONE - Decimal::from(loss_total) / Decimal::from(positive_total);
    let adjusted = qbi
        .businesses
        .iter()
        .map(|b| multiply_cents(max0(b.qualified_business_income), remaining_share))
        .collect();
    (adjusted, 0)
}

#[allow(clippy::too_many_arguments)]
fn business_component(
    name: &str,
    sstb: bool,
    qbi: Cents,
    w2_wages: Cents,
    ubia: Cents,
    tier: QbiTier,
    phase_in: Decimal,
    params: &QbiParameters,
) -> QbiComponent {
    // SSTBs keep only the applicable percentage of each input in the phase-in.
    let applicable = match (sstb, tier) {
        (true, QbiTier::AboveRange) => Decimal::ZERO,
        (true, QbiTier::PhaseIn) => Decimal::ONE - phase_in,
        _ => Decimal::ONE,
    };
    let qbi = multiply_cents(qbi, applicable);
    let w2_wages = multiply_cents(w2_wages, applicable);
    let ubia = multiply_cents(ubia, applicable);

    let tentative = multiply_cents(qbi, params.rate);
    let wage_limit = multiply_cents(w2_wages, params.wage_rate).max(
        multiply_cents(w2_wages, params.alt_wage_rate)
            .saturating_add(multiply_cents(ubia, params.ubia_rate)),
    );

    let component = match tier {
        QbiTier::BelowThreshold => tentative,
        QbiTier::AboveRange => tentative.min(wage_limit),
        QbiTier::PhaseIn if wage_limit >= tentative => tentative,
        QbiTier::PhaseIn => {
            tentative.saturating_sub(multiply_cents(tentative.saturating_sub(wage_limit), phase_in))
        }
    };

    QbiComponent {
        name: name.to_string(),
        sstb,
        qualified_business_income: qbi,
        tentative,
        wage_limit,
        component: max0(component),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{QbiBusiness, SstbCategory};
    use crate::money::dollars;
    use crate::tables::federal_tables;

    fn params() -> QbiParameters {
        federal_tables(2025).unwrap().qbi.clone()
    }

    fn business(
        qbi: Cents,
        wages: Cents,
        sstb: Option<SstbCategory>,
    ) -> QbiBusiness {
        QbiBusiness {
            name: "shop".to_string(),
            qualified_business_income: qbi,
            w2_wages: wages,
            ubia: 0,
            sstb,
        }
    }

    fn profile(businesses: Vec<QbiBusiness>) -> QbiProfile {
        QbiProfile {
            businesses,
            ..Default::default()
        }
    }

    #[test]
    fn below_threshold_is_twenty_percent_without_wage_test() {
        let mut diagnostics = Diagnostics::new();

        let result = qbi_deduction(
            &profile(vec![business(dollars(50_000), 0, None)]),
            dollars(100_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.tier, QbiTier::BelowThreshold);
        assert_eq!(result.deduction, dollars(10_000));
    }

    #[test]
    fn income_limit_caps_the_deduction() {
        let mut diagnostics = Diagnostics::new();

        let result = qbi_deduction(
            &profile(vec![business(dollars(50_000), 0, None)]),
            dollars(30_000),
            dollars(10_000),
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        // 20% × (30,000 − 10,000)
        assert_eq!(result.deduction, dollars(4_000));
    }

    #[test]
    fn sstb_above_range_is_disallowed() {
        let mut diagnostics = Diagnostics::new();

        let result = qbi_deduction(
            &profile(vec![business(
                dollars(200_000),
                dollars(100_000),
                Some(SstbCategory::Consulting),
            )]),
            dollars(400_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.tier, QbiTier::AboveRange);
        assert_eq!(result.deduction, 0);
        assert!(diagnostics.has_code(codes::SSTB_DISALLOWED));
    }

    #[test]
    fn non_sstb_above_range_is_wage_limited() {
        let mut diagnostics = Diagnostics::new();

        let result = qbi_deduction(
            &profile(vec![business(dollars(200_000), dollars(30_000), None)]),
            dollars(400_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        // min(40,000, 50% × 30,000)
        assert_eq!(result.deduction, dollars(15_000));
    }

    #[test]
    fn ubia_alternative_can_exceed_wage_test() {
        let mut diagnostics = Diagnostics::new();
        let rental = QbiBusiness {
            ubia: dollars(1_000_000),
            ..business(dollars(200_000), dollars(10_000), None)
        };

        let result = qbi_deduction(
            &profile(vec![rental]),
            dollars(400_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        // max(5,000, 2,500 + 25,000) = 27,500
        assert_eq!(result.businesses[0].wage_limit, dollars(27_500));
        assert_eq!(result.deduction, dollars(27_500));
    }

    #[test]
    fn non_sstb_phase_in_reduces_excess_proportionally() {
        let mut diagnostics = Diagnostics::new();

        // Halfway through the 197,300-247,300 range.
        let result = qbi_deduction(
            &profile(vec![business(dollars(100_000), 0, None)]),
            dollars(222_300),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        // tentative 20,000, wage limit 0, reduction 50% of 20,000
        assert_eq!(result.tier, QbiTier::PhaseIn);
        assert_eq!(result.deduction, dollars(10_000));
    }

    #[test]
    fn sstb_phase_in_scales_income() {
        let mut diagnostics = Diagnostics::new();

        let result = qbi_deduction(
            &profile(vec![business(dollars(100_000), dollars(100_000), Some(SstbCategory::Law))]),
            dollars(222_300),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        // applicable 50%: QBI 50,000, wages 50,000 → tentative 10,000, limit 25,000
        assert_eq!(result.businesses[0].qualified_business_income, dollars(50_000));
        assert_eq!(result.deduction, dollars(10_000));
    }

    #[test]
    fn reit_dividends_get_flat_twenty_percent() {
        let mut diagnostics = Diagnostics::new();
        let qbi = QbiProfile {
            reit_dividends: dollars(5_000),
            ..Default::default()
        };

        let result = qbi_deduction(
            &qbi,
            dollars(500_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.deduction, dollars(1_000));
    }

    #[test]
    fn losses_net_against_profitable_businesses() {
        let mut diagnostics = Diagnostics::new();
        let qbi = QbiProfile {
            businesses: vec![
                business(dollars(60_000), 0, None),
                business(dollars(-20_000), 0, None),
            ],
            prior_year_loss_carryforward: dollars(10_000),
            ..Default::default()
        };

        let result = qbi_deduction(
            &qbi,
            dollars(100_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.businesses[0].qualified_business_income, dollars(30_000));
        assert_eq!(result.deduction, dollars(6_000));
    }

    #[test]
    fn net_loss_carries_forward() {
        let mut diagnostics = Diagnostics::new();

        let result = qbi_deduction(
            &profile(vec![business(dollars(10_000), 0, None), business(dollars(-25_000), 0, None)]),
            dollars(100_000),
            0,
            FilingStatus::Single,
            &params(),
            &mut diagnostics,
        );

        assert_eq!(result.deduction, 0);
        assert_eq!(result.loss_carryforward, dollars(15_000));
        assert!(diagnostics.has_code(codes::QBI_LOSS_CARRYFORWARD));
    }
}
