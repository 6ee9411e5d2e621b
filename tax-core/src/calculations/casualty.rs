//! Form 4684 personal casualty and theft losses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::CasualtyEvent;
use crate::money::{Cents, max0, multiply_cents, sum_cents};
use crate::tables::ItemizedLimits;

/// First tax year in which only federally declared disaster losses count.
pub const DISASTER_ONLY_FROM_YEAR: i32 = 2018;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasualtyEventLoss {
    pub description: String,
    pub qualifies: bool,
    /// Smaller of decrease in value or basis, less reimbursement.
    pub loss: Cents,
    /// `loss` after the per-event floor.
    pub loss_after_event_floor: Cents,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasualtyLossResult {
    pub events: Vec<CasualtyEventLoss>,
    pub total_after_event_floors: Cents,
    pub agi_floor: Cents,
    /// Amount that flows to Schedule A.
    pub deductible_loss: Cents,
    pub explanation: String,
}

/// Per-event loss, per-event floor, then the AGI floor on the total.
pub fn casualty_loss(
    events: &[CasualtyEvent],
    agi: Cents,
    tax_year: i32,
    limits: &ItemizedLimits,
    diagnostics: &mut Diagnostics,
) -> CasualtyLossResult {
    if events.is_empty() {
        return CasualtyLossResult {
            explanation: "no casualty events".to_string(),
            ..Default::default()
        };
    }

    let disaster_only = tax_year >= DISASTER_ONLY_FROM_YEAR;
    let mut losses = Vec::with_capacity(events.len());
    for event in events {
        let qualifies = !disaster_only || event.federal_disaster_declaration.is_some();
        if !qualifies {
            diagnostics.warn(
                codes::CASUALTY_NOT_DECLARED,
                Phase::Deductions,
                format!(
                    "casualty '{}' is not in a federally declared disaster area; not deductible",
                    event.description
                ),
            );
        }
        let loss = max0(
            event
                .decrease_in_fair_value()
                .min(max0(event.adjusted_basis))
                - max0(event.reimbursement),
        );
        let after_floor = if qualifies {
            max0(loss - limits.casualty_per_event_floor)
        } else {
            0
        };
        losses.push(CasualtyEventLoss {
            description: event.description.clone(),
            qualifies,
            loss,
            loss_after_event_floor: after_floor,
        });
    }

    let total = sum_cents(losses.iter().map(|l| l.loss_after_event_floor));
    let agi_floor = multiply_cents(max0(agi), limits.casualty_agi_floor_rate);
    let deductible_loss = max0(total - agi_floor);

    debug!(total, agi_floor, deductible_loss, "casualty losses computed");

    CasualtyLossResult {
        explanation: format!(
            "{} of {} events qualify; {} after per-event floors less {} AGI floor",
            losses.iter().filter(|l| l.qualifies).count(),
            losses.len(),
            total,
            agi_floor
        ),
        events: losses,
        total_after_event_floors: total,
        agi_floor,
        deductible_loss,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::money::dollars;
    use crate::tables::federal_tables;

    fn limits() -> ItemizedLimits {
        federal_tables(2025).unwrap().itemized.clone()
    }

    fn event(declaration: Option<&str>) -> CasualtyEvent {
        CasualtyEvent {
            description: "flooded basement".to_string(),
            fair_value_before: dollars(300_000),
            fair_value_after: dollars(260_000),
            adjusted_basis: dollars(250_000),
            reimbursement: dollars(10_000),
            federal_disaster_declaration: declaration.map(str::to_string),
        }
    }

    #[test]
    fn declared_disaster_loss_after_both_floors() {
        let mut diagnostics = Diagnostics::new();

        let result = casualty_loss(
            &[event(Some("DR-4673"))],
            dollars(100_000),
            2025,
            &limits(),
            &mut diagnostics,
        );

        // 40,000 − 10,000 − 100 = 29,900; less 10,000 AGI floor
        assert_eq!(result.total_after_event_floors, dollars(29_900));
        assert_eq!(result.agi_floor, dollars(10_000));
        assert_eq!(result.deductible_loss, dollars(19_900));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn undeclared_loss_is_excluded_after_2017() {
        let mut diagnostics = Diagnostics::new();

        let result =
            casualty_loss(&[event(None)], dollars(100_000), 2025, &limits(), &mut diagnostics);

        assert_eq!(result.deductible_loss, 0);
        assert!(diagnostics.has_code(codes::CASUALTY_NOT_DECLARED));
    }

    #[test]
    fn undeclared_loss_counts_before_2018() {
        let mut diagnostics = Diagnostics::new();

        let result =
            casualty_loss(&[event(None)], dollars(100_000), 2017, &limits(), &mut diagnostics);

        assert_eq!(result.deductible_loss, dollars(19_900));
    }

    #[test]
    fn basis_caps_the_loss() {
        let mut diagnostics = Diagnostics::new();
        let small_basis = CasualtyEvent {
            adjusted_basis: dollars(5_000),
            reimbursement: 0,
            ..event(Some("DR-1"))
        };

        let result = casualty_loss(&[small_basis], 0, 2025, &limits(), &mut diagnostics);

        assert_eq!(result.events[0].loss, dollars(5_000));
        assert_eq!(result.deductible_loss, dollars(4_900));
    }

    #[test]
    fn agi_floor_can_eliminate_loss() {
        let mut diagnostics = Diagnostics::new();

        let result = casualty_loss(
            &[event(Some("DR-2"))],
            dollars(1_000_000),
            2025,
            &limits(),
            &mut diagnostics,
        );

        assert_eq!(result.deductible_loss, 0);
    }
}
