//! Foreign tax credit (Form 1116).
//!
//! Filers with only passive foreign income and foreign tax at or under the
//! simplified-election limit claim the tax paid directly. Everyone else is
//! limited per income category to
//! `US tax × foreign-source taxable income / total taxable income`. Prior
//! carryovers are absorbed before current-year tax, and whatever the
//! limitation leaves unused carries forward.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{ForeignIncomeCategory, ForeignIncomeSource, ForeignTaxCarryover};
use crate::money::{Cents, format_cents_as_dollars, max0, multiply_cents, ratio, sum_cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FtcMethod {
    None,
    SimplifiedElection,
    Limitation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtcCategoryResult {
    pub category: ForeignIncomeCategory,
    pub foreign_taxable_income: Cents,
    pub foreign_tax_paid: Cents,
    pub carryover_in: Cents,
    pub limitation: Cents,
    pub credit: Cents,
    pub carryover_out: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignTaxCreditResult {
    pub method: FtcMethod,
    pub categories: Vec<FtcCategoryResult>,
    pub credit: Cents,
    pub carryovers: Vec<ForeignTaxCarryover>,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy)]
pub struct FtcInput<'a> {
    pub sources: &'a [ForeignIncomeSource],
    pub carryovers: &'a [ForeignTaxCarryover],
    /// Regular tax before credits.
    pub us_tax: Cents,
    pub taxable_income: Cents,
    /// Tax left after earlier nonrefundable credits.
    pub tax_available: Cents,
    pub simplified_limit: Cents,
}

#[derive(Default)]
struct CategoryTotals {
    income: Cents,
    tax: Cents,
    carryover: Cents,
}

pub fn foreign_tax_credit(
    input: &FtcInput<'_>,
    diagnostics: &mut Diagnostics,
) -> ForeignTaxCreditResult {
    let mut totals: BTreeMap<ForeignIncomeCategory, CategoryTotals> = BTreeMap::new();
    for source in input.sources {
        let entry = totals.entry(source.category).or_default();
        entry.income = entry
            .income
            .saturating_add(source.gross_income.saturating_sub(source.allocable_expenses));
        entry.tax = entry.tax.saturating_add(max0(source.foreign_tax_paid));
    }
    for carryover in input.carryovers {
        let entry = totals.entry(carryover.category).or_default();
        entry.carryover = entry.carryover.saturating_add(max0(carryover.amount));
    }

    let current_tax = sum_cents(totals.values().map(|t| t.tax));
    if totals.is_empty() {
        return ForeignTaxCreditResult {
            method: FtcMethod::None,
            categories: Vec::new(),
            credit: 0,
            carryovers: Vec::new(),
            explanation: "no foreign income or carryovers".to_string(),
        };
    }

    let passive_only = !input.sources.is_empty()
        && input
            .sources
            .iter()
            .all(|s| s.category == ForeignIncomeCategory::Passive);
    if passive_only && current_tax <= input.simplified_limit {
        let credit = current_tax.min(max0(input.tax_available));
        debug!(credit, "foreign tax credit by simplified election");
        return ForeignTaxCreditResult {
            method: FtcMethod::SimplifiedElection,
            categories: Vec::new(),
            credit,
            carryovers: input.carryovers.to_vec(),
            explanation: format!(
                "passive foreign tax of {} is within the {} simplified election limit",
                current_tax, input.simplified_limit
            ),
        };
    }

    let mut categories = Vec::with_capacity(totals.len());
    for (category, t) in &totals {
        let foreign_taxable_income = max0(t.income);
        let share = ratio(foreign_taxable_income, max0(input.taxable_income)).min(Decimal::ONE);
        let limitation = multiply_cents(max0(input.us_tax), share);
        let from_carryover = t.carryover.min(limitation);
        let from_current = t.tax.min(limitation - from_carryover);
        categories.push(FtcCategoryResult {
            category: *category,
            foreign_taxable_income,
            foreign_tax_paid: t.tax,
            carryover_in: t.carryover,
            limitation,
            credit: from_carryover.saturating_add(from_current),
            carryover_out: (t.carryover - from_carryover).saturating_add(t.tax - from_current),
        });
    }

    // The credit is nonrefundable; anything the remaining tax cannot absorb
    // goes back into the carryovers, last category first.
    let limited_total = sum_cents(categories.iter().map(|c| c.credit));
    let mut excess = max0(limited_total - max0(input.tax_available));
    for category in categories.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let moved = category.credit.min(excess);
        category.credit -= moved;
        category.carryover_out = category.carryover_out.saturating_add(moved);
        excess -= moved;
    }
    let credit = sum_cents(categories.iter().map(|c| c.credit));

    let carryovers: Vec<ForeignTaxCarryover> = categories
        .iter()
        .filter(|c| c.carryover_out > 0)
        .map(|c| ForeignTaxCarryover {
            category: c.category,
            amount: c.carryover_out,
        })
        .collect();
    let carried = sum_cents(carryovers.iter().map(|c| c.amount));
    if carried > 0 {
        diagnostics.warn(
            codes::FTC_CARRYOVER,
            Phase::Credits,
            format!(
                "{} of foreign tax exceeds the limitation and carries forward",
                format_cents_as_dollars(carried)
            ),
        );
    }

    debug!(credit, carried, "foreign tax credit by category limitation");

    ForeignTaxCreditResult {
        method: FtcMethod::Limitation,
        explanation: format!(
            "limitation across {} categories allows {}; {} carries forward",
            categories.len(),
            credit,
            carried
        ),
        categories,
        credit,
        carryovers,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::money::dollars;

    fn source(
        category: ForeignIncomeCategory,
        income: Cents,
        tax: Cents,
    ) -> ForeignIncomeSource {
        ForeignIncomeSource {
            country: "CA".to_string(),
            category,
            gross_income: income,
            foreign_tax_paid: tax,
            allocable_expenses: 0,
        }
    }

    fn input<'a>(
        sources: &'a [ForeignIncomeSource],
        carryovers: &'a [ForeignTaxCarryover],
    ) -> FtcInput<'a> {
        FtcInput {
            sources,
            carryovers,
            us_tax: dollars(20_000),
            taxable_income: dollars(100_000),
            tax_available: dollars(20_000),
            simplified_limit: dollars(300),
        }
    }

    #[test]
    fn small_passive_tax_uses_simplified_election() {
        let mut diagnostics = Diagnostics::new();
        let sources = [source(ForeignIncomeCategory::Passive, dollars(2_000), dollars(250))];

        let result = foreign_tax_credit(&input(&sources, &[]), &mut diagnostics);

        assert_eq!(result.method, FtcMethod::SimplifiedElection);
        assert_eq!(result.credit, dollars(250));
    }

    #[test]
    fn general_income_uses_limitation() {
        let mut diagnostics = Diagnostics::new();
        let sources = [source(ForeignIncomeCategory::General, dollars(10_000), dollars(3_000))];

        let result = foreign_tax_credit(&input(&sources, &[]), &mut diagnostics);

        // 20,000 × 10,000 / 100,000 = 2,000
        assert_eq!(result.method, FtcMethod::Limitation);
        assert_eq!(result.credit, dollars(2_000));
        assert_eq!(
            result.carryovers,
            vec![ForeignTaxCarryover {
                category: ForeignIncomeCategory::General,
                amount: dollars(1_000),
            }]
        );
        assert!(diagnostics.has_code(codes::FTC_CARRYOVER));
    }

    #[test]
    fn carryover_is_used_before_current_tax() {
        let mut diagnostics = Diagnostics::new();
        let sources = [source(ForeignIncomeCategory::General, dollars(10_000), dollars(1_500))];
        let carryovers = [ForeignTaxCarryover {
            category: ForeignIncomeCategory::General,
            amount: dollars(800),
        }];

        let result = foreign_tax_credit(&input(&sources, &carryovers), &mut diagnostics);

        let general = &result.categories[0];
        assert_eq!(general.credit, dollars(2_000));
        // 800 carryover + 1,200 current used; 300 current left over
        assert_eq!(general.carryover_out, dollars(300));
    }

    #[test]
    fn categories_are_limited_separately() {
        let mut diagnostics = Diagnostics::new();
        let sources = [
            source(ForeignIncomeCategory::General, dollars(10_000), dollars(500)),
            source(ForeignIncomeCategory::Passive, dollars(5_000), dollars(2_000)),
        ];

        let result = foreign_tax_credit(&input(&sources, &[]), &mut diagnostics);

        // general: limit 2,000, credit 500; passive: limit 1,000, credit 1,000
        assert_eq!(result.credit, dollars(1_500));
        assert_eq!(result.carryovers.len(), 1);
        assert_eq!(result.carryovers[0].category, ForeignIncomeCategory::Passive);
    }

    #[test]
    fn credit_cannot_exceed_remaining_tax() {
        let mut diagnostics = Diagnostics::new();
        let sources = [source(ForeignIncomeCategory::General, dollars(10_000), dollars(2_000))];
        let mut input = input(&sources, &[]);
        input.tax_available = dollars(500);

        let result = foreign_tax_credit(&input, &mut diagnostics);

        assert_eq!(result.credit, dollars(500));
        assert_eq!(result.carryovers[0].amount, dollars(1_500));
    }
}
