//! The federal pipeline (Form 1040).
//!
//! [`calculate_federal`] runs every federal step in a fixed order and
//! returns a [`FederalResult`] with each intermediate worksheet attached.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Schedule SE: SE tax and the half-SE-tax adjustment |
//! | 2    | Total income (capital loss limited), adjustments, AGI |
//! | 3    | Casualty loss, Schedule A, standard deduction, and the choice between them |
//! | 4    | NOL deduction against AGI less the deduction |
//! | 5    | QBI deduction |
//! | 6    | Taxable income (AGI − deduction − NOL − QBI, minimum 0) |
//! | 7    | Income tax with the qualified dividends and capital gain worksheet |
//! | 8    | Additional taxes: SE tax, Additional Medicare, NIIT, AMT |
//! | 9    | Credits: EITC, then CTC/ODC/ACTC, then AOTC/LLC, then FTC |
//! | 10   | Tax after nonrefundable credits plus additional taxes |
//! | 11   | Payments (withholding, estimated, refundable credits) and refund or amount owed |
//!
//! Nonrefundable credits are applied in the order above, each limited to the
//! tax left by the ones before it.
//!
//! # Example
//!
//! ```
//! use tax_core::{FilingStatus, TaxReturn, calculate_federal};
//! use tax_core::calculations::DeductionType;
//! use tax_core::money::dollars;
//!
//! let mut tax_return = TaxReturn::new(2025, FilingStatus::Single);
//! tax_return.income.wages = dollars(50_000);
//!
//! let result = calculate_federal(&tax_return);
//!
//! assert_eq!(result.deduction.deduction_type, DeductionType::Standard);
//! assert_eq!(result.taxable_income, dollars(35_000));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculations::additional_taxes::{additional_medicare_tax, net_investment_income_tax};
use crate::calculations::amt::{AmtInput, alternative_minimum_tax};
use crate::calculations::brackets::marginal_rate;
use crate::calculations::capital_gains::{PreferentialBands, income_tax};
use crate::calculations::casualty::casualty_loss;
use crate::calculations::ctc::child_tax_credit;
use crate::calculations::deductions::{
    DeductionType, choose_deduction, itemized_deductions, standard_deduction,
};
use crate::calculations::education::choose_education_credit;
use crate::calculations::eitc::{EitcInput, earned_income_credit};
use crate::calculations::foreign_tax::{FtcInput, foreign_tax_credit};
use crate::calculations::nol::apply_nol;
use crate::calculations::qbi::qbi_deduction;
use crate::calculations::self_employment::SeWorksheet;
use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{FilingStatus, IncomeProfile, TaxReturn};
use crate::money::{Cents, add_cents, format_cents_as_dollars, max0, ratio};
use crate::results::{
    AdditionalTaxBreakdown, AdjustmentBreakdown, CreditBreakdown, FederalResult,
    FederalWorksheets, IncomeBreakdown, PaymentBreakdown,
};
use crate::tables::{FederalTables, resolve_federal_tables};

/// Capital gain or loss allowed in total income, and the loss carried
/// forward past the annual limit.
fn limited_capital_gain(
    income: &IncomeProfile,
    status: FilingStatus,
    tables: &FederalTables,
    diagnostics: &mut Diagnostics,
) -> (Cents, Cents) {
    let net = income.net_capital_gain_or_loss();
    let limit = tables.capital_loss_limit.get(status);
    if net >= -limit {
        return (net, 0);
    }
    let carryforward = net.saturating_neg().saturating_sub(limit);
    diagnostics.warn(
        codes::CAPITAL_LOSS_LIMITED,
        Phase::Agi,
        format!(
            "capital loss limited to {}; {} carries forward",
            format_cents_as_dollars(limit),
            format_cents_as_dollars(carryforward)
        ),
    );
    (-limit, carryforward)
}

/// Returns a copy of the return with negative amounts that can only be
/// positive clamped to zero, recording an error for each.
fn clamp_negative_inputs(
    tax_return: &TaxReturn,
    diagnostics: &mut Diagnostics,
) -> TaxReturn {
    let mut clamped = tax_return.clone();
    let mut clamp = |value: &mut Cents, field: &str| {
        if *value < 0 {
            diagnostics.error(
                codes::NEGATIVE_AMOUNT_CLAMPED,
                Phase::InputValidation,
                format!(
                    "{field} of {} cannot be negative; using 0",
                    format_cents_as_dollars(*value)
                ),
            );
            *value = 0;
        }
    };

    let income = &mut clamped.income;
    clamp(&mut income.wages, "wages");
    clamp(&mut income.taxable_interest, "taxable interest");
    clamp(&mut income.ordinary_dividends, "ordinary dividends");
    clamp(&mut income.qualified_dividends, "qualified dividends");
    clamp(&mut income.retirement.primary, "retirement income");
    clamp(&mut income.retirement.spouse, "spouse retirement income");
    clamp(&mut income.unemployment_compensation, "unemployment compensation");

    let adjustments = &mut clamped.adjustments;
    clamp(&mut adjustments.hsa_deduction, "HSA deduction");
    clamp(&mut adjustments.ira_deduction, "IRA deduction");
    clamp(&mut adjustments.student_loan_interest, "student loan interest");
    clamp(&mut adjustments.educator_expenses, "educator expenses");
    clamp(&mut adjustments.self_employed_health_insurance, "self-employed health insurance");
    clamp(&mut adjustments.other_adjustments, "other adjustments");

    let itemized = &mut clamped.itemized;
    clamp(&mut itemized.state_and_local_income_tax, "state and local income tax");
    clamp(&mut itemized.real_estate_tax, "real estate tax");
    clamp(&mut itemized.personal_property_tax, "personal property tax");
    clamp(&mut itemized.mortgage_interest, "mortgage interest");
    clamp(&mut itemized.charitable_contributions, "charitable contributions");
    clamp(&mut itemized.medical_expenses, "medical expenses");
    clamp(&mut itemized.other_itemized, "other itemized deductions");

    let payments = &mut clamped.payments;
    clamp(&mut payments.federal_withholding, "federal withholding");
    clamp(&mut payments.estimated_payments, "estimated payments");
    clamp(&mut payments.state_withholding, "state withholding");
    clamp(&mut payments.state_estimated_payments, "state estimated payments");

    // Qualified dividends are a subset of ordinary dividends.
    clamped.income.qualified_dividends = clamped
        .income
        .qualified_dividends
        .min(clamped.income.ordinary_dividends);
    clamped
}

/// Runs the full federal pipeline for one return.
///
/// Never fails: an unsupported year falls back to the nearest tables and
/// every policy limit that applies is recorded in the result's diagnostics.
/// The input is not modified; carryforwards come back as new lists.
pub fn calculate_federal(tax_return: &TaxReturn) -> FederalResult {
    let mut diagnostics = Diagnostics::new();
    let resolved = resolve_federal_tables(tax_return.tax_year);
    if resolved.substituted() {
        diagnostics.error(
            codes::UNSUPPORTED_TAX_YEAR,
            Phase::InputValidation,
            format!(
                "no federal tables for {}; using {} tables",
                tax_return.tax_year, resolved.tables.tax_year
            ),
        );
    }
    let tables = resolved.tables;
    if let Err(err) = tables.validate() {
        diagnostics.error(codes::INVALID_TABLES, Phase::InputValidation, err.to_string());
    }
    let r = clamp_negative_inputs(tax_return, &mut diagnostics);
    let year = r.tax_year;
    let status = r.filing_status();
    let income = &r.income;

    // Step 1
    let se_income = income
        .business_income
        .saturating_add(income.k1.self_employment_earnings());
    if se_income < 0 {
        diagnostics.warn(
            codes::SE_LOSS,
            Phase::SelfEmployment,
            format!(
                "net self-employment loss of {}; no self-employment tax",
                format_cents_as_dollars(se_income)
            ),
        );
    }
    let se = SeWorksheet::new(&tables.self_employment).calculate(se_income, income.wages);

    // Step 2
    let (capital_gain_or_loss, capital_loss_carryforward) =
        limited_capital_gain(income, status, tables, &mut diagnostics);
    let income_breakdown = IncomeBreakdown {
        wages: income.wages,
        taxable_interest: income.taxable_interest,
        ordinary_dividends: income.ordinary_dividends,
        business_income: income.business_income,
        partnership_income: income.k1.total(),
        capital_gain_or_loss,
        retirement_income: income.retirement.total(),
        unemployment_compensation: income.unemployment_compensation,
        other_income: income.other_income_total(),
        total_income: add_cents(&[
            income.wages,
            income.taxable_interest,
            income.ordinary_dividends,
            income.business_income,
            income.k1.total(),
            capital_gain_or_loss,
            income.retirement.total(),
            income.unemployment_compensation,
            income.other_income_total(),
        ]),
    };

    let a = &r.adjustments;
    let adjustments = AdjustmentBreakdown {
        se_tax_deduction: se.se_tax_deduction,
        hsa_deduction: a.hsa_deduction,
        ira_deduction: a.ira_deduction,
        student_loan_interest: a.student_loan_interest,
        educator_expenses: a.educator_expenses,
        self_employed_health_insurance: a.self_employed_health_insurance,
        other_adjustments: a.other_adjustments,
        total: se.se_tax_deduction.saturating_add(a.total()),
    };

    let agi = income_breakdown.total_income.saturating_sub(adjustments.total);
    if agi < 0 {
        diagnostics.warn(
            codes::NEGATIVE_AGI,
            Phase::Agi,
            format!("AGI is negative ({})", format_cents_as_dollars(agi)),
        );
    }
    let earned_income = max0(income.earned_income().saturating_sub(se.se_tax_deduction));

    // Step 3
    let casualty = casualty_loss(&r.casualty_events, agi, year, &tables.itemized, &mut diagnostics);
    let itemized = itemized_deductions(
        &r.itemized,
        agi,
        casualty.deductible_loss,
        status,
        &tables.itemized,
        &mut diagnostics,
    );
    let standard = standard_deduction(tables, &r.profile, year, earned_income);
    let spouse_itemizes_mfs =
        status == FilingStatus::MarriedSeparately && r.options.spouse_itemizes;
    let deduction = choose_deduction(
        standard.amount,
        itemized.total,
        r.options.deduction_preference,
        spouse_itemizes_mfs,
        &mut diagnostics,
    );

    // Step 4
    let business_loss = income
        .business_income
        .saturating_add(income.k1.ordinary_business_income);
    let nol = apply_nol(
        &r.nol_carryforwards,
        max0(agi.saturating_sub(deduction.amount)),
        agi,
        business_loss,
        year,
        &mut diagnostics,
    );

    // Step 5
    let taxable_before_qbi = max0(
        agi.saturating_sub(deduction.amount)
            .saturating_sub(nol.deduction),
    );
    let preferential_income = income
        .qualified_dividends
        .saturating_add(income.preferential_capital_gain());
    let qbi = qbi_deduction(
        &r.qbi,
        taxable_before_qbi,
        preferential_income,
        status,
        &tables.qbi,
        &mut diagnostics,
    );

    // Step 6
    let taxable_income = max0(taxable_before_qbi - qbi.deduction);

    // Step 7
    let brackets = tables.brackets.get_ref(status);
    let bands = PreferentialBands::for_status(&tables.capital_gains, status);
    let income_tax = income_tax(taxable_income, preferential_income, brackets, &bands);
    let tax_before_credits = income_tax.tax;

    // Step 8
    let additional_medicare =
        additional_medicare_tax(income.wages, se.net_earnings, status, &tables.additional_medicare);
    let investment_income = add_cents(&[
        income.taxable_interest,
        income.ordinary_dividends,
        income.k1.interest,
        income.k1.dividends,
        income.k1.net_rental_income,
        capital_gain_or_loss,
    ]);
    let net_investment_income = net_investment_income_tax(
        investment_income,
        agi,
        status,
        &tables.net_investment_income,
    );
    let salt_addback = match deduction.deduction_type {
        DeductionType::Itemized => itemized.salt_deducted,
        DeductionType::Standard => 0,
    };
    let amt = alternative_minimum_tax(
        &AmtInput {
            taxable_income,
            salt_addback,
            preferential_income,
            regular_tax: tax_before_credits,
            status,
        },
        &tables.amt,
        &bands,
        r.options.amt_mode,
        &mut diagnostics,
    );
    let additional_taxes = AdditionalTaxBreakdown::new(
        se.self_employment_tax,
        additional_medicare.tax,
        net_investment_income.tax,
        amt.amt,
    );

    // Step 9
    let eitc = earned_income_credit(
        &EitcInput {
            profile: &r.profile,
            tax_year: year,
            earned_income,
            agi,
            investment_income: max0(investment_income.saturating_sub(income.k1.net_rental_income)),
        },
        &tables.eitc,
        &mut diagnostics,
    );

    let mut tax_available = tax_before_credits;
    let ctc = child_tax_credit(
        &r.profile,
        year,
        agi,
        earned_income,
        tax_available,
        &tables.child_tax_credit,
    );
    tax_available -= ctc.nonrefundable;

    let education = choose_education_credit(
        &r.education,
        agi,
        status,
        tax_available,
        &tables.education,
        &mut diagnostics,
    );
    tax_available -= education.credit.nonrefundable();

    let foreign_tax = foreign_tax_credit(
        &FtcInput {
            sources: &r.foreign_income,
            carryovers: &r.foreign_tax_carryovers,
            us_tax: tax_before_credits,
            taxable_income,
            tax_available,
            simplified_limit: tables.ftc_simplified_limit.get(status),
        },
        &mut diagnostics,
    );

    let credits = CreditBreakdown {
        earned_income_credit: eitc.credit,
        child_tax_credit: ctc.nonrefundable,
        additional_child_tax_credit: ctc.refundable,
        education: education.credit,
        american_opportunity_credit: education.credit.aotc(),
        lifetime_learning_credit: education.credit.llc(),
        foreign_tax_credit: foreign_tax.credit,
        total_nonrefundable: add_cents(&[
            ctc.nonrefundable,
            education.credit.nonrefundable(),
            foreign_tax.credit,
        ]),
        total_refundable: add_cents(&[
            eitc.credit,
            ctc.refundable,
            education.credit.refundable(),
        ]),
    };

    // Steps 10 and 11
    let tax_after_credits = max0(tax_before_credits - credits.total_nonrefundable);
    let total_tax = tax_after_credits.saturating_add(additional_taxes.total);
    let payments = PaymentBreakdown::new(
        r.payments.federal_withholding,
        r.payments.estimated_payments,
        credits.total_refundable,
    );
    let refund_or_owe = payments.total.saturating_sub(total_tax);

    let effective_rate = if agi > 0 {
        ratio(total_tax, agi).round_dp(4)
    } else {
        Decimal::ZERO
    };

    debug!(
        agi,
        deduction = deduction.amount,
        nol = nol.deduction,
        qbi = qbi.deduction,
        taxable_income,
        tax_before_credits,
        "federal taxable income computed"
    );
    info!(
        tax_year = year,
        status = status.as_str(),
        total_tax,
        refund_or_owe,
        warnings = diagnostics.warnings.len(),
        errors = diagnostics.errors.len(),
        "federal return calculated"
    );

    FederalResult {
        tax_year: year,
        tables_year: tables.tax_year,
        filing_status: status,
        income: income_breakdown,
        adjustments,
        agi,
        nol_deduction: nol.deduction,
        qbi_deduction: qbi.deduction,
        taxable_income,
        tax_before_credits,
        tax_after_credits,
        additional_taxes,
        total_tax,
        total_payments: payments.total,
        payments,
        refund_or_owe,
        marginal_rate: marginal_rate(taxable_income, brackets),
        effective_rate,
        nol_carryforwards: nol.updated_carryforwards.clone(),
        foreign_tax_carryovers: foreign_tax.carryovers.clone(),
        capital_loss_carryforward,
        credits,
        deduction,
        worksheets: FederalWorksheets {
            self_employment: se,
            standard_deduction: standard,
            itemized_deductions: itemized,
            casualty_loss: casualty,
            nol,
            qbi,
            income_tax,
            additional_medicare,
            net_investment_income,
            amt,
            eitc,
            child_tax_credit: ctc,
            education,
            foreign_tax_credit: foreign_tax,
        },
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::capital_gains::TaxMethod;
    use crate::calculations::education::EducationCredit;
    use crate::models::{
        DeductionPreference, Dependent, EducationExpense, NolCarryforward, NolSource,
    };
    use crate::money::dollars;

    fn single_with_wages(wages: Cents) -> TaxReturn {
        let mut tax_return = TaxReturn::new(2025, FilingStatus::Single);
        tax_return.income.wages = wages;
        tax_return
    }

    // ==========================================================================
    // Deduction scenarios
    // ==========================================================================

    #[test]
    fn single_filer_takes_standard_deduction() {
        let result = calculate_federal(&single_with_wages(dollars(50_000)));

        assert_eq!(result.deduction.deduction_type, DeductionType::Standard);
        assert_eq!(result.deduction.amount, dollars(15_000));
        assert_eq!(result.taxable_income, dollars(35_000));
        // 1,192.50 + 12% × 23,075
        assert_eq!(result.tax_before_credits, 396_150);
        assert_eq!(result.total_tax, 396_150);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn larger_itemized_total_wins() {
        let mut tax_return = single_with_wages(dollars(100_000));
        tax_return.itemized.mortgage_interest = dollars(20_000);

        let result = calculate_federal(&tax_return);

        assert_eq!(result.deduction.deduction_type, DeductionType::Itemized);
        assert_eq!(result.taxable_income, dollars(80_000));
    }

    #[test]
    fn forced_itemized_costs_more_than_auto() {
        let mut tax_return = single_with_wages(dollars(50_000));
        tax_return.itemized.mortgage_interest = dollars(8_000);
        let auto = calculate_federal(&tax_return);

        tax_return.options.deduction_preference = DeductionPreference::ForceItemized;
        let forced = calculate_federal(&tax_return);

        assert_eq!(forced.deduction.deduction_type, DeductionType::Itemized);
        assert_eq!(forced.taxable_income, dollars(42_000));
        assert!(forced.total_tax > auto.total_tax);
        assert!(forced.diagnostics.has_code(codes::FORCED_DEDUCTION_COSTS_MORE));
    }

    // ==========================================================================
    // Income and AGI
    // ==========================================================================

    #[test]
    fn self_employment_tax_and_adjustment() {
        let mut tax_return = TaxReturn::new(2025, FilingStatus::Single);
        tax_return.income.business_income = dollars(100_000);

        let result = calculate_federal(&tax_return);

        assert_eq!(result.additional_taxes.self_employment_tax, 1_412_955);
        assert_eq!(result.adjustments.se_tax_deduction, 706_478);
        assert_eq!(result.agi, dollars(100_000) - 706_478);
    }

    #[test]
    fn capital_loss_limited_and_carried_forward() {
        let mut tax_return = single_with_wages(dollars(60_000));
        tax_return.income.long_term_capital_gain = dollars(-10_000);

        let result = calculate_federal(&tax_return);

        assert_eq!(result.income.capital_gain_or_loss, dollars(-3_000));
        assert_eq!(result.capital_loss_carryforward, dollars(7_000));
        assert_eq!(result.agi, dollars(57_000));
        assert!(result.diagnostics.has_code(codes::CAPITAL_LOSS_LIMITED));
    }

    #[test]
    fn qualified_dividends_use_preferential_rates() {
        let mut tax_return = single_with_wages(dollars(40_000));
        tax_return.income.ordinary_dividends = dollars(10_000);
        tax_return.income.qualified_dividends = dollars(10_000);

        let result = calculate_federal(&tax_return);

        assert_eq!(result.worksheets.income_tax.method, TaxMethod::PreferentialWorksheet);
        assert!(result.tax_before_credits < result.worksheets.income_tax.regular_tax_on_all_income);
    }

    #[test]
    fn negative_wages_are_clamped_with_error() {
        let result = calculate_federal(&single_with_wages(dollars(-5_000)));

        assert_eq!(result.income.wages, 0);
        assert_eq!(result.total_tax, 0);
        assert!(result.diagnostics.has_code(codes::NEGATIVE_AMOUNT_CLAMPED));
    }

    #[test]
    fn business_loss_generates_nol() {
        let mut tax_return = single_with_wages(dollars(10_000));
        tax_return.income.business_income = dollars(-50_000);

        let result = calculate_federal(&tax_return);

        assert_eq!(result.agi, dollars(-40_000));
        assert_eq!(result.taxable_income, 0);
        assert_eq!(
            result.nol_carryforwards,
            vec![NolCarryforward {
                origin_year: 2025,
                original_amount: dollars(40_000),
                remaining_amount: dollars(40_000),
                source: NolSource::Business,
            }]
        );
        assert!(result.diagnostics.has_code(codes::NEGATIVE_AGI));
        assert!(result.diagnostics.has_code(codes::SE_LOSS));
    }

    #[test]
    fn prior_nol_reduces_taxable_income() {
        let mut tax_return = single_with_wages(dollars(115_000));
        tax_return.nol_carryforwards = vec![NolCarryforward {
            origin_year: 2022,
            original_amount: dollars(30_000),
            remaining_amount: dollars(30_000),
            source: NolSource::Business,
        }];

        let result = calculate_federal(&tax_return);

        assert_eq!(result.nol_deduction, dollars(30_000));
        assert_eq!(result.taxable_income, dollars(70_000));
        assert_eq!(result.nol_carryforwards[0].remaining_amount, 0);
        // input untouched
        assert_eq!(tax_return.nol_carryforwards[0].remaining_amount, dollars(30_000));
    }

    // ==========================================================================
    // Credits and totals
    // ==========================================================================

    #[test]
    fn family_with_children_gets_refundable_credits() {
        let mut tax_return = TaxReturn::new(2025, FilingStatus::HeadOfHousehold);
        tax_return.income.wages = dollars(25_000);
        tax_return.payments.federal_withholding = dollars(1_000);
        tax_return.profile.dependents = vec![
            Dependent {
                birth_date: NaiveDate::from_ymd_opt(2015, 6, 1),
                ..Dependent::child_of_unknown_age()
            };
            2
        ];

        let result = calculate_federal(&tax_return);

        assert!(result.credits.earned_income_credit > 0);
        assert!(result.credits.additional_child_tax_credit > 0);
        assert_eq!(result.total_tax, 0);
        assert_eq!(
            result.refund_or_owe,
            dollars(1_000) + result.credits.total_refundable
        );
    }

    #[test]
    fn education_credit_reported_once() {
        let mut tax_return = single_with_wages(dollars(45_000));
        tax_return.education = vec![EducationExpense {
            student: "Alex".to_string(),
            qualified_expenses: dollars(4_000),
            at_least_half_time: true,
            completed_first_four_years: false,
            prior_aotc_years: 0,
            felony_drug_conviction: false,
        }];

        let result = calculate_federal(&tax_return);

        assert_eq!(
            result.credits.education,
            EducationCredit::AmericanOpportunity {
                total: dollars(2_500),
                refundable: dollars(1_000),
                nonrefundable: dollars(1_500),
            }
        );
        assert_eq!(result.credits.lifetime_learning_credit, 0);
        assert_eq!(result.credits.american_opportunity_credit, dollars(2_500));
    }

    #[test]
    fn zero_income_return_is_all_zero() {
        let mut tax_return = TaxReturn::new(2025, FilingStatus::MarriedJointly);
        tax_return.payments.estimated_payments = dollars(500);

        let result = calculate_federal(&tax_return);

        assert_eq!(result.total_tax, 0);
        assert_eq!(result.refund_or_owe, dollars(500));
        assert_eq!(result.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn marginal_and_effective_rates() {
        let result = calculate_federal(&single_with_wages(dollars(100_000)));

        assert_eq!(result.marginal_rate, dec!(0.22));
        // 13,614 / 100,000
        assert_eq!(result.effective_rate, dec!(0.1361));
    }

    // ==========================================================================
    // Years and idempotence
    // ==========================================================================

    #[test]
    fn unsupported_year_uses_nearest_tables() {
        let mut tax_return = single_with_wages(dollars(50_000));
        tax_return.tax_year = 2031;

        let result = calculate_federal(&tax_return);

        assert_eq!(result.tax_year, 2031);
        assert_eq!(result.tables_year, 2025);
        assert!(result.diagnostics.has_code(codes::UNSUPPORTED_TAX_YEAR));
        assert_eq!(result.diagnostics.errors.len(), 1);
    }

    #[test]
    fn supported_years_pass_table_checks() {
        for year in crate::tables::SUPPORTED_YEARS {
            let mut tax_return = single_with_wages(dollars(50_000));
            tax_return.tax_year = year;

            let result = calculate_federal(&tax_return);

            assert!(!result.diagnostics.has_code(codes::INVALID_TABLES), "{year}");
            assert!(result.diagnostics.errors.is_empty());
        }
    }

    #[test]
    fn same_input_same_output() {
        let mut tax_return = single_with_wages(dollars(80_000));
        tax_return.income.business_income = dollars(25_000);
        tax_return.income.long_term_capital_gain = dollars(-8_000);
        tax_return.itemized.mortgage_interest = dollars(9_000);
        tax_return.itemized.state_and_local_income_tax = dollars(7_000);

        let first = calculate_federal(&tax_return);
        let second = calculate_federal(&tax_return);

        assert_eq!(first, second);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    fn any_status() -> impl Strategy<Value = FilingStatus> {
        prop_oneof![
            Just(FilingStatus::Single),
            Just(FilingStatus::MarriedJointly),
            Just(FilingStatus::MarriedSeparately),
            Just(FilingStatus::HeadOfHousehold),
        ]
    }

    proptest! {
        #[test]
        fn refund_is_payments_less_total_tax(
            status in any_status(),
            wages in 0i64..50_000_000,
            business in -5_000_000i64..20_000_000,
            gains in -2_000_000i64..10_000_000,
            itemized in 0i64..5_000_000,
            withholding in 0i64..5_000_000,
            children in 0usize..4,
        ) {
            let mut tax_return = TaxReturn::new(2025, status);
            tax_return.income.wages = wages;
            tax_return.income.business_income = business;
            tax_return.income.long_term_capital_gain = gains;
            tax_return.itemized.mortgage_interest = itemized;
            tax_return.payments.federal_withholding = withholding;
            tax_return.profile.dependents = vec![Dependent::child_of_unknown_age(); children];

            let result = calculate_federal(&tax_return);

            prop_assert!(result.total_tax >= 0);
            prop_assert!(result.taxable_income >= 0);
            prop_assert_eq!(result.refund_or_owe, result.total_payments - result.total_tax);
        }
    }
}
