//! End-to-end tests: documents and returns from text, through both layers.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::diagnostics::codes;
use tax_core::money::{Cents, dollars, multiply_cents};
use tax_core::state::{StateLayerError, StateRegistry};
use tax_core::{FilingStatus, TaxReturn};
use tax_data::{build_registry, compute_return, load_batch_from_str, parse_return};

fn registry() -> StateRegistry {
    build_registry(None).expect("built-in registry should load")
}

fn single_in(
    state: &str,
    wages: Cents,
) -> TaxReturn {
    let mut tax_return = TaxReturn::new(2025, FilingStatus::Single);
    tax_return.income.wages = wages;
    tax_return.profile.location.state = Some(state.to_string());
    tax_return
}

/// A scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tax-data-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

// =============================================================================
// Built-in documents
// =============================================================================

#[test]
fn test_illinois_flat_tax_with_exemption() {
    let report = compute_return(&single_in("IL", dollars(50_000)), &registry()).unwrap();

    let state = report.state.unwrap();
    assert_eq!(state.exemptions, dollars(2_850));
    assert_eq!(state.taxable_income, dollars(47_150));
    assert_eq!(state.income_tax, 233_393);
    assert!(state.diagnostics.is_empty());
}

#[test]
fn test_illinois_retirement_income_is_subtracted() {
    let mut tax_return = single_in("IL", dollars(20_000));
    tax_return.income.retirement.primary = dollars(30_000);

    let state = compute_return(&tax_return, &registry()).unwrap().state.unwrap();

    assert_eq!(state.federal_agi, dollars(50_000));
    assert_eq!(state.state_agi, dollars(20_000));
}

#[test]
fn test_massachusetts_millionaire_surtax() {
    let state = compute_return(&single_in("MA", dollars(2_000_000)), &registry())
        .unwrap()
        .state
        .unwrap();

    let taxable = dollars(2_000_000) - dollars(4_400);
    assert_eq!(state.taxable_income, taxable);
    assert_eq!(
        state.surtax,
        multiply_cents(taxable - 108_315_000, dec!(0.04))
    );
}

#[test]
fn test_indiana_county_tax() {
    let mut tax_return = single_in("IN", dollars(51_000));
    tax_return.profile.location.county = Some("marion".to_string());

    let state = compute_return(&tax_return, &registry()).unwrap().state.unwrap();

    assert_eq!(state.taxable_income, dollars(50_000));
    assert_eq!(state.income_tax, dollars(1_500));
    assert_eq!(state.local_tax, dollars(1_010));
}

#[test]
fn test_ohio_exemption_credit_is_nonrefundable() {
    let state = compute_return(&single_in("OH", dollars(20_000)), &registry())
        .unwrap()
        .state
        .unwrap();

    // Income below the zero bracket owes nothing, so the credit is lost.
    assert_eq!(state.income_tax, 0);
    assert_eq!(state.credits[0].amount, dollars(20));
    assert_eq!(state.nonrefundable_credits, 0);
    assert_eq!(state.total_tax, 0);
}

#[test]
fn test_virginia_brackets_and_deduction() {
    let state = compute_return(&single_in("VA", dollars(60_000)), &registry())
        .unwrap()
        .state
        .unwrap();

    // 60,000 − 8,500 − 930
    assert_eq!(state.taxable_income, dollars(50_570));
    // 60 + 60 + 600 + 33,570 × 5.75%
    assert_eq!(state.income_tax, 265_028);
}

#[test]
fn test_prior_year_uses_latest_rules_with_warning() {
    let mut tax_return = single_in("NC", dollars(50_000));
    tax_return.tax_year = 2024;

    let state = compute_return(&tax_return, &registry()).unwrap().state.unwrap();

    assert_eq!(state.rules_year, 2025);
    assert!(state.diagnostics.has_code(codes::STATE_YEAR_FALLBACK));
}

#[test]
fn test_every_state_handles_extreme_amounts() {
    let registry = registry();

    for extreme in [Cents::MIN, Cents::MAX] {
        let mut tax_return = TaxReturn::new(2025, FilingStatus::MarriedJointly);
        tax_return.income.wages = extreme;
        tax_return.income.business_income = extreme;
        tax_return.income.long_term_capital_gain = extreme;
        tax_return.income.retirement.primary = extreme;
        tax_return.adjustments.other_adjustments = extreme.saturating_neg();
        tax_return.itemized.real_estate_tax = extreme;
        tax_return.payments.state_withholding = extreme;
        tax_return.profile.dependents = vec![tax_core::Dependent::child_of_unknown_age(); 3];
        tax_return.profile.location.county = Some("marion".to_string());

        for state in registry.available_states() {
            tax_return.profile.location.state = Some(state.clone());

            let report = compute_return(&tax_return, &registry).unwrap();

            let state_result = report.state.unwrap();
            assert!(state_result.total_tax >= 0, "{state} at {extreme}");
            assert_eq!(
                state_result.refund_or_owe,
                state_result.total_payments.saturating_sub(state_result.total_tax),
                "{state} at {extreme}"
            );
        }
    }
}

#[test]
fn test_unknown_state_is_an_error() {
    let err = compute_return(&single_in("ZZ", dollars(50_000)), &registry()).unwrap_err();

    let StateLayerError::UnknownState { requested, available } = err else {
        panic!("expected UnknownState, got: {err:?}");
    };
    assert_eq!(requested, "ZZ");
    assert!(available.contains(&"IL".to_string()));
}

// =============================================================================
// Extra documents and return files
// =============================================================================

#[test]
fn test_directory_document_replaces_builtin() {
    let dir = scratch_dir("override");
    fs::write(
        dir.join("il.toml"),
        r#"
stateCode = "IL"
name = "Illinois (flat only)"
taxYear = 2025
structure = { kind = "flat", rate = 0.05 }
"#,
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let registry = build_registry(Some(&dir)).unwrap();
    let state = compute_return(&single_in("IL", dollars(10_000)), &registry)
        .unwrap()
        .state
        .unwrap();

    assert_eq!(state.exemptions, 0);
    assert_eq!(state.income_tax, dollars(500));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_return_file_round_trip_to_toml() {
    let tax_return = parse_return(
        r#"
taxYear = 2025
filingStatus = "HOH"
dependents = 1

[location]
state = "MD"
county = "Howard"

[income]
wages = "48,000"

[payments]
federalWithholding = 2500
stateWithholding = 1800
"#,
        "hoh.toml",
    )
    .unwrap();

    let report = compute_return(&tax_return, &registry()).unwrap();
    let rendered = toml::to_string_pretty(&report).unwrap();

    assert!(rendered.contains("refundOrOwe"));
    assert!(rendered.contains("stateCode = \"MD\""));
    assert_eq!(
        report.federal.refund_or_owe,
        report.federal.total_payments - report.federal.total_tax
    );
}

#[test]
fn test_batch_rows_compute_independently() {
    let returns = load_batch_from_str(
        "filing_status,wages,state\nS,50000,MI\nMFJ,90000,TX\nS,30000,\n",
    )
    .unwrap();
    let registry = registry();

    let reports: Vec<_> = returns
        .iter()
        .map(|r| compute_return(r, &registry).unwrap())
        .collect();

    assert_eq!(reports[0].state.as_ref().unwrap().income_tax, 191_250);
    assert_eq!(reports[1].state.as_ref().unwrap().total_tax, 0);
    assert!(reports[2].state.is_none());
}
