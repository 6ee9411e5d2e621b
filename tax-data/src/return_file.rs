//! Return files: one [`RawTaxReturn`] per TOML document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tax_core::input::InputError;
use tax_core::state::{StateInput, StateLayerError, StateRegistry};
use tax_core::{FederalResult, RawTaxReturn, StateResult, TaxReturn, calculate_federal};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReturnFileError {
    #[error("cannot read return file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse return '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid return '{origin}': {source}")]
    Input {
        origin: String,
        #[source]
        source: InputError,
    },
}

/// Parses a TOML return and converts it to cents.
pub fn parse_return(
    text: &str,
    origin: &str,
) -> Result<TaxReturn, ReturnFileError> {
    let raw: RawTaxReturn = toml::from_str(text).map_err(|source| ReturnFileError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    TaxReturn::from_raw(&raw).map_err(|source| ReturnFileError::Input {
        origin: origin.to_string(),
        source,
    })
}

pub fn read_return_file(path: &Path) -> Result<TaxReturn, ReturnFileError> {
    let text = fs::read_to_string(path).map_err(|source| ReturnFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_return(&text, &path.display().to_string())
}

/// Federal result plus the result for the state of residence, if the return
/// names one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReport {
    pub federal: FederalResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateResult>,
}

impl ReturnReport {
    /// Federal refund (or balance due) plus the state one.
    pub fn combined_refund_or_owe(&self) -> i64 {
        let state = self.state.as_ref().map_or(0, |s| s.refund_or_owe);
        self.federal.refund_or_owe.saturating_add(state)
    }
}

/// Runs the federal pipeline, then the state of residence.
///
/// # Errors
/// [`StateLayerError::UnknownState`] when the return names a state the
/// registry has no calculator for.
pub fn compute_return(
    tax_return: &TaxReturn,
    registry: &StateRegistry,
) -> Result<ReturnReport, StateLayerError> {
    let federal = calculate_federal(tax_return);
    let input = StateInput {
        tax_return,
        federal: &federal,
    };
    let state = match registry.calculate_residence(&input) {
        Ok(result) => Some(result),
        Err(StateLayerError::NoResidence) => None,
        Err(err) => return Err(err),
    };
    info!(
        tax_year = tax_return.tax_year,
        federal_refund_or_owe = federal.refund_or_owe,
        state = state.as_ref().map(|s| s.state_code.as_str()),
        "return computed"
    );
    Ok(ReturnReport { federal, state })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::FilingStatus;
    use tax_core::money::dollars;

    use super::*;

    const SAMPLE: &str = r#"
taxYear = 2025
filingStatus = "MFJ"
dependents = 2

[location]
state = "MI"

[income]
wages = "$85,000.00"
taxableInterest = 1200

[payments]
federalWithholding = "7,500"
stateWithholding = 3000
"#;

    #[test]
    fn parses_dollar_strings_and_numbers() {
        let tax_return = parse_return(SAMPLE, "sample").unwrap();

        assert_eq!(tax_return.filing_status(), FilingStatus::MarriedJointly);
        assert_eq!(tax_return.income.wages, dollars(85_000));
        assert_eq!(tax_return.income.taxable_interest, dollars(1_200));
        assert_eq!(tax_return.payments.federal_withholding, dollars(7_500));
        assert_eq!(tax_return.profile.dependents.len(), 2);
    }

    #[test]
    fn bad_filing_status_is_an_input_error() {
        let err = parse_return("filingStatus = \"QSS\"", "qss").unwrap_err();

        assert!(matches!(err, ReturnFileError::Input { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_return("taxYear = ", "broken").unwrap_err();

        assert!(matches!(err, ReturnFileError::Parse { .. }));
    }

    #[test]
    fn report_includes_residence_state() {
        let tax_return = parse_return(SAMPLE, "sample").unwrap();
        let registry = StateRegistry::with_builtin_states();

        let report = compute_return(&tax_return, &registry).unwrap();

        let state = report.state.as_ref().unwrap();
        assert_eq!(state.state_code, "MI");
        // 86,200 AGI less four $5,000 exemptions
        assert_eq!(state.taxable_income, dollars(66_200));
        assert_eq!(
            report.combined_refund_or_owe(),
            report.federal.refund_or_owe + state.refund_or_owe
        );
    }

    #[test]
    fn no_residence_means_federal_only() {
        let tax_return =
            parse_return("filingStatus = \"S\"\n[income]\nwages = 40000", "s").unwrap();

        let report = compute_return(&tax_return, &StateRegistry::new()).unwrap();

        assert!(report.state.is_none());
    }
}
