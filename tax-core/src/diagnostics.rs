//! Non-fatal findings attached to every result.
//!
//! Calculations never fail for numerically valid input. Anything the filer
//! should know about (a cap that bit, a credit that phased out entirely, a
//! table substituted for an unsupported year) is recorded here instead and
//! mirrored to the log.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Stable diagnostic codes. Display text may change; codes do not.
pub mod codes {
    pub const UNSUPPORTED_TAX_YEAR: &str = "FED-E-001";
    pub const NEGATIVE_AMOUNT_CLAMPED: &str = "FED-E-002";
    pub const INVALID_TABLES: &str = "FED-E-003";

    pub const CAPITAL_LOSS_LIMITED: &str = "FED-W-001";
    pub const NEGATIVE_AGI: &str = "FED-W-002";
    pub const FORCED_DEDUCTION_COSTS_MORE: &str = "FED-W-003";
    pub const CHARITABLE_LIMITED: &str = "FED-W-004";
    pub const CASUALTY_NOT_DECLARED: &str = "FED-W-005";
    pub const NOL_LIMITED: &str = "FED-W-006";
    pub const NOL_GENERATED: &str = "FED-W-007";
    pub const SSTB_DISALLOWED: &str = "FED-W-008";
    pub const QBI_LOSS_CARRYFORWARD: &str = "FED-W-009";
    pub const AMT_NOT_MODELED: &str = "FED-W-010";
    pub const EITC_INVESTMENT_INCOME: &str = "FED-W-011";
    pub const EITC_MFS_INELIGIBLE: &str = "FED-W-012";
    pub const EDUCATION_MFS_INELIGIBLE: &str = "FED-W-013";
    pub const FTC_CARRYOVER: &str = "FED-W-014";
    pub const SPOUSE_ITEMIZES: &str = "FED-W-015";
    pub const SE_LOSS: &str = "FED-W-016";

    pub const STATE_YEAR_FALLBACK: &str = "ST-W-001";
    pub const STATE_EXEMPTIONS_ZEROED: &str = "ST-W-002";
    pub const UNKNOWN_COUNTY: &str = "ST-W-003";
    pub const LOCAL_RATE_MISSING: &str = "ST-W-004";
    pub const STATE_CREDIT_CAPPED: &str = "ST-W-005";
}

/// Pipeline step that raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    InputValidation,
    SelfEmployment,
    Agi,
    Deductions,
    Nol,
    Qbi,
    IncomeTax,
    AdditionalTaxes,
    Credits,
    State,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputValidation => "input-validation",
            Self::SelfEmployment => "self-employment",
            Self::Agi => "agi",
            Self::Deductions => "deductions",
            Self::Nol => "nol",
            Self::Qbi => "qbi",
            Self::IncomeTax => "income-tax",
            Self::AdditionalTaxes => "additional-taxes",
            Self::Credits => "credits",
            Self::State => "state",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: String,
    pub phase: Phase,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.phase, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(
        &mut self,
        code: &str,
        phase: Phase,
        message: impl Into<String>,
    ) {
        let message = message.into();
        warn!(code, phase = %phase, "{message}");
        self.warnings.push(Diagnostic {
            code: code.to_string(),
            phase,
            severity: Severity::Warning,
            message,
        });
    }

    pub fn error(
        &mut self,
        code: &str,
        phase: Phase,
        message: impl Into<String>,
    ) {
        let message = message.into();
        error!(code, phase = %phase, "{message}");
        self.errors.push(Diagnostic {
            code: code.to_string(),
            phase,
            severity: Severity::Error,
            message,
        });
    }

    /// Moves everything from `other` into `self`, preserving order.
    pub fn absorb(
        &mut self,
        other: Diagnostics,
    ) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    pub fn has_code(
        &self,
        code: &str,
    ) -> bool {
        self.warnings
            .iter()
            .chain(self.errors.iter())
            .any(|d| d.code == code)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn warnings_and_errors_are_kept_apart() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(codes::NEGATIVE_AGI, Phase::Agi, "AGI is negative");
        diagnostics.error(codes::UNSUPPORTED_TAX_YEAR, Phase::InputValidation, "no tables");

        assert_eq!(diagnostics.warnings.len(), 1);
        assert_eq!(diagnostics.errors.len(), 1);
        assert_eq!(diagnostics.errors[0].severity, Severity::Error);
        assert!(diagnostics.has_code("FED-W-002"));
    }

    #[test]
    fn absorb_appends_in_order() {
        let mut first = Diagnostics::new();
        first.warn(codes::NOL_LIMITED, Phase::Nol, "a");
        let mut second = Diagnostics::new();
        second.warn(codes::NOL_GENERATED, Phase::Nol, "b");

        first.absorb(second);

        let messages: Vec<_> = first.warnings.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn display_includes_code_and_phase() {
        let diagnostic = Diagnostic {
            code: codes::UNKNOWN_COUNTY.to_string(),
            phase: Phase::State,
            severity: Severity::Warning,
            message: "county not found".to_string(),
        };

        assert_eq!(diagnostic.to_string(), "[ST-W-003] state: county not found");
    }
}
