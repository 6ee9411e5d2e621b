//! Batch returns from CSV, one return per row.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Only
//! `filing_status` is required; every other column may be absent or empty.
//! Money cells accept the same text as a return file (`"$1,234.56"`,
//! `1234.56`); a malformed cell reads as zero.
//!
//! | Column                | Required | Type    | Notes                                 |
//! |-----------------------|----------|---------|---------------------------------------|
//! | `tax_year`            | no       | integer | Defaults to the latest supported year |
//! | `filing_status`       | yes      | string  | `S`, `MFJ`, `MFS`, `HOH`              |
//! | `dependents`          | no       | integer | Qualifying children of unknown age    |
//! | `wages`               | no       | money   |                                       |
//! | `taxable_interest`    | no       | money   |                                       |
//! | `ordinary_dividends`  | no       | money   |                                       |
//! | `qualified_dividends` | no       | money   |                                       |
//! | `capital_gain`        | no       | money   | Net long-term gain or loss            |
//! | `business_income`     | no       | money   | Schedule C net profit or loss         |
//! | `retirement_income`   | no       | money   | Primary filer's distributions         |
//! | `itemized_deductions` | no       | money   | Entered as other itemized             |
//! | `federal_withholding` | no       | money   |                                       |
//! | `estimated_payments`  | no       | money   |                                       |
//! | `state`               | no       | string  | Two-letter code of residence          |
//! | `county`              | no       | string  |                                       |
//! | `city`                | no       | string  |                                       |
//! | `state_withholding`   | no       | money   |                                       |
//!
//! ### Example
//!
//! ```csv
//! filing_status,wages,dependents,state,county
//! S,50000,,MI,
//! MFJ,"$120,000",2,MD,Montgomery
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tax_core::input::{InputError, RawAmount, RawDependents, RawTaxReturn};
use tax_core::money::format_cents_as_dollars;
use tax_core::{Location, TaxReturn};
use thiserror::Error;

use crate::return_file::ReturnReport;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    tax_year: Option<i32>,
    filing_status: String,
    dependents: Option<u32>,
    wages: Option<String>,
    taxable_interest: Option<String>,
    ordinary_dividends: Option<String>,
    qualified_dividends: Option<String>,
    capital_gain: Option<String>,
    business_income: Option<String>,
    retirement_income: Option<String>,
    itemized_deductions: Option<String>,
    federal_withholding: Option<String>,
    estimated_payments: Option<String>,
    state: Option<String>,
    county: Option<String>,
    city: Option<String>,
    state_withholding: Option<String>,
}

#[derive(Debug, Error)]
pub enum BatchLoadError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV is structurally invalid or a cell has the wrong type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("invalid return on row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: InputError,
    },
}

fn amount(cell: Option<String>) -> Option<RawAmount> {
    cell.map(RawAmount::Text)
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<TaxReturn, BatchLoadError> {
    let mut raw = RawTaxReturn {
        filing_status: row.filing_status,
        dependents: RawDependents::Count(row.dependents.unwrap_or(0)),
        location: Location {
            state: row.state,
            county: row.county,
            city: row.city,
        },
        ..RawTaxReturn::default()
    };
    if let Some(year) = row.tax_year {
        raw.tax_year = year;
    }
    raw.income.wages = amount(row.wages);
    raw.income.taxable_interest = amount(row.taxable_interest);
    raw.income.ordinary_dividends = amount(row.ordinary_dividends);
    raw.income.qualified_dividends = amount(row.qualified_dividends);
    raw.income.long_term_capital_gain = amount(row.capital_gain);
    raw.income.business_income = amount(row.business_income);
    raw.income.retirement.primary = amount(row.retirement_income);
    raw.itemized.other_itemized = amount(row.itemized_deductions);
    raw.payments.federal_withholding = amount(row.federal_withholding);
    raw.payments.estimated_payments = amount(row.estimated_payments);
    raw.payments.state_withholding = amount(row.state_withholding);

    TaxReturn::from_raw(&raw).map_err(|source| BatchLoadError::InvalidRow {
        row: row_number,
        source,
    })
}

/// Parses CSV text into returns, in file order.
///
/// # Errors
///
/// * [`BatchLoadError::Parse`] if the CSV is structurally invalid.
/// * [`BatchLoadError::InvalidRow`] if a row has an unrecognized filing
///   status.
pub fn load_batch_from_str(input: &str) -> Result<Vec<TaxReturn>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_batch_file(path: &Path) -> Result<Vec<TaxReturn>, BatchLoadError> {
    load_batch_from_str(&fs::read_to_string(path)?)
}

/// One line per computed return, e.g.
/// `row 1: 2025 S AGI $50,000.00 federal -$3,961.50 MI -$1,912.50`.
pub fn summary_line(
    row: usize,
    report: &ReturnReport,
) -> String {
    let federal = &report.federal;
    let mut line = format!(
        "row {row}: {} {} AGI {} federal {}",
        federal.tax_year,
        federal.filing_status.as_str(),
        format_cents_as_dollars(federal.agi),
        format_cents_as_dollars(federal.refund_or_owe),
    );
    if let Some(state) = &report.state {
        line.push_str(&format!(
            " {} {}",
            state.state_code,
            format_cents_as_dollars(state.refund_or_owe)
        ));
    }
    let diagnostics = federal.diagnostics.warnings.len()
        + federal.diagnostics.errors.len()
        + report.state.as_ref().map_or(0, |s| {
            s.diagnostics.warnings.len() + s.diagnostics.errors.len()
        });
    if diagnostics > 0 {
        line.push_str(&format!(" ({diagnostics} diagnostics)"));
    }
    line
}
