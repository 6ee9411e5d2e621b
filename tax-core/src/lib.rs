//! Federal and state income-tax determination engine.
//!
//! Every amount is an `i64` count of cents (see [`money`]). The federal
//! pipeline in [`federal`] turns a [`TaxReturn`] into a [`FederalResult`];
//! the [`state`] layer turns that result plus state-specific facts into a
//! [`StateResult`]. Nothing in this crate performs I/O.

pub mod calculations;
pub mod diagnostics;
pub mod federal;
pub mod input;
pub mod models;
pub mod money;
pub mod results;
pub mod state;
pub mod tables;

pub use diagnostics::{Diagnostic, Diagnostics, Phase, Severity};
pub use federal::calculate_federal;
pub use input::{InputError, RawTaxReturn};
pub use models::*;
pub use results::{FederalResult, StateResult};
pub use state::{StateCalculator, StateLayerError, StateRegistry};
