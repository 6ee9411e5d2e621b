use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Cents;

/// One band of a progressive rate schedule.
///
/// `max` is `None` for the top band. Brackets for a filing status are
/// contiguous: each `min` equals the previous band's `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Cents,
    pub max: Option<Cents>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        min: Cents,
        max: Option<Cents>,
        rate: Decimal,
    ) -> Self {
        Self { min, max, rate }
    }

    /// Upper bound, treating the open top band as unbounded.
    pub fn upper(&self) -> Cents {
        self.max.unwrap_or(Cents::MAX)
    }
}

/// Builds a contiguous schedule from `(upper bound, rate)` pairs; the last
/// pair's bound is ignored and the band left open.
pub fn schedule(bands: &[(Cents, Decimal)]) -> Vec<TaxBracket> {
    let mut brackets = Vec::with_capacity(bands.len());
    let mut min = 0;
    for (i, (upper, rate)) in bands.iter().enumerate() {
        let max = if i + 1 == bands.len() { None } else { Some(*upper) };
        brackets.push(TaxBracket::new(min, max, *rate));
        min = *upper;
    }
    brackets
}
