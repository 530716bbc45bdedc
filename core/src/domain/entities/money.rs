//! Amounts in whole đồng.

use crate::errors::{DomainError, DomainResult};

/// Largest unit price or cost accepted from a client
pub const MAX_UNIT_AMOUNT: i64 = 1_000_000_000_000;

const OUT_OF_RANGE: &str = "Amount exceeds the supported range";

/// Sum of `values`, or a validation error when it does not fit in `i64`
pub fn checked_sum<I>(values: I) -> DomainResult<i64>
where
    I: IntoIterator<Item = i64>,
{
    values
        .into_iter()
        .try_fold(0i64, |total, value| total.checked_add(value))
        .ok_or_else(|| DomainError::validation(OUT_OF_RANGE))
}

/// `quantity * unit`, or a validation error on overflow
pub fn checked_total(quantity: i64, unit: i64) -> DomainResult<i64> {
    quantity
        .checked_mul(unit)
        .ok_or_else(|| DomainError::validation(OUT_OF_RANGE))
}
