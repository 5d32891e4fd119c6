//! Two-decimal fixed point stored as integer hundredths (`12.50` is `1250`).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::ValidationError;

/// Largest storable value, `9999.99`.
pub const MAX_HUNDREDTHS: i64 = 999_999;

pub fn to_hundredths(field: &'static str, value: Decimal) -> Result<i64, ValidationError> {
    let normalized = value.normalize();
    if normalized.scale() > 2 {
        return Err(ValidationError::TooPrecise { field });
    }
    normalized
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.to_i64())
        .ok_or(ValidationError::OutOfRange { field })
}

pub fn from_hundredths(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, 2)
}
