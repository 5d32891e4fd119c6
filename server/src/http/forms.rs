//! Shared pieces of the JSON request and response bodies.

use entity::{ValidationError, fixed};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Converts an optional decimal input into stored hundredths.
pub(crate) fn hundredths(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Option<i64>, ValidationError> {
    value
        .map(|value| fixed::to_hundredths(field, value))
        .transpose()
}

pub(crate) fn decimal(hundredths: i64) -> Decimal {
    fixed::from_hundredths(hundredths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        due_date: Option<Option<String>>,
    }

    #[test]
    fn missing_null_and_value_are_distinct() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.due_date, None);
        let cleared: Patch = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));
        let set: Patch = serde_json::from_str(r#"{"due_date": "2024-05-01"}"#).unwrap();
        assert_eq!(set.due_date, Some(Some("2024-05-01".into())));
    }

    #[test]
    fn decimals_convert_to_hundredths() {
        assert_eq!(hundredths("amount", None), Ok(None));
        assert_eq!(
            hundredths("amount", Some(Decimal::new(45_050, 2))),
            Ok(Some(45_050))
        );
        assert_eq!(
            hundredths("amount", Some(Decimal::new(1_005, 3))),
            Err(ValidationError::TooPrecise { field: "amount" })
        );
        assert_eq!(decimal(45_000).to_string(), "450.00");
    }
}
