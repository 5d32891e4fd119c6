//! Validation rules run on a candidate record before it is written.
//!
//! Field rules (`clean_fields`) run first and report the first bad field.
//! The cross-field rule (`validate_as_of`) runs afterwards and reports the
//! first violated invariant only.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::fixed;

/// Who must be reachable when contact details are incomplete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactSubject {
    Account,
    ExternalService,
}

impl ContactSubject {
    fn message(self) -> &'static str {
        match self {
            ContactSubject::Account => {
                "You need to have a way to be contacted in order to use this site!"
            }
            ContactSubject::ExternalService => {
                "The client needs to know how to contact the external service!"
            }
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", .subject.message())]
    IncompleteContactInfo { subject: ContactSubject },
    #[error("You must check in with your client if they have tasks to do before you can start!")]
    PretaskNotPermitted,
    #[error(
        "You must check in with your client before sharing their information with external services!"
    )]
    ExternalServiceNotPermitted,
    #[error(
        "You can not have started without your client's permission. Any work done without permission can not be logged nor charged!"
    )]
    UnauthorizedWorkLogged,
    #[error("The client can't pay more than your base rate!")]
    InitialExceedsBase,
    #[error("{field} may not be blank")]
    Blank { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} must be between 0.00 and 9999.99")]
    OutOfRange { field: &'static str },
    #[error("{field} may have at most two decimal places")]
    TooPrecise { field: &'static str },
}

impl ValidationError {
    /// Stable machine-readable name of the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::IncompleteContactInfo { .. } => "INCOMPLETE_CONTACT_INFO",
            ValidationError::PretaskNotPermitted => "PRETASK_NOT_PERMITTED",
            ValidationError::ExternalServiceNotPermitted => "EXTERNAL_SERVICE_NOT_PERMITTED",
            ValidationError::UnauthorizedWorkLogged => "UNAUTHORIZED_WORK_LOGGED",
            ValidationError::InitialExceedsBase => "INITIAL_EXCEEDS_BASE",
            ValidationError::Blank { .. } => "BLANK",
            ValidationError::TooLong { .. } => "TOO_LONG",
            ValidationError::InvalidEmail { .. } => "INVALID_EMAIL",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::TooPrecise { .. } => "TOO_PRECISE",
        }
    }

    /// The offending field for field-level failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Blank { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidEmail { field }
            | ValidationError::OutOfRange { field }
            | ValidationError::TooPrecise { field } => Some(field),
            _ => None,
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Rules attached to a record type.
pub trait Validate {
    /// Per-field constraints (lengths, ranges, formats).
    fn clean_fields(&self) -> ValidationResult {
        Ok(())
    }

    /// Cross-field invariant, evaluated against the given calendar day.
    fn validate_as_of(&self, today: NaiveDate) -> ValidationResult;

    fn validate(&self) -> ValidationResult {
        self.validate_as_of(today())
    }

    fn full_clean_as_of(&self, today: NaiveDate) -> ValidationResult {
        self.clean_fields()?;
        self.validate_as_of(today)
    }

    fn full_clean(&self) -> ValidationResult {
        self.full_clean_as_of(today())
    }
}

/// Current calendar day in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

pub(crate) fn require_contact_info(
    subject: ContactSubject,
    email: &Option<String>,
    phone: &Option<String>,
    website: &Option<String>,
    address: Option<Uuid>,
) -> ValidationResult {
    if is_present(email) && is_present(phone) && is_present(website) && address.is_some() {
        Ok(())
    } else {
        Err(ValidationError::IncompleteContactInfo { subject })
    }
}

pub(crate) fn required_text(field: &'static str, value: &str, max: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    max_length(field, value, max)
}

pub(crate) fn optional_text(
    field: &'static str,
    value: &Option<String>,
    max: usize,
) -> ValidationResult {
    match value {
        Some(text) => max_length(field, text, max),
        None => Ok(()),
    }
}

pub(crate) fn optional_email(field: &'static str, value: &Option<String>) -> ValidationResult {
    let Some(text) = value.as_deref() else {
        return Ok(());
    };
    max_length(field, text, 254)?;
    if text.is_empty() || looks_like_email(text) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail { field })
    }
}

pub(crate) fn fixed_range(field: &'static str, hundredths: i64) -> ValidationResult {
    if (0..=fixed::MAX_HUNDREDTHS).contains(&hundredths) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field })
    }
}

fn max_length(field: &'static str, value: &str, max: usize) -> ValidationResult {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_not_present() {
        assert!(!is_present(&None));
        assert!(!is_present(&Some("   ".into())));
        assert!(is_present(&Some("a".into())));
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("ada@firm.law"));
        assert!(looks_like_email("a.b+c@mail.example.org"));
        assert!(!looks_like_email("ada"));
        assert!(!looks_like_email("ada@firm"));
        assert!(!looks_like_email("@firm.law"));
        assert!(!looks_like_email("ada@@firm.law"));
        assert!(!looks_like_email("ada lovelace@firm.law"));
        assert!(!looks_like_email("ada@firm..law"));
    }

    #[test]
    fn text_length_counts_characters() {
        assert!(required_text("title", "é".repeat(32).as_str(), 32).is_ok());
        assert_eq!(
            required_text("title", &"x".repeat(33), 32),
            Err(ValidationError::TooLong {
                field: "title",
                max: 32
            })
        );
        assert_eq!(
            required_text("title", "  ", 32),
            Err(ValidationError::Blank { field: "title" })
        );
    }

    #[test]
    fn fixed_range_bounds_are_inclusive() {
        assert!(fixed_range("amount", 0).is_ok());
        assert!(fixed_range("amount", 999_999).is_ok());
        assert!(fixed_range("amount", -1).is_err());
        assert!(fixed_range("amount", 1_000_000).is_err());
    }

    #[test]
    fn codes_are_stable() {
        let err = ValidationError::IncompleteContactInfo {
            subject: ContactSubject::ExternalService,
        };
        assert_eq!(err.code(), "INCOMPLETE_CONTACT_INFO");
        assert_eq!(
            err.to_string(),
            "The client needs to know how to contact the external service!"
        );
        assert_eq!(
            ValidationError::OutOfRange { field: "budget" }.field(),
            Some("budget")
        );
        assert_eq!(ValidationError::InitialExceedsBase.field(), None);
    }
}
