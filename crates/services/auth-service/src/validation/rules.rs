//! Field predicates used by the constraint table.

use std::borrow::Cow;

use validator::{ValidateEmail, ValidateUrl, ValidationError};

/// A single check applied to one field value.
///
/// `None` means the field is absent (an unset optional). Only [`Rule::Required`]
/// rejects an absent value; every other rule passes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MaxLength(usize),
    Email,
    Url,
}

impl Rule {
    pub fn check(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let Some(value) = value else {
            return match self {
                Rule::Required => Err(error("required", "is required".into())),
                _ => Ok(()),
            };
        };

        match *self {
            Rule::Required if value.trim().is_empty() => {
                Err(error("required", "is required".into()))
            }
            Rule::MaxLength(max) if value.chars().count() > max => Err(error(
                "length",
                format!("must be at most {} characters", max).into(),
            )),
            Rule::Email if !value.is_empty() && !value.validate_email() => {
                Err(error("email", "must be a valid email address".into()))
            }
            Rule::Url if !value.is_empty() && !value.validate_url() => {
                Err(error("url", "must be a valid URL".into()))
            }
            _ => Ok(()),
        }
    }
}

fn error(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message);
    err
}
