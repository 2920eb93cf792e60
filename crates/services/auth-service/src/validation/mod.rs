//! Candidate validation.
//!
//! Constraints are declared as a table of fields, each with an ordered list of
//! rules. Every rule of every field is evaluated and all violations are
//! reported together.

mod rules;

pub use rules::Rule;

use async_trait::async_trait;
use validator::ValidationErrors;

use domain::{User, MAX_AVATAR_LENGTH, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};

use crate::context::RequestContext;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Validator trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserValidator: Send + Sync {
    /// Check a registration candidate against the declared constraints.
    async fn validate(&self, ctx: &RequestContext, user: &User) -> Result<(), ValidationErrors>;
}

/// Reads one field off a user; `None` for an unset optional.
pub type FieldAccessor = fn(&User) -> Option<&str>;

/// Constraints declared for a single field.
#[derive(Clone)]
pub struct FieldConstraints {
    pub field: &'static str,
    pub value: FieldAccessor,
    pub rules: Vec<Rule>,
}

impl FieldConstraints {
    pub fn new(field: &'static str, value: FieldAccessor, rules: Vec<Rule>) -> Self {
        Self {
            field,
            value,
            rules,
        }
    }
}

/// Table-driven [`UserValidator`].
#[derive(Clone)]
pub struct ConstraintValidator {
    table: Vec<FieldConstraints>,
}

impl ConstraintValidator {
    pub fn new(table: Vec<FieldConstraints>) -> Self {
        Self { table }
    }

    /// Evaluate the whole table against `user`.
    pub fn check(&self, user: &User) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for constraints in &self.table {
            let value = (constraints.value)(user);
            for rule in &constraints.rules {
                if let Err(err) = rule.check(value) {
                    errors.add(constraints.field, err);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ConstraintValidator {
    /// Registration constraints for a prepared user.
    ///
    /// Role and password are checked while the candidate is built, so a
    /// prepared user always carries a known role and an Argon2 hash.
    fn default() -> Self {
        Self::new(vec![
            FieldConstraints::new(
                "email",
                |u| Some(u.email.as_str()),
                vec![Rule::Required, Rule::MaxLength(MAX_EMAIL_LENGTH), Rule::Email],
            ),
            FieldConstraints::new(
                "first_name",
                |u| Some(u.first_name.as_str()),
                vec![Rule::MaxLength(MAX_NAME_LENGTH)],
            ),
            FieldConstraints::new(
                "last_name",
                |u| Some(u.last_name.as_str()),
                vec![Rule::Required, Rule::MaxLength(MAX_NAME_LENGTH)],
            ),
            FieldConstraints::new(
                "avatar",
                |u| u.avatar.as_deref(),
                vec![Rule::MaxLength(MAX_AVATAR_LENGTH), Rule::Url],
            ),
        ])
    }
}

#[async_trait]
impl UserValidator for ConstraintValidator {
    async fn validate(&self, _ctx: &RequestContext, user: &User) -> Result<(), ValidationErrors> {
        self.check(user)
    }
}
