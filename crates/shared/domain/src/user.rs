//! User domain entity and registration candidate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_USER, VALID_ROLES};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ROLE_USER => Ok(UserRole::User),
            ROLE_ADMIN => Ok(UserRole::Admin),
            _ => Err(DomainError::validation(format!(
                "role must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

/// User-supplied fields of a registration, before domain preparation.
///
/// The password here is plaintext. The only way to turn a `NewUser` into a
/// [`User`] is [`User::prepare_create`], which consumes it.
#[derive(Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .field("avatar", &self.avatar)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    /// Argon2 hash, never plaintext
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Finalize a registration candidate.
    ///
    /// Normalizes the input, parses the role, hashes the password, assigns a
    /// fresh id and stamps both timestamps with the same instant.
    pub fn prepare_create(candidate: NewUser) -> DomainResult<Self> {
        let NewUser {
            email,
            first_name,
            last_name,
            role,
            avatar,
            password,
        } = candidate;

        let role = role.parse::<UserRole>()?;
        let password = Password::new(password.trim())?.into_string();
        let now = Utc::now();

        Ok(Self {
            user_id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role,
            avatar: avatar
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            password,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a plaintext password against the stored hash
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password.as_str()).verify(plain_text)
    }

    /// Blank out the password hash before handing the user to a client
    pub fn sanitize_password(&mut self) {
        self.password.clear();
    }
}
