//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role for regular accounts
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

// =============================================================================
// Field limits
// =============================================================================

/// Minimum password length requirement (plaintext, after trimming)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum email length
pub const MAX_EMAIL_LENGTH: usize = 60;

/// Maximum first/last name length
pub const MAX_NAME_LENGTH: usize = 30;

/// Maximum avatar URL length
pub const MAX_AVATAR_LENGTH: usize = 512;
