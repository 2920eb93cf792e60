//! Failures of the `Register` pipeline.

use thiserror::Error;
use tonic::Status;
use validator::ValidationErrors;

use domain::DomainError;

use crate::logging::Stage;

/// Failure of a single `Register` call.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// Request could not be turned into a user candidate
    #[error("convert_request: {0}")]
    Conversion(#[source] DomainError),

    /// Candidate violated one or more field constraints
    #[error("validate_candidate: {0}")]
    Validation(#[source] ValidationErrors),

    /// Registration delegate rejected the candidate
    #[error("register_user: {}", .0.message())]
    Downstream(Status),
}

impl RegisterError {
    pub fn stage(&self) -> Stage {
        match self {
            RegisterError::Conversion(_) => Stage::ConvertRequest,
            RegisterError::Validation(_) => Stage::ValidateCandidate,
            RegisterError::Downstream(_) => Stage::RegisterUser,
        }
    }
}

impl From<RegisterError> for Status {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Downstream(status) => status,
            other => Status::invalid_argument(other.to_string()),
        }
    }
}
