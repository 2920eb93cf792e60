//! Common utilities shared across services.
//!
//! This crate provides the application error type and its mapping onto
//! gRPC status codes.

pub mod error;

pub use error::{AppError, AppResult};
