//! gRPC protocol buffer definitions.
//!
//! Generated from `proto/user.proto`: the `UserService` with its `Register`
//! operation.

/// User service definitions.
pub mod user {
    tonic::include_proto!("user");
}

// Re-export commonly used items
pub use user::user_service_client::UserServiceClient;
pub use user::user_service_server::{UserService, UserServiceServer};
