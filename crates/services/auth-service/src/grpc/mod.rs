//! gRPC edge of the service.

mod convert;
mod error;
mod user_grpc;

pub use convert::{register_request_to_user, user_model_to_proto};
pub use error::RegisterError;
pub use user_grpc::UserGrpcService;
