//! Auth Service Library
//!
//! This crate exposes user registration over gRPC. A `Register` call is
//! converted into a domain candidate, validated against a constraint table,
//! handed to a [`service::UserService`] and mapped back to the wire.

pub mod config;
pub mod context;
pub mod grpc;
pub mod logging;
pub mod service;
pub mod validation;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::AuthServiceConfig;
use crate::grpc::UserGrpcService;
use crate::logging::TracingLogger;
use crate::service::{UserManager, UserService};
use crate::validation::ConstraintValidator;

/// Boxed error returned by the server entry points.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Assemble the gRPC service around a registration delegate.
pub fn build_grpc_service(
    config: &AuthServiceConfig,
    user_service: Arc<dyn UserService>,
) -> UserGrpcService {
    UserGrpcService::new(
        user_service,
        Arc::new(ConstraintValidator::default()),
        Arc::new(TracingLogger),
    )
    .with_password_redaction(config.redact_password_hash)
}

/// Run the gRPC server until `shutdown` resolves.
pub async fn run_server<F>(config: AuthServiceConfig, shutdown: F) -> Result<(), BoxError>
where
    F: Future<Output = ()> + Send,
{
    let user_service: Arc<dyn UserService> = Arc::new(UserManager::new());
    let grpc_service = build_grpc_service(&config, user_service);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        redact_password_hash = config.redact_password_hash,
        "Auth service listening on {}", addr
    );

    Server::builder()
        .add_service(proto::UserServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown)
        .await?;

    info!("Auth service stopped");
    Ok(())
}
