//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::Instrument;

use domain::User;
use proto::user::{
    user_service_server::UserService as UserServiceProto, RegisterRequest, RegisterResponse,
};

use super::convert::{register_request_to_user, user_model_to_proto};
use super::error::RegisterError;
use crate::context::RequestContext;
use crate::logging::Logger;
use crate::service::UserService;
use crate::validation::UserValidator;

/// Span operation name of the `Register` RPC.
const REGISTER_OPERATION: &str = "user.Register";

/// gRPC service wrapper for user registration.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
    validator: Arc<dyn UserValidator>,
    logger: Arc<dyn Logger>,
    redact_password_hash: bool,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(
        service: Arc<dyn UserService>,
        validator: Arc<dyn UserValidator>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            service,
            validator,
            logger,
            redact_password_hash: false,
        }
    }

    /// Blank the password hash of returned users.
    pub fn with_password_redaction(mut self, redact: bool) -> Self {
        self.redact_password_hash = redact;
        self
    }

    /// Convert, validate and register a request.
    async fn register_user(
        &self,
        ctx: &RequestContext,
        req: RegisterRequest,
    ) -> Result<User, RegisterError> {
        let candidate = register_request_to_user(req).map_err(RegisterError::Conversion)?;

        self.validator
            .validate(ctx, &candidate)
            .await
            .map_err(RegisterError::Validation)?;

        self.service
            .register(ctx, candidate)
            .await
            .map_err(RegisterError::Downstream)
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let ctx = RequestContext::start(REGISTER_OPERATION, request.metadata());
        let span = ctx.span().clone();

        match self
            .register_user(&ctx, request.into_inner())
            .instrument(span)
            .await
        {
            Ok(mut user) => {
                if self.redact_password_hash {
                    user.sanitize_password();
                }
                Ok(Response::new(RegisterResponse {
                    user: Some(user_model_to_proto(&user)),
                }))
            }
            Err(err) => {
                self.logger.stage_failed(&ctx, err.stage(), &err);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::Mutex;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::logging::Stage;
    use crate::service::MockUserService;
    use crate::validation::{ConstraintValidator, MockUserValidator};

    /// Logger that remembers which stages failed.
    #[derive(Default)]
    struct RecordingLogger {
        stages: Mutex<Vec<Stage>>,
    }

    impl RecordingLogger {
        fn stages(&self) -> Vec<Stage> {
            self.stages.lock().unwrap().clone()
        }
    }

    impl Logger for RecordingLogger {
        fn stage_failed(&self, _ctx: &RequestContext, stage: Stage, _error: &dyn fmt::Display) {
            self.stages.lock().unwrap().push(stage);
        }
    }

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "admin".to_string(),
            avatar: None,
            password: "secret".to_string(),
        }
    }

    fn echo_service() -> MockUserService {
        let mut service = MockUserService::new();
        service
            .expect_register()
            .times(1)
            .returning(|_, user| Ok(user));
        service
    }

    fn unreachable_service() -> MockUserService {
        let mut service = MockUserService::new();
        service.expect_register().never();
        service
    }

    fn grpc(service: MockUserService, logger: Arc<RecordingLogger>) -> UserGrpcService {
        UserGrpcService::new(
            Arc::new(service),
            Arc::new(ConstraintValidator::default()),
            logger,
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let logger = Arc::new(RecordingLogger::default());
        let svc = grpc(echo_service(), logger.clone());

        let response = svc.register(Request::new(request())).await.unwrap();
        let user = response.into_inner().user.unwrap();

        assert!(!user.uuid.is_empty());
        assert!(Uuid::parse_str(&user.uuid).is_ok());
        assert_ne!(user.password, "secret");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.role, "admin");
        assert_eq!(user.created_at, user.updated_at);
        assert!(user.created_at.is_some());
        assert!(logger.stages().is_empty());
    }

    #[tokio::test]
    async fn test_empty_email_never_reaches_service() {
        let logger = Arc::new(RecordingLogger::default());
        let svc = grpc(unreachable_service(), logger.clone());

        let mut req = request();
        req.email = String::new();
        let status = svc.register(Request::new(req)).await.unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().starts_with("validate_candidate: "));
        assert_eq!(logger.stages(), vec![Stage::ValidateCandidate]);
    }

    #[tokio::test]
    async fn test_empty_last_name_never_reaches_service() {
        let logger = Arc::new(RecordingLogger::default());
        let svc = grpc(unreachable_service(), logger.clone());

        let mut req = request();
        req.last_name = "   ".to_string();
        let status = svc.register(Request::new(req)).await.unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("last_name"));
    }

    #[tokio::test]
    async fn test_unknown_role_is_invalid_argument() {
        let logger = Arc::new(RecordingLogger::default());
        let svc = grpc(unreachable_service(), logger.clone());

        let mut req = request();
        req.role = "superuser".to_string();
        let status = svc.register(Request::new(req)).await.unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().starts_with("convert_request: "));
        assert!(status.message().contains("role"));
        assert_eq!(logger.stages(), vec![Stage::ConvertRequest]);
    }

    #[tokio::test]
    async fn test_conversion_failure_skips_validation() {
        let mut validator = MockUserValidator::new();
        validator.expect_validate().never();
        let logger = Arc::new(RecordingLogger::default());
        let svc = UserGrpcService::new(
            Arc::new(unreachable_service()),
            Arc::new(validator),
            logger.clone(),
        );

        let mut req = request();
        req.password = "abc".to_string();
        let status = svc.register(Request::new(req)).await.unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().starts_with("convert_request: "));
        assert_eq!(logger.stages(), vec![Stage::ConvertRequest]);
    }

    #[tokio::test]
    async fn test_downstream_error_is_forwarded_unchanged() {
        let mut service = MockUserService::new();
        service
            .expect_register()
            .times(1)
            .returning(|_, _| Err(Status::already_exists("Email already exists")));
        let logger = Arc::new(RecordingLogger::default());
        let svc = grpc(service, logger.clone());

        let status = svc.register(Request::new(request())).await.unwrap_err();

        assert_eq!(status.code(), tonic::Code::AlreadyExists);
        assert_eq!(status.message(), "Email already exists");
        assert_eq!(logger.stages(), vec![Stage::RegisterUser]);
    }

    #[tokio::test]
    async fn test_response_reflects_canonical_user() {
        let canonical_id = Uuid::new_v4();
        let stamped = Utc::now();
        let mut service = MockUserService::new();
        service.expect_register().times(1).returning(move |_, mut user| {
            user.user_id = canonical_id;
            user.created_at = stamped;
            user.updated_at = stamped;
            Ok(user)
        });
        let svc = grpc(service, Arc::new(RecordingLogger::default()));

        let user = svc
            .register(Request::new(request()))
            .await
            .unwrap()
            .into_inner()
            .user
            .unwrap();

        assert_eq!(user.uuid, canonical_id.to_string());
        assert_eq!(user.created_at.unwrap().seconds, stamped.timestamp());
    }

    #[tokio::test]
    async fn test_password_redaction() {
        let svc = grpc(echo_service(), Arc::new(RecordingLogger::default()))
            .with_password_redaction(true);

        let user = svc
            .register(Request::new(request()))
            .await
            .unwrap()
            .into_inner()
            .user
            .unwrap();

        assert!(user.password.is_empty());
        assert_eq!(user.email, "a@b.com");
    }
}
