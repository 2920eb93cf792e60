//! User service - persists registration candidates.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tonic::Status;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::User;

use crate::context::RequestContext;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Registration use case consumed by the gRPC layer.
///
/// Errors are returned as a ready-made [`Status`]; callers forward them as-is.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persist a validated user and return the canonical record.
    async fn register(&self, ctx: &RequestContext, user: User) -> Result<User, Status>;
}

/// In-process [`UserService`] keyed by email.
#[derive(Default)]
pub struct UserManager {
    users: RwLock<HashMap<String, User>>,
}

impl UserManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored user by (normalized) email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    /// Number of stored users.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Store `user` unless its email is taken.
    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(AppError::conflict("Email"));
        }

        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, ctx: &RequestContext, user: User) -> Result<User, Status> {
        let user = self.insert(user).await.map_err(|err| {
            warn!(
                request_id = ctx.request_id(),
                code = err.code(),
                "User rejected: {}",
                err
            );
            Status::from(err)
        })?;

        info!(
            request_id = ctx.request_id(),
            user_id = %user.user_id,
            "User registered"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::NewUser;
    use tonic::metadata::MetadataMap;

    fn prepared(email: &str) -> User {
        User::prepare_create(NewUser {
            email: email.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "user".to_string(),
            avatar: None,
            password: "secret".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_stored_user() {
        let manager = UserManager::new();
        let ctx = RequestContext::start("test", &MetadataMap::new());
        let user = prepared("a@b.com");

        let created = manager.register(&ctx, user.clone()).await.unwrap();

        assert_eq!(created, user);
        assert_eq!(manager.find_by_email("a@b.com").await, Some(user));
    }

    #[tokio::test]
    async fn test_insert_reports_conflict() {
        let manager = UserManager::new();

        manager.insert(prepared("a@b.com")).await.unwrap();
        let err = manager.insert(prepared("a@b.com")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(manager.count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let manager = UserManager::new();
        let ctx = RequestContext::start("test", &MetadataMap::new());

        manager.register(&ctx, prepared("a@b.com")).await.unwrap();
        let status = manager
            .register(&ctx, prepared("a@b.com"))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::AlreadyExists);
        assert_eq!(status.message(), "Email already exists");
        assert_eq!(manager.count().await, 1);
    }
}
