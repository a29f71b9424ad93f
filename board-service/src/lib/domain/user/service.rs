use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthStrategy;
use auth::HashRecord;
use auth::Identity;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<dyn AuthStrategy>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Active authentication strategy
    /// * `password_hasher` - Password hasher with the configured cost
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<dyn AuthStrategy>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            authenticator,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<HashRecord, UserError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| UserError::HashingFailure(e.to_string()))?
            .map_err(|e| UserError::HashingFailure(e.to_string()))
    }

    /// Verify off the async executor. Without a stored record a throwaway hash
    /// is computed so unknown users cost as much as wrong passwords.
    async fn verify_password(
        &self,
        password: Password,
        record: Option<HashRecord>,
    ) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || match record {
            Some(record) => hasher.verify(password.expose(), &record),
            None => {
                let _ = hasher.hash(password.expose());
                false
            }
        })
        .await
        .map_err(|e| UserError::HashingFailure(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;
        let user = User::new(command.user_id, password_hash, Utc::now());

        // The store's uniqueness constraint is the only duplicate check.
        let created_user = self.repository.insert(user).await.map_err(|e| {
            if let UserError::DuplicateUser(user_id) = &e {
                tracing::info!(user_id = %user_id, "Registration rejected: user id taken");
            }
            e
        })?;

        tracing::info!(user_id = %created_user.id, "User registered");
        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let user = self.repository.find_by_id(&command.user_id).await?;
        let record = user.as_ref().map(|u| u.password_hash.clone());
        let password_matches = self.verify_password(command.password, record).await?;

        let user = match user {
            None => {
                tracing::warn!(user_id = %command.user_id, kind = "UserNotFound", "Login rejected");
                return Err(UserError::UserNotFound(command.user_id.to_string()));
            }
            Some(_) if !password_matches => {
                tracing::warn!(user_id = %command.user_id, kind = "BadPassword", "Login rejected");
                return Err(UserError::BadPassword);
            }
            Some(user) => user,
        };

        let credential = self.authenticator.issue_credential(user.id.as_str()).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            identity: Identity::new(user.id.as_str()),
            credential,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound(id.to_string()))
    }
}
