use async_trait::async_trait;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing user id and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateUser` - User id is already taken
    /// * `HashingFailure` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials and issue credential material.
    ///
    /// # Arguments
    /// * `command` - Validated command containing user id and password
    ///
    /// # Returns
    /// Authenticated identity plus the credential for the active strategy
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `BadPassword` - Password does not match
    /// * `Credential` - Credential could not be issued
    /// * `HashingFailure` - Password verification could not run
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Credential store: persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user if no user with the same id exists.
    ///
    /// Existence check and insert are one atomic operation backed by a
    /// uniqueness constraint.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateUser` - User id is already taken
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User id
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}
