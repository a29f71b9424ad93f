use auth::AuthenticationError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::post::errors::PostError;
use crate::user::errors::UserError;

pub mod create_post;
pub mod current_user;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod login;
pub mod logout;
pub mod register;
pub mod session_status;
pub mod update_post;

/// Client-facing message for every authentication failure.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(&'static str, String),
    ServiceUnavailable(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(&'static str, String),
    Conflict(&'static str, String),
    /// Uniform rejection; the internal reason is never sent to the client.
    Unauthorized,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(..) => StatusCode::NOT_FOUND,
            ApiError::Conflict(..) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, message) = match self {
            ApiError::InternalServerError(kind, msg) => (kind, msg),
            ApiError::ServiceUnavailable(msg) => ("StorageError", msg),
            ApiError::UnprocessableEntity(msg) | ApiError::BadRequest(msg) => {
                ("InvalidInput", msg)
            }
            ApiError::NotFound(kind, msg) => (kind, msg),
            ApiError::Conflict(kind, msg) => (kind, msg),
            ApiError::Unauthorized => ("Unauthorized", INVALID_CREDENTIALS.to_string()),
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        if err.is_rejection() {
            return ApiError::Unauthorized;
        }

        match err {
            AuthenticationError::Session(_) => {
                tracing::error!(error = %err, "Session storage failure");
                ApiError::ServiceUnavailable("Session storage unavailable".to_string())
            }
            AuthenticationError::Token(_) => {
                tracing::error!(error = %err, "Token issuing failure");
                ApiError::InternalServerError(
                    err.kind(),
                    "Credential could not be issued".to_string(),
                )
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_) | UserError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::DuplicateUser(_) => ApiError::Conflict(err.kind(), err.to_string()),
            UserError::UserNotFound(_) | UserError::BadPassword => ApiError::Unauthorized,
            UserError::Credential(e) => ApiError::from(e),
            UserError::HashingFailure(_) => {
                tracing::error!(error = %err, "Password hashing failure");
                ApiError::InternalServerError(err.kind(), "Password hashing failed".to_string())
            }
            UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "User storage failure");
                ApiError::ServiceUnavailable("User storage unavailable".to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::InvalidField(_) => ApiError::UnprocessableEntity(err.to_string()),
            PostError::NotFound(_) => ApiError::NotFound(err.kind(), err.to_string()),
            PostError::DatabaseError(_) => {
                tracing::error!(error = %err, "Post storage failure");
                ApiError::ServiceUnavailable("Post storage unavailable".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                kind: kind.to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: String,
    pub message: String,
}
