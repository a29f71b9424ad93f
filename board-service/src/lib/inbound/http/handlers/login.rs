use auth::AuthStrategy;
use auth::Credential;
use auth::CredentialTransport;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    // Input that cannot belong to any account fails like a wrong password.
    let command = body.try_into_command().ok_or(ApiError::Unauthorized)?;

    let LoginOutcome {
        identity,
        credential,
    } = state.user_service.login(command).await?;

    let (jar, token) = match (credential, state.authenticator.transport()) {
        (Credential::SessionId(id), CredentialTransport::Cookie(name)) => {
            (jar.add(session_cookie(name, id)), None)
        }
        (credential, _) => (jar, Some(credential.as_str().to_string())),
    };

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                user_id: identity.user_id().to_string(),
                token,
            },
        ),
    ))
}

/// Cookie carrying a session id: HttpOnly, SameSite=Lax, whole-site path.
pub fn session_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    userid: String,
    password: String,
}

impl LoginRequestBody {
    fn try_into_command(self) -> Option<LoginCommand> {
        let user_id = UserId::new(self.userid).ok()?;
        let password = Password::new(self.password).ok()?;
        Some(LoginCommand::new(user_id, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
