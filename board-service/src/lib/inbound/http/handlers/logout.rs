use auth::AuthStrategy;
use auth::CredentialTransport;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::presented_credential;
use crate::inbound::http::router::AppState;

/// Revoke whatever credential was presented. Repeating a logout succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<LogoutResponseData>), ApiError> {
    let transport = state.authenticator.transport();

    if let Some(presented) = presented_credential(&headers, transport) {
        state.authenticator.revoke(&presented).await?;
    }

    let jar = match transport {
        CredentialTransport::Cookie(name) => {
            jar.remove(Cookie::build((name.to_string(), "")).path("/").build())
        }
        CredentialTransport::BearerHeader => jar,
    };

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, LogoutResponseData { logged_out: true }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub logged_out: bool,
}
