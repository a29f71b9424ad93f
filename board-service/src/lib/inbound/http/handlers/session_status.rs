use auth::AuthStrategy;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::presented_credential;
use crate::inbound::http::router::AppState;

/// Report whether the request carries a live credential. Never rejects.
pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<SessionStatusResponseData>, ApiError> {
    let Some(presented) = presented_credential(&headers, state.authenticator.transport()) else {
        return Ok(ApiSuccess::new(
            StatusCode::OK,
            SessionStatusResponseData::logged_out(),
        ));
    };

    let data = match state.authenticator.authenticate(&presented).await {
        Ok(identity) => SessionStatusResponseData {
            is_logged_in: true,
            user_id: Some(identity.user_id().to_string()),
        },
        Err(e) if e.is_rejection() => {
            tracing::debug!(kind = e.kind(), "Session status: credential rejected");
            SessionStatusResponseData::logged_out()
        }
        Err(e) => return Err(ApiError::from(e)),
    };

    Ok(ApiSuccess::new(StatusCode::OK, data))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatusResponseData {
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SessionStatusResponseData {
    fn logged_out() -> Self {
        Self {
            is_logged_in: false,
            user_id: None,
        }
    }
}
