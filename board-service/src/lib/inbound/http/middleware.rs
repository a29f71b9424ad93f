use auth::AuthStrategy;
use auth::CredentialTransport;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Pull the credential for `transport` out of the request headers.
///
/// Returns `None` when nothing usable was presented.
pub fn presented_credential(
    headers: &HeaderMap,
    transport: CredentialTransport<'_>,
) -> Option<String> {
    match transport {
        CredentialTransport::BearerHeader => headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string),
        CredentialTransport::Cookie(name) => CookieJar::from_headers(headers)
            .get(name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty()),
    }
}

/// Middleware that authenticates the presented credential and adds the
/// resulting `auth::Identity` to request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let transport = state.authenticator.transport();

    // Missing credential material never reaches the authentication core.
    let presented = presented_credential(req.headers(), transport).ok_or_else(|| {
        tracing::debug!(uri = %req.uri(), "No credential presented");
        ApiError::Unauthorized.into_response()
    })?;

    let identity = state
        .authenticator
        .authenticate(&presented)
        .await
        .map_err(|e| {
            tracing::warn!(kind = e.kind(), "Authentication rejected");
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_header_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            presented_credential(&headers, CredentialTransport::BearerHeader),
            None
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(
            presented_credential(&headers, CredentialTransport::BearerHeader),
            None
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(
            presented_credential(&headers, CredentialTransport::BearerHeader),
            None
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer a.b.c"));
        assert_eq!(
            presented_credential(&headers, CredentialTransport::BearerHeader),
            Some("a.b.c".to_string())
        );
    }

    #[test]
    fn test_cookie_extraction_uses_configured_name() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123"),
        );

        assert_eq!(
            presented_credential(&headers, CredentialTransport::Cookie("session")),
            Some("abc123".to_string())
        );
        assert_eq!(
            presented_credential(&headers, CredentialTransport::Cookie("sid")),
            None
        );
        // A bearer header is ignored by the cookie transport
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer a.b.c"));
        assert_eq!(
            presented_credential(&headers, CredentialTransport::Cookie("sid")),
            None
        );
    }
}
