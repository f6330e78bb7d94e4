// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for authenticated API requests.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use desain_booking_api::{AuthError, AuthenticationService, UserInfo};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "desain_sid";

/// Lifetime of a session cookie in seconds (24 hours, fixed).
pub const SESSION_COOKIE_MAX_AGE: u32 = 86_400;

/// The authenticated user resolved from the `desain_sid` cookie.
///
/// Handlers that take this extractor never run for unauthenticated
/// requests. A request without the cookie is rejected before any database
/// access; a present token is resolved against the sessions table and the
/// owning user row is loaded fresh on every request.
pub struct SessionUser(pub UserInfo);

/// Rejection raised when session extraction fails.
#[derive(Debug)]
pub enum SessionError {
    /// No `desain_sid` cookie accompanied the request.
    MissingCookie,
    /// The presented token did not resolve to a live session.
    InvalidSession,
    /// Session resolution itself failed.
    Backend(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingCookie | Self::InvalidSession => HttpError::unauthorized().into_response(),
            Self::Backend(message) => {
                HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token_from_headers(&parts.headers) else {
            debug!("Rejecting request without a session cookie");
            return Err(SessionError::MissingCookie);
        };

        let mut persistence = state.persistence.lock().await;
        let result = AuthenticationService::validate_session(&mut *persistence, &token);
        drop(persistence);

        match result {
            Ok(user) => Ok(Self(UserInfo::from(user))),
            Err(AuthError::InvalidSession { reason }) => {
                warn!(reason = %reason, "Rejecting request with an unusable session token");
                Err(SessionError::InvalidSession)
            }
            Err(err) => {
                warn!(error = %err, "Session resolution failed");
                Err(SessionError::Backend(err.to_string()))
            }
        }
    }
}

/// Pulls a named cookie value out of the request's `Cookie` headers, if any.
pub fn cookie_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header_value| header_value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == cookie_name).then(|| value.to_string())
        })
}

/// Pulls the session token out of the request's `Cookie` headers, if any.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_from_headers(headers, SESSION_COOKIE)
}

/// `Set-Cookie` value installing the session cookie for `token`.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={SESSION_COOKIE_MAX_AGE}"
    )
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{session_cookie, session_token_from_headers};

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_extracted_from_single_cookie() {
        let headers = headers_with_cookie("desain_sid=1700000000-abcdef0123456789");

        let token = session_token_from_headers(&headers);

        assert_eq!(token, Some(String::from("1700000000-abcdef0123456789")));
    }

    #[test]
    fn test_session_token_extracted_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; desain_sid=tok-123; lang=id");

        let token = session_token_from_headers(&headers);

        assert_eq!(token, Some(String::from("tok-123")));
    }

    #[test]
    fn test_session_token_ignores_similarly_named_cookie() {
        let headers = headers_with_cookie("desain_sid_legacy=old; theme=dark");

        let token = session_token_from_headers(&headers);

        assert_eq!(token, None);
    }

    #[test]
    fn test_session_token_absent_without_cookie_header() {
        let headers = HeaderMap::new();

        assert_eq!(session_token_from_headers(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok-123");

        assert!(cookie.starts_with("desain_sid=tok-123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
    }
}
