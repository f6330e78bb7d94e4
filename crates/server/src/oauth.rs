// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Google OAuth 2.0 flow: consent URL, code exchange, profile fetch and
//! avatar download.
//!
//! Only the HTTP legs against Google live here. Account merging is the
//! authentication service's job; the callback handler feeds it the profile
//! with the avatar already stored on local disk.

use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Url;
use tracing::{debug, info};

/// Google's OAuth 2.0 consent endpoint.
const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's code-for-token exchange endpoint.
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Google's profile endpoint for the `openid email profile` scopes.
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Name of the short-lived cookie binding the OAuth `state` parameter.
pub const STATE_COOKIE: &str = "desain_oauth_state";

/// Lifetime of the state cookie in seconds. The round trip to Google's
/// consent screen normally completes within a minute.
pub const STATE_COOKIE_MAX_AGE: u32 = 600;

/// Failure in the callback leg of the OAuth flow.
///
/// The callback handler logs these and redirects the browser back to the
/// frontend login page; the detail never reaches the client.
#[derive(Debug)]
pub enum OAuthError {
    /// The code-for-token exchange was rejected or unreachable.
    TokenExchange(String),
    /// The profile fetch was rejected or unreachable.
    ProfileFetch(String),
    /// The avatar could not be downloaded or stored locally.
    AvatarDownload(String),
}

impl fmt::Display for OAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExchange(detail) => write!(f, "Token exchange failed: {detail}"),
            Self::ProfileFetch(detail) => write!(f, "Profile fetch failed: {detail}"),
            Self::AvatarDownload(detail) => write!(f, "Avatar download failed: {detail}"),
        }
    }
}

impl std::error::Error for OAuthError {}

/// Token response from the exchange endpoint.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    /// Bearer token for the userinfo endpoint.
    access_token: String,
}

/// Profile fields returned by the userinfo endpoint.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoogleUserInfo {
    /// Stable Google account identifier.
    pub id: String,
    /// Primary email address of the account.
    pub email: String,
    /// Display name of the account.
    pub name: String,
    /// Avatar URL, when the account has one.
    #[serde(default)]
    pub picture: Option<String>,
}

/// Client for Google's OAuth 2.0 endpoints.
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl GoogleOAuthClient {
    /// Creates a client for the registered application.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            redirect_url,
        }
    }

    /// Builds the consent-screen URL the browser is redirected to.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        let url: Url = Url::parse_with_params(
            AUTHORIZE_ENDPOINT,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .expect("authorize endpoint is a valid base URL");
        url.into()
    }

    /// Exchanges the callback `code` for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        debug!("Exchanging authorization code for an access token");

        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|err| OAuthError::TokenExchange(err.to_string()))?;
        if !response.status().is_success() {
            return Err(OAuthError::TokenExchange(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|err| OAuthError::TokenExchange(err.to_string()))?;
        Ok(tokens.access_token)
    }

    /// Fetches the authenticated user's profile.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthError> {
        let response = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| OAuthError::ProfileFetch(err.to_string()))?;
        if !response.status().is_success() {
            return Err(OAuthError::ProfileFetch(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|err| OAuthError::ProfileFetch(err.to_string()))
    }

    /// Downloads the avatar into the uploads directory and returns the
    /// stored relative path. Accounts without an avatar store an empty
    /// path. The download happens before any database write; only the
    /// local path ever reaches the database.
    pub async fn download_avatar(
        &self,
        uploads_dir: &Path,
        google_id: &str,
        picture_url: Option<&str>,
    ) -> Result<String, OAuthError> {
        let Some(picture_url) = picture_url else {
            debug!(google_id, "Google account has no avatar to download");
            return Ok(String::new());
        };

        let response = self
            .http
            .get(picture_url)
            .send()
            .await
            .map_err(|err| OAuthError::AvatarDownload(err.to_string()))?;
        if !response.status().is_success() {
            return Err(OAuthError::AvatarDownload(format!(
                "avatar URL returned {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| OAuthError::AvatarDownload(err.to_string()))?;

        let file_name: String = avatar_file_name(google_id);
        let local_path = uploads_dir.join(&file_name);
        tokio::fs::write(&local_path, &bytes)
            .await
            .map_err(|err| OAuthError::AvatarDownload(err.to_string()))?;

        info!(google_id, path = %local_path.display(), "Stored Google avatar");
        Ok(format!("{}/{file_name}", uploads_dir.display()))
    }
}

/// Random, URL-safe `state` value for a new OAuth round trip.
#[must_use]
pub fn generate_state() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// `Set-Cookie` value binding `state` for the round trip to Google.
#[must_use]
pub fn state_cookie(state: &str) -> String {
    format!(
        "{STATE_COOKIE}={state}; HttpOnly; Path=/; SameSite=Lax; Max-Age={STATE_COOKIE_MAX_AGE}"
    )
}

/// `Set-Cookie` value clearing the state cookie.
#[must_use]
pub fn clear_state_cookie() -> String {
    format!("{STATE_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

/// Collision-resistant avatar file name, `{google_id}_{unix_millis}.jpg`.
fn avatar_file_name(google_id: &str) -> String {
    let millis: u128 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis();
    format!("{google_id}_{millis}.jpg")
}
