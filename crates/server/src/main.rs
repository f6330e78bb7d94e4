// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod oauth;
mod session;

use axum::{
    Json, Router,
    extract::{
        Multipart, Query, State as AxumState,
        multipart::{Field, MultipartError},
    },
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use desain_booking_api::{
    ApiError, AuthError, AuthMethod, AuthenticationService, BookingInfo, BookingService,
    CreateBookingRequest, GoogleProfile, RatingService, RegisterRequest, UserInfo,
    ValidationError, validate_login,
};
use desain_booking_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info, warn};

use crate::oauth::GoogleOAuthClient;
use crate::session::SessionUser;

/// Desain Booking Server - HTTP backend for the interior design booking site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL/MariaDB connection URL; takes precedence over --database
    #[arg(long, env = "DATABASE_URL")]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory where uploaded profile photos are stored and served from
    #[arg(long, default_value = "uploads")]
    uploads_dir: PathBuf,

    /// Browser origin allowed to call the API with credentials
    #[arg(long, default_value = "http://localhost")]
    cors_origin: String,

    /// Google OAuth client ID; Google login is disabled when absent
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    google_client_id: Option<String>,

    /// Google OAuth client secret; Google login is disabled when absent
    #[arg(long, env = "GOOGLE_CLIENT_SECRET")]
    google_client_secret: Option<String>,

    /// Redirect URL registered for the Google OAuth callback
    #[arg(
        long,
        env = "GOOGLE_REDIRECT_URL",
        default_value = "http://localhost:3000/api/auth/google/callback"
    )]
    google_redirect_url: String,

    /// Frontend page the browser lands on after a successful Google login
    #[arg(
        long,
        default_value = "http://localhost/webdesigninterior/dash2/index.php"
    )]
    frontend_success_url: String,

    /// Frontend login page the browser is sent back to when a Google login fails
    #[arg(
        long,
        default_value = "http://localhost/webdesigninterior/dash2/login.php"
    )]
    frontend_login_url: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the pieces of configuration handlers need.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for users, sessions and bookings.
    persistence: Arc<Mutex<Persistence>>,
    /// Directory uploaded profile photos are written to.
    uploads_dir: PathBuf,
    /// Google OAuth client, present only when credentials are configured.
    oauth: Option<Arc<GoogleOAuthClient>>,
    /// Frontend page for successful Google logins.
    frontend_success_url: String,
    /// Frontend login page for failed Google logins.
    frontend_login_url: String,
}

/// API request for logging in with local credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The username (the registration email).
    username: Option<String>,
    /// The plain text password.
    password: Option<String>,
}

/// Success envelope carrying only a message.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct StatusMessageResponse {
    /// Always `"success"`.
    status: String,
    /// Human-readable outcome message.
    message: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiResponse {
    /// Always `"success"`.
    status: String,
    /// Human-readable outcome message.
    message: String,
    /// The sanitized user record.
    user: UserInfo,
}

/// API response for the current-user endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UserDataResponse {
    /// Always `"success"`.
    status: String,
    /// The sanitized user record.
    data: UserInfo,
}

/// API response for the booking list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookingListResponse {
    /// Always `"success"`.
    status: String,
    /// The caller's bookings, newest move-in date first.
    data: Vec<BookingInfo>,
}

/// API request for creating a booking.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct CreateBookingApiRequest {
    /// Advisory code previewed by the frontend; the server generates the
    /// authoritative one.
    kode_booking: Option<String>,
    /// The move-in date (ISO date).
    tgl_masuk: Option<String>,
    /// The contact name.
    nama: Option<String>,
    /// The contact phone number.
    nohp: Option<String>,
    /// The project address.
    alamat: Option<String>,
    /// The room type.
    tipe_ruang: Option<String>,
    /// The room dimensions.
    ukuran_ruang: Option<String>,
    /// The style preference.
    preferensi: Option<String>,
    /// Optional accessories notes.
    aksesoris: Option<String>,
    /// The budget figure.
    budget: Option<String>,
    /// The theme.
    tema: Option<String>,
    /// The selected materials.
    #[serde(default)]
    jenis_material: Vec<String>,
}

impl From<CreateBookingApiRequest> for CreateBookingRequest {
    fn from(request: CreateBookingApiRequest) -> Self {
        Self {
            kode_booking: request.kode_booking,
            tgl_masuk: request.tgl_masuk,
            nama: request.nama,
            nohp: request.nohp,
            alamat: request.alamat,
            tipe_ruang: request.tipe_ruang,
            ukuran_ruang: request.ukuran_ruang,
            preferensi: request.preferensi,
            aksesoris: request.aksesoris,
            budget: request.budget,
            tema: request.tema,
            jenis_material: request.jenis_material,
        }
    }
}

/// API response for a successful booking creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateBookingApiResponse {
    /// Always `"success"`.
    status: String,
    /// Human-readable outcome message.
    message: String,
    /// The authoritative stored booking code.
    kode_booking: String,
}

/// API response for the booking code preview endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct NewBookingCodeResponse {
    /// Always `"success"`.
    status: String,
    /// The code the next created booking is expected to receive.
    #[serde(rename = "newBookingCode")]
    new_booking_code: String,
}

/// API request for submitting a rating.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RatingApiRequest {
    /// The testimonial text.
    penilaian: Option<String>,
}

/// Query parameters Google sends to the OAuth callback.
#[derive(Debug, Clone, Deserialize)]
struct CallbackQuery {
    /// The authorization code, absent when the user denied consent.
    code: Option<String>,
    /// The echoed `state` parameter.
    state: Option<String>,
}

/// Error response body.
///
/// Session rejections carry `{"status":"error","message":"Unauthorized"}`;
/// every other error is a bare `{"message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// `"error"` on session rejections, omitted otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    /// The stable client-facing message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The client-facing error body.
    body: ErrorResponse,
}

impl HttpError {
    /// Creates an error with the plain `{"message": ...}` body.
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: ErrorResponse {
                status: None,
                message,
            },
        }
    }

    /// The session rejection error: `401 {"status":"error","message":"Unauthorized"}`.
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorResponse {
                status: Some(String::from("error")),
                message: String::from("Unauthorized"),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(self.body);
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation { .. } => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::InvalidCredentials { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            ApiError::Unauthorized => Self::unauthorized(),
            ApiError::Conflict { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            ApiError::Internal { .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        Self::from(ApiError::from(err))
    }
}

impl From<ValidationError> for HttpError {
    fn from(err: ValidationError) -> Self {
        Self::from(ApiError::from(err))
    }
}

/// Handles requests to register a local account.
///
/// Accepts a multipart form with the text fields `nama`, `username`,
/// `password`, `posisi` and the photo file field `gambar`. The photo is
/// written to the uploads directory before the account is created.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<StatusMessageResponse>), HttpError> {
    info!("Handling register request");

    let mut request = RegisterRequest::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| register_form_error(&err))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "nama" => request.nama = Some(field_text(field).await?),
            "username" => request.username = Some(field_text(field).await?),
            "password" => request.password = Some(field_text(field).await?),
            "posisi" => request.posisi = Some(field_text(field).await?),
            "gambar" => {
                let original_name: Option<String> = field.file_name().map(ToString::to_string);
                let data = field.bytes().await.map_err(|err| register_form_error(&err))?;
                if data.is_empty() {
                    continue;
                }
                let stored: String =
                    store_upload(&app_state.uploads_dir, original_name.as_deref(), &data).await?;
                request.gambar_path = Some(stored);
            }
            _ => {}
        }
    }

    let mut persistence = app_state.persistence.lock().await;
    let result = AuthenticationService::register(&mut *persistence, &request);
    drop(persistence);
    let response = result?;

    Ok((
        StatusCode::CREATED,
        Json(StatusMessageResponse {
            status: String::from("success"),
            message: response.message,
        }),
    ))
}

/// Reads a text part, mapping failures onto the register error contract.
async fn field_text(field: Field<'_>) -> Result<String, HttpError> {
    field.text().await.map_err(|err| register_form_error(&err))
}

/// Maps a multipart decode failure onto the register error contract.
fn register_form_error(err: &MultipartError) -> HttpError {
    error!(error = %err, "Failed to read register form");
    HttpError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        String::from("Terjadi kesalahan server saat registrasi."),
    )
}

/// Writes an uploaded photo into the uploads directory.
///
/// The stored name is `{unix_millis}{original extension}`; the returned
/// value is the relative path recorded in the user row.
async fn store_upload(
    uploads_dir: &Path,
    original_name: Option<&str>,
    data: &[u8],
) -> Result<String, HttpError> {
    let millis: u128 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis();
    let extension: String = original_name
        .and_then(|name| name.rsplit_once('.'))
        .map_or_else(String::new, |(_, ext)| format!(".{ext}"));
    let file_name = format!("{millis}{extension}");

    let local_path = uploads_dir.join(&file_name);
    tokio::fs::write(&local_path, data).await.map_err(|err| {
        error!(error = %err, path = %local_path.display(), "Failed to store uploaded photo");
        HttpError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("Terjadi kesalahan server saat registrasi."),
        )
    })?;

    Ok(format!("{}/{file_name}", uploads_dir.display()))
}

/// Handles login requests with local credentials.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<LoginApiRequest>,
) -> Result<([(HeaderName, String); 1], Json<LoginApiResponse>), HttpError> {
    info!("Handling login request");

    let (username, password) =
        validate_login(request.username.as_deref(), request.password.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let result = AuthenticationService::authenticate(
        &mut *persistence,
        AuthMethod::Local { username, password },
    );
    drop(persistence);
    let (token, user) = result?;

    info!(username = %user.username, "User logged in");
    Ok((
        [(header::SET_COOKIE, session::session_cookie(&token))],
        Json(LoginApiResponse {
            status: String::from("success"),
            message: String::from("Login berhasil"),
            user: UserInfo::from(user),
        }),
    ))
}

/// Handles logout requests.
///
/// Idempotent: succeeds with or without a live session and always sends a
/// clearing `Set-Cookie`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<([(HeaderName, String); 1], Json<StatusMessageResponse>), HttpError> {
    info!("Handling logout request");

    if let Some(token) = session::session_token_from_headers(&headers) {
        let mut persistence = app_state.persistence.lock().await;
        let result = AuthenticationService::logout(&mut *persistence, &token);
        drop(persistence);
        result?;
    }

    Ok((
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Json(StatusMessageResponse {
            status: String::from("success"),
            message: String::from("Logout berhasil"),
        }),
    ))
}

/// Returns the authenticated user's sanitized record.
#[allow(clippy::unused_async)]
async fn handle_current_user(SessionUser(user): SessionUser) -> Json<UserDataResponse> {
    Json(UserDataResponse {
        status: String::from("success"),
        data: user,
    })
}

/// Handles requests to list the authenticated user's bookings.
async fn handle_list_bookings(
    SessionUser(user): SessionUser,
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<BookingListResponse>, HttpError> {
    info!(username = %user.username, "Handling booking list request");

    let mut persistence = app_state.persistence.lock().await;
    let result = BookingService::list_bookings(&mut *persistence, &user.username);
    drop(persistence);
    let bookings: Vec<BookingInfo> = result?;

    Ok(Json(BookingListResponse {
        status: String::from("success"),
        data: bookings,
    }))
}

/// Handles requests to create a booking for the authenticated user.
async fn handle_create_booking(
    SessionUser(user): SessionUser,
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateBookingApiRequest>,
) -> Result<(StatusCode, Json<CreateBookingApiResponse>), HttpError> {
    info!(username = %user.username, "Handling booking create request");

    let mut persistence = app_state.persistence.lock().await;
    let result = BookingService::create_booking(
        &mut *persistence,
        &user.username,
        CreateBookingRequest::from(request),
    );
    drop(persistence);
    let response = result?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingApiResponse {
            status: String::from("success"),
            message: response.message,
            kode_booking: response.kode_booking,
        }),
    ))
}

/// Handles requests to preview the next booking code without reserving it.
async fn handle_new_booking_code(
    SessionUser(user): SessionUser,
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<NewBookingCodeResponse>, HttpError> {
    info!(username = %user.username, "Handling booking code preview request");

    let mut persistence = app_state.persistence.lock().await;
    let result = BookingService::preview_next_code(&mut *persistence);
    drop(persistence);
    let code: String = result?;

    Ok(Json(NewBookingCodeResponse {
        status: String::from("success"),
        new_booking_code: code,
    }))
}

/// Handles requests to submit the authenticated user's rating.
async fn handle_submit_rating(
    SessionUser(user): SessionUser,
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RatingApiRequest>,
) -> Result<Json<StatusMessageResponse>, HttpError> {
    info!(user_id = user.id, "Handling rating request");

    let mut persistence = app_state.persistence.lock().await;
    let result =
        RatingService::submit_rating(&mut *persistence, user.id, request.penilaian.as_deref());
    drop(persistence);
    let response = result?;

    Ok(Json(StatusMessageResponse {
        status: String::from("success"),
        message: response.message,
    }))
}

/// Starts the Google OAuth flow by redirecting to the consent screen.
#[allow(clippy::unused_async)]
async fn handle_google_login(
    AxumState(app_state): AxumState<AppState>,
) -> Result<([(HeaderName, String); 1], Redirect), HttpError> {
    let Some(oauth_client) = app_state.oauth.as_ref() else {
        warn!("Google login requested but no OAuth credentials are configured");
        return Err(HttpError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            String::from("Login Google tidak tersedia."),
        ));
    };

    let state: String = oauth::generate_state();
    let url: String = oauth_client.authorize_url(&state);

    info!("Redirecting to Google consent screen");
    Ok((
        [(header::SET_COOKIE, oauth::state_cookie(&state))],
        Redirect::to(&url),
    ))
}

/// Handles the Google OAuth callback.
///
/// Verifies the `state` round trip, exchanges the code, merges the account
/// and opens a session. Every failure sends the browser back to the
/// frontend login page; no error body is ever rendered.
async fn handle_google_callback(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    info!("Handling Google OAuth callback");

    match complete_google_login(&app_state, &headers, query).await {
        Ok(token) => (
            AppendHeaders([
                (header::SET_COOKIE, session::session_cookie(&token)),
                (header::SET_COOKIE, oauth::clear_state_cookie()),
            ]),
            Redirect::to(&app_state.frontend_success_url),
        )
            .into_response(),
        Err(reason) => {
            warn!(reason = %reason, "Google login failed");
            (
                [(header::SET_COOKIE, oauth::clear_state_cookie())],
                Redirect::to(&app_state.frontend_login_url),
            )
                .into_response()
        }
    }
}

/// Runs the callback leg of the Google flow and returns the session token.
async fn complete_google_login(
    app_state: &AppState,
    headers: &HeaderMap,
    query: CallbackQuery,
) -> Result<String, String> {
    let Some(oauth_client) = app_state.oauth.as_ref() else {
        return Err(String::from("OAuth credentials are not configured"));
    };
    let Some(code) = query.code else {
        return Err(String::from("callback carried no authorization code"));
    };
    let expected_state: String = session::cookie_from_headers(headers, oauth::STATE_COOKIE)
        .ok_or_else(|| String::from("state cookie is missing"))?;
    if query.state.as_deref() != Some(expected_state.as_str()) {
        return Err(String::from("state parameter does not match the cookie"));
    }

    let access_token: String = oauth_client
        .exchange_code(&code)
        .await
        .map_err(|err| err.to_string())?;
    let profile = oauth_client
        .fetch_profile(&access_token)
        .await
        .map_err(|err| err.to_string())?;

    // The avatar is written to disk before the persistence lock is taken;
    // only the local path ever reaches the database.
    let image_path: String = oauth_client
        .download_avatar(
            &app_state.uploads_dir,
            &profile.id,
            profile.picture.as_deref(),
        )
        .await
        .map_err(|err| err.to_string())?;

    let mut persistence = app_state.persistence.lock().await;
    let result = AuthenticationService::authenticate(
        &mut *persistence,
        AuthMethod::Google(GoogleProfile {
            google_id: profile.id,
            email: profile.email,
            display_name: profile.name,
            image_path,
        }),
    );
    drop(persistence);

    let (token, user) = result.map_err(|err| err.to_string())?;
    info!(username = %user.username, "Google login succeeded");
    Ok(token)
}

/// Builds the router with all endpoints and shared state.
fn build_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    let cors: CorsLayer = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/api/register", post(handle_register))
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/user", get(handle_current_user))
        .route(
            "/api/bookings",
            get(handle_list_bookings).post(handle_create_booking),
        )
        .route("/api/booking/new-code", get(handle_new_booking_code))
        .route("/api/rating", patch(handle_submit_rating))
        .route("/api/auth/google", get(handle_google_login))
        .route("/api/auth/google/callback", get(handle_google_callback))
        .nest_service("/uploads", ServeDir::new(&app_state.uploads_dir))
        .layer(cors)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Desain Booking Server");

    let persistence: Persistence = if let Some(mysql_url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(mysql_url)?
    } else if let Some(database) = &args.database {
        info!("Using file-based database at: {database}");
        Persistence::new_with_file(database)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    tokio::fs::create_dir_all(&args.uploads_dir).await?;

    let oauth_client: Option<Arc<GoogleOAuthClient>> =
        if let (Some(client_id), Some(client_secret)) =
            (args.google_client_id, args.google_client_secret)
        {
            info!("Google login is enabled");
            Some(Arc::new(GoogleOAuthClient::new(
                client_id,
                client_secret,
                args.google_redirect_url,
            )))
        } else {
            info!("Google login is disabled; no OAuth credentials configured");
            None
        };

    let app_state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        uploads_dir: args.uploads_dir,
        oauth: oauth_client,
        frontend_success_url: args.frontend_success_url,
        frontend_login_url: args.frontend_login_url,
    };

    let cors_origin: HeaderValue = args.cors_origin.parse()?;
    let app: Router = build_router(app_state, cors_origin);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
