//! services/api/src/web/auth.rs
//!
//! Mock authentication endpoints: login, register, logout and the current user.
//! No credential is checked; the session record lives in the in-memory store
//! and the browser only holds an opaque cookie token.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use learnhub_core::domain::User;
use learnhub_core::{LoginForm, RegistrationForm};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::adapters::RecordingNavigator;
use crate::error::into_http;
use crate::web::middleware::session_token;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// `creator` or `learner`.
    pub role: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
    pub home_path: String,
    pub shows_creator_sidebar: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            home_path: user.role.home_path().to_string(),
            shows_creator_sidebar: user.role.shows_creator_sidebar(),
            role: user.role.to_string(),
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Where the client should navigate next.
    pub redirect_to: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub redirect_to: Option<String>,
}

fn session_cookie(token: &str, ttl_days: i64) -> String {
    format!(
        "session={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        token,
        chrono::Duration::days(ttl_days).num_seconds()
    )
}

const CLEARED_SESSION_COOKIE: &str = "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0";

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Sign in; the role is inferred from the email
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 422, description = "Invalid email or password format"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let form = LoginForm {
        email: req.email,
        password: req.password,
    };

    let token = Uuid::new_v4().to_string();
    let navigator = Arc::new(RecordingNavigator::new());
    let user = state
        .session(&token, navigator.clone())
        .login(&form)
        .await
        .map_err(into_http)?;

    let response = AuthResponse {
        user: user.into(),
        redirect_to: navigator.take(),
    };
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token, state.config.session_ttl_days))],
        Json(response),
    ))
}

/// POST /auth/register - Create a mock account with an explicit role
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 422, description = "Invalid registration form"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let form = RegistrationForm {
        email: req.email,
        password: req.password,
        role: req.role,
        name: req.name,
    };

    let token = Uuid::new_v4().to_string();
    let navigator = Arc::new(RecordingNavigator::new());
    let user = state
        .session(&token, navigator.clone())
        .register(&form)
        .await
        .map_err(into_http)?;

    let response = AuthResponse {
        user: user.into(),
        redirect_to: navigator.take(),
    };
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token, state.config.session_ttl_days))],
        Json(response),
    ))
}

/// POST /auth/logout - Drop the session record and clear the cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let token = session_token(&headers)
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    let navigator = Arc::new(RecordingNavigator::new());
    state
        .session(token, navigator.clone())
        .logout()
        .await
        .map_err(into_http)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, CLEARED_SESSION_COOKIE.to_string())],
        Json(LogoutResponse {
            redirect_to: navigator.take(),
        }),
    ))
}

/// GET /auth/me - The signed-in user and the navigation policy for their role
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn me_handler(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}

