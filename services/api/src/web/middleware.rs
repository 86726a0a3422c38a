//! services/api/src/web/middleware.rs
//!
//! Session middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use learnhub_core::domain::{Role, User};
use std::sync::Arc;
use tracing::{error, warn};

use crate::adapters::RecordingNavigator;
use crate::web::state::AppState;

/// Extracts the session token from the `session=` cookie.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| c.trim().strip_prefix("session="))
        .filter(|token| !token.is_empty())
}

/// Restores the signed-in user for a request.
///
/// No cookie, an unknown token or an expired session is 401. A signed-in user
/// without the `required` role is 403.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    required: Option<Role>,
) -> Result<User, StatusCode> {
    let token = session_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;

    let user = state
        .session(token, Arc::new(RecordingNavigator::new()))
        .current_user()
        .await
        .map_err(|e| {
            error!("Failed to restore session: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match required {
        Some(role) if user.role != role => {
            warn!("Rejected {} session of {} on a {} route", user.role, user.email, role);
            Err(StatusCode::FORBIDDEN)
        }
        _ => Ok(user),
    }
}

/// Middleware that restores the session user from the cookie.
///
/// If present, inserts the `User` into request extensions for handlers to use.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = authorize(&state, req.headers(), None).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Middleware for the creator area. Signed-in learners get 403 Forbidden.
pub async fn require_creator(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = authorize(&state, req.headers(), Some(Role::Creator)).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySessionStore;
    use crate::config::Config;
    use axum::http::HeaderValue;
    use chrono::Duration;
    use learnhub_core::{Catalog, CourseAdmin, LandingPages, LoginForm, Roster};
    use tokio::sync::RwLock;

    fn state_with(sessions: InMemorySessionStore) -> AppState {
        AppState {
            config: Arc::new(Config::default()),
            catalog: Arc::new(Catalog::empty()),
            sessions: Arc::new(sessions),
            roster: RwLock::new(Roster::default()),
            landing_pages: RwLock::new(LandingPages::default()),
            courses: RwLock::new(CourseAdmin::default()),
        }
    }

    fn cookie(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("session={}", token)).unwrap(),
        );
        headers
    }

    async fn sign_in(state: &AppState, token: &str, email: &str) {
        let form = LoginForm {
            email: email.to_string(),
            password: "secret123".to_string(),
        };
        state
            .session(token, Arc::new(RecordingNavigator::new()))
            .login(&form)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn signed_out_is_unauthorized_on_every_route_group() {
        let state = state_with(InMemorySessionStore::new());
        for required in [None, Some(Role::Creator)] {
            assert_eq!(
                authorize(&state, &HeaderMap::new(), required).await.err(),
                Some(StatusCode::UNAUTHORIZED)
            );
            assert_eq!(
                authorize(&state, &cookie("stale-token"), required).await.err(),
                Some(StatusCode::UNAUTHORIZED)
            );
        }
    }

    #[tokio::test]
    async fn creator_routes_forbid_learners_and_admit_creators() {
        let state = state_with(InMemorySessionStore::new());
        sign_in(&state, "learner", "bob@example.com").await;
        sign_in(&state, "creator", "jane.creator@example.com").await;

        assert_eq!(
            authorize(&state, &cookie("learner"), Some(Role::Creator)).await.err(),
            Some(StatusCode::FORBIDDEN)
        );
        let learner = authorize(&state, &cookie("learner"), None).await.unwrap();
        assert_eq!(learner.role, Role::Learner);

        let creator = authorize(&state, &cookie("creator"), Some(Role::Creator))
            .await
            .unwrap();
        assert_eq!(creator.email, "jane.creator@example.com");
    }

    #[tokio::test]
    async fn expired_session_is_unauthorized() {
        let state = state_with(InMemorySessionStore::with_ttl(Duration::zero()));
        sign_in(&state, "old", "jane.creator@example.com").await;

        assert_eq!(
            authorize(&state, &cookie("old"), Some(Role::Creator)).await.err(),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc-123"));
    }

    #[test]
    fn empty_or_missing_session_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);
    }
}
