//! crates/learnhub_core/src/auth.rs
//!
//! The mock session flow. There is no credential check: a well-formed login
//! form always succeeds, and the resulting user record is kept in whatever
//! `SessionStore` the caller injects.

use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Role, User};
use crate::ports::{FieldError, Navigator, PortError, PortResult, SessionStore};

/// The store key used when a caller does not pick one.
pub const DEFAULT_SESSION_KEY: &str = "user";
pub const LOGIN_PATH: &str = "/login";
const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern is valid")
});

//=========================================================================================
// Forms
//=========================================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub role: String,
    pub name: String,
}

fn check_credentials(email: &str, password: &str, errors: &mut Vec<FieldError>) {
    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL.is_match(email.trim()) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
}

impl LoginForm {
    pub fn validate(&self) -> PortResult<()> {
        let mut errors = Vec::new();
        check_credentials(&self.email, &self.password, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::Validation(errors))
        }
    }
}

impl RegistrationForm {
    /// Validates every field and returns the parsed role.
    pub fn validate(&self) -> PortResult<Role> {
        let mut errors = Vec::new();
        check_credentials(&self.email, &self.password, &mut errors);
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        let role = match self.role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(PortError::Validation(role_errors)) => {
                errors.extend(role_errors);
                None
            }
            Err(e) => return Err(e),
        };
        match role {
            Some(role) if errors.is_empty() => Ok(role),
            _ => Err(PortError::Validation(errors)),
        }
    }
}

//=========================================================================================
// SessionContext
//=========================================================================================

/// The explicitly passed session: a store for the user record plus the
/// navigator that performs the post-login/logout transition.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    key: String,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Keeps the record under `key` instead of the default one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restores the stored user, if any. A record that no longer parses is
    /// dropped and treated as signed out.
    pub async fn current_user(&self) -> PortResult<Option<User>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Discarding unreadable session record '{}': {}", self.key, e);
                self.store.remove(&self.key).await?;
                Ok(None)
            }
        }
    }

    /// Returns the current user when it holds `role`.
    pub async fn require_role(&self, role: Role) -> PortResult<User> {
        match self.current_user().await? {
            Some(user) if user.role == role => Ok(user),
            _ => Err(PortError::Unauthorized),
        }
    }

    /// Signs in with any well-formed email; the role is inferred from it.
    pub async fn login(&self, form: &LoginForm) -> PortResult<User> {
        form.validate()?;
        let email = form.email.trim().to_string();
        let name = email.split('@').next().unwrap_or_default().to_string();
        let user = User {
            id: Uuid::new_v4().to_string(),
            role: Role::infer_from_email(&email),
            email,
            name,
        };
        self.start(user).await
    }

    pub async fn register(&self, form: &RegistrationForm) -> PortResult<User> {
        let role = form.validate()?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: form.email.trim().to_string(),
            role,
            name: form.name.trim().to_string(),
        };
        self.start(user).await
    }

    pub async fn logout(&self) -> PortResult<()> {
        self.store.remove(&self.key).await?;
        info!("Session '{}' signed out", self.key);
        self.navigator.redirect(LOGIN_PATH);
        Ok(())
    }

    async fn start(&self, user: User) -> PortResult<User> {
        let record =
            serde_json::to_string(&user).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store.set(&self.key, record).await?;
        info!("Signed in {} as {}", user.email, user.role);
        self.navigator.redirect(user.role.home_path());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl SessionStore for MapStore {
        async fn get(&self, key: &str) -> PortResult<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: String) -> PortResult<()> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        async fn remove(&self, key: &str) -> PortResult<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Trail(Mutex<Vec<String>>);

    impl Navigator for Trail {
        fn redirect(&self, path: &str) {
            self.0.lock().unwrap().push(path.to_string());
        }
    }

    fn context() -> (SessionContext, Arc<MapStore>, Arc<Trail>) {
        let store = Arc::new(MapStore::default());
        let trail = Arc::new(Trail::default());
        (
            SessionContext::new(store.clone(), trail.clone()),
            store,
            trail,
        )
    }

    fn login_form(email: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn login_infers_role_and_redirects_home() {
        let (session, _, trail) = context();

        let creator = session.login(&login_form("jane.creator@example.com")).await.unwrap();
        assert_eq!(creator.role, Role::Creator);
        assert_eq!(creator.name, "jane.creator");

        let learner = session.login(&login_form("bob@example.com")).await.unwrap();
        assert_eq!(learner.role, Role::Learner);

        assert_eq!(
            *trail.0.lock().unwrap(),
            vec!["/creator/courses".to_string(), "/learner/courses".to_string()]
        );
        assert_eq!(session.current_user().await.unwrap(), Some(learner));
    }

    #[tokio::test]
    async fn login_rejects_malformed_form() {
        let (session, store, trail) = context();
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };
        match session.login(&form).await {
            Err(PortError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "password"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.0.lock().unwrap().is_empty());
        assert!(trail.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_uses_the_chosen_role() {
        let (session, _, trail) = context();
        let form = RegistrationForm {
            email: "learner@example.com".to_string(),
            password: "secret123".to_string(),
            role: "Creator".to_string(),
            name: "Ada".to_string(),
        };
        let user = session.register(&form).await.unwrap();
        assert_eq!(user.role, Role::Creator);
        assert_eq!(user.name, "Ada");
        assert_eq!(*trail.0.lock().unwrap(), vec!["/creator/courses".to_string()]);
    }

    #[tokio::test]
    async fn register_reports_unknown_role_and_blank_name() {
        let (session, _, _) = context();
        let form = RegistrationForm {
            email: "a@example.com".to_string(),
            password: "secret123".to_string(),
            role: "admin".to_string(),
            name: "  ".to_string(),
        };
        match session.register(&form).await {
            Err(PortError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "role"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn logout_clears_record_and_redirects_to_login() {
        let (session, store, trail) = context();
        session.login(&login_form("bob@example.com")).await.unwrap();
        session.logout().await.unwrap();

        assert!(store.0.lock().unwrap().is_empty());
        assert_eq!(session.current_user().await.unwrap(), None);
        assert_eq!(trail.0.lock().unwrap().last().map(String::as_str), Some(LOGIN_PATH));
    }

    #[tokio::test]
    async fn corrupt_record_is_dropped() {
        let (session, store, _) = context();
        store
            .set(DEFAULT_SESSION_KEY, "{not json".to_string())
            .await
            .unwrap();
        assert_eq!(session.current_user().await.unwrap(), None);
        assert!(store.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn keyed_sessions_are_independent() {
        let store = Arc::new(MapStore::default());
        let trail = Arc::new(Trail::default());
        let first = SessionContext::new(store.clone(), trail.clone()).with_key("session:a");
        let second = SessionContext::new(store.clone(), trail.clone()).with_key("session:b");

        first.login(&login_form("creator@example.com")).await.unwrap();
        assert!(second.current_user().await.unwrap().is_none());
        assert!(first.require_role(Role::Creator).await.is_ok());
        assert!(matches!(
            first.require_role(Role::Learner).await,
            Err(PortError::Unauthorized)
        ));
        assert!(matches!(
            second.require_role(Role::Creator).await,
            Err(PortError::Unauthorized)
        ));
    }
}
