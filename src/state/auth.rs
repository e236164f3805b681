//! Authentication state: login status, credentials and bearer token

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::observable::{Observable, Subscription};

/// Where the login flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    #[default]
    Pending,
    Ok,
    Failed,
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthStatus::Pending => "pending",
            AuthStatus::Ok => "ok",
            AuthStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl FromStr for AuthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(AuthStatus::Pending),
            "ok" => Ok(AuthStatus::Ok),
            "failed" => Ok(AuthStatus::Failed),
            other => Err(format!(
                "unknown auth status '{}' (expected pending, ok or failed)",
                other
            )),
        }
    }
}

/// Username and password pair, also the login request body
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Credentials,
    pub token: String,
}

/// Shared container for [`AuthState`]
#[derive(Debug, Clone)]
pub struct AuthStore {
    state: Observable<AuthState>,
}

impl AuthStore {
    /// Start with an explicit status. The startup status comes from
    /// `[auth] initial_status` in the settings.
    pub fn new(initial_status: AuthStatus) -> Self {
        Self {
            state: Observable::new(AuthState {
                status: initial_status,
                ..AuthState::default()
            }),
        }
    }

    pub fn get(&self) -> AuthState {
        self.state.get()
    }

    pub fn set(&self, state: AuthState) {
        self.state.set(state);
    }

    pub fn subscribe(&self, f: impl Fn(&AuthState) + 'static) -> Subscription {
        self.state.subscribe(f)
    }

    pub fn status(&self) -> AuthStatus {
        self.state.with(|s| s.status)
    }

    pub fn token(&self) -> String {
        self.state.with(|s| s.token.clone())
    }

    pub fn username(&self) -> String {
        self.state.with(|s| s.user.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Ok
    }

    /// Seed a token obtained out of band (e.g. `--token`)
    pub fn use_token(&self, user: Option<&str>, token: impl Into<String>) {
        let token = token.into();
        self.state.update(|s| {
            s.status = AuthStatus::Ok;
            if let Some(user) = user {
                s.user = Credentials::new(user, "");
            }
            s.token = token;
        });
    }

    /// Record a successful login: status, credentials and token in one change
    pub fn record_login_success(&self, credentials: Credentials, token: impl Into<String>) {
        tracing::debug!("login succeeded for {}", credentials.user);
        let token = token.into();
        self.state.update(|s| {
            s.status = AuthStatus::Ok;
            s.user = credentials;
            s.token = token;
        });
    }

    /// Record a failed login. Only the attempted username is kept; the
    /// password and any previous token are cleared.
    pub fn record_login_failure(&self, user: impl Into<String>) {
        let user = user.into();
        tracing::debug!("login failed for {}", user);
        self.state.update(|s| {
            s.status = AuthStatus::Failed;
            s.user = Credentials::new(user, "");
            s.token.clear();
        });
    }

    pub fn set_status(&self, status: AuthStatus) {
        self.state.update(|s| s.status = status);
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new(AuthStatus::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_status_is_pending() {
        let auth = AuthStore::default();
        assert_eq!(auth.status(), AuthStatus::Pending);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_initial_status_is_configurable() {
        let auth = AuthStore::new(AuthStatus::Ok);
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_login_success_stores_token() {
        let auth = AuthStore::default();
        auth.record_login_success(Credentials::new("alice", "secret"), "tok123");

        let state = auth.get();
        assert_eq!(state.status, AuthStatus::Ok);
        assert_eq!(state.token, "tok123");
        assert_eq!(state.user.user, "alice");
        assert_eq!(state.user.pass, "secret");
    }

    #[test]
    fn test_login_failure_keeps_only_username() {
        let auth = AuthStore::default();
        auth.record_login_success(Credentials::new("alice", "secret"), "tok123");
        auth.record_login_failure("bob");

        let state = auth.get();
        assert_eq!(state.status, AuthStatus::Failed);
        assert_eq!(state.user.user, "bob");
        assert_eq!(state.user.pass, "");
        assert!(state.token.is_empty());
    }

    #[test]
    fn test_login_outcome_notifies_once() {
        let auth = AuthStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = auth.subscribe(move |s| sink.borrow_mut().push(s.status));

        auth.record_login_success(Credentials::new("alice", "pw"), "t");

        assert_eq!(*seen.borrow(), vec![AuthStatus::Ok]);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("OK".parse::<AuthStatus>().unwrap(), AuthStatus::Ok);
        assert_eq!("pending".parse::<AuthStatus>().unwrap(), AuthStatus::Pending);
        assert!("maybe".parse::<AuthStatus>().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }
}
