//! Login page: two-field form and login outcome handling

use crate::api::models::{Credentials, LoginResult};
use crate::api::{Backend, log_failure};
use crate::form::{FieldDescriptor, Submission};
use crate::state::AuthStore;

use super::ViewError;
use super::guard::{Route, Router};

pub const TITLE: &str = "Get Access";
pub const SUBMIT_LABEL: &str = "Sign in";

pub fn login_model() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("user").with_placeholder("username"),
        FieldDescriptor::password("pass").with_placeholder("password"),
    ]
}

/// Send the submitted credentials and record the outcome in `auth`.
///
/// On success the router moves to the home page. On failure the status
/// becomes `Failed`, only the username is kept, and the error is logged and
/// returned.
pub fn submit_login<B>(
    submission: &Submission,
    backend: &B,
    auth: &AuthStore,
    router: &Router,
) -> Result<LoginResult, ViewError>
where
    B: Backend + ?Sized,
{
    let credentials = Credentials::new(submission.require("user")?, submission.require("pass")?);

    match backend.login(&credentials) {
        Ok(result) => {
            let user = credentials.user.clone();
            auth.record_login_success(credentials, result.token.clone());
            router.navigate(Route::Home);
            crate::log_info!("Logged in as {}", user);
            Ok(result)
        }
        Err(e) => {
            auth.record_login_failure(credentials.user);
            log_failure("login", &e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::form::{Form, ScriptedHost, SubmitEvent};
    use crate::state::AuthStatus;

    fn fill(user: &str, pass: &str) -> Submission {
        let mut host = ScriptedHost::new();
        let form = Form::materialize(&login_model(), &mut host);
        host.type_text("user", user);
        host.type_text("pass", pass);
        form.submit(&mut SubmitEvent::new())
    }

    #[test]
    fn test_successful_login() {
        let backend = FakeBackend::default().with_user("alice", "secret");
        let auth = AuthStore::new(AuthStatus::Pending);
        let router = Router::new(auth.clone());

        let result = submit_login(&fill("alice", "secret"), &backend, &auth, &router).unwrap();

        assert_eq!(result.token, "token-alice");
        assert_eq!(auth.status(), AuthStatus::Ok);
        assert_eq!(auth.token(), "token-alice");
        assert_eq!(auth.username(), "alice");
        assert_eq!(router.current(), Route::Home);
    }

    #[test]
    fn test_failed_login() {
        let backend = FakeBackend::default().with_user("alice", "secret");
        let auth = AuthStore::new(AuthStatus::Pending);
        let router = Router::new(auth.clone());

        let err = submit_login(&fill("alice", "wrong"), &backend, &auth, &router).unwrap_err();

        assert!(matches!(err, ViewError::Api(ref e) if e.is_unauthorized()));
        let state = auth.get();
        assert_eq!(state.status, AuthStatus::Failed);
        assert_eq!(state.user.user, "alice");
        assert_eq!(state.user.pass, "");
        assert_eq!(router.current(), Route::Login);
    }

    #[test]
    fn test_missing_field() {
        let backend = FakeBackend::default();
        let auth = AuthStore::default();
        let router = Router::new(auth.clone());
        let submission: Submission = [("user", "alice")].into_iter().collect();

        let err = submit_login(&submission, &backend, &auth, &router).unwrap_err();
        assert!(matches!(err, ViewError::Form(_)));
        assert_eq!(auth.status(), AuthStatus::Pending);
    }
}
