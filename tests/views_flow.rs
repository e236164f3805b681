//! Login gate and deployment flow through the public view API

use std::cell::RefCell;

use kubedash::api::models::{
    ApiErrorBody, CreateDeploymentRequest, Credentials, LoginResult, PodList, ServiceList,
    StatusResponse,
};
use kubedash::api::{ApiError, Backend};
use kubedash::form::{Form, ScriptedHost, SubmitEvent};
use kubedash::state::{AppState, AuthStatus};
use kubedash::views::deployment::{build_request, deployment_model, submit_deployment};
use kubedash::views::home::{HomePage, load_resources};
use kubedash::views::login::{login_model, submit_login};
use kubedash::views::{Route, Router, ViewError};

#[derive(Default)]
struct StubBackend {
    sent: RefCell<Vec<CreateDeploymentRequest>>,
}

impl Backend for StubBackend {
    fn login(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        if credentials.user == "alice" && credentials.pass == "secret" {
            Ok(LoginResult {
                token: "tok123".to_string(),
            })
        } else {
            Err(ApiError::Status {
                url: "http://stub/api/v1/login".to_string(),
                status: reqwest::StatusCode::UNAUTHORIZED,
                body: ApiErrorBody {
                    error: "invalid credentials".to_string(),
                    param: None,
                },
            })
        }
    }

    fn list_namespaces(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["default".to_string(), "apps".to_string()])
    }

    fn list_pods(&self) -> Result<PodList, ApiError> {
        Ok(PodList { pods: Vec::new() })
    }

    fn list_services(&self) -> Result<ServiceList, ApiError> {
        Ok(ServiceList {
            services: Vec::new(),
        })
    }

    fn create_deployment(
        &self,
        request: &CreateDeploymentRequest,
    ) -> Result<StatusResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        Ok(StatusResponse {
            status: "deployment created".to_string(),
        })
    }
}

fn login(state: &AppState, router: &Router, backend: &StubBackend, pass: &str) -> Result<(), ViewError> {
    let mut host = ScriptedHost::new();
    let form = Form::materialize(&login_model(), &mut host);
    host.type_text("user", "alice");
    host.type_text("pass", pass);
    let submission = form.submit(&mut SubmitEvent::new());
    submit_login(&submission, backend, &state.auth, router).map(|_| ())
}

#[test]
fn test_guard_then_login_then_home() {
    let state = AppState::new(AuthStatus::Pending);
    let router = Router::new(state.auth.clone());
    let backend = StubBackend::default();

    assert_eq!(router.navigate(Route::Home), Route::Login);

    assert!(login(&state, &router, &backend, "wrong").is_err());
    assert_eq!(state.auth.status(), AuthStatus::Failed);
    assert_eq!(router.navigate(Route::Home), Route::Login);

    login(&state, &router, &backend, "secret").unwrap();
    assert_eq!(router.current(), Route::Home);
    assert_eq!(state.auth.token(), "tok123");
    assert_eq!(HomePage::init(&state).greeting(), "Hello, alice!");
}

#[test]
fn test_deployment_with_registry_namespaces() {
    let state = AppState::new(AuthStatus::Ok);
    let backend = StubBackend::default();
    load_resources(&backend, &state.registry, false);

    let mut host = ScriptedHost::new();
    let form = Form::materialize(&deployment_model(&state.registry), &mut host);
    host.choose("namespace", 1);
    host.type_text("name", "web");
    host.type_text("image", "nginx");
    host.type_text("replicas", "4");

    let request = build_request(&form.submit(&mut SubmitEvent::new())).unwrap();
    submit_deployment(&backend, &request).unwrap();

    let sent = backend.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].namespace, "apps");
    assert_eq!(sent[0].replicas, 4);
}
