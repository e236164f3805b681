//! In-memory backend for view tests

use std::cell::RefCell;

use reqwest::StatusCode;

use super::models::{
    ApiErrorBody, CreateDeploymentRequest, Credentials, LoginResult, Pod, PodList, Service,
    ServiceList, StatusResponse,
};
use super::{ApiError, Backend};

#[derive(Default)]
pub struct FakeBackend {
    pub users: Vec<(String, String)>,
    pub namespaces: Vec<String>,
    pub pods: Vec<Pod>,
    pub services: Vec<Service>,
    pub fail_listing: bool,
    pub created: RefCell<Vec<CreateDeploymentRequest>>,
}

impl FakeBackend {
    pub fn with_user(mut self, user: &str, pass: &str) -> Self {
        self.users.push((user.to_string(), pass.to_string()));
        self
    }

    pub fn pod(name: &str, namespace: &str) -> Pod {
        Pod {
            name: name.to_string(),
            namespace: namespace.to_string(),
            status: "Running".to_string(),
        }
    }

    fn rejected(path: &str, status: StatusCode, error: &str) -> ApiError {
        ApiError::Status {
            url: format!("http://fake/{}", path),
            status,
            body: ApiErrorBody {
                error: error.to_string(),
                param: None,
            },
        }
    }
}

impl Backend for FakeBackend {
    fn login(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        let known = self
            .users
            .iter()
            .any(|(u, p)| *u == credentials.user && *p == credentials.pass);
        if known {
            Ok(LoginResult {
                token: format!("token-{}", credentials.user),
            })
        } else {
            Err(Self::rejected(
                "api/v1/login",
                StatusCode::UNAUTHORIZED,
                "invalid credentials",
            ))
        }
    }

    fn list_namespaces(&self) -> Result<Vec<String>, ApiError> {
        if self.fail_listing {
            return Err(Self::rejected(
                "api/v1/listnamespaces",
                StatusCode::INTERNAL_SERVER_ERROR,
                "cluster unavailable",
            ));
        }
        Ok(self.namespaces.clone())
    }

    fn list_pods(&self) -> Result<PodList, ApiError> {
        Ok(PodList {
            pods: self.pods.clone(),
        })
    }

    fn list_services(&self) -> Result<ServiceList, ApiError> {
        Ok(ServiceList {
            services: self.services.clone(),
        })
    }

    fn create_deployment(
        &self,
        request: &CreateDeploymentRequest,
    ) -> Result<StatusResponse, ApiError> {
        self.created.borrow_mut().push(request.clone());
        Ok(StatusResponse {
            status: "deployment created".to_string(),
        })
    }
}
