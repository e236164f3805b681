//! Upstream dashboard backend: wire models and HTTP client

pub mod client;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ApiError, DashClient};

use models::{CreateDeploymentRequest, Credentials, LoginResult, PodList, ServiceList, StatusResponse};

/// Operations the views need from the backend
pub trait Backend {
    fn login(&self, credentials: &Credentials) -> Result<LoginResult, ApiError>;
    fn list_namespaces(&self) -> Result<Vec<String>, ApiError>;
    fn list_pods(&self) -> Result<PodList, ApiError>;
    fn list_services(&self) -> Result<ServiceList, ApiError>;
    fn create_deployment(&self, request: &CreateDeploymentRequest)
    -> Result<StatusResponse, ApiError>;
}

impl Backend for DashClient {
    fn login(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        DashClient::login(self, credentials)
    }

    fn list_namespaces(&self) -> Result<Vec<String>, ApiError> {
        DashClient::list_namespaces(self)
    }

    fn list_pods(&self) -> Result<PodList, ApiError> {
        DashClient::list_pods(self)
    }

    fn list_services(&self) -> Result<ServiceList, ApiError> {
        DashClient::list_services(self)
    }

    fn create_deployment(
        &self,
        request: &CreateDeploymentRequest,
    ) -> Result<StatusResponse, ApiError> {
        DashClient::create_deployment(self, request)
    }
}

/// Log a failed backend call the way every view does: error line plus the
/// server's error body when there is one
pub fn log_failure(operation: &str, err: &ApiError) {
    match err {
        ApiError::Status { status, body, .. } => {
            crate::log_error!("{} failed ({}): {}", operation, status, body);
        }
        other => crate::log_error!("{} failed: {}", operation, other),
    }
}
