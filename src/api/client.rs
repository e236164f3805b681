//! HTTP client for the dashboard backend

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use super::models::{
    ApiErrorBody, CreateDeploymentRequest, Credentials, LoginResult, PodList, ServiceList,
    StatusResponse,
};
use crate::state::AuthStore;

const LOGIN_PATH: &str = "api/v1/login";
const NAMESPACES_PATH: &str = "api/v1/listnamespaces";
const PODS_PATH: &str = "api/v2/listpods";
const SERVICES_PATH: &str = "api/v1/listservices";
const CREATE_DEPLOYMENT_PATH: &str = "api/v1/createdeployment";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: ApiErrorBody,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Whether a request carries the bearer token from [`AuthStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bearer {
    Attach,
    Skip,
}

pub struct DashClient {
    http: Client,
    base_url: Url,
    auth: AuthStore,
}

impl DashClient {
    pub fn new(base_url: &str, timeout: Duration, auth: AuthStore) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn login(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        let req = self
            .request(Method::POST, LOGIN_PATH, Bearer::Skip)?
            .json(credentials);
        self.execute(LOGIN_PATH, req)
    }

    pub fn list_namespaces(&self) -> Result<Vec<String>, ApiError> {
        let req = self.request(Method::GET, NAMESPACES_PATH, Bearer::Attach)?;
        self.execute(NAMESPACES_PATH, req)
    }

    pub fn list_pods(&self) -> Result<PodList, ApiError> {
        let req = self.request(Method::GET, PODS_PATH, Bearer::Attach)?;
        self.execute(PODS_PATH, req)
    }

    pub fn list_services(&self) -> Result<ServiceList, ApiError> {
        let req = self.request(Method::GET, SERVICES_PATH, Bearer::Attach)?;
        self.execute(SERVICES_PATH, req)
    }

    pub fn create_deployment(
        &self,
        request: &CreateDeploymentRequest,
    ) -> Result<StatusResponse, ApiError> {
        let req = self
            .request(Method::POST, CREATE_DEPLOYMENT_PATH, Bearer::Attach)?
            .json(request);
        self.execute(CREATE_DEPLOYMENT_PATH, req)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            reason: e.to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, bearer: Bearer) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);

        if bearer == Bearer::Attach {
            Ok(builder.bearer_auth(self.auth.token()))
        } else {
            Ok(builder)
        }
    }

    fn execute<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("request: {}", url);

        let resp = req.send().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = resp.status();
        tracing::debug!("response: {} {}", status, url);

        if !status.is_success() {
            let body = error_body(resp);
            return Err(ApiError::Status { url, status, body });
        }

        resp.json::<T>()
            .map_err(|source| ApiError::Decode { url, source })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    // Url::join drops the last path segment unless it ends with '/'
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn error_body(resp: Response) -> ApiErrorBody {
    let text = resp.text().unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => body,
        Err(_) => ApiErrorBody {
            error: text,
            param: None,
        },
    }
}
