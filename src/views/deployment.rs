//! Create-deployment view

use regex::Regex;
use std::sync::LazyLock;

use crate::api::models::{CreateDeploymentRequest, StatusResponse};
use crate::api::{Backend, log_failure};
use crate::form::{FieldDescriptor, Submission};
use crate::state::ResourceRegistry;

use super::ViewError;

pub const SUBMIT_LABEL: &str = "Create deployment";

/// Replica range the backend accepts
pub const MIN_REPLICAS: i32 = 1;
pub const MAX_REPLICAS: i32 = 32;

static DNS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("Failed to compile DNS label pattern")
});

/// Field model with the namespace select filled from the registry. With no
/// namespaces the select gets no options and is left out of the form.
pub fn deployment_model(registry: &ResourceRegistry) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::select("namespace", registry.all_namespaces()).with_placeholder("Namespace"),
        FieldDescriptor::text("name").with_placeholder("Name"),
        FieldDescriptor::text("image").with_placeholder("Image"),
        FieldDescriptor::number("replicas").with_placeholder("Replicas"),
    ]
}

/// Turn a submission into a request, checking what the backend would reject
pub fn build_request(submission: &Submission) -> Result<CreateDeploymentRequest, ViewError> {
    let namespace = submission.require("namespace")?.to_string();
    let name = submission.require("name")?.trim().to_string();
    let image = submission.require("image")?.trim().to_string();
    let replicas: i32 = submission.parse_number("replicas")?;

    if name.len() > 63 || !DNS_LABEL.is_match(&name) {
        return Err(ViewError::invalid(
            "name",
            format!("'{}' is not a valid DNS-1123 label", name),
        ));
    }
    if image.is_empty() {
        return Err(ViewError::invalid("image", "must not be empty"));
    }
    if !(MIN_REPLICAS..=MAX_REPLICAS).contains(&replicas) {
        return Err(ViewError::invalid(
            "replicas",
            format!("{} is outside {}..={}", replicas, MIN_REPLICAS, MAX_REPLICAS),
        ));
    }

    Ok(CreateDeploymentRequest {
        namespace,
        name,
        image,
        replicas,
    })
}

/// Send the request once. Failures are logged and returned; nothing retries.
pub fn submit_deployment<B>(
    backend: &B,
    request: &CreateDeploymentRequest,
) -> Result<StatusResponse, ViewError>
where
    B: Backend + ?Sized,
{
    match backend.create_deployment(request) {
        Ok(resp) => {
            crate::log_info!(
                "Deployment {}/{} created ({})",
                request.namespace,
                request.name,
                resp.status
            );
            Ok(resp)
        }
        Err(e) => {
            log_failure("create deployment", &e);
            Err(e.into())
        }
    }
}
