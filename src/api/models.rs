//! Wire models for the dashboard backend

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use crate::state::auth::Credentials;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    pub token: String,
}

/// Error body returned by the backend on 4xx/5xx
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{} ({})", self.error, param),
            None => f.write_str(&self.error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("TCP"),
            Protocol::Udp => f.write_str("UDP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePort {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub port: i32,
    #[serde(default)]
    pub target_port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_port: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub ports: Vec<ServicePort>,
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default)]
    pub cluster_ips: Vec<String>,
}

impl Service {
    /// `app=nginx,tier=web`
    pub fn selector_string(&self) -> String {
        self.selector
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodList {
    #[serde(default)]
    pub pods: Vec<Pod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceList {
    #[serde(default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDeploymentRequest {
    pub namespace: String,
    pub name: String,
    pub image: String,
    pub replicas: i32,
}

/// `{"status": "deployment created"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pod_list() {
        let json = r#"{"pods":[{"name":"nginx-1","namespace":"default","status":"Running"}]}"#;
        let list: PodList = serde_json::from_str(json).unwrap();
        assert_eq!(list.pods.len(), 1);
        assert_eq!(list.pods[0].status, "Running");
    }

    #[test]
    fn test_decode_service_with_optional_fields() {
        let json = r#"{
            "services": [{
                "name": "web",
                "namespace": "default",
                "type": "NodePort",
                "selector": {"app": "nginx"},
                "cluster_ips": ["10.1.2.30"],
                "ports": [{"name": "http", "protocol": "UDP", "port": 80, "target_port": 8080, "node_port": 30030}]
            }, {
                "name": "headless",
                "namespace": "default",
                "type": "ClusterIP",
                "ports": [{"name": "dns"}]
            }]
        }"#;
        let list: ServiceList = serde_json::from_str(json).unwrap();
        let web = &list.services[0];
        assert_eq!(web.service_type, "NodePort");
        assert_eq!(web.ports[0].protocol, Protocol::Udp);
        assert_eq!(web.ports[0].node_port, Some(30030));
        assert_eq!(web.selector_string(), "app=nginx");

        let headless = &list.services[1];
        assert_eq!(headless.ports[0].protocol, Protocol::Tcp);
        assert_eq!(headless.ports[0].port, 0);
        assert!(headless.selector.is_empty());
    }

    #[test]
    fn test_error_body_display() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"invalid or missing param","param":"replicas"}"#)
                .unwrap();
        assert_eq!(body.to_string(), "invalid or missing param (replicas)");
    }

    #[test]
    fn test_create_request_body() {
        let req = CreateDeploymentRequest {
            namespace: "default".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            replicas: 2,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["replicas"], 2);
        assert_eq!(value["image"], "nginx");
    }
}
