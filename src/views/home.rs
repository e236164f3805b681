//! Home page: load resources into the registry and show them

use colored::Colorize;

use crate::api::models::{Pod, Service};
use crate::api::{ApiError, Backend, log_failure};
use crate::state::{AppState, ResourceRegistry};
use crate::utils::progress::FetchProgress;

/// Outcome of one [`load_resources`] pass. Failed lists are logged and left
/// out; the other lists still load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub namespaces: usize,
    pub pods: usize,
    pub services: usize,
    pub failures: Vec<(&'static str, ApiError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch namespaces, pods and services and push the ones not yet in the
/// registry. The registry only grows, so a reload never duplicates entries.
pub fn load_resources<B>(backend: &B, registry: &ResourceRegistry, show_progress: bool) -> LoadReport
where
    B: Backend + ?Sized,
{
    let mut report = LoadReport::default();
    let mut progress = FetchProgress::new(show_progress, 3);

    progress.start("namespaces");
    match backend.list_namespaces() {
        Ok(namespaces) => {
            let known = registry.all_namespaces();
            for ns in namespaces {
                if !known.contains(&ns) {
                    registry.push_namespace(ns);
                    report.namespaces += 1;
                }
            }
            progress.finish_step("namespaces", report.namespaces);
        }
        Err(e) => {
            log_failure("list namespaces", &e);
            progress.fail_step("namespaces", &e.to_string());
            report.failures.push(("namespaces", e));
        }
    }

    progress.start("pods");
    match backend.list_pods() {
        Ok(list) => {
            let known = registry.all_pods();
            for pod in list.pods {
                if !known.iter().any(|p| same_pod(p, &pod)) {
                    registry.push_pod(pod);
                    report.pods += 1;
                }
            }
            progress.finish_step("pods", report.pods);
        }
        Err(e) => {
            log_failure("list pods", &e);
            progress.fail_step("pods", &e.to_string());
            report.failures.push(("pods", e));
        }
    }

    progress.start("services");
    match backend.list_services() {
        Ok(list) => {
            let known = registry.all_services();
            for service in list.services {
                if !known.iter().any(|s| same_service(s, &service)) {
                    registry.push_service(service);
                    report.services += 1;
                }
            }
            progress.finish_step("services", report.services);
        }
        Err(e) => {
            log_failure("list services", &e);
            progress.fail_step("services", &e.to_string());
            report.failures.push(("services", e));
        }
    }

    progress.finish();
    tracing::debug!(
        "loaded {} namespaces, {} pods, {} services",
        report.namespaces,
        report.pods,
        report.services
    );
    report
}

fn same_pod(a: &Pod, b: &Pod) -> bool {
    a.name == b.name && a.namespace == b.namespace
}

fn same_service(a: &Service, b: &Service) -> bool {
    a.name == b.name && a.namespace == b.namespace
}

/// Snapshot of what the home page shows, taken when the page initializes
#[derive(Debug, Clone)]
pub struct HomePage {
    pub username: String,
    pub pods: Vec<Pod>,
    pub services: Vec<Service>,
    pub namespaces: Vec<String>,
}

impl HomePage {
    pub fn init(state: &AppState) -> Self {
        Self {
            username: state.auth.username(),
            pods: state.registry.all_pods(),
            services: state.registry.all_services(),
            namespaces: state.registry.all_namespaces(),
        }
    }

    pub fn greeting(&self) -> String {
        if self.username.is_empty() {
            "Hello!".to_string()
        } else {
            format!("Hello, {}!", self.username)
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![self.greeting().bold().to_string(), String::new()];

        lines.push(format!("{} ({})", "Pods".cyan().bold(), self.pods.len()));
        if self.pods.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(self.pods.iter().map(|pod| {
            format!(
                "  {} {}/{} {}",
                status_dot(&pod.status),
                pod.namespace,
                pod.name,
                pod.status.dimmed()
            )
        }));
        lines.push(String::new());

        lines.push(format!("{} ({})", "Services".cyan().bold(), self.services.len()));
        if self.services.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(self.services.iter().map(|service| {
            let ports = service
                .ports
                .iter()
                .map(|p| format!("{}:{}/{}", p.port, p.target_port, p.protocol))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "  {} {}/{} {} [{}]",
                "●".blue(),
                service.namespace,
                service.name,
                service.service_type.dimmed(),
                ports
            )
        }));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn status_dot(status: &str) -> colored::ColoredString {
    match status {
        "Running" | "Succeeded" => "●".green(),
        "Pending" => "●".yellow(),
        _ => "●".red(),
    }
}

/// One line per pod: `namespace/name status`
pub fn render_pods(pods: &[Pod]) -> String {
    pods.iter()
        .map(|p| format!("{}/{}\t{}", p.namespace, p.name, p.status))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per service: `namespace/name type selector`
pub fn render_services(services: &[Service]) -> String {
    services
        .iter()
        .map(|s| {
            format!(
                "{}/{}\t{}\t{}",
                s.namespace,
                s.name,
                s.service_type,
                s.selector_string()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
