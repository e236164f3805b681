//! Session registry of fetched pods, services and namespaces
//!
//! The registry only grows: callers push what they fetched and views read
//! everything back when they load. There is no change notification.

use std::cell::RefCell;

use crate::api::models::{Pod, Service};

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    pods: RefCell<Vec<Pod>>,
    services: RefCell<Vec<Service>>,
    namespaces: RefCell<Vec<String>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_pod(&self, pod: Pod) {
        tracing::trace!("registry: pod {}/{}", pod.namespace, pod.name);
        self.pods.borrow_mut().push(pod);
    }

    pub fn push_service(&self, service: Service) {
        tracing::trace!("registry: service {}/{}", service.namespace, service.name);
        self.services.borrow_mut().push(service);
    }

    pub fn push_namespace(&self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        tracing::trace!("registry: namespace {}", namespace);
        self.namespaces.borrow_mut().push(namespace);
    }

    /// All pods in push order
    pub fn all_pods(&self) -> Vec<Pod> {
        self.pods.borrow().clone()
    }

    /// All services in push order
    pub fn all_services(&self) -> Vec<Service> {
        self.services.borrow().clone()
    }

    /// All namespaces in push order
    pub fn all_namespaces(&self) -> Vec<String> {
        self.namespaces.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.borrow().is_empty()
            && self.services.borrow().is_empty()
            && self.namespaces.borrow().is_empty()
    }
}
