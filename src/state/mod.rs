//! Shared observable state
//!
//! The containers are built once by the binary and handed to each view
//! through [`AppState`] instead of living in globals.

pub mod auth;
pub mod modal;
pub mod observable;
pub mod registry;

use std::rc::Rc;

pub use auth::{AuthState, AuthStatus, AuthStore, Credentials};
pub use modal::ModalVisibility;
pub use observable::{Observable, Subscription, WeakObservable};
pub use registry::ResourceRegistry;

/// One shared instance of each container. Cloning shares the same state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth: AuthStore,
    pub registry: Rc<ResourceRegistry>,
    pub modal: ModalVisibility,
}

impl AppState {
    pub fn new(initial_status: AuthStatus) -> Self {
        Self {
            auth: AuthStore::new(initial_status),
            registry: Rc::new(ResourceRegistry::new()),
            modal: ModalVisibility::new(),
        }
    }
}
