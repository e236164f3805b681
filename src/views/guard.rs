//! Routes and the login gate in front of them

use std::fmt;

use crate::state::{AuthStatus, AuthStore, Observable, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

/// Public route that denied navigation is sent to
pub const LANDING: Route = Route::Login;

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/auth/login",
            Route::Home => "/home",
        }
    }

    /// Unknown paths fall back to the login page
    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/home" => Route::Home,
            _ => Route::Login,
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Lets a route be entered only while the auth status is `Ok`
#[derive(Debug, Clone)]
pub struct AuthGuard {
    auth: AuthStore,
}

impl AuthGuard {
    pub fn new(auth: AuthStore) -> Self {
        Self { auth }
    }

    pub fn can_enter(&self) -> bool {
        self.auth.status() == AuthStatus::Ok
    }
}

/// Current route plus guarded navigation
#[derive(Debug, Clone)]
pub struct Router {
    guard: AuthGuard,
    current: Observable<Route>,
}

impl Router {
    pub fn new(auth: AuthStore) -> Self {
        Self {
            guard: AuthGuard::new(auth),
            current: Observable::new(LANDING),
        }
    }

    pub fn current(&self) -> Route {
        self.current.get()
    }

    /// Navigate to `route`, or to [`LANDING`] if the guard denies it.
    /// Returns the route actually entered.
    pub fn navigate(&self, route: Route) -> Route {
        let target = if route.requires_auth() && !self.guard.can_enter() {
            tracing::debug!("guard denied {}, redirecting to {}", route, LANDING);
            LANDING
        } else {
            route
        };
        self.current.set(target);
        target
    }

    pub fn subscribe(&self, f: impl Fn(&Route) + 'static) -> Subscription {
        self.current.subscribe(f)
    }
}
