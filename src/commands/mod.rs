//! Command implementations for kubedash CLI

pub mod config;
pub mod dashboard;
pub mod deploy;
pub mod login;
pub mod resources;

use anyhow::Result;

use crate::api::DashClient;
use crate::config::Settings;
use crate::state::{AppState, AuthStatus};
use crate::views::Router;

/// Options shared by every command that talks to the backend
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub server: Option<String>,
    pub token: Option<String>,
    pub dry_run: bool,
}

/// Everything a command needs: settings, the shared state containers, the
/// router and the backend client. Built once per process.
pub struct Session {
    pub settings: Settings,
    pub state: AppState,
    pub router: Router,
    pub client: DashClient,
    pub dry_run: bool,
}

impl Session {
    pub fn new(settings: Settings, options: SessionOptions) -> Result<Self> {
        let state = AppState::new(settings.auth.initial_status);
        if settings.auth.initial_status == AuthStatus::Ok {
            crate::log_warn!("auth.initial_status = \"ok\": login gate is disabled");
        }

        if let Some(token) = options.token.as_deref() {
            state
                .auth
                .use_token(settings.auth.default_user.as_deref(), token);
        }

        let base_url = options
            .server
            .clone()
            .unwrap_or_else(|| settings.server.base_url.clone());
        let client = DashClient::new(&base_url, settings.server.timeout(), state.auth.clone())?;
        let router = Router::new(state.auth.clone());

        tracing::debug!("session against {}", client.base_url());

        Ok(Self {
            settings,
            state,
            router,
            client,
            dry_run: options.dry_run,
        })
    }

    pub fn show_progress(&self) -> bool {
        self.settings.behavior.show_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults_to_pending() {
        let session = Session::new(Settings::default(), SessionOptions::default()).unwrap();
        assert_eq!(session.state.auth.status(), AuthStatus::Pending);
        assert_eq!(session.client.base_url().as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_token_option_authenticates() {
        let mut settings = Settings::default();
        settings.auth.default_user = Some("dev".to_string());
        let session = Session::new(
            settings,
            SessionOptions {
                server: Some("http://10.0.0.1:5000".to_string()),
                token: Some("abc".to_string()),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(session.state.auth.is_authenticated());
        assert_eq!(session.state.auth.token(), "abc");
        assert_eq!(session.state.auth.username(), "dev");
        assert_eq!(session.client.base_url().as_str(), "http://10.0.0.1:5000/");
    }
}
