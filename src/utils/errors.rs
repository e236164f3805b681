//! Enhanced error types with actionable suggestions

use colored::Colorize;
use thiserror::Error;

use crate::api::ApiError;

/// Enhanced error with suggestions and documentation links
#[derive(Error, Debug)]
#[error("{message}")]
pub struct KubedashError {
    pub message: String,
    pub suggestions: Vec<String>,
    pub docs_link: Option<String>,
}

impl KubedashError {
    /// Create a new error with suggestions
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
            docs_link: None,
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a documentation link
    pub fn with_docs(mut self, link: impl Into<String>) -> Self {
        self.docs_link = Some(link.into());
        self
    }

    /// Display the error with suggestions
    pub fn display(&self) {
        crate::log_error!("{}", self.message);
        eprintln!("{} {}", "Error:".red().bold(), self.message);

        if !self.suggestions.is_empty() {
            eprintln!();
            eprintln!("{}", "Suggestions:".yellow().bold());
            for suggestion in &self.suggestions {
                eprintln!("  {} {}", "→".blue(), suggestion);
            }
        }

        if let Some(docs) = &self.docs_link {
            eprintln!();
            eprintln!("{} {}", "Documentation:".cyan(), docs);
        }
    }

    // Common error patterns

    /// Backend not reachable
    pub fn server_unreachable(url: &str) -> Self {
        Self::new(format!("Cannot reach the dashboard backend at {}", url))
            .suggest("Check that the backend is running")
            .suggest("Point kubedash at it with --server <URL> or [server] base_url")
            .suggest("Run with -vv to see the failing request")
    }

    /// Token rejected or missing
    pub fn unauthorized() -> Self {
        Self::new("The backend rejected the request as unauthorized")
            .suggest("Log in again with: kubedash login")
            .suggest("Or pass a fresh token with --token")
    }

    /// Login rejected by the backend
    pub fn login_failed(user: &str, reason: &str) -> Self {
        Self::new(format!("Login failed for '{}': {}", user, reason))
            .suggest("Check the username and password")
            .suggest("Verify the backend's user database is initialized")
    }

    /// Non-integer or out-of-range replica count
    pub fn invalid_replicas(value: &str) -> Self {
        Self::new(format!("Invalid replica count: '{}'", value))
            .suggest("Replicas must be a whole number between 1 and 32")
    }

    /// Name that the API server would reject
    pub fn invalid_deployment_name(name: &str) -> Self {
        Self::new(format!("Invalid deployment name: '{}'", name))
            .suggest("Use lowercase letters, digits and '-', starting and ending with a letter or digit")
            .suggest("Keep it at most 63 characters")
            .with_docs("https://kubernetes.io/docs/concepts/overview/working-with-objects/names/")
    }

    /// Required field left empty
    pub fn missing_field(field: &str) -> Self {
        Self::new(format!("Field '{}' is required", field))
            .suggest(format!("Provide a value for '{}'", field))
    }

    /// No namespaces known, so the namespace select cannot be shown
    pub fn no_namespaces() -> Self {
        Self::new("No namespaces available to deploy into")
            .suggest("Check that the backend can list namespaces")
            .suggest("Pass --namespace explicitly")
    }

    /// Not logged in for a command that needs it
    pub fn login_required() -> Self {
        Self::new("This command requires a logged-in session")
            .suggest("Log in interactively with: kubedash dashboard")
            .suggest("Or pass a token with --token / KUBEDASH_TOKEN")
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: KubedashError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert anyhow error to KubedashError when possible
pub fn enhance_error(err: anyhow::Error) -> KubedashError {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        match api {
            ApiError::Transport { url, .. } => return KubedashError::server_unreachable(url),
            ApiError::Status { .. } if api.is_unauthorized() => {
                return KubedashError::unauthorized();
            }
            _ => {}
        }
    }

    if let Some(enhanced) = err.downcast_ref::<KubedashError>() {
        return KubedashError {
            message: enhanced.message.clone(),
            suggestions: enhanced.suggestions.clone(),
            docs_link: enhanced.docs_link.clone(),
        };
    }

    let err_str = format!("{:#}", err);

    if err_str.contains("connection refused") || err_str.contains("timed out") {
        return KubedashError::new(err_str)
            .suggest("Check that the backend is running and reachable");
    }

    // Default error with generic suggestion
    KubedashError::new(err_str).suggest("Run with -vv for more details")
}
