//! One-shot listings: pods, services, namespaces

use anyhow::Result;

use super::Session;
use crate::utils::KubedashError;
use crate::views::Route;
use crate::views::home::{self, load_resources};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Pods,
    Services,
    Namespaces,
}

/// Require a session that may enter the home route
pub fn ensure_authenticated(session: &Session) -> Result<()> {
    if session.router.navigate(Route::Home) != Route::Home {
        return Err(KubedashError::login_required().into());
    }
    Ok(())
}

pub fn run(session: &Session, listing: Listing) -> Result<()> {
    ensure_authenticated(session)?;

    let report = load_resources(&session.client, &session.state.registry, session.show_progress());
    if let Some((_, err)) = report.failures.into_iter().next() {
        return Err(err.into());
    }

    let registry = &session.state.registry;
    let output = match listing {
        Listing::Pods => home::render_pods(&registry.all_pods()),
        Listing::Services => home::render_services(&registry.all_services()),
        Listing::Namespaces => registry.all_namespaces().join("\n"),
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
