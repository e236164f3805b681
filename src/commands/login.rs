//! Interactive login

use anyhow::Result;
use colored::Colorize;

use super::Session;
use crate::form::Form;
use crate::tui::TerminalHost;
use crate::utils::KubedashError;
use crate::views::{ViewError, login};

/// Attempts before giving up in the dashboard's login gate
pub const MAX_ATTEMPTS: usize = 3;

/// Show the login form once and submit it
pub fn login_once(session: &Session) -> Result<()> {
    println!("{}", login::TITLE.bold());

    let mut host = TerminalHost::new();
    let form = Form::materialize(&login::login_model(), &mut host);
    let submission = host.fill_and_submit(&form, login::SUBMIT_LABEL)?;

    login::submit_login(&submission, &session.client, &session.state.auth, &session.router)?;
    Ok(())
}

/// Ask for credentials until login works or attempts run out
pub fn login_interactive(session: &Session) -> Result<()> {
    for attempt in 1..=MAX_ATTEMPTS {
        match login_once(session) {
            Ok(()) => return Ok(()),
            Err(e) => {
                let unauthorized = matches!(
                    e.downcast_ref::<ViewError>(),
                    Some(ViewError::Api(api)) if api.is_unauthorized()
                );
                if !unauthorized {
                    return Err(e);
                }
                println!(
                    "{} ({}/{})",
                    "Invalid username or password".red(),
                    attempt,
                    MAX_ATTEMPTS
                );
            }
        }
    }

    let user = session.state.auth.username();
    Err(KubedashError::login_failed(&user, "too many failed attempts").into())
}

/// `kubedash login`
pub fn run(session: &Session) -> Result<()> {
    login_interactive(session)?;
    println!("{}", "✓ Logged in".green());
    println!("Token: {}", session.state.auth.token());
    println!("Reuse it with --token or KUBEDASH_TOKEN");
    Ok(())
}
