//! Interactive dashboard: login gate, home page, resource modal

use anyhow::Result;
use colored::Colorize;

use super::Session;
use super::deploy::{DeployArgs, create_from_submission, model_with_namespace, submission_interactive};
use super::login::login_interactive;
use crate::form::Form;
use crate::tui::TerminalHost;
use crate::utils::{enhance_error, menu};
use crate::views::home::{HomePage, load_resources};
use crate::views::resource_modal::{self, ModalContent, ResourceModal};
use crate::views::{LANDING, Route};

const ACTIONS: [&str; 3] = ["Create resource", "Refresh", "Exit"];

/// Enter the home route, going through the login page when the guard
/// sends us there
pub fn enter_home(session: &Session) -> Result<()> {
    if session.router.navigate(Route::Home) == LANDING {
        crate::log_info!("Login required");
        login_interactive(session)?;
        session.router.navigate(Route::Home);
    }
    Ok(())
}

/// Run the modal once it is mounted: pick a resource kind, then show that
/// kind's view
fn run_modal(session: &Session, modal: &mut ResourceModal) -> Result<()> {
    if !modal.is_mounted() {
        return Ok(());
    }

    let mut host = TerminalHost::new();
    let picker = Form::materialize(&ResourceModal::picker_model(), &mut host);
    modal.bind_picker(&picker);
    host.fill()?;

    match modal.content() {
        Some(ModalContent::Deployment) => {
            let model = model_with_namespace(session, None);
            let submission = submission_interactive(&model, &DeployArgs::default())?;
            create_from_submission(session, &submission, true)?;
        }
        Some(ModalContent::Service) => {
            println!("{}", resource_modal::service_view_message().yellow());
        }
        None => {}
    }
    Ok(())
}

/// `kubedash dashboard`
pub fn run(session: &Session) -> Result<()> {
    enter_home(session)?;

    let mut modal = ResourceModal::new(&session.state.modal);
    load_resources(&session.client, &session.state.registry, session.show_progress());

    loop {
        let page = HomePage::init(&session.state);
        println!();
        print!("{}", page.render());
        println!();

        match menu("Action", &ACTIONS)? {
            0 => {
                session.state.modal.open();
                // Errors inside the modal are shown and the dashboard keeps going
                if let Err(e) = run_modal(session, &mut modal) {
                    enhance_error(e).display();
                }
                session.state.modal.close();
            }
            1 => {
                load_resources(&session.client, &session.state.registry, session.show_progress());
            }
            _ => break,
        }
    }

    modal.destroy();
    Ok(())
}
