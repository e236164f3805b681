//! Create a deployment, interactively or from flags

use anyhow::Result;
use colored::Colorize;

use super::Session;
use super::resources::ensure_authenticated;
use crate::api::models::CreateDeploymentRequest;
use crate::form::{FieldDescriptor, Form, FormError, ScriptedHost, Submission};
use crate::tui::TerminalHost;
use crate::utils::{KubedashError, confirm_default_yes, dryrun, progress};
use crate::views::ViewError;
use crate::views::deployment::{self, build_request, submit_deployment};
use crate::views::home::load_resources;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct DeployArgs {
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub replicas: Option<String>,
}

impl DeployArgs {
    fn is_complete(&self) -> bool {
        self.values().count() == 4
    }

    /// Field name and value for every flag that was given
    fn values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("namespace", &self.namespace),
            ("name", &self.name),
            ("image", &self.image),
            ("replicas", &self.replicas),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

/// Deployment model with `namespace` added to the select if the registry did
/// not know it
pub fn model_with_namespace(session: &Session, namespace: Option<&str>) -> Vec<FieldDescriptor> {
    let mut model = deployment::deployment_model(&session.state.registry);
    if let Some(ns) = namespace
        && let Some(options) = model[0].options.as_mut()
        && !options.iter().any(|o| o == ns)
    {
        options.push(ns.to_string());
    }
    model
}

/// Replay command-line values into the deployment form as control events
pub fn submission_from_args(model: &[FieldDescriptor], args: &DeployArgs) -> Submission {
    let mut host = ScriptedHost::new();
    let form = Form::materialize(model, &mut host);

    for (field, value) in args.values() {
        if field == "namespace" {
            host.choose_option(field, value);
        } else {
            host.paste(field, value);
        }
    }

    form.submit(&mut crate::form::SubmitEvent::new())
}

/// Show the deployment form on the terminal and submit it. Values given on
/// the command line are filled in and not asked for.
pub fn submission_interactive(model: &[FieldDescriptor], given: &DeployArgs) -> Result<Submission> {
    println!("{}", deployment::SUBMIT_LABEL.bold());
    let mut host = TerminalHost::new();
    let form = Form::materialize(model, &mut host);
    if !form.has_control("namespace") {
        return Err(KubedashError::no_namespaces().into());
    }
    for (field, value) in given.values() {
        host.preset(field, value);
    }
    host.fill_and_submit(&form, deployment::SUBMIT_LABEL)
}

/// Map caller-side validation failures to user-facing errors
fn explain(err: ViewError, submission: &Submission) -> anyhow::Error {
    match err {
        ViewError::Form(FormError::InvalidNumber { value, .. }) => {
            KubedashError::invalid_replicas(&value).into()
        }
        ViewError::Form(FormError::MissingField(field)) if field == "namespace" => {
            KubedashError::no_namespaces().into()
        }
        ViewError::Invalid { field, .. } if field == "replicas" => {
            KubedashError::invalid_replicas(submission.get("replicas").unwrap_or_default()).into()
        }
        ViewError::Invalid { field, .. } if field == "name" => {
            KubedashError::invalid_deployment_name(submission.get("name").unwrap_or_default()).into()
        }
        ViewError::Invalid { field, .. } if field == "image" => {
            KubedashError::missing_field("image").into()
        }
        other => other.into(),
    }
}

fn describe(request: &CreateDeploymentRequest) -> String {
    format!(
        "create deployment {}/{} image={} replicas={}",
        request.namespace, request.name, request.image, request.replicas
    )
}

/// Validate a submission and send it. Returns `false` if the user declined.
pub fn create_from_submission(session: &Session, submission: &Submission, interactive: bool) -> Result<bool> {
    let request = build_request(submission).map_err(|e| explain(e, submission))?;
    let description = describe(&request);

    if interactive
        && !session.dry_run
        && session.settings.behavior.confirm_create
        && !confirm_default_yes(&format!("{}?", description))?
    {
        crate::log_info!("Cancelled");
        return Ok(false);
    }

    dryrun::exec_unless_dry_run_with_default(session.dry_run, &description, true, || {
        progress::with_spinner_result(
            session.show_progress(),
            &format!("Creating deployment {}", request.name),
            &format!("Deployment {}/{} created", request.namespace, request.name),
            || submit_deployment(&session.client, &request),
        )?;
        Ok(true)
    })
}

/// `kubedash deploy`
pub fn run(session: &Session, args: DeployArgs) -> Result<()> {
    ensure_authenticated(session)?;
    load_resources(&session.client, &session.state.registry, session.show_progress());

    let model = model_with_namespace(session, args.namespace.as_deref());
    if args.is_complete() {
        let submission = submission_from_args(&model, &args);
        create_from_submission(session, &submission, false)?;
    } else {
        let submission = submission_interactive(&model, &args)?;
        create_from_submission(session, &submission, true)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::commands::SessionOptions;

    fn session() -> Session {
        let session = Session::new(Settings::default(), SessionOptions::default()).unwrap();
        session.state.registry.push_namespace("default");
        session
    }

    #[test]
    fn test_submission_from_args() {
        let session = session();
        let args = DeployArgs {
            namespace: Some("default".to_string()),
            name: Some("web".to_string()),
            image: Some("nginx".to_string()),
            replicas: Some("2".to_string()),
        };
        let model = model_with_namespace(&session, args.namespace.as_deref());
        let submission = submission_from_args(&model, &args);

        assert_eq!(submission.get("namespace"), Some("default"));
        assert_eq!(submission.get("name"), Some("web"));
        assert_eq!(submission.get("replicas"), Some("2"));
    }

    #[test]
    fn test_unknown_namespace_is_added() {
        let session = session();
        let model = model_with_namespace(&session, Some("apps"));
        assert_eq!(
            model[0].select_options().unwrap(),
            &["default".to_string(), "apps".to_string()]
        );
    }

    #[test]
    fn test_args_completeness() {
        let mut args = DeployArgs {
            namespace: Some("default".to_string()),
            name: Some("web".to_string()),
            image: Some("nginx".to_string()),
            replicas: None,
        };
        assert!(!args.is_complete());
        args.replicas = Some("1".to_string());
        assert!(args.is_complete());
    }

    #[test]
    fn test_given_values_in_field_order() {
        let args = DeployArgs {
            name: Some("web".to_string()),
            replicas: Some("3".to_string()),
            ..DeployArgs::default()
        };
        let values: Vec<_> = args.values().collect();
        assert_eq!(values, vec![("name", "web"), ("replicas", "3")]);
    }

    #[test]
    fn test_dry_run_does_not_send() {
        let mut session = session();
        session.dry_run = true;
        let submission: Submission = [
            ("namespace", "default"),
            ("name", "web"),
            ("image", "nginx"),
            ("replicas", "1"),
        ]
        .into_iter()
        .collect();

        // Nothing listens on the default backend in tests; a real send would fail
        assert!(create_from_submission(&session, &submission, false).unwrap());
    }

    #[test]
    fn test_invalid_replicas_explained() {
        let session = session();
        let submission: Submission = [
            ("namespace", "default"),
            ("name", "web"),
            ("image", "nginx"),
            ("replicas", "lots"),
        ]
        .into_iter()
        .collect();

        let err = create_from_submission(&session, &submission, false).unwrap_err();
        let enhanced = err.downcast_ref::<KubedashError>().unwrap();
        assert!(enhanced.message.contains("lots"));
    }
}
