//! Terminal control host backed by dialoguer prompts
//!
//! Each attached control becomes one prompt, asked in attach order. A
//! finished text prompt fires a single key-release carrying the whole line;
//! a select fires a selection change with the chosen index. Controls given
//! a value up front with [`TerminalHost::preset`] are not prompted.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password, Select};

use crate::form::{Control, ControlHost, ControlKind, Form, InputType, SubmitEvent, Submission};

#[derive(Debug, Default)]
pub struct TerminalHost {
    controls: Vec<Control>,
    preset: Vec<String>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Apply a known value to a control and skip its prompt. Selects take
    /// the value only if it is one of their options.
    pub fn preset(&mut self, name: &str, value: &str) -> bool {
        let Some(control) = self.controls.iter().find(|c| c.name() == name) else {
            return false;
        };
        let applied = match control.kind() {
            ControlKind::Select(_) => control.select_option(value),
            ControlKind::Input(_) => {
                control.key_release(value);
                true
            }
        };
        if applied {
            self.preset.push(name.to_string());
        }
        applied
    }

    /// Prompt for every control in order, except preset ones
    pub fn fill(&self) -> Result<()> {
        for control in &self.controls {
            if self.preset.iter().any(|n| n == control.name()) {
                continue;
            }
            match control.kind() {
                ControlKind::Input(InputType::Password) => {
                    let value = Password::new()
                        .with_prompt(control.label())
                        .allow_empty_password(true)
                        .interact()?;
                    control.key_release(&value);
                }
                ControlKind::Input(_) => {
                    let value: String = Input::new()
                        .with_prompt(control.label())
                        .allow_empty(true)
                        .interact_text()?;
                    control.key_release(&value);
                }
                ControlKind::Select(options) => {
                    let index = Select::new()
                        .with_prompt(control.label())
                        .items(options.as_slice())
                        .default(0)
                        .interact()?;
                    control.select_index(index);
                }
            }
        }
        Ok(())
    }

    /// Fill all controls, then fire the submit button
    pub fn fill_and_submit(&self, form: &Form, submit_label: &str) -> Result<Submission> {
        self.fill()?;
        println!("{}", format!("[ {} ]", submit_label).bold());
        let mut event = SubmitEvent::new();
        Ok(form.submit(&mut event))
    }
}

impl ControlHost for TerminalHost {
    fn attach(&mut self, control: Control) {
        tracing::trace!("terminal host: attach {:?}", control);
        self.controls.push(control);
    }
}
