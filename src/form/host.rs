//! Controls and the hosts that render them
//!
//! A [`ControlHost`] is whatever puts controls in front of a user: the
//! terminal prompts in `tui::terminal`, or [`ScriptedHost`] which replays
//! events from code. The host owns the [`Control`]s and forwards user events
//! to them; the controls write into the cells of the form that created them.

use super::field::FieldKind;
use crate::state::WeakObservable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Password,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Input(InputType),
    Select(Vec<String>),
}

impl ControlKind {
    /// Control kind for a text-like field kind. `None` for selects.
    pub fn input_for(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::TextInput => Some(ControlKind::Input(InputType::Text)),
            FieldKind::PasswordInput => Some(ControlKind::Input(InputType::Password)),
            FieldKind::NumberInput => Some(ControlKind::Input(InputType::Number)),
            FieldKind::Select => None,
        }
    }
}

/// A live control bound to one form cell
pub struct Control {
    name: String,
    kind: ControlKind,
    placeholder: Option<String>,
    cell: WeakObservable<String>,
}

impl Control {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: ControlKind,
        placeholder: Option<String>,
        cell: WeakObservable<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            placeholder,
            cell,
        }
    }

    /// Name of the field this control writes to
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn label(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(&self.name)
    }

    /// Current value of the bound cell, `None` once the form is gone
    pub fn value(&self) -> Option<String> {
        self.cell.upgrade().map(|cell| cell.get())
    }

    /// Key-release on a text-like control. `content` is the full raw text of
    /// the control, stored as-is.
    pub fn key_release(&self, content: &str) {
        if !matches!(self.kind, ControlKind::Input(_)) {
            tracing::warn!("key event on select control '{}' ignored", self.name);
            return;
        }
        if let Some(cell) = self.cell.upgrade() {
            cell.set(content.to_string());
        }
    }

    /// Selection change on a select control, by option position.
    /// Returns `false` when the index is out of range or this is not a select.
    pub fn select_index(&self, index: usize) -> bool {
        let ControlKind::Select(options) = &self.kind else {
            tracing::warn!("selection event on input control '{}' ignored", self.name);
            return false;
        };
        let Some(option) = options.get(index) else {
            tracing::warn!(
                "option {} out of range for '{}' ({} options)",
                index,
                self.name,
                options.len()
            );
            return false;
        };
        if let Some(cell) = self.cell.upgrade() {
            cell.set(option.clone());
        }
        true
    }

    /// Selection change by option text. `false` if no option matches.
    pub fn select_option(&self, option: &str) -> bool {
        match &self.kind {
            ControlKind::Select(options) => match options.iter().position(|o| o == option) {
                Some(index) => self.select_index(index),
                None => false,
            },
            ControlKind::Input(_) => false,
        }
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

/// Something that can show controls and deliver their events
pub trait ControlHost {
    /// Attach a control after the ones already attached
    fn attach(&mut self, control: Control);
}

/// Submit trigger. Materialized forms always prevent the default action.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Host driven from code: keeps controls in attach order and replays
/// keystrokes and selections into them.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    controls: Vec<Control>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name() == name)
    }

    /// Type `text` one character at a time, firing a key-release per
    /// character. Returns `false` if no control has that name.
    pub fn type_text(&self, name: &str, text: &str) -> bool {
        let Some(control) = self.control(name) else {
            return false;
        };
        let mut content = control.value().unwrap_or_default();
        for ch in text.chars() {
            content.push(ch);
            control.key_release(&content);
        }
        true
    }

    /// Replace the whole content in one key-release (paste)
    pub fn paste(&self, name: &str, text: &str) -> bool {
        match self.control(name) {
            Some(control) => {
                control.key_release(text);
                true
            }
            None => false,
        }
    }

    /// Clear a text control (select-all + delete)
    pub fn clear(&self, name: &str) -> bool {
        self.paste(name, "")
    }

    pub fn choose(&self, name: &str, index: usize) -> bool {
        self.control(name)
            .map(|c| c.select_index(index))
            .unwrap_or(false)
    }

    /// Choose the option whose text equals `option`
    pub fn choose_option(&self, name: &str, option: &str) -> bool {
        self.control(name)
            .map(|c| c.select_option(option))
            .unwrap_or(false)
    }
}

impl ControlHost for ScriptedHost {
    fn attach(&mut self, control: Control) {
        self.controls.push(control);
    }
}
