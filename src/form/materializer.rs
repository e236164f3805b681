//! Field model to live controls
//!
//! [`Form::materialize`] walks a field model in order, attaches one control
//! per descriptor to a [`ControlHost`], and keeps one string cell per field.
//! [`Form::collect`] snapshots every cell into a [`Submission`]. Values are
//! never parsed or validated here; that is up to whoever handles the
//! submission.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use super::FormError;
use super::field::{FieldDescriptor, FieldKind};
use super::host::{Control, ControlHost, ControlKind, SubmitEvent};
use crate::state::{Observable, Subscription};

/// Observable string value backing one control
pub type ReactiveCell = Observable<String>;

/// Field name to value, taken at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    values: BTreeMap<String, String>,
}

impl Submission {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a field that must have had a control
    pub fn require(&self, name: &str) -> Result<&str, FormError> {
        self.get(name)
            .ok_or_else(|| FormError::MissingField(name.to_string()))
    }

    /// Parse a numeric field, trimming surrounding whitespace
    pub fn parse_number<T: FromStr>(&self, name: &str) -> Result<T, FormError> {
        let raw = self.require(name)?;
        raw.trim().parse::<T>().map_err(|_| FormError::InvalidNumber {
            field: name.to_string(),
            value: raw.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A materialized form. Dropping it tears down its cells; controls still held
/// by the host then ignore further events.
pub struct Form {
    fields: Vec<FieldDescriptor>,
    cells: HashMap<String, ReactiveCell>,
    submitted: Observable<Submission>,
}

impl Form {
    pub fn materialize<H>(fields: &[FieldDescriptor], host: &mut H) -> Self
    where
        H: ControlHost + ?Sized,
    {
        let mut cells = HashMap::with_capacity(fields.len());

        for field in fields {
            let control = match field.kind {
                FieldKind::Select => {
                    // No options, no control and no cell
                    let Some(options) = field.select_options() else {
                        tracing::debug!("select '{}' has no options, skipped", field.name);
                        continue;
                    };
                    let cell = ReactiveCell::new(options[0].clone());
                    let control = Control::new(
                        field.name.clone(),
                        ControlKind::Select(options.to_vec()),
                        field.placeholder.clone(),
                        cell.downgrade(),
                    );
                    register(&mut cells, &field.name, cell);
                    control
                }
                kind => {
                    let Some(control_kind) = ControlKind::input_for(kind) else {
                        continue;
                    };
                    let cell = ReactiveCell::new(String::new());
                    let control = Control::new(
                        field.name.clone(),
                        control_kind,
                        field.placeholder.clone(),
                        cell.downgrade(),
                    );
                    register(&mut cells, &field.name, cell);
                    control
                }
            };

            host.attach(control);
        }

        Self {
            fields: fields.to_vec(),
            cells,
            submitted: Observable::default(),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn cell(&self, name: &str) -> Option<&ReactiveCell> {
        self.cells.get(name)
    }

    pub fn has_control(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Snapshot of every registered cell
    pub fn collect(&self) -> Submission {
        self.fields
            .iter()
            .filter_map(|f| {
                self.cells
                    .get(&f.name)
                    .map(|cell| (f.name.clone(), cell.get()))
            })
            .collect()
    }

    /// Handle a submit trigger: suppress its default action, collect, and
    /// hand the result to every `on_submit` subscriber.
    pub fn submit(&self, event: &mut SubmitEvent) -> Submission {
        event.prevent_default();
        let submission = self.collect();
        self.submitted.set(submission.clone());
        submission
    }

    pub fn on_submit(&self, f: impl Fn(&Submission) + 'static) -> Subscription {
        self.submitted.subscribe(f)
    }
}

fn register(cells: &mut HashMap<String, ReactiveCell>, name: &str, cell: ReactiveCell) {
    if cells.insert(name.to_string(), cell).is_some() {
        tracing::warn!("duplicate field name '{}', earlier control detached", name);
    }
}
