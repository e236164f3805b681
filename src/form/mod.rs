//! Dynamic forms built from a declarative field model

pub mod field;
pub mod host;
pub mod materializer;

use thiserror::Error;

pub use field::{FieldDescriptor, FieldKind, validate_model};
pub use host::{Control, ControlHost, ControlKind, InputType, ScriptedHost, SubmitEvent};
pub use materializer::{Form, ReactiveCell, Submission};

/// Problems found by callers when reading a submission or checking a model
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("field '{0}' has no control")]
    MissingField(String),

    #[error("field '{field}' expects a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("duplicate field name '{0}'")]
    DuplicateName(String),

    #[error("select field '{0}' has no options")]
    EmptySelect(String),
}
