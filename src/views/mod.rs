//! Dashboard views
//!
//! Each view builds its field model, reads what it needs from [`AppState`]
//! when it initializes, and turns form submissions into backend calls.
//!
//! [`AppState`]: crate::state::AppState

pub mod deployment;
pub mod guard;
pub mod home;
pub mod login;
pub mod resource_modal;

use thiserror::Error;

use crate::api::ApiError;
use crate::form::FormError;

pub use guard::{AuthGuard, LANDING, Route, Router};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("field '{field}' is invalid: {reason}")]
    Invalid { field: String, reason: String },
}

impl ViewError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ViewError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
