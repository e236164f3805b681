//! kubedash - terminal dashboard for a Kubernetes dashboard backend
//!
//! The reusable core is two pieces: [`form`], which turns a declarative
//! field model into live controls and collects their values, and [`state`],
//! the observable containers shared by the views.

pub mod api;
pub mod commands;
pub mod config;
pub mod form;
pub mod state;
pub mod tui;
pub mod utils;
pub mod views;
