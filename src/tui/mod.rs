//! Terminal rendering

pub mod terminal;

pub use terminal::TerminalHost;
