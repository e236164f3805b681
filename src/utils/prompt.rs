//! User prompt utilities for interactive confirmation

use anyhow::Result;
use dialoguer::{Confirm, Select};

/// Ask user for yes/no confirmation with default = yes
pub fn confirm_default_yes(prompt: &str) -> Result<bool> {
    let result = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()?;

    Ok(result)
}

/// Pick one entry of a menu, returns its index
pub fn menu(prompt: &str, items: &[&str]) -> Result<usize> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;

    Ok(index)
}
