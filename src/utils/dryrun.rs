//! Dry-run mode utilities

use colored::Colorize;

/// Log a dry-run action
pub fn log_action(action: &str) {
    println!("  {} {}", "[DRY RUN]".cyan().bold(), action);
}

/// Run `f` unless `dry_run` is set, in which case only describe it and
/// return `default`
pub fn exec_unless_dry_run_with_default<F, T>(
    dry_run: bool,
    action_desc: &str,
    default: T,
    f: F,
) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    if dry_run {
        log_action(action_desc);
        println!("{}", "No changes were made (--dry-run mode)".yellow());
        Ok(default)
    } else {
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_when_not_dry_run() {
        let mut executed = false;
        let result = exec_unless_dry_run_with_default(false, "test action", 0, || {
            executed = true;
            Ok(1)
        });

        assert_eq!(result.unwrap(), 1);
        assert!(executed);
    }

    #[test]
    fn test_skip_in_dry_run_mode() {
        let mut executed = false;
        let result = exec_unless_dry_run_with_default(true, "test action", 0, || {
            executed = true;
            Ok(1)
        });

        assert_eq!(result.unwrap(), 0);
        assert!(!executed);
    }
}
