//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::config::ShellConfig;

/// Install the global fmt subscriber
///
/// Falls back to `info` when the filter does not parse. Returns false if a
/// global subscriber was already installed.
pub fn init(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Install the global subscriber with the shell's filter
///
/// `TAB_SHELL_LOG` takes precedence over the configured filter.
pub fn init_from_config(config: &ShellConfig) -> bool {
    init(&config.effective_log_filter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let _ = init("not a [valid filter");
        assert!(!init("debug"));
    }

    #[test]
    fn test_init_from_config() {
        let config = ShellConfig::default().log_filter("tab_shell=debug");
        let _ = init_from_config(&config);
        assert!(!init_from_config(&config));
    }
}
