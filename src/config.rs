//! Shell configuration

use app_ui::{NavKey, NavigationSnapshot};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storage::{FileStore, PersistenceConfig};

use crate::error::Result;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "TAB_SHELL_LOG";

/// Schema version of the persisted navigation layout
pub const STATE_VERSION: u32 = 1;

/// What to do when back is pressed with nothing left to go back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackExhaustedPolicy {
    /// Let the platform close the app
    #[default]
    Exit,
    /// Swallow the event and stay on the start tab
    Ignore,
}

/// Shell configuration
///
/// # Example
///
/// ```rust
/// use app_ui::NavKey;
/// use tab_shell::config::{BackExhaustedPolicy, ShellConfig};
///
/// let config = ShellConfig::from_json(r#"{"backExhausted": "ignore"}"#).unwrap();
/// assert_eq!(config.start_route, NavKey::Home);
/// assert_eq!(config.back_exhausted, BackExhaustedPolicy::Ignore);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellConfig {
    /// Tab shown at launch
    pub start_route: NavKey,
    /// Tabs in bottom bar order
    pub top_level_routes: Vec<NavKey>,
    /// Where navigation state is saved, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
    /// Back behavior once navigation is exhausted
    pub back_exhausted: BackExhaustedPolicy,
    /// Default `tracing` filter directive
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_route: NavKey::Home,
            top_level_routes: vec![NavKey::Home, NavKey::Search, NavKey::Profile],
            state_path: None,
            back_exhausted: BackExhaustedPolicy::Exit,
            log_filter: "info".to_string(),
        }
    }
}

impl ShellConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the start route
    pub fn start_route(mut self, route: NavKey) -> Self {
        self.start_route = route;
        self
    }

    /// Set the top-level routes
    pub fn top_level_routes(mut self, routes: impl IntoIterator<Item = NavKey>) -> Self {
        self.top_level_routes = routes.into_iter().collect();
        self
    }

    /// Save navigation state to this path
    pub fn state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    /// Set the exhausted-back policy
    pub fn back_exhausted(mut self, policy: BackExhaustedPolicy) -> Self {
        self.back_exhausted = policy;
        self
    }

    /// Set the default log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Log filter after applying the [`LOG_ENV`] override
    pub fn effective_log_filter(&self) -> String {
        std::env::var(LOG_ENV).unwrap_or_else(|_| self.log_filter.clone())
    }

    /// File store for the configured state path
    pub fn state_store(&self) -> Option<FileStore<NavigationSnapshot>> {
        self.state_path
            .as_ref()
            .map(|path| FileStore::new(PersistenceConfig::new(path).version(STATE_VERSION)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.start_route, NavKey::Home);
        assert_eq!(
            config.top_level_routes,
            vec![NavKey::Home, NavKey::Search, NavKey::Profile]
        );
        assert_eq!(config.back_exhausted, BackExhaustedPolicy::Exit);
        assert!(config.state_store().is_none());
    }

    #[test]
    fn test_from_json() {
        let config = ShellConfig::from_json(
            r#"{
                "startRoute": {"route": "Search"},
                "topLevelRoutes": [{"route": "Search"}, {"route": "Profile"}],
                "statePath": "/tmp/nav.json",
                "logFilter": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.start_route, NavKey::Search);
        assert_eq!(config.top_level_routes, vec![NavKey::Search, NavKey::Profile]);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.state_store().unwrap().path(),
            std::path::Path::new("/tmp/nav.json")
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_route() {
        assert!(ShellConfig::from_json(r#"{"startRoute": {"route": "Inbox"}}"#).is_err());
    }

    #[test]
    fn test_builder() {
        let config = ShellConfig::new()
            .start_route(NavKey::Profile)
            .top_level_routes([NavKey::Home, NavKey::Profile])
            .back_exhausted(BackExhaustedPolicy::Ignore)
            .log_filter("tab_shell=trace");

        assert_eq!(config.start_route, NavKey::Profile);
        assert_eq!(config.top_level_routes.len(), 2);
        assert_eq!(config.back_exhausted, BackExhaustedPolicy::Ignore);
        assert_eq!(config.log_filter, "tab_shell=trace");
    }
}
