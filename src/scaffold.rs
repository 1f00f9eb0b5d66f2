//! Application scaffold
//!
//! Wires the navigation state, the retained screens, the bottom bar and the
//! drawer together, and maps platform back events onto navigation.

use app_ui::{
    BackOutcome, BottomBar, BottomBarEntry, DisplayEntry, EntryRegistry, NavKey, NavigationEvent,
    NavigationSnapshot, NavigationState, Navigator,
};
use storage::StateStore;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, info, warn};

use crate::config::{BackExhaustedPolicy, ShellConfig};
use crate::error::Result;
use crate::screens::{screen_for, Screen};

/// What the platform should do with a back event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum BackDisposition {
    /// The shell handled it
    Consumed,
    /// Nothing left to go back to; close the app
    Exit,
    /// Nothing left to go back to; stay put
    Ignored,
}

/// The application shell
#[derive(Debug)]
pub struct AppScaffold {
    config: ShellConfig,
    state: NavigationState,
    screens: EntryRegistry<Screen>,
    drawer_open: bool,
}

impl AppScaffold {
    /// Create a shell with fresh navigation state
    pub fn new(config: ShellConfig) -> Result<Self> {
        let state = Self::fresh_state(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a shell around existing navigation state
    pub fn with_state(config: ShellConfig, state: NavigationState) -> Self {
        Self {
            config,
            state,
            screens: EntryRegistry::new(),
            drawer_open: false,
        }
    }

    /// Rebuild the shell from saved navigation state
    ///
    /// Falls back to fresh state when nothing was saved, or when the saved
    /// layout is invalid or was made for a different set of tabs.
    pub async fn restore<S>(config: ShellConfig, store: &S) -> Result<Self>
    where
        S: StateStore<NavigationSnapshot> + ?Sized,
    {
        let fresh = Self::fresh_state(&config)?;
        let Some(snapshot) = store.load().await? else {
            info!("no saved navigation state");
            return Ok(Self::with_state(config, fresh));
        };

        match NavigationState::restore(snapshot) {
            Ok(state)
                if state.start_route() == fresh.start_route()
                    && state.top_level_routes() == fresh.top_level_routes() =>
            {
                info!(tab = ?state.top_level_route(), "restored navigation state");
                Ok(Self::with_state(config, state))
            }
            Ok(_) => {
                warn!("saved navigation state does not match configured tabs, starting fresh");
                Ok(Self::with_state(config, fresh))
            }
            Err(e) => {
                warn!(error = %e, "discarding saved navigation state");
                Ok(Self::with_state(config, fresh))
            }
        }
    }

    fn fresh_state(config: &ShellConfig) -> Result<NavigationState> {
        Ok(NavigationState::new(
            config.start_route.clone(),
            config.top_level_routes.iter().cloned(),
        )?)
    }

    /// Save navigation state
    pub async fn save<S>(&self, store: &S) -> Result<()>
    where
        S: StateStore<NavigationSnapshot> + ?Sized,
    {
        store.save(&self.state.snapshot()).await?;
        info!(tab = ?self.state.top_level_route(), "saved navigation state");
        Ok(())
    }

    /// Shell configuration
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Navigation state
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    fn navigator(&mut self) -> Navigator<'_> {
        Navigator::new(&mut self.state)
    }

    /// Subscribe to navigation changes
    pub fn subscribe(&self) -> Receiver<NavigationEvent> {
        self.state.subscribe()
    }

    /// Bottom bar tap
    pub fn select_tab(&mut self, route: NavKey) {
        self.drawer_open = false;
        self.navigator().navigate(route);
    }

    /// In-screen navigation request
    pub fn navigate(&mut self, route: NavKey) {
        self.navigator().navigate(route);
    }

    /// Open the navigation drawer
    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Close the navigation drawer
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Whether the navigation drawer is open
    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Handle a system back event
    ///
    /// An open drawer is closed first. Otherwise the navigator goes back,
    /// and once navigation is exhausted the configured policy decides.
    pub fn handle_back(&mut self) -> BackDisposition {
        if self.drawer_open {
            self.drawer_open = false;
            debug!("closed drawer");
            return BackDisposition::Consumed;
        }

        match self.navigator().go_back() {
            BackOutcome::Popped(_) => {
                // A popped route must not get its old screen back if pushed again
                self.screens.release_stale(&self.state);
                return BackDisposition::Consumed;
            }
            BackOutcome::ReturnedToStart { .. } => return BackDisposition::Consumed,
            BackOutcome::Unhandled => {}
        }

        match self.config.back_exhausted {
            BackExhaustedPolicy::Exit => {
                info!("navigation exhausted, exiting");
                BackDisposition::Exit
            }
            BackExhaustedPolicy::Ignore => BackDisposition::Ignored,
        }
    }

    /// Entries to draw, bottom-most first
    pub fn render(&mut self) -> Vec<DisplayEntry<'_, Screen>> {
        self.screens.entries(&self.state, &screen_for)
    }

    /// Retained screen for a route, if it has been rendered
    pub fn screen(&self, key: &NavKey) -> Option<&Screen> {
        self.screens.get(key)
    }

    /// Bottom bar items with the active tab selected
    pub fn bottom_bar(&self) -> Vec<BottomBarEntry> {
        BottomBar::items(self.state.top_level_route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStore;

    fn scaffold() -> AppScaffold {
        AppScaffold::new(ShellConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = ShellConfig::default().start_route(NavKey::Settings);
        assert!(AppScaffold::new(config).is_err());
    }

    #[test]
    fn test_back_closes_drawer_first() {
        let mut shell = scaffold();
        shell.navigate(NavKey::Settings);
        shell.open_drawer();

        assert_eq!(shell.handle_back(), BackDisposition::Consumed);
        assert!(!shell.is_drawer_open());
        assert_eq!(*shell.state().current_route(), NavKey::Settings);

        assert_eq!(shell.handle_back(), BackDisposition::Consumed);
        assert_eq!(*shell.state().current_route(), NavKey::Home);
    }

    #[test]
    fn test_back_releases_popped_screen_immediately() {
        let mut shell = scaffold();
        shell.select_tab(NavKey::Profile);
        shell.navigate(NavKey::Payments);
        shell.render();
        assert!(shell.screen(&NavKey::Payments).is_some());

        assert_eq!(shell.handle_back(), BackDisposition::Consumed);
        assert!(shell.screen(&NavKey::Payments).is_none());
        assert!(shell.screen(&NavKey::Profile).is_some());

        shell.navigate(NavKey::Payments);
        assert!(shell.screen(&NavKey::Payments).is_none());
        shell.render();
        assert!(shell.screen(&NavKey::Payments).is_some());
    }

    #[test]
    fn test_exhausted_back_exits_by_default() {
        let mut shell = scaffold();
        assert_eq!(shell.handle_back(), BackDisposition::Exit);
    }

    #[test]
    fn test_exhausted_back_can_be_ignored() {
        let config = ShellConfig::default().back_exhausted(BackExhaustedPolicy::Ignore);
        let mut shell = AppScaffold::new(config).unwrap();
        assert_eq!(shell.handle_back(), BackDisposition::Ignored);
        assert_eq!(*shell.state().top_level_route(), NavKey::Home);
    }

    #[test]
    fn test_select_tab_updates_bottom_bar() {
        let mut shell = scaffold();
        shell.select_tab(NavKey::Profile);
        let selected: Vec<NavKey> = shell
            .bottom_bar()
            .into_iter()
            .filter(|e| e.selected)
            .map(|e| e.item.route)
            .collect();
        assert_eq!(selected, vec![NavKey::Profile]);
    }

    #[test]
    fn test_home_state_survives_tab_switch() {
        let mut shell = scaffold();
        shell.render();
        match shell.screen(&NavKey::Home) {
            Some(Screen::Home(vm)) => assert!(vm.toggle_favorite("ph_1")),
            other => panic!("Expected home screen, got {:?}", other),
        }

        shell.select_tab(NavKey::Search);
        shell.render();
        shell.select_tab(NavKey::Home);
        shell.render();

        match shell.screen(&NavKey::Home) {
            Some(Screen::Home(vm)) => {
                assert!(vm.state().placeholder("ph_1").unwrap().is_favorite)
            }
            other => panic!("Expected home screen, got {:?}", other),
        }
    }

    #[test]
    fn test_render_titles() {
        let mut shell = scaffold();
        shell.select_tab(NavKey::Profile);
        shell.navigate(NavKey::Payments);
        let titles: Vec<&str> = shell.render().iter().map(|e| e.entry.title()).collect();
        assert_eq!(titles, vec!["Home", "Profile", "Payments"]);
    }

    #[tokio::test]
    async fn test_save_and_restore() {
        let store: MemoryStore<NavigationSnapshot> = MemoryStore::new();
        let mut shell = scaffold();
        shell.select_tab(NavKey::Search);
        shell.navigate(NavKey::SearchItem {
            id: "search_3".to_string(),
        });
        shell.save(&store).await.unwrap();

        let restored = AppScaffold::restore(ShellConfig::default(), &store).await.unwrap();
        assert_eq!(restored.state().snapshot(), shell.state().snapshot());
    }

    #[tokio::test]
    async fn test_restore_ignores_mismatched_tabs() {
        let store: MemoryStore<NavigationSnapshot> = MemoryStore::new();
        let mut shell = scaffold();
        shell.select_tab(NavKey::Profile);
        shell.save(&store).await.unwrap();

        let config = ShellConfig::default().top_level_routes([NavKey::Home, NavKey::Search]);
        let restored = AppScaffold::restore(config, &store).await.unwrap();
        assert_eq!(*restored.state().top_level_route(), NavKey::Home);
        assert_eq!(restored.state().top_level_routes().len(), 2);
    }
}
