//! Screens retained per route

use app_state::{HomeTabViewModel, MenuItemKind, ProfileViewModel, SearchViewModel};
use app_ui::NavKey;

/// Render object for a route
///
/// Tab screens own their view model, so UI state lives exactly as long as
/// the route stays in a back stack.
#[derive(Debug)]
pub enum Screen {
    /// Home grid
    Home(HomeTabViewModel),
    /// Search suggestions
    Search(SearchViewModel),
    /// Profile menus
    Profile(ProfileViewModel),
    /// A pushed detail destination
    Detail {
        /// Route that opened the screen
        route: NavKey,
        /// Title bar text
        title: &'static str,
    },
}

impl Screen {
    /// Title bar text
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home(_) => "Home",
            Screen::Search(_) => "Search",
            Screen::Profile(_) => "Profile",
            Screen::Detail { title, .. } => *title,
        }
    }
}

/// Entry provider for the display surface
pub fn screen_for(key: &NavKey) -> Screen {
    match key {
        NavKey::Home => Screen::Home(HomeTabViewModel::new()),
        NavKey::Search => Screen::Search(SearchViewModel::new()),
        NavKey::Profile => Screen::Profile(ProfileViewModel::new()),
        NavKey::Placeholder { .. }
        | NavKey::SearchItem { .. }
        | NavKey::Settings
        | NavKey::Notifications
        | NavKey::Privacy
        | NavKey::Payments => Screen::Detail {
            route: key.clone(),
            title: key.title(),
        },
    }
}

/// Route opened by a profile menu item
pub fn menu_destination(kind: MenuItemKind) -> NavKey {
    match kind {
        MenuItemKind::Settings => NavKey::Settings,
        MenuItemKind::Notifications => NavKey::Notifications,
        MenuItemKind::Privacy => NavKey::Privacy,
        MenuItemKind::Payments => NavKey::Payments,
    }
}
