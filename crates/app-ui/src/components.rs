//! Bottom bar components
//!
//! The bottom bar lists one item per tab. Tapping an item is forwarded to
//! [`Navigator::navigate`](crate::navigation::Navigator::navigate) with the
//! item's route, which switches tabs without touching any back stack.

use crate::navigation::NavKey;
use serde::Serialize;

/// An item in the bottom navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottomBarItem {
    /// Tab the item switches to
    pub route: NavKey,
    /// Display text
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
}

/// Bottom bar items in display order
pub fn bottom_bar_items() -> Vec<BottomBarItem> {
    vec![
        BottomBarItem {
            route: NavKey::Home,
            label: "Home",
            icon: "home",
        },
        BottomBarItem {
            route: NavKey::Search,
            label: "Search",
            icon: "search",
        },
        BottomBarItem {
            route: NavKey::Profile,
            label: "Profile",
            icon: "person",
        },
    ]
}

/// A bottom bar item with its selection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottomBarEntry {
    /// The item
    pub item: BottomBarItem,
    /// Whether the item's tab is active
    pub selected: bool,
}

/// Bottom navigation bar
pub struct BottomBar;

impl BottomBar {
    /// Items with selection resolved against the active tab
    pub fn items(active: &NavKey) -> Vec<BottomBarEntry> {
        bottom_bar_items()
            .into_iter()
            .map(|item| {
                let selected = item.route == *active;
                BottomBarEntry { item, selected }
            })
            .collect()
    }
}
