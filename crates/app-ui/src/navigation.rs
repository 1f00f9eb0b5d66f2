//! Navigation system for the tab shell
//!
//! This module provides multi-stack tab navigation:
//! - Route keys for every destination in the app
//! - One back stack per top-level tab
//! - Navigation state with active-tab tracking and change events
//! - The navigator, which owns the push/switch/back policy

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the navigation event channel
const EVENT_CAPACITY: usize = 64;

// =============================================================================
// Errors
// =============================================================================

/// Navigation configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No top-level routes were supplied
    #[error("at least one top-level route is required")]
    NoTopLevelRoutes,

    /// The start route is not one of the top-level routes
    #[error("start route {0:?} is not a top-level route")]
    StartRouteNotTopLevel(NavKey),

    /// A detail route was given as a top-level route
    #[error("{0:?} is a detail route and cannot own a tab")]
    NotATab(NavKey),

    /// A persisted snapshot does not describe a valid state
    #[error("invalid navigation snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Route Definitions
// =============================================================================

/// All possible destinations in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum NavKey {
    // Main tabs
    /// Home feed
    Home,
    /// Search
    Search,
    /// Profile
    Profile,

    // Home details
    /// A single item from the home grid
    Placeholder {
        /// Item id
        id: String,
    },

    // Search details
    /// A single search result
    SearchItem {
        /// Result id
        id: String,
    },

    // Profile menu
    /// App settings
    Settings,
    /// Notification preferences
    Notifications,
    /// Privacy and permissions
    Privacy,
    /// Payment methods and billing
    Payments,
}

impl NavKey {
    /// Whether this key is one of the tab kinds (Home, Search, Profile)
    pub fn is_tab(&self) -> bool {
        matches!(self, NavKey::Home | NavKey::Search | NavKey::Profile)
    }

    /// Get a display title for this route
    pub fn title(&self) -> &'static str {
        match self {
            NavKey::Home => "Home",
            NavKey::Search => "Search",
            NavKey::Profile => "Profile",
            NavKey::Placeholder { .. } => "Item",
            NavKey::SearchItem { .. } => "Result",
            NavKey::Settings => "Settings",
            NavKey::Notifications => "Notifications",
            NavKey::Privacy => "Privacy",
            NavKey::Payments => "Payments",
        }
    }
}

// =============================================================================
// Back Stack
// =============================================================================

/// Back stack for a single tab
///
/// Never empty: the first entry is always the tab's own top-level route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NavKey>", into = "Vec<NavKey>")]
pub struct BackStack {
    /// Stack entries (bottom to top)
    entries: Vec<NavKey>,
}

impl BackStack {
    /// Create a stack holding only its root route
    pub fn new(root: NavKey) -> Self {
        Self {
            entries: vec![root],
        }
    }

    /// The owning top-level route
    pub fn root(&self) -> &NavKey {
        &self.entries[0]
    }

    /// The top of the stack
    pub fn current(&self) -> &NavKey {
        self.entries.last().expect("Stack should never be empty")
    }

    /// Number of entries, root included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty (never true)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there is anything above the root
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: NavKey) {
        self.entries.push(route);
    }

    /// Pop the top route. The root is never removed.
    pub fn pop(&mut self) -> Option<NavKey> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Check whether a route is anywhere in the stack
    pub fn contains(&self, route: &NavKey) -> bool {
        self.entries.contains(route)
    }

    /// Iterate bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, NavKey> {
        self.entries.iter()
    }

    /// Get all entries
    pub fn entries(&self) -> &[NavKey] {
        &self.entries
    }
}

impl TryFrom<Vec<NavKey>> for BackStack {
    type Error = NavigationError;

    fn try_from(entries: Vec<NavKey>) -> Result<Self> {
        if entries.is_empty() {
            return Err(NavigationError::InvalidSnapshot(
                "back stack must contain its root route".to_string(),
            ));
        }
        Ok(Self { entries })
    }
}

impl From<BackStack> for Vec<NavKey> {
    fn from(stack: BackStack) -> Self {
        stack.entries
    }
}

impl<'a> IntoIterator for &'a BackStack {
    type Item = &'a NavKey;
    type IntoIter = std::slice::Iter<'a, NavKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Events broadcast when navigation state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The active tab changed
    TabSwitched {
        /// Previously active tab
        from: NavKey,
        /// Newly active tab
        to: NavKey,
    },
    /// A detail route was pushed onto a tab's stack
    Pushed {
        /// Tab whose stack grew
        tab: NavKey,
        /// Pushed route
        route: NavKey,
    },
    /// A detail route was popped from a tab's stack
    Popped {
        /// Tab whose stack shrank
        tab: NavKey,
        /// Popped route
        route: NavKey,
    },
    /// Back from a tab root returned control to the start tab
    ReturnedToStart {
        /// Tab that was left
        from: NavKey,
    },
}

/// Persisted navigation layout
///
/// Holds the active tab and every tab's stack, each stack identified by
/// its first entry. Restoring a snapshot reproduces the state verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSnapshot {
    /// Start route of the session
    pub start_route: NavKey,
    /// Active top-level route
    pub top_level_route: NavKey,
    /// Stacks in top-level route order
    pub back_stacks: Vec<BackStack>,
}

/// Complete navigation state
#[derive(Debug)]
pub struct NavigationState {
    /// Route shown at launch
    start_route: NavKey,
    /// Current active tab
    top_level_route: NavKey,
    /// Top-level routes in configured order
    top_level_routes: Vec<NavKey>,
    /// Stacks for each tab
    back_stacks: HashMap<NavKey, BackStack>,
    /// Change notifications
    events: broadcast::Sender<NavigationEvent>,
}

impl NavigationState {
    /// Create a navigation state with one root-only stack per top-level route
    ///
    /// Duplicate top-level routes are collapsed, keeping first occurrence order.
    pub fn new(start_route: NavKey, top_level_routes: impl IntoIterator<Item = NavKey>) -> Result<Self> {
        let mut routes: Vec<NavKey> = Vec::new();
        for route in top_level_routes {
            if !routes.contains(&route) {
                routes.push(route);
            }
        }

        if routes.is_empty() {
            return Err(NavigationError::NoTopLevelRoutes);
        }
        if let Some(route) = routes.iter().find(|route| !route.is_tab()) {
            return Err(NavigationError::NotATab(route.clone()));
        }
        if !routes.contains(&start_route) {
            return Err(NavigationError::StartRouteNotTopLevel(start_route));
        }

        let back_stacks = routes
            .iter()
            .map(|route| (route.clone(), BackStack::new(route.clone())))
            .collect();

        Ok(Self::from_parts(start_route.clone(), start_route, routes, back_stacks))
    }

    /// Rebuild a state from a persisted snapshot
    pub fn restore(snapshot: NavigationSnapshot) -> Result<Self> {
        let NavigationSnapshot {
            start_route,
            top_level_route,
            back_stacks,
        } = snapshot;

        if back_stacks.is_empty() {
            return Err(NavigationError::InvalidSnapshot(
                "no back stacks".to_string(),
            ));
        }

        let mut routes = Vec::with_capacity(back_stacks.len());
        let mut stacks = HashMap::with_capacity(back_stacks.len());
        for stack in back_stacks {
            let root = stack.root().clone();
            if !root.is_tab() {
                return Err(NavigationError::InvalidSnapshot(format!(
                    "{:?} cannot own a stack",
                    root
                )));
            }
            if stacks.contains_key(&root) {
                return Err(NavigationError::InvalidSnapshot(format!(
                    "duplicate stack for {:?}",
                    root
                )));
            }
            routes.push(root.clone());
            stacks.insert(root, stack);
        }

        // Top-level routes are switched to, never pushed
        for stack in stacks.values() {
            if let Some(route) = stack.iter().skip(1).find(|route| stacks.contains_key(*route)) {
                return Err(NavigationError::InvalidSnapshot(format!(
                    "top-level route {:?} pushed onto {:?}",
                    route,
                    stack.root()
                )));
            }
        }

        if !stacks.contains_key(&start_route) {
            return Err(NavigationError::InvalidSnapshot(format!(
                "start route {:?} has no stack",
                start_route
            )));
        }
        if !stacks.contains_key(&top_level_route) {
            return Err(NavigationError::InvalidSnapshot(format!(
                "active route {:?} has no stack",
                top_level_route
            )));
        }

        Ok(Self::from_parts(start_route, top_level_route, routes, stacks))
    }

    fn from_parts(
        start_route: NavKey,
        top_level_route: NavKey,
        top_level_routes: Vec<NavKey>,
        back_stacks: HashMap<NavKey, BackStack>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            start_route,
            top_level_route,
            top_level_routes,
            back_stacks,
            events,
        }
    }

    /// Capture the persisted layout
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            start_route: self.start_route.clone(),
            top_level_route: self.top_level_route.clone(),
            back_stacks: self.back_stacks().cloned().collect(),
        }
    }

    /// Route shown at launch
    pub fn start_route(&self) -> &NavKey {
        &self.start_route
    }

    /// Currently active tab
    pub fn top_level_route(&self) -> &NavKey {
        &self.top_level_route
    }

    /// Top-level routes in configured order
    pub fn top_level_routes(&self) -> &[NavKey] {
        &self.top_level_routes
    }

    /// Check whether a route identifies a tab in this state
    pub fn is_top_level(&self, route: &NavKey) -> bool {
        self.back_stacks.contains_key(route)
    }

    /// Get the stack owned by a top-level route
    pub fn back_stack(&self, route: &NavKey) -> Option<&BackStack> {
        self.back_stacks.get(route)
    }

    /// Iterate all stacks in top-level route order
    pub fn back_stacks(&self) -> impl Iterator<Item = &BackStack> {
        self.top_level_routes
            .iter()
            .map(move |route| &self.back_stacks[route])
    }

    /// Get the stack for the active tab
    pub fn current_stack(&self) -> &BackStack {
        self.back_stacks
            .get(&self.top_level_route)
            .expect("All tabs should have stacks")
    }

    fn current_stack_mut(&mut self) -> &mut BackStack {
        self.back_stacks
            .get_mut(&self.top_level_route)
            .expect("All tabs should have stacks")
    }

    /// Get the route on top of the active tab
    pub fn current_route(&self) -> &NavKey {
        self.current_stack().current()
    }

    /// Tabs whose stacks are eligible for rendering, bottom-most first
    ///
    /// Always the start route, followed by the active tab when it differs.
    pub fn stacks_in_use(&self) -> Vec<&NavKey> {
        if self.top_level_route == self.start_route {
            vec![&self.start_route]
        } else {
            vec![&self.start_route, &self.top_level_route]
        }
    }

    /// Subscribe to navigation changes
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: NavigationEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Outcome of a back request
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum BackOutcome {
    /// The active tab's top entry was removed
    Popped(NavKey),
    /// A tab at its root handed control back to the start tab
    ReturnedToStart {
        /// Tab that was left
        from: NavKey,
    },
    /// Nothing left to go back to; the platform decides what happens next
    Unhandled,
}

impl BackOutcome {
    /// Whether the navigation core consumed the back request
    pub fn is_handled(&self) -> bool {
        !matches!(self, BackOutcome::Unhandled)
    }
}

/// Applies navigation policy to a [`NavigationState`]
///
/// Navigators hold nothing but the borrow; create one per interaction.
pub struct Navigator<'a> {
    state: &'a mut NavigationState,
}

impl<'a> Navigator<'a> {
    /// Wrap a navigation state
    pub fn new(state: &'a mut NavigationState) -> Self {
        Self { state }
    }

    /// The underlying state
    pub fn state(&self) -> &NavigationState {
        self.state
    }

    /// Navigate to a route
    ///
    /// A top-level route switches tabs and leaves every stack untouched.
    /// Any other route is pushed onto the active tab's stack.
    pub fn navigate(&mut self, route: NavKey) {
        if self.state.is_top_level(&route) {
            if self.state.top_level_route == route {
                return;
            }
            let from = std::mem::replace(&mut self.state.top_level_route, route.clone());
            debug!(?from, to = ?route, "switched tab");
            self.state
                .emit(NavigationEvent::TabSwitched { from, to: route });
        } else {
            let tab = self.state.top_level_route.clone();
            self.state.current_stack_mut().push(route.clone());
            debug!(?tab, ?route, "pushed route");
            self.state.emit(NavigationEvent::Pushed { tab, route });
        }
    }

    /// Go back
    ///
    /// Pops the active stack if it holds more than its root; otherwise
    /// returns to the start tab; otherwise reports [`BackOutcome::Unhandled`].
    pub fn go_back(&mut self) -> BackOutcome {
        let tab = self.state.top_level_route.clone();

        if let Some(route) = self.state.current_stack_mut().pop() {
            debug!(?tab, ?route, "popped route");
            self.state.emit(NavigationEvent::Popped {
                tab,
                route: route.clone(),
            });
            return BackOutcome::Popped(route);
        }

        if tab != self.state.start_route {
            self.state.top_level_route = self.state.start_route.clone();
            debug!(from = ?tab, "returned to start tab");
            self.state
                .emit(NavigationEvent::ReturnedToStart { from: tab.clone() });
            return BackOutcome::ReturnedToStart { from: tab };
        }

        debug!("back stack exhausted");
        BackOutcome::Unhandled
    }
}

// =============================================================================
// Tests
// =============================================================================
