//! Home tab view state
//!
//! Holds the grid of placeholder items shown on the Home tab and publishes
//! every change through a `watch` channel.

use tokio::sync::watch;
use tracing::debug;

/// Number of placeholder items on the Home tab
pub const PLACEHOLDER_COUNT: usize = 20;

/// A placeholder item in the Home grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderUi {
    /// Unique identifier
    pub id: String,
    /// Marked as favorite
    pub is_favorite: bool,
    /// Added to the cart
    pub is_in_cart: bool,
}

/// UI state for the Home tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeTabState {
    /// Items in display order
    pub placeholders: Vec<PlaceholderUi>,
}

impl Default for HomeTabState {
    fn default() -> Self {
        Self {
            placeholders: (0..PLACEHOLDER_COUNT)
                .map(|i| PlaceholderUi {
                    id: format!("ph_{}", i),
                    is_favorite: false,
                    is_in_cart: false,
                })
                .collect(),
        }
    }
}

impl HomeTabState {
    /// Find an item by id
    pub fn placeholder(&self, id: &str) -> Option<&PlaceholderUi> {
        self.placeholders.iter().find(|ph| ph.id == id)
    }
}

/// View model for the Home tab
#[derive(Debug)]
pub struct HomeTabViewModel {
    state: watch::Sender<HomeTabState>,
}

impl Default for HomeTabViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeTabViewModel {
    /// Create a view model with the default grid
    pub fn new() -> Self {
        let (state, _) = watch::channel(HomeTabState::default());
        Self { state }
    }

    /// Current state
    pub fn state(&self) -> HomeTabState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<HomeTabState> {
        self.state.subscribe()
    }

    /// Toggle the favorite flag of an item
    ///
    /// Returns false if no item has this id.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        self.update_item(id, |ph| ph.is_favorite = !ph.is_favorite)
    }

    /// Toggle whether an item is in the cart
    ///
    /// Returns false if no item has this id.
    pub fn toggle_cart(&self, id: &str) -> bool {
        self.update_item(id, |ph| ph.is_in_cart = !ph.is_in_cart)
    }

    fn update_item(&self, id: &str, f: impl FnOnce(&mut PlaceholderUi)) -> bool {
        let updated = self.state.send_if_modified(|state| {
            match state.placeholders.iter_mut().find(|ph| ph.id == id) {
                Some(ph) => {
                    f(ph);
                    true
                }
                None => false,
            }
        });
        if !updated {
            debug!(id, "no placeholder with this id");
        }
        updated
    }
}
