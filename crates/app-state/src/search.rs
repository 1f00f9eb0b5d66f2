//! Search tab view state

use tokio::sync::watch;

/// Number of suggestions shown on the Search tab
pub const SEARCH_ITEM_COUNT: usize = 10;

/// A search result or suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItemUi {
    /// Unique identifier
    pub id: String,
}

/// UI state for the Search tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTabState {
    /// Items in display order
    pub search_items: Vec<SearchItemUi>,
}

impl Default for SearchTabState {
    fn default() -> Self {
        Self {
            search_items: (0..SEARCH_ITEM_COUNT)
                .map(|i| SearchItemUi {
                    id: format!("search_{}", i),
                })
                .collect(),
        }
    }
}

/// View model for the Search tab
#[derive(Debug)]
pub struct SearchViewModel {
    state: watch::Sender<SearchTabState>,
}

impl Default for SearchViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchViewModel {
    /// Create a view model with the default suggestions
    pub fn new() -> Self {
        let (state, _) = watch::channel(SearchTabState::default());
        Self { state }
    }

    /// Current state
    pub fn state(&self) -> SearchTabState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SearchTabState> {
        self.state.subscribe()
    }
}
