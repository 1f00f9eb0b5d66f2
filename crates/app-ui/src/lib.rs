//! User interface core for the tab shell
//!
//! This crate provides the navigation layer: route keys, per-tab back
//! stacks, the navigator, entry projection for display surfaces, and the
//! bottom bar model.
//!
//! # Modules
//!
//! - [`navigation`] - Route keys, back stacks, navigation state and policy
//! - [`display`] - Ordered entry projection with per-route retained state
//! - [`components`] - Bottom bar items
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{BackOutcome, NavKey, NavigationState, Navigator};
//!
//! let mut state =
//!     NavigationState::new(NavKey::Home, [NavKey::Home, NavKey::Search, NavKey::Profile])
//!         .unwrap();
//!
//! let mut nav = Navigator::new(&mut state);
//! nav.navigate(NavKey::Search);
//! nav.navigate(NavKey::SearchItem { id: "search_1".to_string() });
//!
//! assert_eq!(nav.go_back(), BackOutcome::Popped(NavKey::SearchItem { id: "search_1".to_string() }));
//! assert_eq!(nav.go_back(), BackOutcome::ReturnedToStart { from: NavKey::Search });
//! assert_eq!(nav.go_back(), BackOutcome::Unhandled);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod display;
pub mod navigation;

// Re-export commonly used types
pub use components::{bottom_bar_items, BottomBar, BottomBarEntry, BottomBarItem};

pub use display::{DisplayEntry, EntryProvider, EntryRegistry};

pub use navigation::{
    BackOutcome, BackStack, NavKey, NavigationError, NavigationEvent,
    NavigationSnapshot, NavigationState, Navigator,
};
