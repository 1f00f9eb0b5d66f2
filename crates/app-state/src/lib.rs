//! Tab view state for the tab shell
//!
//! This crate provides the per-tab view models. Stateful models publish
//! changes through `watch` channels so any number of views can observe them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod home;
pub mod profile;
pub mod search;

pub use home::{HomeTabState, HomeTabViewModel, PlaceholderUi};
pub use profile::{MenuItem, MenuItemKind, ProfileViewModel};
pub use search::{SearchItemUi, SearchTabState, SearchViewModel};
