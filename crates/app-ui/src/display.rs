//! Entry projection for display surfaces
//!
//! Turns a [`NavigationState`] into the ordered list of entries a display
//! surface renders. Render objects are retained per route key for as long as
//! the key sits in any back stack, and released once it has been popped.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::navigation::{NavKey, NavigationState};

/// Supplies the render object for a route
///
/// Implemented for any `Fn(&NavKey) -> E`. Providers should match the key
/// exhaustively so a new route fails to compile until it has a screen.
#[cfg_attr(test, mockall::automock(type Entry = String;))]
pub trait EntryProvider {
    /// Render object produced for a route
    type Entry;

    /// Create the render object for a route
    fn entry(&self, key: &NavKey) -> Self::Entry;
}

impl<F, E> EntryProvider for F
where
    F: Fn(&NavKey) -> E,
{
    type Entry = E;

    fn entry(&self, key: &NavKey) -> E {
        self(key)
    }
}

/// A single entry in display order
#[derive(Debug)]
pub struct DisplayEntry<'a, E> {
    /// Tab whose stack holds this entry
    pub tab: &'a NavKey,
    /// Route key
    pub key: &'a NavKey,
    /// Retained render object
    pub entry: &'a E,
    /// Whether this entry is drawn on top of everything else
    pub is_top: bool,
}

/// Registry of retained render objects keyed by route
#[derive(Debug)]
pub struct EntryRegistry<E> {
    entries: HashMap<NavKey, E>,
}

impl<E> Default for EntryRegistry<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E> EntryRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a route has a retained entry
    pub fn contains(&self, key: &NavKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the retained entry for a route
    pub fn get(&self, key: &NavKey) -> Option<&E> {
        self.entries.get(key)
    }

    /// Release entries whose route is no longer in any stack
    ///
    /// Call right after a pop, before the route can be pushed again, so the
    /// next push gets a fresh entry.
    pub fn release_stale(&mut self, state: &NavigationState) -> Vec<(NavKey, E)> {
        let live: HashSet<&NavKey> = state.back_stacks().flat_map(|stack| stack.iter()).collect();
        let stale: Vec<NavKey> = self
            .entries
            .keys()
            .filter(|key| !live.contains(key))
            .cloned()
            .collect();

        stale
            .into_iter()
            .filter_map(|key| {
                debug!(?key, "released entry");
                self.entries.remove_entry(&key)
            })
            .collect()
    }

    /// Project the visible stacks into display order
    ///
    /// Stale entries are released first. Entries are created on first request
    /// and reused afterwards, so the provider runs once per retained route.
    pub fn entries<'s, P>(
        &'s mut self,
        state: &'s NavigationState,
        provider: &P,
    ) -> Vec<DisplayEntry<'s, E>>
    where
        P: EntryProvider<Entry = E> + ?Sized,
    {
        self.release_stale(state);

        let visible: Vec<(&'s NavKey, &'s NavKey)> = state
            .stacks_in_use()
            .into_iter()
            .flat_map(|tab| {
                state
                    .back_stack(tab)
                    .expect("All tabs should have stacks")
                    .iter()
                    .map(move |key| (tab, key))
            })
            .collect();

        for (_, key) in &visible {
            if !self.entries.contains_key(*key) {
                debug!(?key, "created entry");
                let entry = provider.entry(key);
                self.entries.insert((*key).clone(), entry);
            }
        }

        let entries: &'s HashMap<NavKey, E> = &self.entries;
        let last = visible.len().saturating_sub(1);
        visible
            .into_iter()
            .enumerate()
            .map(|(index, (tab, key))| DisplayEntry {
                tab,
                key,
                entry: entries.get(key).expect("entry created above"),
                is_top: index == last,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Navigator;

    fn new_state() -> NavigationState {
        NavigationState::new(NavKey::Home, [NavKey::Home, NavKey::Search, NavKey::Profile]).unwrap()
    }

    fn keys<E>(entries: &[DisplayEntry<'_, E>]) -> Vec<NavKey> {
        entries.iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_entries_for_start_tab() {
        let state = new_state();
        let mut registry = EntryRegistry::new();
        let entries = registry.entries(&state, &|key: &NavKey| key.title().to_string());

        assert_eq!(keys(&entries), vec![NavKey::Home]);
        assert_eq!(*entries[0].entry, "Home");
        assert!(entries[0].is_top);
    }

    #[test]
    fn test_entries_include_start_stack_below_active_tab() {
        let mut state = new_state();
        let mut nav = Navigator::new(&mut state);
        nav.navigate(NavKey::Placeholder {
            id: "ph_1".to_string(),
        });
        nav.navigate(NavKey::Profile);
        nav.navigate(NavKey::Settings);

        let mut registry = EntryRegistry::new();
        let entries = registry.entries(&state, &|key: &NavKey| key.title());

        assert_eq!(
            keys(&entries),
            vec![
                NavKey::Home,
                NavKey::Placeholder {
                    id: "ph_1".to_string()
                },
                NavKey::Profile,
                NavKey::Settings,
            ]
        );
        assert_eq!(*entries[2].tab, NavKey::Profile);
        assert!(entries[3].is_top);
        assert!(!entries[1].is_top);
    }

    #[test]
    fn test_provider_called_once_per_retained_route() {
        let mut state = new_state();
        let mut provider = MockEntryProvider::new();
        provider
            .expect_entry()
            .times(2)
            .returning(|key| format!("screen:{}", key.title()));

        let mut registry = EntryRegistry::new();
        registry.entries(&state, &provider);
        Navigator::new(&mut state).navigate(NavKey::Search);
        registry.entries(&state, &provider);
        registry.entries(&state, &provider);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&NavKey::Search).unwrap(), "screen:Search");
    }

    #[test]
    fn test_inactive_tab_entries_are_retained() {
        let mut state = new_state();
        let mut registry = EntryRegistry::new();
        let mut nav = Navigator::new(&mut state);
        nav.navigate(NavKey::Search);
        nav.navigate(NavKey::SearchItem {
            id: "search_2".to_string(),
        });
        registry.entries(&state, &|key: &NavKey| key.title());

        Navigator::new(&mut state).navigate(NavKey::Profile);
        let entries = registry.entries(&state, &|key: &NavKey| key.title());

        assert_eq!(keys(&entries), vec![NavKey::Home, NavKey::Profile]);
        assert!(registry.contains(&NavKey::SearchItem {
            id: "search_2".to_string()
        }));
    }

    #[test]
    fn test_popped_entries_are_released() {
        let mut state = new_state();
        let mut registry = EntryRegistry::new();
        Navigator::new(&mut state).navigate(NavKey::Privacy);
        registry.entries(&state, &|key: &NavKey| key.title());
        assert!(registry.contains(&NavKey::Privacy));

        let _ = Navigator::new(&mut state).go_back();
        let released = registry.release_stale(&state);

        assert_eq!(released, vec![(NavKey::Privacy, "Privacy")]);
        assert!(!registry.contains(&NavKey::Privacy));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_on_pop_before_repush() {
        use std::cell::Cell;

        let mut state = new_state();
        let calls = Cell::new(0);
        let provider = |key: &NavKey| {
            calls.set(calls.get() + 1);
            format!("{}#{}", key.title(), calls.get())
        };

        let mut registry = EntryRegistry::new();
        Navigator::new(&mut state).navigate(NavKey::Payments);
        registry.entries(&state, &provider);

        let _ = Navigator::new(&mut state).go_back();
        registry.release_stale(&state);
        Navigator::new(&mut state).navigate(NavKey::Payments);
        let entries = registry.entries(&state, &provider);

        assert_eq!(*entries[1].entry, "Payments#3");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_released_route_gets_fresh_entry() {
        let mut state = new_state();
        let mut provider = MockEntryProvider::new();
        provider
            .expect_entry()
            .times(3)
            .returning(|key| key.title().to_string());

        let mut registry = EntryRegistry::new();
        Navigator::new(&mut state).navigate(NavKey::Payments);
        registry.entries(&state, &provider);
        let _ = Navigator::new(&mut state).go_back();
        registry.entries(&state, &provider);
        Navigator::new(&mut state).navigate(NavKey::Payments);
        let entries = registry.entries(&state, &provider);

        assert_eq!(entries.len(), 2);
    }
}
