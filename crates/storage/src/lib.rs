//! Storage layer for the tab shell
//!
//! This crate provides versioned persistence for state that must survive
//! process restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod persistence;

pub use persistence::{
    FileStore, MemoryStore, PersistenceConfig, PersistenceError, StateStore,
};
