//! Tab shell application
//!
//! A tabbed Home/Search/Profile shell. Each tab keeps its own back stack;
//! the bottom bar switches tabs, screens push detail routes onto the active
//! tab, and system back pops the active tab before returning to Home.
//!
//! # Modules
//!
//! - [`config`] - Shell configuration
//! - [`scaffold`] - The shell itself: navigation, drawer, back handling
//! - [`screens`] - Screens retained per route
//! - [`logging`] - `tracing` subscriber setup
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```rust
//! use app_ui::NavKey;
//! use tab_shell::{logging, AppScaffold, BackDisposition, ShellConfig};
//!
//! let config = ShellConfig::default();
//! logging::init_from_config(&config);
//!
//! let mut shell = AppScaffold::new(config).unwrap();
//! shell.select_tab(NavKey::Profile);
//! shell.navigate(NavKey::Settings);
//! assert_eq!(shell.render().len(), 3);
//!
//! assert_eq!(shell.handle_back(), BackDisposition::Consumed);
//! assert_eq!(shell.handle_back(), BackDisposition::Consumed);
//! assert_eq!(shell.handle_back(), BackDisposition::Exit);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod logging;
pub mod scaffold;
pub mod screens;

pub use config::{BackExhaustedPolicy, ShellConfig};
pub use error::{Result, ShellError};
pub use scaffold::{AppScaffold, BackDisposition};
pub use screens::{menu_destination, screen_for, Screen};
