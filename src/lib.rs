//! addondeck
//!
//! A terminal addons screen for browsing addon catalogs, searching them,
//! and handing addons off for install, uninstall or sharing.
//!
//! # Architecture
//!
//! - **Route Module**: Hash routes and the navigation targets built from them
//! - **Addons Module**: Catalog data model, background fetching and the
//!   `AddonsSource` engine
//! - **UI Module**: Ratatui widgets for the addons screen and its modals
//! - **App Module**: Event loop glue and key handling
//!
//! # Usage
//!
//! ```no_run
//! use addondeck::{App, Config};
//!
//! let config = Config::default();
//! let mut app = App::new(&config, "#/addons");
//! // Run event loop...
//! ```

// Clippy configuration - allow common patterns
#![allow(clippy::unnested_or_patterns)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]

pub mod addons;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod route;
pub mod ui;

// Re-export main types
pub use addons::{AddonsEngine, AddonsSource};
pub use app::App;
pub use clipboard::Clipboard;
pub use config::Config;
pub use route::Route;
