//! Add-ons data layer.
//!
//! This module provides the state behind the addons screen: the catalog
//! data model, a background fetcher for `addon_catalog` resources, and the
//! engine that turns route parameters into a loaded catalog.
//!
//! # Architecture
//!
//! - **types**: Core data structures (`Addon`, `CatalogResource`, `AddonsModel`)
//! - **client**: Catalog URL resolution and fetching (HTTP or `file://`)
//! - **fetcher**: Background fetcher for non-blocking catalog requests
//! - **engine**: `AddonsSource` trait and the `AddonsEngine` implementation
//! - **selectable**: Catalog/type select inputs for the toolbar
//!
//! # Usage
//!
//! ```ignore
//! use addondeck::addons::{AddonsEngine, AddonsSource};
//! use addondeck::route::Route;
//!
//! let mut engine = AddonsEngine::new(sources, installed, 30);
//! engine.load(&Route::parse("#/addons")?.url_params);
//! // ... call engine.poll() in the event loop
//! ```

mod client;
mod engine;
mod fetcher;
mod selectable;
mod types;

pub use client::{CatalogClient, DEFAULT_REQUEST_TIMEOUT_SECS, catalog_url};
pub use engine::{AddonsEngine, AddonsSource, CatalogSource, build_selectable};
pub use fetcher::{BackgroundFetcher, FetchResult};
pub use selectable::{SelectInput, SelectOption, selectable_inputs};
pub use types::{
    ADDON_CATALOG_RESOURCE, Addon, AddonError, AddonsModel, CatalogResource, CatalogResponse,
    MAX_CATALOG_ADDONS, Manifest, ResourceContent, ResourcePath, ResourceRequest, Selectable,
    SelectableCatalog, SelectableType,
};
