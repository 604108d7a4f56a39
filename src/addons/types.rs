//! Add-on type definitions.
//!
//! Data model shared by the engine, the select inputs and the addons screen.
//! Wire types follow the catalog JSON format (camelCase keys).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource name used for addon catalog requests.
pub const ADDON_CATALOG_RESOURCE: &str = "addon_catalog";

/// Maximum number of addons accepted from a single catalog response.
pub const MAX_CATALOG_ADDONS: usize = 1000;

/// Addon manifest metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Manifest identifier (e.g., "org.example.subtitles").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Semver-ish version string.
    #[serde(default)]
    pub version: String,
    /// Logo image URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Supported content types (e.g., "movie", "series").
    #[serde(default)]
    pub types: Vec<String>,
}

/// An addon as listed by a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    /// Addon manifest.
    pub manifest: Manifest,
    /// Manifest fetch endpoint; identifies the addon.
    pub transport_url: String,
    /// Whether the addon is in the user's installed set.
    #[serde(default)]
    pub installed: bool,
}

impl Addon {
    /// Creates a new addon descriptor.
    #[must_use]
    pub fn new(manifest: Manifest, transport_url: impl Into<String>) -> Self {
        Self {
            manifest,
            transport_url: transport_url.into(),
            installed: false,
        }
    }

    /// Sets the installed flag.
    #[must_use]
    pub fn with_installed(mut self, installed: bool) -> Self {
        self.installed = installed;
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.manifest.description.as_deref()
    }

    /// Returns true if the name or description contains `query`, ignoring case.
    ///
    /// An empty query matches every addon.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let query = query.to_lowercase();
        self.manifest.name.to_lowercase().contains(&query)
            || self
                .description()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

/// Path part of a resource request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePath {
    /// Resource name; always `addon_catalog` here.
    pub resource: String,
    /// Content type the catalog is filtered by.
    pub type_name: String,
    /// Catalog identifier.
    pub id: String,
    /// Extra key/value arguments.
    #[serde(default)]
    pub extra: Vec<(String, String)>,
}

/// Request for a catalog resource hosted by an addon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// Transport URL of the addon serving the catalog.
    pub base: String,
    /// Resource path.
    pub path: ResourcePath,
}

impl ResourceRequest {
    /// Creates an `addon_catalog` request.
    #[must_use]
    pub fn addon_catalog(
        base: impl Into<String>,
        id: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            path: ResourcePath {
                resource: ADDON_CATALOG_RESOURCE.to_string(),
                type_name: type_name.into(),
                id: id.into(),
                extra: Vec::new(),
            },
        }
    }
}

/// Loading state of a catalog resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContent {
    /// Request in flight.
    Loading,
    /// Request failed; the message is for logs only.
    Err(String),
    /// Addons listed by the catalog.
    Ready(Vec<Addon>),
}

impl ResourceContent {
    /// Returns the content type tag.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Err(_) => "Err",
            Self::Ready(_) => "Ready",
        }
    }
}

/// A catalog request together with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResource {
    /// The request that produced this content.
    pub request: ResourceRequest,
    /// Current content.
    pub content: ResourceContent,
}

impl CatalogResource {
    /// Creates a resource in the loading state.
    #[must_use]
    pub fn loading(request: ResourceRequest) -> Self {
        Self {
            request,
            content: ResourceContent::Loading,
        }
    }
}

/// A catalog the user can switch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableCatalog {
    /// Display name.
    pub name: String,
    /// Request that loads the catalog.
    pub request: ResourceRequest,
    /// Whether this is the active catalog.
    pub selected: bool,
}

/// A content type the active catalog can be filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableType {
    /// Type name (e.g., "movie").
    pub name: String,
    /// Request that loads the active catalog with this type.
    pub request: ResourceRequest,
    /// Whether this is the active type.
    pub selected: bool,
}

/// Everything the user can select on the addons screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectable {
    /// Types of the active catalog.
    pub types: Vec<SelectableType>,
    /// All known catalogs.
    pub catalogs: Vec<SelectableCatalog>,
}

/// State consumed by the addons screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonsModel {
    /// Selectable catalogs and types.
    pub selectable: Selectable,
    /// Active catalog resource, if a catalog is selected.
    pub catalog_resource: Option<CatalogResource>,
}

impl AddonsModel {
    /// Returns the active request, if any.
    #[must_use]
    pub fn request(&self) -> Option<&ResourceRequest> {
        self.catalog_resource.as_ref().map(|r| &r.request)
    }
}

/// Wire format of an `addon_catalog` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    /// Listed addons.
    #[serde(default)]
    pub addons: Vec<Addon>,
}

/// Add-on error types.
#[derive(Debug, Error)]
pub enum AddonError {
    /// Network error during a catalog request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Catalog server answered with a non-success status.
    #[error("Catalog request failed with HTTP {0}")]
    Status(u16),
    /// Local catalog file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Catalog response was not valid JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Transport URL could not be parsed.
    #[error("Invalid transport URL '{0}'")]
    InvalidTransportUrl(String),
    /// Transport URL uses a scheme we cannot fetch.
    #[error("Unsupported transport scheme '{0}'")]
    UnsupportedScheme(String),
}
