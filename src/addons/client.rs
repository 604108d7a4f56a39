//! Catalog client for addon discovery.
//!
//! Resolves `addon_catalog` requests against their catalog addon and
//! decodes the listed addons. Supports `http(s)://` and `file://` bases.

use super::types::{
    Addon, AddonError, CatalogResponse, MAX_CATALOG_ADDONS, ResourceRequest,
};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Cache expiration time (5 minutes).
const CACHE_EXPIRATION_SECS: u64 = 300;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Manifest file name stripped from transport URLs to get the addon root.
const MANIFEST_FILE: &str = "manifest.json";

/// Cached catalog content with expiration.
struct CachedCatalog {
    /// Listed addons.
    addons: Vec<Addon>,
    /// When the entry was stored.
    cached_at: Instant,
}

/// Client for fetching addon catalogs.
pub struct CatalogClient {
    /// HTTP client.
    client: reqwest::blocking::Client,
    /// Cached catalogs by request.
    cache: Arc<RwLock<HashMap<ResourceRequest, CachedCatalog>>>,
}

impl CatalogClient {
    /// Creates a new catalog client with the given request timeout.
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("addondeck/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetches the addons listed by a catalog.
    ///
    /// Uses cached results if available and not expired.
    pub fn fetch_catalog(
        &self,
        request: &ResourceRequest,
        force_refresh: bool,
    ) -> Result<Vec<Addon>, AddonError> {
        if !force_refresh {
            if let Ok(cache) = self.cache.read() {
                if let Some(cached) = cache.get(request) {
                    if cached.cached_at.elapsed() < Duration::from_secs(CACHE_EXPIRATION_SECS) {
                        debug!("[CATALOG] Returning {} cached addons", cached.addons.len());
                        return Ok(cached.addons.clone());
                    }
                }
            }
        }

        let url = catalog_url(request)?;
        info!("[CATALOG] Fetching {}", url);
        let start = Instant::now();

        let body = match url.scheme() {
            "http" | "https" => {
                let response = self.client.get(url.clone()).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AddonError::Status(status.as_u16()));
                }
                response.text()?
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| AddonError::InvalidTransportUrl(url.to_string()))?;
                fs::read_to_string(path)?
            }
            other => return Err(AddonError::UnsupportedScheme(other.to_string())),
        };

        let mut response: CatalogResponse = serde_json::from_str(&body)?;
        response.addons.truncate(MAX_CATALOG_ADDONS);
        info!(
            "[CATALOG] Fetched {} addons in {:?}",
            response.addons.len(),
            start.elapsed()
        );

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(
                request.clone(),
                CachedCatalog {
                    addons: response.addons.clone(),
                    cached_at: Instant::now(),
                },
            );
        }

        Ok(response.addons)
    }
}

/// Builds the resource URL for a catalog request.
///
/// `https://host/path/manifest.json` with catalog `all` of type `movie`
/// becomes `https://host/path/addon_catalog/movie/all.json`.
pub fn catalog_url(request: &ResourceRequest) -> Result<Url, AddonError> {
    let root = request
        .base
        .strip_suffix(MANIFEST_FILE)
        .unwrap_or(&request.base);
    let root = if root.ends_with('/') {
        root.to_string()
    } else {
        format!("{}/", root)
    };

    let root =
        Url::parse(&root).map_err(|_| AddonError::InvalidTransportUrl(request.base.clone()))?;

    let mut path = format!(
        "{}/{}/{}",
        urlencoding::encode(&request.path.resource),
        urlencoding::encode(&request.path.type_name),
        urlencoding::encode(&request.path.id),
    );
    if !request.path.extra.is_empty() {
        let extra = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(request.path.extra.iter())
            .finish();
        path.push('/');
        path.push_str(&extra);
    }
    path.push_str(".json");

    root.join(&path)
        .map_err(|_| AddonError::InvalidTransportUrl(request.base.clone()))
}
