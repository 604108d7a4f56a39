//! Addons state engine.
//!
//! Turns route parameters into a catalog request, dispatches it to the
//! background fetcher and exposes the resulting [`AddonsModel`].

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::fetcher::BackgroundFetcher;
use super::types::{
    AddonsModel, CatalogResource, ResourceContent, ResourceRequest, Selectable, SelectableCatalog,
    SelectableType,
};
use crate::route::UrlParams;

/// A configured catalog the user can browse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    /// Display name.
    pub name: String,
    /// Transport URL of the catalog addon.
    pub base: String,
    /// Catalog identifier.
    pub id: String,
    /// Content types the catalog can be filtered by.
    pub types: Vec<String>,
}

impl CatalogSource {
    /// Returns true if `request` targets this catalog.
    #[must_use]
    pub fn serves(&self, request: &ResourceRequest) -> bool {
        self.base == request.base && self.id == request.path.id
    }
}

/// Provider of the addons screen state.
pub trait AddonsSource {
    /// Points the source at the catalog described by `params`.
    fn load(&mut self, params: &UrlParams);

    /// Applies pending background results. Returns true if the model changed.
    fn poll(&mut self) -> bool;

    /// Reloads the active catalog, bypassing caches.
    fn reload(&mut self);

    /// Returns the current model.
    fn model(&self) -> &AddonsModel;
}

/// Engine backing the addons screen with configured catalog sources.
pub struct AddonsEngine {
    /// Configured catalogs.
    sources: Vec<CatalogSource>,
    /// Transport URLs of installed addons.
    installed: HashSet<String>,
    /// Background fetcher.
    fetcher: BackgroundFetcher,
    /// Current model.
    model: AddonsModel,
}

impl AddonsEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(
        sources: Vec<CatalogSource>,
        installed: impl IntoIterator<Item = String>,
        timeout_secs: u64,
    ) -> Self {
        let model = AddonsModel {
            selectable: build_selectable(&sources, None),
            catalog_resource: None,
        };

        Self {
            sources,
            installed: installed.into_iter().collect(),
            fetcher: BackgroundFetcher::new(timeout_secs),
            model,
        }
    }
}

impl AddonsSource for AddonsEngine {
    fn load(&mut self, params: &UrlParams) {
        let request = params.request();

        if request.as_ref() == self.model.request() {
            debug!("[ADDONS-ENGINE] load: request unchanged");
            return;
        }

        match request {
            Some(ref request) => {
                info!(
                    "[ADDONS-ENGINE] load: {} / {} / {}",
                    request.base, request.path.id, request.path.type_name
                );
                self.model.catalog_resource = Some(CatalogResource::loading(request.clone()));
                self.fetcher.request_catalog(request.clone(), false);
            }
            None => {
                info!("[ADDONS-ENGINE] load: no catalog selected");
                self.model.catalog_resource = None;
            }
        }

        self.model.selectable = build_selectable(&self.sources, request.as_ref());
    }

    fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Some(result) = self.fetcher.poll_result() {
            let Some(resource) = self.model.catalog_resource.as_mut() else {
                debug!("[ADDONS-ENGINE] poll: dropping result, no active catalog");
                continue;
            };
            if resource.request != result.request {
                debug!("[ADDONS-ENGINE] poll: dropping stale result");
                continue;
            }

            resource.content = match result.outcome {
                Ok(addons) => ResourceContent::Ready(
                    addons
                        .into_iter()
                        .map(|addon| {
                            let installed = self.installed.contains(&addon.transport_url);
                            addon.with_installed(installed)
                        })
                        .collect(),
                ),
                Err(e) => {
                    warn!("[ADDONS-ENGINE] poll: catalog failed: {}", e);
                    ResourceContent::Err(e.to_string())
                }
            };
            changed = true;
        }

        changed
    }

    fn reload(&mut self) {
        let Some(resource) = self.model.catalog_resource.as_mut() else {
            return;
        };

        info!("[ADDONS-ENGINE] reload: {}", resource.request.base);
        resource.content = ResourceContent::Loading;
        self.fetcher.request_catalog(resource.request.clone(), true);
    }

    fn model(&self) -> &AddonsModel {
        &self.model
    }
}

/// Builds the selectable catalogs and types for the active request.
#[must_use]
pub fn build_selectable(sources: &[CatalogSource], request: Option<&ResourceRequest>) -> Selectable {
    let catalogs = sources
        .iter()
        .filter_map(|source| {
            let type_name = request
                .map(|r| &r.path.type_name)
                .filter(|t| source.types.contains(t))
                .or_else(|| source.types.first())?;

            Some(SelectableCatalog {
                name: source.name.clone(),
                request: ResourceRequest::addon_catalog(&source.base, &source.id, type_name),
                selected: request.is_some_and(|r| source.serves(r)),
            })
        })
        .collect();

    let types = match request {
        Some(request) => {
            let names = sources
                .iter()
                .find(|source| source.serves(request))
                .map(|source| source.types.clone())
                .unwrap_or_else(|| vec![request.path.type_name.clone()]);

            names
                .into_iter()
                .map(|name| SelectableType {
                    request: ResourceRequest::addon_catalog(&request.base, &request.path.id, &name),
                    selected: name == request.path.type_name,
                    name,
                })
                .collect()
        }
        None => Vec::new(),
    };

    Selectable { types, catalogs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<CatalogSource> {
        vec![
            CatalogSource {
                name: "Official".to_string(),
                base: "https://official.example.com/manifest.json".to_string(),
                id: "all".to_string(),
                types: vec!["movie".to_string(), "series".to_string()],
            },
            CatalogSource {
                name: "Community".to_string(),
                base: "https://community.example.com/manifest.json".to_string(),
                id: "top".to_string(),
                types: vec!["series".to_string()],
            },
            CatalogSource {
                name: "Broken".to_string(),
                base: "https://broken.example.com/manifest.json".to_string(),
                id: "none".to_string(),
                types: Vec::new(),
            },
        ]
    }

    #[test]
    fn test_selectable_without_request() {
        let selectable = build_selectable(&sources(), None);
        assert_eq!(selectable.catalogs.len(), 2);
        assert!(selectable.types.is_empty());
        assert!(selectable.catalogs.iter().all(|c| !c.selected));
        assert_eq!(selectable.catalogs[0].request.path.type_name, "movie");
    }

    #[test]
    fn test_selectable_with_request() {
        let request = ResourceRequest::addon_catalog(
            "https://official.example.com/manifest.json",
            "all",
            "series",
        );
        let selectable = build_selectable(&sources(), Some(&request));

        assert!(selectable.catalogs[0].selected);
        assert!(!selectable.catalogs[1].selected);
        // Keeps the active type when the other catalog supports it
        assert_eq!(selectable.catalogs[1].request.path.type_name, "series");

        let names: Vec<_> = selectable.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["movie", "series"]);
        assert!(selectable.types[1].selected);
        assert_eq!(selectable.types[0].request.path.type_name, "movie");
    }

    #[test]
    fn test_selectable_unknown_catalog() {
        let request = ResourceRequest::addon_catalog("https://other/manifest.json", "x", "anime");
        let selectable = build_selectable(&sources(), Some(&request));
        assert_eq!(selectable.types.len(), 1);
        assert_eq!(selectable.types[0].name, "anime");
        assert!(selectable.types[0].selected);
        assert!(selectable.catalogs.iter().all(|c| !c.selected));
    }

    #[test]
    fn test_engine_load_without_params() {
        let mut engine = AddonsEngine::new(sources(), Vec::new(), 5);
        engine.load(&UrlParams::default());
        assert!(engine.model().catalog_resource.is_none());
        assert_eq!(engine.model().selectable.catalogs.len(), 2);
    }

    #[test]
    fn test_engine_load_sets_loading() {
        let mut engine = AddonsEngine::new(sources(), Vec::new(), 5);
        let request = ResourceRequest::addon_catalog(
            "https://official.example.com/manifest.json",
            "all",
            "movie",
        );
        engine.load(&UrlParams::from_request(&request));

        let resource = engine.model().catalog_resource.as_ref().unwrap();
        assert_eq!(resource.request, request);
        assert_eq!(resource.content, ResourceContent::Loading);
    }
}
