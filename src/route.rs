//! Hash routes for the addons screen.
//!
//! Routes have the shape `#/addons[/<transportUrl>/<catalogId>/<type>][?<query>]`.
//! Path segments are percent-encoded; the query is form-encoded.

use std::fmt;

use thiserror::Error;

use crate::addons::ResourceRequest;

/// Hash of the bare addons route.
pub const ADDONS_HASH: &str = "#/addons";

/// Query parameter carrying the addon to show details for.
pub const ADDON_QUERY_PARAM: &str = "addon";

/// Path prefix of the addons route (without `#`).
const ADDONS_PATH: &str = "/addons";

/// Maximum number of path segments after `/addons`.
const MAX_SEGMENTS: usize = 3;

/// Route parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Hash does not point at the addons screen.
    #[error("Not an addons route: {0}")]
    NotAddonsRoute(String),
    /// Too many path segments.
    #[error("Too many path segments in {0}")]
    TooManySegments(String),
    /// A segment is not valid percent-encoded UTF-8.
    #[error("Invalid encoding in segment '{0}'")]
    InvalidEncoding(String),
}

/// Path parameters of the addons route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    /// Transport URL of the catalog addon.
    pub transport_url: Option<String>,
    /// Catalog identifier.
    pub catalog_id: Option<String>,
    /// Content type.
    pub type_name: Option<String>,
}

impl UrlParams {
    /// Creates params pointing at a catalog request.
    #[must_use]
    pub fn from_request(request: &ResourceRequest) -> Self {
        Self {
            transport_url: Some(request.base.clone()),
            catalog_id: Some(request.path.id.clone()),
            type_name: Some(request.path.type_name.clone()),
        }
    }

    /// Returns the catalog request these params describe.
    ///
    /// All three segments must be present.
    #[must_use]
    pub fn request(&self) -> Option<ResourceRequest> {
        match (&self.transport_url, &self.catalog_id, &self.type_name) {
            (Some(base), Some(id), Some(type_name)) => {
                Some(ResourceRequest::addon_catalog(base, id, type_name))
            }
            _ => None,
        }
    }
}

/// Query parameters of a route, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a form-encoded query string (without `?`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Creates params from key/value pairs.
    #[must_use]
    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes the params as a form-encoded query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// A parsed addons route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// Path parameters.
    pub url_params: UrlParams,
    /// Query parameters.
    pub query_params: QueryParams,
}

impl Route {
    /// Parses a location hash.
    pub fn parse(hash: &str) -> Result<Self, RouteError> {
        let trimmed = hash.strip_prefix('#').unwrap_or(hash);
        let (path, query) = trimmed.split_once('?').unwrap_or((trimmed, ""));

        let rest = path
            .strip_prefix(ADDONS_PATH)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| RouteError::NotAddonsRoute(hash.to_string()))?;

        let segments: Vec<&str> = rest.split('/').skip(1).collect();
        if segments.len() > MAX_SEGMENTS {
            return Err(RouteError::TooManySegments(hash.to_string()));
        }

        let mut decoded = segments
            .into_iter()
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();

        Ok(Self {
            url_params: UrlParams {
                transport_url: decoded.next().flatten(),
                catalog_id: decoded.next().flatten(),
                type_name: decoded.next().flatten(),
            },
            query_params: QueryParams::parse(query),
        })
    }

    /// Returns the route's catalog request, if complete.
    #[must_use]
    pub fn request(&self) -> Option<ResourceRequest> {
        self.url_params.request()
    }

    /// Returns the addon whose details were requested.
    #[must_use]
    pub fn addon(&self) -> Option<&str> {
        self.query_params.get(ADDON_QUERY_PARAM)
    }

    /// Builds the hash for this route.
    #[must_use]
    pub fn to_hash(&self) -> String {
        let mut hash = String::from(ADDONS_HASH);
        let segments = [
            &self.url_params.transport_url,
            &self.url_params.catalog_id,
            &self.url_params.type_name,
        ];
        for segment in segments.into_iter().map_while(Option::as_ref) {
            hash.push('/');
            hash.push_str(&encode_segment(segment));
        }
        if !self.query_params.is_empty() {
            hash.push('?');
            hash.push_str(&self.query_params.to_query_string());
        }
        hash
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hash())
    }
}

/// Percent-encodes a path segment.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as they are, the same set a
/// browser's `encodeURIComponent` keeps, so hashes match the web app's.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for &byte in segment.as_bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Decodes a path segment; empty segments become `None`.
fn decode_segment(segment: &str) -> Result<Option<String>, RouteError> {
    if segment.is_empty() {
        return Ok(None);
    }
    urlencoding::decode(segment)
        .map(|s| Some(s.into_owned()))
        .map_err(|_| RouteError::InvalidEncoding(segment.to_string()))
}

/// Builds the hash that opens an addon's details.
///
/// Keeps the active catalog in the path when there is one.
#[must_use]
pub fn addon_details_hash(request: Option<&ResourceRequest>, transport_url: &str) -> String {
    Route {
        url_params: request.map(UrlParams::from_request).unwrap_or_default(),
        query_params: QueryParams::from_pairs([(ADDON_QUERY_PARAM, transport_url)]),
    }
    .to_hash()
}

/// Builds the hash that opens a catalog.
#[must_use]
pub fn catalog_hash(request: &ResourceRequest) -> String {
    Route {
        url_params: UrlParams::from_request(request),
        query_params: QueryParams::default(),
    }
    .to_hash()
}
