//! Pull flag values out of an incoming request.
//!
//! Query parameters named `feature-<name>` and headers named
//! `x-feature-<name>` (any case) set `<name>` in the request's
//! [`FlagOverlay`]. A present but empty value means `true`:
//!
//! ```
//! use flagwire_core::HttpRequest;
//! use flagwire_features::{FeatureRequestExt, with_feature_overlay};
//!
//! let req = HttpRequest::from_uri("GET", "https://example.com/?feature-paginate").unwrap()
//!     .with_header("X-Feature-Beta", "false");
//! let req = with_feature_overlay(&req);
//!
//! assert!(req.is_feature_enabled("paginate"));
//! assert!(!req.is_feature_enabled("beta"));
//! ```

use crate::parse::presence_bool;
use crate::{Flag, FlagOverlay, FlagResolver};
use flagwire_core::HttpRequest;
use flagwire_log::debug;
use std::collections::HashMap;

/// Prefix of query parameters that carry a flag value.
pub const QUERY_PREFIX: &str = "feature-";

/// Prefix of headers that carry a flag value, matched case-insensitively.
pub const HEADER_PREFIX: &str = "x-feature-";

/// Derives a request overlay from query parameters and headers.
#[derive(Debug, Clone)]
pub struct FlagExtractor {
    query_prefix: String,
    header_prefix: String,
}

impl FlagExtractor {
    /// Prefixes are compared against lower-cased keys, so they are stored
    /// lower-cased too.
    pub fn new(query_prefix: impl Into<String>, header_prefix: impl Into<String>) -> Self {
        Self {
            query_prefix: query_prefix.into().to_lowercase(),
            header_prefix: header_prefix.into().to_lowercase(),
        }
    }

    pub fn query_prefix(&self) -> &str {
        &self.query_prefix
    }

    pub fn header_prefix(&self) -> &str {
        &self.header_prefix
    }

    /// The request's existing overlay extended with its query and header
    /// values. Headers are applied after the query, so they win on conflict.
    pub fn overlay_for(&self, req: &HttpRequest) -> FlagOverlay {
        let overlay = req.feature_overlay();
        let (overlay, from_query) = scan(overlay, &req.query_params, &self.query_prefix);
        let (overlay, from_headers) = scan(overlay, &req.headers, &self.header_prefix);

        if from_query + from_headers > 0 {
            debug!(
                "derived {} feature flag value(s) from {} {} ({} query, {} header)",
                from_query + from_headers,
                req.method,
                req.path,
                from_query,
                from_headers
            );
        }
        overlay
    }

    /// A copy of `req` carrying the derived overlay. `req` is not modified.
    pub fn extract(&self, req: &HttpRequest) -> HttpRequest {
        self.bind(req.clone())
    }

    /// Attach the derived overlay to an owned request.
    pub fn bind(&self, mut req: HttpRequest) -> HttpRequest {
        let overlay = self.overlay_for(&req);
        req.extensions.insert(overlay);
        req
    }
}

impl Default for FlagExtractor {
    fn default() -> Self {
        Self::new(QUERY_PREFIX, HEADER_PREFIX)
    }
}

/// Keys are visited in byte order so that keys differing only in case apply
/// in a stable order.
fn scan(
    mut overlay: FlagOverlay,
    values: &HashMap<String, String>,
    prefix: &str,
) -> (FlagOverlay, usize) {
    let mut keys: Vec<&String> = values.keys().collect();
    keys.sort();

    let mut count = 0;
    for key in keys {
        let lower = key.to_lowercase();
        if let Some(name) = lower.strip_prefix(prefix) {
            overlay = overlay.with(name, presence_bool(&values[key]));
            count += 1;
        }
    }
    (overlay, count)
}

/// [`FlagExtractor::extract`] with the default prefixes.
pub fn with_feature_overlay(req: &HttpRequest) -> HttpRequest {
    FlagExtractor::default().extract(req)
}

/// Flag lookups on a request.
pub trait FeatureRequestExt {
    /// The overlay bound to this request, or an empty one.
    fn feature_overlay(&self) -> FlagOverlay;

    /// Resolve `flag` for this request with the default resolver.
    fn is_feature_enabled(&self, flag: impl Into<Flag>) -> bool;

    /// Resolve `flag` for this request with `resolver`.
    fn is_feature_enabled_with(&self, resolver: &FlagResolver, flag: impl Into<Flag>) -> bool;
}

impl FeatureRequestExt for HttpRequest {
    fn feature_overlay(&self) -> FlagOverlay {
        self.extensions
            .get_cloned::<FlagOverlay>()
            .unwrap_or_default()
    }

    fn is_feature_enabled(&self, flag: impl Into<Flag>) -> bool {
        crate::resolver::is_enabled(&self.feature_overlay(), flag)
    }

    fn is_feature_enabled_with(&self, resolver: &FlagResolver, flag: impl Into<Flag>) -> bool {
        resolver.is_enabled(&self.feature_overlay(), flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest::new("GET".to_string(), "/".to_string())
    }

    fn value(req: &HttpRequest, flag: &str) -> Option<bool> {
        req.feature_overlay().get(&Flag::new(flag))
    }

    #[test]
    fn test_query_flag() {
        let req = with_feature_overlay(&request().with_query("feature-paginate", "true"));
        assert_eq!(value(&req, "paginate"), Some(true));
    }

    #[test]
    fn test_header_flag_any_case() {
        let req = with_feature_overlay(&request().with_header("X-FEATURE-Paginate", "0"));
        assert_eq!(value(&req, "paginate"), Some(false));
    }

    #[test]
    fn test_empty_value_is_true() {
        let req = request()
            .with_query("feature-a", "")
            .with_header("x-feature-b", "");
        let req = with_feature_overlay(&req);
        assert_eq!(value(&req, "a"), Some(true));
        assert_eq!(value(&req, "b"), Some(true));
    }

    #[test]
    fn test_unparseable_value_records_false() {
        let req = request()
            .with_query("feature-a", "yes")
            .with_header("X-Feature-B", "on");
        let req = with_feature_overlay(&req);
        assert_eq!(value(&req, "a"), Some(false));
        assert_eq!(value(&req, "b"), Some(false));
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let req = request()
            .with_query("page", "2")
            .with_query("features", "x")
            .with_header("x-feature", "true")
            .with_header("content-type", "text/plain");
        let req = with_feature_overlay(&req);
        assert!(req.feature_overlay().is_empty());
    }

    #[test]
    fn test_header_beats_query() {
        let req = request()
            .with_query("feature-paginate", "true")
            .with_header("X-Feature-Paginate", "false");
        let req = with_feature_overlay(&req);
        assert_eq!(value(&req, "paginate"), Some(false));
    }

    #[test]
    fn test_case_variants_apply_in_key_order() {
        // "feature-X" sorts before "feature-x", so the lower-case key lands last.
        let req = request()
            .with_query("feature-X", "true")
            .with_query("feature-x", "false");
        let req = with_feature_overlay(&req);
        assert_eq!(value(&req, "x"), Some(false));
    }

    #[test]
    fn test_input_request_is_not_modified() {
        let original = request().with_query("feature-paginate", "");
        let derived = with_feature_overlay(&original);

        assert!(!original.extensions.contains::<FlagOverlay>());
        assert!(derived.extensions.contains::<FlagOverlay>());
    }

    #[test]
    fn test_existing_overlay_is_extended() {
        let mut req = request().with_header("x-feature-b", "true");
        req.extensions.insert(FlagOverlay::new().enable("a").disable("b"));

        let derived = with_feature_overlay(&req);
        assert_eq!(value(&derived, "a"), Some(true));
        assert_eq!(value(&derived, "b"), Some(true));
        assert_eq!(value(&req, "b"), Some(false));
    }

    #[test]
    fn test_custom_prefixes() {
        let extractor = FlagExtractor::new("FF-", "X-App-Flag-");
        assert_eq!(extractor.query_prefix(), "ff-");

        let req = request()
            .with_query("ff-dark", "1")
            .with_header("x-app-flag-beta", "t")
            .with_query("feature-ignored", "1");
        let req = extractor.extract(&req);

        assert_eq!(value(&req, "dark"), Some(true));
        assert_eq!(value(&req, "beta"), Some(true));
        assert_eq!(value(&req, "ignored"), None);
    }

    #[test]
    fn test_is_feature_enabled_with_resolver() {
        let resolver = FlagResolver::isolated();
        resolver.enable("from-store");

        let req = with_feature_overlay(&request().with_query("feature-from-query", ""));
        assert!(req.is_feature_enabled_with(&resolver, "from-query"));
        assert!(req.is_feature_enabled_with(&resolver, "from-store"));
        assert!(!req.is_feature_enabled_with(&resolver, "elsewhere"));
    }
}
