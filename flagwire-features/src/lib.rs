//! Feature toggles for flagwire
//!
//! Boolean feature flags resolved, in order, from the request overlay, an
//! environment variable and a default store, falling back to `false`.
//!
//! The idea is to ship a new behavior behind a flag that is off by default,
//! exercise it on a live deploy by switching it on per request, and delete
//! the flag once the new behavior becomes the only one.
//!
//! # Ways to turn on a flag named `paginate`
//!
//! - environment: `X_FEATURE_PAGINATE=true|false`
//! - request header: `X-Feature-Paginate: true|false` (any case)
//! - query string: `?feature-paginate=true|false`, or just `?feature-paginate`
//! - code: [`enable_in_ctx`] on an overlay, or [`enable`] for the global default
//!
//! Request and overlay values override the environment, which overrides the
//! store.
//!
//! # Quick Start
//!
//! ```
//! use flagwire_features::*;
//!
//! let ctx = FlagOverlay::new();
//! assert!(!is_enabled(&ctx, "quick-start-demo"));
//!
//! let ctx = enable_in_ctx(&ctx, "quick-start-demo");
//! assert!(is_enabled(&ctx, "Quick-Start-Demo"));
//! ```
//!
//! # Requests
//!
//! ```
//! use flagwire_core::HttpRequest;
//! use flagwire_features::*;
//!
//! let req = HttpRequest::from_uri("GET", "/orders?feature-new-totals").unwrap();
//! let req = with_feature_overlay(&req);
//! assert!(req.is_feature_enabled("new-totals"));
//! ```
//!
//! In a middleware chain, [`FeatureFlagMiddleware`] does the same for every
//! request.
//!
//! # Isolated stores
//!
//! ```
//! use flagwire_features::*;
//!
//! let resolver = FlagResolver::isolated();
//! resolver.enable("isolated-demo");
//!
//! assert!(resolver.is_enabled(&FlagOverlay::new(), "isolated-demo"));
//! assert!(!is_enabled(&FlagOverlay::new(), "isolated-demo"));
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod flag;
pub mod middleware;
pub mod overlay;
pub mod parse;
pub mod resolver;
pub mod store;

pub use config::FeatureConfig;
pub use error::FeatureError;
pub use extract::{
    FeatureRequestExt, FlagExtractor, HEADER_PREFIX, QUERY_PREFIX, with_feature_overlay,
};
pub use flag::Flag;
pub use middleware::FeatureFlagMiddleware;
pub use overlay::FlagOverlay;
pub use parse::{lenient_bool, parse_bool, presence_bool};
pub use resolver::{
    ENV_PREFIX, FlagResolver, Resolution, Source, default_resolver, disable, disable_in_ctx,
    enable, enable_in_ctx, is_enabled,
};
pub use store::{FlagStore, InMemoryFlagStore, global_store};
