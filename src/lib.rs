// flagwire - per-request feature toggles
//
// Flags resolve from the request overlay, then `X_FEATURE_*` environment
// variables, then a default store, and are otherwise off.

// Re-export the request layer
pub use flagwire_core::{
    Error, Extensions, HandlerFn, HttpRequest, HttpResponse, Middleware, MiddlewareChain, Next,
    ResponseFuture, handler,
};

// Re-export the feature flag API
pub use flagwire_features::{
    ENV_PREFIX, FeatureConfig, FeatureError, FeatureFlagMiddleware, FeatureRequestExt, Flag,
    FlagExtractor, FlagOverlay, FlagResolver, FlagStore, HEADER_PREFIX, InMemoryFlagStore,
    QUERY_PREFIX, Resolution, Source, default_resolver, disable, disable_in_ctx, enable,
    enable_in_ctx, global_store, is_enabled, lenient_bool, parse_bool, presence_bool,
    with_feature_overlay,
};

pub use flagwire_core;
pub use flagwire_features;
pub use flagwire_log;

#[cfg(feature = "config")]
pub use flagwire_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Error, FeatureFlagMiddleware, FeatureRequestExt, Flag, FlagOverlay, FlagResolver,
        HttpRequest, HttpResponse, Middleware, MiddlewareChain, Next, disable, disable_in_ctx,
        enable, enable_in_ctx, handler, is_enabled, with_feature_overlay,
    };
}
