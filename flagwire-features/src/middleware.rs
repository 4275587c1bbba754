//! Middleware that binds request flag values before the handler runs.

use crate::FlagExtractor;
use async_trait::async_trait;
use flagwire_core::{Error, HttpRequest, HttpResponse, Middleware, Next};

/// Runs a [`FlagExtractor`] on every request and passes the derived request
/// down the chain.
#[derive(Debug, Clone, Default)]
pub struct FeatureFlagMiddleware {
    extractor: FlagExtractor,
}

impl FeatureFlagMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(extractor: FlagExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl Middleware for FeatureFlagMiddleware {
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, Error> {
        next(self.extractor.bind(req)).await
    }
}
