//! HTTP middleware pipeline.

use super::error::HttpResult;
use super::request::Request;
use super::response::Response;
use std::sync::Arc;
use tracing::trace;

/// Action to take after middleware processing.
#[derive(Debug)]
pub enum MiddlewareAction {
    /// Continue to next middleware/handler.
    Continue(Request),
    /// Short-circuit with a response.
    Respond(Response),
}

/// Trait for HTTP middleware.
pub trait Middleware: Send + Sync {
    /// Middleware name.
    fn name(&self) -> &str;

    /// Process request before handler.
    fn before(&self, request: Request) -> HttpResult<MiddlewareAction> {
        Ok(MiddlewareAction::Continue(request))
    }

    /// Process response after handler.
    fn after(&self, _request: &Request, response: Response) -> HttpResult<Response> {
        Ok(response)
    }

    /// Priority (higher = runs first in before, last in after).
    fn priority(&self) -> i32 {
        0
    }
}

/// A chain of middleware.
pub struct MiddlewareChain {
    middleware: Vec<Arc<dyn Middleware>>,
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.middleware.iter().map(|m| m.name()).collect();
        f.debug_struct("MiddlewareChain")
            .field("middleware", &names)
            .finish()
    }
}

impl MiddlewareChain {
    /// Create a new empty middleware chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
        }
    }

    /// Add middleware to the chain.
    pub fn add(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware.push(middleware);
        // Stable sort keeps insertion order among equal priorities.
        self.middleware.sort_by_key(|m| std::cmp::Reverse(m.priority()));
    }

    /// Builder-style variant of [`MiddlewareChain::add`].
    #[must_use]
    pub fn with(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.add(middleware);
        self
    }

    /// Process request through the middleware chain.
    pub fn process_request(&self, mut request: Request) -> HttpResult<MiddlewareAction> {
        for mw in &self.middleware {
            match mw.before(request)? {
                MiddlewareAction::Continue(req) => request = req,
                action @ MiddlewareAction::Respond(_) => {
                    trace!(middleware = mw.name(), "Request short-circuited");
                    return Ok(action);
                },
            }
        }
        Ok(MiddlewareAction::Continue(request))
    }

    /// Process response through the middleware chain (reverse order).
    pub fn process_response(
        &self,
        request: &Request,
        mut response: Response,
    ) -> HttpResult<Response> {
        for mw in self.middleware.iter().rev() {
            response = mw.after(request, response)?;
        }
        Ok(response)
    }

    /// Run a request through the chain and, unless a middleware answers it
    /// first, through `handler`.
    ///
    /// Both handler responses and short-circuit responses pass through the
    /// `after` hooks.
    pub fn dispatch<H>(&self, request: Request, handler: H) -> HttpResult<Response>
    where
        H: FnOnce(&Request) -> Response,
    {
        // Kept for the after hooks when a middleware short-circuits.
        let original = request.clone();
        match self.process_request(request)? {
            MiddlewareAction::Continue(req) => {
                let response = handler(&req);
                self.process_response(&req, response)
            },
            MiddlewareAction::Respond(response) => self.process_response(&original, response),
        }
    }

    /// Get the number of middleware in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    /// Check if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks every response as uncacheable, rejections included.
#[derive(Debug, Default)]
pub struct NoCacheMiddleware;

impl NoCacheMiddleware {
    /// Create a new no-cache middleware.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for NoCacheMiddleware {
    fn name(&self) -> &str {
        "no-cache"
    }

    fn after(&self, _request: &Request, mut response: Response) -> HttpResult<Response> {
        response.set_header("Cache-Control", "no-cache, no-store, must-revalidate");
        response.set_header("Pragma", "no-cache");
        response.set_header("Expires", "0");
        Ok(response)
    }

    fn priority(&self) -> i32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    /// Answers every request to `/blocked` itself.
    struct BlockPath;

    impl Middleware for BlockPath {
        fn name(&self) -> &str {
            "block-path"
        }

        fn before(&self, request: Request) -> HttpResult<MiddlewareAction> {
            if request.path() == "/blocked" {
                return Ok(MiddlewareAction::Respond(Response::not_found().build()));
            }
            Ok(MiddlewareAction::Continue(request))
        }
    }

    fn make_request(path: &str) -> Request {
        Request::builder().uri(path).unwrap().build()
    }

    #[test]
    fn test_dispatch_reaches_handler() {
        let chain = MiddlewareChain::new().with(Arc::new(BlockPath));
        let response = chain
            .dispatch(make_request("/open"), |_| Response::ok().text("hello").build())
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_dispatch_short_circuit_skips_handler() {
        let chain = MiddlewareChain::new().with(Arc::new(BlockPath));
        let mut called = false;
        let response = chain
            .dispatch(make_request("/blocked"), |_| {
                called = true;
                Response::ok().build()
            })
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!called);
    }

    #[test]
    fn test_no_cache_applies_to_short_circuit() {
        let chain = MiddlewareChain::new()
            .with(Arc::new(BlockPath))
            .with(Arc::new(NoCacheMiddleware::new()));
        let response = chain
            .dispatch(make_request("/blocked"), |_| Response::ok().build())
            .unwrap();
        assert_eq!(
            response.header("cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
        assert_eq!(response.header("expires"), Some("0"));
    }

    #[test]
    fn test_middleware_priority() {
        let mut chain = MiddlewareChain::new();
        chain.add(Arc::new(BlockPath)); // priority 0
        chain.add(Arc::new(NoCacheMiddleware::new())); // priority 100

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.middleware[0].name(), "no-cache");
        assert_eq!(chain.middleware[1].name(), "block-path");
    }
}
