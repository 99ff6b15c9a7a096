//! Request gate built on the classifier.

use super::classifier::{ClassificationSignal, Classifier, Verdict};
use super::client_ip::ClientIpResolver;
use super::config::BotFilterConfig;
use super::error::BotFilterResult;
use super::stats::BotFilterStats;
use crate::modules::http_handler::{HttpResult, Middleware, MiddlewareAction, Request, Response};
use std::sync::Arc;
use tracing::{debug, info};

/// Priority of the bot filter in a middleware chain. Runs ahead of anything
/// that does real work for the request.
pub const BOT_FILTER_PRIORITY: i32 = 1000;

/// Middleware answering bot requests with a bare 404.
///
/// Human requests are forwarded untouched; bot requests never reach the
/// downstream handler.
#[derive(Debug)]
pub struct BotFilterMiddleware {
    enabled: bool,
    classifier: Arc<Classifier>,
    resolver: ClientIpResolver,
    stats: Arc<BotFilterStats>,
}

impl BotFilterMiddleware {
    /// Create a middleware around an existing classifier.
    #[must_use]
    pub fn new(classifier: Arc<Classifier>, resolver: ClientIpResolver) -> Self {
        Self {
            enabled: true,
            classifier,
            resolver,
            stats: Arc::new(BotFilterStats::new()),
        }
    }

    /// Compile the configured lists and build the middleware.
    ///
    /// # Errors
    ///
    /// Returns the first malformed list entry.
    pub fn from_config(config: &BotFilterConfig) -> BotFilterResult<Self> {
        let classifier = Arc::new(Classifier::from_config(config)?);
        let resolver = ClientIpResolver::new(config.trust_proxy_headers, &config.trusted_proxies)?;

        Ok(Self {
            enabled: config.enabled,
            ..Self::new(classifier, resolver)
        })
    }

    /// Whether requests are classified at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The shared classifier.
    #[must_use]
    pub fn classifier(&self) -> &Arc<Classifier> {
        &self.classifier
    }

    /// Shared statistics.
    #[must_use]
    pub fn stats(&self) -> &Arc<BotFilterStats> {
        &self.stats
    }

    /// Extract the classification signal from a request.
    #[must_use]
    pub fn signal(&self, request: &Request) -> ClassificationSignal {
        ClassificationSignal {
            user_agent: request.user_agent().map(str::to_string),
            client_ip: self.resolver.resolve(request),
            referrer: request
                .header("referer")
                .or_else(|| request.header("origin"))
                .map(str::to_string),
        }
    }

    /// Classify a request without acting on the verdict.
    #[must_use]
    pub fn check(&self, request: &Request) -> Verdict {
        self.classifier.classify(&self.signal(request))
    }
}

impl Middleware for BotFilterMiddleware {
    fn name(&self) -> &str {
        "bot-filter"
    }

    fn before(&self, request: Request) -> HttpResult<MiddlewareAction> {
        if !self.enabled {
            return Ok(MiddlewareAction::Continue(request));
        }

        let signal = self.signal(&request);
        let verdict = self.classifier.classify(&signal);
        self.stats.record(&verdict);

        if !verdict.is_bot {
            debug!(
                client_ip = signal.client_ip.as_deref().unwrap_or("-"),
                path = request.path(),
                "Request allowed"
            );
            return Ok(MiddlewareAction::Continue(request));
        }

        info!(
            client_ip = signal.client_ip.as_deref().unwrap_or("-"),
            reason = verdict.reason.map_or("unknown", |r| r.as_str()),
            path = request.path(),
            "Bot request blocked"
        );

        Ok(MiddlewareAction::Respond(
            Response::not_found().text("Not Found").build(),
        ))
    }

    fn priority(&self) -> i32 {
        BOT_FILTER_PRIORITY
    }
}
