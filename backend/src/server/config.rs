//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use habitwise::domain::DayBoundary;
use habitwise::domain::ports::{
    IdentityVerifier, Mailer, ShareTokenCodec, SuggestionCache, SuggestionSource,
};
use habitwise::outbound::mail::LogMailer;
use habitwise::outbound::persistence::DbPool;
use habitwise::outbound::share::JwtShareTokenCodec;
use habitwise::outbound::suggestion::CatalogueSuggestionSource;
use mockable::{Clock, DefaultClock};

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
///
/// Only the bind address and identity verifier are required; every other
/// adapter falls back to an in-process implementation. Without a share
/// codec, links are signed with a random key and die on restart.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) identity: Arc<dyn IdentityVerifier>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) day_boundary: DayBoundary,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cache: Option<Arc<dyn SuggestionCache>>,
    pub(crate) mailer: Arc<dyn Mailer>,
    pub(crate) suggestions: Arc<dyn SuggestionSource>,
    pub(crate) ws_allowed_origins: Vec<String>,
    pub(crate) share_tokens: Arc<dyn ShareTokenCodec>,
    pub(crate) public_base_url: String,
    pub(crate) reminder_interval: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory storage and UTC days.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, identity: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            bind_addr,
            identity,
            clock: Arc::new(DefaultClock),
            day_boundary: DayBoundary::utc(),
            db_pool: None,
            cache: None,
            mailer: Arc::new(LogMailer),
            suggestions: Arc::new(CatalogueSuggestionSource::new()),
            ws_allowed_origins: Vec::new(),
            share_tokens: Arc::new(JwtShareTokenCodec::ephemeral()),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_owned(),
            reminder_interval: Duration::from_secs(60),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, every repository port is served by its Diesel adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the suggestion cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn SuggestionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the logging mailer.
    #[must_use]
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    /// Replace the built-in suggestion catalogue.
    #[must_use]
    pub fn with_suggestion_source(mut self, source: Arc<dyn SuggestionSource>) -> Self {
        self.suggestions = source;
        self
    }

    /// Count calendar days in `boundary` rather than UTC.
    #[must_use]
    pub fn with_day_boundary(mut self, boundary: DayBoundary) -> Self {
        self.day_boundary = boundary;
        self
    }

    /// Browser origins allowed to open the notification socket.
    #[must_use]
    pub fn with_ws_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.ws_allowed_origins = origins;
        self
    }

    /// Sign share links with `codec` instead of a per-process random key.
    #[must_use]
    pub fn with_share_tokens(mut self, codec: Arc<dyn ShareTokenCodec>) -> Self {
        self.share_tokens = codec;
        self
    }

    /// Origin that public share links are rooted at.
    #[must_use]
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = base_url.into();
        self
    }

    /// Interval between reminder dispatch passes.
    #[must_use]
    pub fn with_reminder_interval(mut self, interval: Duration) -> Self {
        self.reminder_interval = interval;
        self
    }

    /// Replace the wall clock.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by server tests with a fixed clock")
    )]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
