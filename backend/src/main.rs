//! Backend entry-point: loads settings, resolves adapters, and runs the server.

mod server;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use habitwise::domain::ports::IdentityVerifier;
use habitwise::inbound::http::health::HealthState;
use habitwise::outbound::cache::RedisSuggestionCache;
use habitwise::outbound::identity::{DevIdentityVerifier, JwtIdentityVerifier, JwtSettings};
use habitwise::outbound::mail::RelayMailer;
use habitwise::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use habitwise::outbound::share::JwtShareTokenCodec;
use habitwise::outbound::suggestion::HttpSuggestionSource;
use habitwise::settings::AppSettings;
use server::{RunningServer, ServerConfig, create_server};

/// Upper bound for outbound mail and suggestion calls.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(5);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let RunningServer { server, reminders } = create_server(health_state.clone(), config)?;
    info!(bind_addr = %settings.bind_addr()?, "habitwise listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    reminders.abort();
    outcome.map_err(Into::into)
}

/// Resolve every adapter named by `settings` into a [`ServerConfig`].
async fn build_server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let identity = build_identity(settings, cfg!(debug_assertions))?;
    let mut config = ServerConfig::new(settings.bind_addr()?, identity)
        .with_day_boundary(settings.day_boundary()?)
        .with_reminder_interval(settings.reminder_interval()?)
        .with_ws_allowed_origins(settings.ws_allowed_origins())
        .with_public_base_url(settings.public_base_url());

    if let Some(secret) = settings.share_secret() {
        config = config.with_share_tokens(Arc::new(JwtShareTokenCodec::new(secret)));
    } else {
        warn!("no share secret configured; share links will not survive a restart");
    }

    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .map_err(|err| eyre!("{err}"))?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|err| eyre!("{err}"))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; using in-memory storage");
    }

    if let Some(redis_url) = settings.redis_url.as_deref() {
        match RedisSuggestionCache::connect(redis_url).await {
            Ok(cache) => config = config.with_cache(Arc::new(cache)),
            Err(err) => warn!(error = %err, "suggestion cache unavailable; recomputing"),
        }
    }

    if let Some(relay) = settings.mail_relay_url.as_deref() {
        let endpoint = Url::parse(relay).map_err(|err| eyre!("invalid mail relay url: {err}"))?;
        config = config.with_mailer(Arc::new(RelayMailer::new(endpoint, OUTBOUND_TIMEOUT)?));
    }

    if let Some(source) = settings.suggestion_url.as_deref() {
        let endpoint = Url::parse(source).map_err(|err| eyre!("invalid suggestion url: {err}"))?;
        config = config.with_suggestion_source(Arc::new(HttpSuggestionSource::new(
            endpoint,
            OUTBOUND_TIMEOUT,
        )?));
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("habitwise")
            .endpoint("/metrics")
            .build()
    }));

    Ok(config)
}

/// Pick the bearer token verifier.
///
/// Without a secret only `dev:` tokens are accepted, which release builds
/// refuse unless `allow_dev_identity` is set.
fn build_identity(settings: &AppSettings, debug_build: bool) -> Result<Arc<dyn IdentityVerifier>> {
    if let Some(secret) = settings.jwt_secret() {
        return Ok(Arc::new(JwtIdentityVerifier::new(
            secret,
            JwtSettings {
                issuer: settings.jwt_issuer.clone(),
                audience: settings.jwt_audience.clone(),
            },
        )));
    }
    if debug_build || settings.allow_dev_identity {
        warn!("no jwt secret configured; accepting dev: bearer tokens");
        return Ok(Arc::new(DevIdentityVerifier));
    }
    Err(eyre!(
        "HABITWISE_JWT_SECRET is required in release builds (set HABITWISE_ALLOW_DEV_IDENTITY to override)"
    ))
}

/// Build Prometheus middleware, logging and continuing without it on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> std::result::Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(error = %error, "metrics initialisation failed; continuing without metrics");
            None
        }
    }
}
