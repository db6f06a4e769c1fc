//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `HABITWISE_*` environment variables, configuration
//! files, and command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{CalendarError, DayBoundary};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;
const DEFAULT_WS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid day offset: {0}")]
    DayOffset(#[from] CalendarError),
    #[error("reminder interval must be at least one second")]
    ReminderInterval,
}

/// Configuration values controlling the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HABITWISE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Redis URL for the suggestion cache.
    pub redis_url: Option<String>,
    /// HS256 secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Required `iss` claim.
    pub jwt_issuer: Option<String>,
    /// Required `aud` claim.
    pub jwt_audience: Option<String>,
    /// Accept `dev:` tokens in release builds when no secret is set.
    #[ortho_config(default = false)]
    pub allow_dev_identity: bool,
    /// Mail relay endpoint; reminders are only logged when absent.
    pub mail_relay_url: Option<String>,
    /// Remote suggestion endpoint; the built-in catalogue is used when absent.
    pub suggestion_url: Option<String>,
    /// Seconds between reminder dispatch passes.
    pub reminder_interval_secs: Option<u64>,
    /// Minutes east of UTC at which calendar days begin.
    pub day_offset_minutes: Option<i32>,
    /// Comma-separated browser origins allowed to open the notification socket.
    pub ws_allowed_origins: Option<String>,
    /// HS256 secret for share links; kept apart from `jwt_secret`.
    pub share_secret: Option<String>,
    /// Origin that public share links are rooted at.
    pub public_base_url: Option<String>,
}

impl AppSettings {
    /// Resolved bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Calendar reference frame.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DayOffset`] for offsets outside ±14h.
    pub fn day_boundary(&self) -> Result<DayBoundary, SettingsError> {
        match self.day_offset_minutes {
            Some(minutes) => Ok(DayBoundary::from_offset_minutes(minutes)?),
            None => Ok(DayBoundary::utc()),
        }
    }

    /// Interval between reminder passes.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ReminderInterval`] for a zero interval.
    pub fn reminder_interval(&self) -> Result<Duration, SettingsError> {
        match self
            .reminder_interval_secs
            .unwrap_or(DEFAULT_REMINDER_INTERVAL_SECS)
        {
            0 => Err(SettingsError::ReminderInterval),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Allowed WebSocket origins, defaulting to the local dev frontend.
    #[must_use]
    pub fn ws_allowed_origins(&self) -> Vec<String> {
        let origins: Vec<String> = self
            .ws_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() {
            vec![DEFAULT_WS_ORIGIN.to_owned()]
        } else {
            origins
        }
    }

    /// Bearer token secret, wiped from memory on drop.
    #[must_use]
    pub fn jwt_secret(&self) -> Option<Zeroizing<String>> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| Zeroizing::new(secret.to_owned()))
    }

    /// Share link secret, wiped from memory on drop.
    #[must_use]
    pub fn share_secret(&self) -> Option<Zeroizing<String>> {
        self.share_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| Zeroizing::new(secret.to_owned()))
    }

    /// Public origin for share links.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
            .to_owned()
    }
}
