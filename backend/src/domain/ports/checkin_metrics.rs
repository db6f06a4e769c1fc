//! Port for recording check-in counters.

use async_trait::async_trait;

use crate::domain::AchievementKind;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording metrics.
    pub enum CheckinMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "check-in metrics exporter failed: {message}",
    }
}

/// Counters for the check-in flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinMetrics: Send + Sync {
    /// A new check-in was stored.
    async fn record_checkin(&self) -> Result<(), CheckinMetricsError>;

    /// A check-in was refused as a duplicate.
    async fn record_duplicate(&self) -> Result<(), CheckinMetricsError>;

    /// An achievement was granted for the first time.
    async fn record_achievement(&self, kind: AchievementKind) -> Result<(), CheckinMetricsError>;
}

/// Metrics sink that drops every observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCheckinMetrics;

#[async_trait]
impl CheckinMetrics for NoOpCheckinMetrics {
    async fn record_checkin(&self) -> Result<(), CheckinMetricsError> {
        Ok(())
    }

    async fn record_duplicate(&self) -> Result<(), CheckinMetricsError> {
        Ok(())
    }

    async fn record_achievement(&self, _kind: AchievementKind) -> Result<(), CheckinMetricsError> {
        Ok(())
    }
}
