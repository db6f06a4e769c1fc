//! Prometheus adapter for check-in counters.
//!
//! - `habitwise_checkins_total{outcome}`: `recorded` or `duplicate`.
//! - `habitwise_achievements_granted_total{kind}`: first-time awards.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::AchievementKind;
use crate::domain::ports::{CheckinMetrics, CheckinMetricsError};

/// Prometheus-backed [`CheckinMetrics`].
pub struct PrometheusCheckinMetrics {
    checkins_total: IntCounterVec,
    achievements_total: IntCounterVec,
}

impl PrometheusCheckinMetrics {
    /// Create the counters and register them with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if either counter is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let checkins_total = IntCounterVec::new(
            Opts::new("habitwise_checkins_total", "Check-in attempts by outcome"),
            &["outcome"],
        )?;
        let achievements_total = IntCounterVec::new(
            Opts::new(
                "habitwise_achievements_granted_total",
                "Achievements granted by kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(checkins_total.clone()))?;
        registry.register(Box::new(achievements_total.clone()))?;
        Ok(Self {
            checkins_total,
            achievements_total,
        })
    }
}

#[async_trait]
impl CheckinMetrics for PrometheusCheckinMetrics {
    async fn record_checkin(&self) -> Result<(), CheckinMetricsError> {
        self.checkins_total.with_label_values(&["recorded"]).inc();
        Ok(())
    }

    async fn record_duplicate(&self) -> Result<(), CheckinMetricsError> {
        self.checkins_total.with_label_values(&["duplicate"]).inc();
        Ok(())
    }

    async fn record_achievement(&self, kind: AchievementKind) -> Result<(), CheckinMetricsError> {
        self.achievements_total
            .with_label_values(&[kind.as_str()])
            .inc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn registry() -> Registry {
        Registry::new()
    }

    #[rstest]
    #[tokio::test]
    async fn registers_both_families(registry: Registry) {
        let metrics = PrometheusCheckinMetrics::new(&registry).expect("registration succeeds");
        metrics.record_checkin().await.expect("recorded");
        metrics
            .record_achievement(AchievementKind::PerfectWeek)
            .await
            .expect("recorded");

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.name().to_owned())
            .collect();
        assert!(names.contains(&"habitwise_checkins_total".to_owned()));
        assert!(names.contains(&"habitwise_achievements_granted_total".to_owned()));
    }

    #[rstest]
    fn double_registration_fails(registry: Registry) {
        let _first = PrometheusCheckinMetrics::new(&registry).expect("first registration");
        assert!(PrometheusCheckinMetrics::new(&registry).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn outcomes_are_counted_separately(registry: Registry) {
        let metrics = PrometheusCheckinMetrics::new(&registry).expect("registration succeeds");
        metrics.record_checkin().await.expect("recorded");
        metrics.record_checkin().await.expect("recorded");
        metrics.record_duplicate().await.expect("recorded");

        assert_eq!(metrics.checkins_total.with_label_values(&["recorded"]).get(), 2);
        assert_eq!(metrics.checkins_total.with_label_values(&["duplicate"]).get(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn achievements_are_labelled_by_kind(registry: Registry) {
        let metrics = PrometheusCheckinMetrics::new(&registry).expect("registration succeeds");
        metrics
            .record_achievement(AchievementKind::PerfectWeek)
            .await
            .expect("recorded");

        assert_eq!(
            metrics
                .achievements_total
                .with_label_values(&["perfect_week"])
                .get(),
            1
        );
    }
}
