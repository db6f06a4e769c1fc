//! Prometheus exporters for the metrics ports; built only with the
//! `metrics` feature.

mod prometheus_checkins;

pub use prometheus_checkins::PrometheusCheckinMetrics;
