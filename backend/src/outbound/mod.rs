//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Each submodule provides concrete implementations of the driven port
//! traits:
//!
//! - **memory**: mutex-guarded repositories for development and tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **cache**: Redis-backed daily suggestion cache
//! - **suggestion**: upstream and built-in suggestion sources
//! - **mail**: reminder mail delivery
//! - **identity**: bearer-token verification
//! - **share**: signed public share-link tokens
//! - **metrics**: Prometheus-backed check-in counters (feature-gated)
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod cache;
pub mod identity;
pub mod mail;
pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
pub mod share;
pub mod suggestion;
