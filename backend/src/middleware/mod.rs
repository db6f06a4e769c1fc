//! Request middleware.
//!
//! Purpose: wrap every HTTP request with cross-cutting lifecycle concerns.
//! Currently this is request tracing only; authentication is an extractor
//! in `inbound::http::auth`.

pub mod trace;

pub use trace::Trace;
