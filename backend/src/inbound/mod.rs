//! Inbound adapters that translate external requests into domain calls.
//!
//! REST handlers live under [`http`]; the live notification socket lives
//! under [`ws`].

pub mod http;
pub mod ws;
