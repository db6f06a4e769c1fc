//! Suggestion source adapters.
//!
//! `HttpSuggestionSource` asks an external text-generation service;
//! `CatalogueSuggestionSource` picks from a built-in list and never fails.

mod catalogue;
mod dto;
mod http_source;

pub use catalogue::CatalogueSuggestionSource;
pub use http_source::HttpSuggestionSource;
