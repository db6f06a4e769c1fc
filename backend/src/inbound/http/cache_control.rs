//! Cache policy for responses that carry one owner's data.

use actix_web::http::header::{CacheControl, CacheDirective};

/// Shared caches must not keep per-owner payloads, and browsers revalidate
/// before reusing them.
pub fn owner_private() -> CacheControl {
    CacheControl(vec![
        CacheDirective::Private,
        CacheDirective::NoCache,
        CacheDirective::MustRevalidate,
    ])
}
