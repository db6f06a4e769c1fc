//! Identity verifier adapters.

mod dev;
mod jwt;

pub use dev::DevIdentityVerifier;
pub use jwt::{JwtIdentityVerifier, JwtSettings};
