//! Share token adapters.

mod jwt;

pub use jwt::JwtShareTokenCodec;
