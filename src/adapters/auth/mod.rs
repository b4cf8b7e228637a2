//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 shared-secret validation of identity provider tokens
//! - `mock` - fixed token map for tests

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
