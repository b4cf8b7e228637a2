//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI-compatible inference gateway, plus a mock
//! - `auth` - bearer token validation
//! - `http` - axum REST API
//! - `memory` - in-memory repositories
//! - `postgres` - PostgreSQL repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
