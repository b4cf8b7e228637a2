//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, auth, command metadata)
//! - `assessment` - Questionnaire, answer collection, and the inference analysis contract
//! - `learning` - Stored profiles and the profile-conditioned learning services

pub mod assessment;
pub mod foundation;
pub mod learning;
