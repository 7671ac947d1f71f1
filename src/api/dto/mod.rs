//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod alias;
pub mod dashboard;
pub mod health;
pub mod premium;
pub mod profile;
pub mod user;
