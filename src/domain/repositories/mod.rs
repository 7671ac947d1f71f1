//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by `crate::infrastructure::persistence`. Services hold them as
//! `Arc<dyn Trait>` so tests can swap in mocks or in-memory stores.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account lookup and creation
//! - [`ProfileRepository`] - Premium flag and subdomain
//! - [`RandomAliasRepository`] - Random alias CRUD
//! - [`DomainAliasRepository`] - Custom alias CRUD
//! - [`TokenRepository`] - API token authentication
//! - [`TrackingRepository`] - Upgrade click events

pub mod domain_alias_repository;
pub mod profile_repository;
pub mod random_alias_repository;
pub mod token_repository;
pub mod tracking_repository;
pub mod user_repository;

pub use domain_alias_repository::DomainAliasRepository;
pub use profile_repository::ProfileRepository;
pub use random_alias_repository::RandomAliasRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use tracking_repository::TrackingRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use domain_alias_repository::MockDomainAliasRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use random_alias_repository::MockRandomAliasRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use tracking_repository::MockTrackingRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
