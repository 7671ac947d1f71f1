//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts (creates the profile alongside)
//! - [`PgProfileRepository`] - Premium flag and subdomain claims
//! - [`PgRandomAliasRepository`] - Random aliases
//! - [`PgDomainAliasRepository`] - Custom aliases
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`PgTrackingRepository`] - Upgrade click events

pub mod pg_domain_alias_repository;
pub mod pg_profile_repository;
pub mod pg_random_alias_repository;
pub mod pg_token_repository;
pub mod pg_tracking_repository;
pub mod pg_user_repository;

pub use pg_domain_alias_repository::PgDomainAliasRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_random_alias_repository::PgRandomAliasRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_tracking_repository::PgTrackingRepository;
pub use pg_user_repository::PgUserRepository;
