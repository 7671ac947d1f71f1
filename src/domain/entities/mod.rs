//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation inputs use separate structs
//! (`NewRandomAlias`, `NewDomainAlias`) and partial updates use patch structs
//! ([`AliasPatch`]).
//!
//! # Entity Types
//!
//! - [`User`] - Account holder
//! - [`Profile`] - Premium entitlement and custom subdomain
//! - [`Alias`] - Random or custom forwarding address
//! - [`PremiumCountries`] - Premium availability for the caller's country

pub mod alias;
pub mod premium;
pub mod profile;
pub mod user;

pub use alias::{
    Alias, AliasKind, AliasLists, AliasPatch, AliasRef, DomainAlias, NewDomainAlias,
    NewRandomAlias, RandomAlias,
};
pub use premium::{BillingPeriod, PremiumCountries, PremiumPlan};
pub use profile::Profile;
pub use user::User;
