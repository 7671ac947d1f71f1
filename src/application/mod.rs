//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::dashboard_service::DashboardService`] - Dashboard view composition
//! - [`services::alias_service::AliasService`] - Alias creation and variant-routed mutations
//! - [`services::profile_service::ProfileService`] - Subdomain claims and premium flag
//! - [`services::user_service::UserService`] - Account lookup and registration
//! - [`services::premium_service::PremiumService`] - Premium availability and checkout links
//! - [`services::auth_service::AuthService`] - API token authentication
//!
//! [`l10n`] holds the message catalogue used for user-facing strings.

pub mod l10n;
pub mod services;
