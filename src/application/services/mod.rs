//! Business logic services for the application layer.

pub mod alias_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod premium_service;
pub mod profile_service;
pub mod user_service;

pub use alias_service::{AliasLimits, AliasService};
pub use auth_service::AuthService;
pub use dashboard_service::{DashboardService, DashboardSettings, DashboardView, Notification};
pub use premium_service::{PremiumCatalog, PremiumService};
pub use profile_service::{ProfileService, SubdomainAvailability};
pub use user_service::UserService;
