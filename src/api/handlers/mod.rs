//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod aliases;
pub mod dashboard;
pub mod health;
pub mod premium;
pub mod profiles;
pub mod users;

pub use aliases::{
    create_domain_alias_handler, create_random_alias_handler, delete_alias_handler,
    delete_domain_alias_handler, delete_random_alias_handler, list_domain_aliases_handler,
    list_random_aliases_handler, update_alias_handler, update_domain_alias_handler,
    update_random_alias_handler,
};
pub use dashboard::dashboard_handler;
pub use health::health_handler;
pub use premium::premium_countries_handler;
pub use profiles::{list_profiles_handler, subdomain_availability_handler, update_profile_handler};
pub use users::list_users_handler;
