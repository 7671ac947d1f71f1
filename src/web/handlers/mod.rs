//! HTML template rendering handlers for the web dashboard.

mod dashboard;
mod login;

pub use dashboard::{
    create_alias_handler, create_custom_alias_handler, dashboard_handler, delete_alias_handler,
    set_subdomain_handler, update_alias_handler, upgrade_handler,
};
pub use login::{login_handler, login_submit_handler, logout_handler};
