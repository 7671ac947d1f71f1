//! Web dashboard layer for browser-based UI.
//!
//! Renders the profile dashboard (merged alias list, usage header, upgrade
//! banner) and forwards its form actions to the application services.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering and form handlers
//! - [`middleware`] - Web-specific middleware (cookie auth)
//! - [`routes`] - Dashboard route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
