//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces, and the background tracking worker,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`loadable`] - Explicit loading state for dashboard data sources
//! - [`upgrade_event`] - Upgrade click event model
//! - [`upgrade_worker`] - Asynchronous upgrade click processing worker
//!
//! # Upgrade Click Flow
//!
//! 1. Web handler receives the call-to-action click
//! 2. [`upgrade_event::UpgradeClickEvent`] is sent to an async channel
//! 3. [`upgrade_worker::run_upgrade_worker`] persists it with retry logic
//! 4. The browser is redirected to checkout without waiting for step 3

pub mod entities;
pub mod loadable;
pub mod repositories;
pub mod upgrade_event;
pub mod upgrade_worker;
