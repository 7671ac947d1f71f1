//! Utility functions for alias addresses, subdomains, and request handling.
//!
//! - [`address_generator`] - Random alias generation and custom address validation
//! - [`subdomain`] - Subdomain normalisation and validation
//! - [`extract_country`] - Country detection from HTTP headers

pub mod address_generator;
pub mod extract_country;
pub mod subdomain;
