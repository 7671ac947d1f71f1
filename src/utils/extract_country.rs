//! Country detection from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Header set by the edge proxy with the client's ISO country code.
pub const CLIENT_REGION_HEADER: &str = "x-client-region";

/// Detects the caller's ISO 3166-1 alpha-2 country code.
///
/// Looks at, in order:
/// - the `X-Client-Region` header
/// - the region subtag of the first `Accept-Language` entry (`de-AT` gives `AT`)
/// - `default_country`
///
/// The result is always upper case.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::ACCEPT_LANGUAGE, "en-GB,en;q=0.8".parse().unwrap());
/// assert_eq!(extract_country(&headers, "US"), "GB");
/// ```
pub fn extract_country(headers: &HeaderMap, default_country: &str) -> String {
    if let Some(region) = headers
        .get(CLIENT_REGION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| is_country_code(v))
    {
        return region.to_ascii_uppercase();
    }

    if let Some(region) = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(region_from_accept_language)
    {
        return region;
    }

    default_country.to_ascii_uppercase()
}

fn region_from_accept_language(value: &str) -> Option<String> {
    let first = value.split(',').next()?;
    let tag = first.split(';').next()?.trim();

    tag.split(['-', '_'])
        .skip(1)
        .find(|subtag| is_country_code(subtag))
        .map(str::to_ascii_uppercase)
}

fn is_country_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic())
}
