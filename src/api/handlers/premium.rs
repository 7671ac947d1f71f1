//! Handler for premium availability.

use axum::{Json, extract::State, http::HeaderMap};

use crate::api::dto::premium::PremiumCountriesResponse;
use crate::state::AppState;
use crate::utils::extract_country::extract_country;

/// Premium availability for the caller's detected country.
///
/// # Endpoint
///
/// `GET /api/premium_countries`
///
/// # Response
///
/// ```json
/// {
///   "country_code": "DE",
///   "premium_available_in_country": true,
///   "premium_countries": ["AT", "DE", "US"],
///   "monthly_subscribe_url": "https://accounts.firefox.com/subscriptions/products/prod_x?plan=price_m",
///   "yearly_subscribe_url": "https://accounts.firefox.com/subscriptions/products/prod_x?plan=price_y"
/// }
/// ```
pub async fn premium_countries_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<PremiumCountriesResponse> {
    let country = extract_country(&headers, &state.default_country);

    Json(state.premium_service.premium_countries(&country).into())
}
