//! DTO for the premium availability endpoint.

use serde::Serialize;

use crate::domain::entities::{BillingPeriod, PremiumCountries};

#[derive(Debug, Serialize)]
pub struct PremiumCountriesResponse {
    pub country_code: String,
    pub premium_available_in_country: bool,
    pub premium_countries: Vec<String>,
    pub monthly_subscribe_url: Option<String>,
    pub yearly_subscribe_url: Option<String>,
}

impl From<PremiumCountries> for PremiumCountriesResponse {
    fn from(data: PremiumCountries) -> Self {
        Self {
            premium_available_in_country: data.is_premium_available_in_country(),
            monthly_subscribe_url: data
                .subscribe_link(BillingPeriod::Monthly)
                .map(str::to_string),
            yearly_subscribe_url: data.subscribe_link(BillingPeriod::Yearly).map(str::to_string),
            country_code: data.country_code,
            premium_countries: data.premium_countries.into_iter().collect(),
        }
    }
}
