//! Premium catalog: where premium is sold and how to buy it.

use std::collections::BTreeSet;

use url::Url;

use crate::domain::entities::{BillingPeriod, PremiumCountries, PremiumPlan};
use crate::error::AppError;
use serde_json::json;

/// Premium catalog settings, injected at construction.
#[derive(Debug, Clone)]
pub struct PremiumCatalog {
    pub premium_countries: BTreeSet<String>,
    pub subscriptions_base_url: String,
    pub product_id: String,
    pub plan_id_monthly: String,
    pub plan_id_yearly: String,
}

/// Resolves premium availability for a detected country.
pub struct PremiumService {
    premium_countries: BTreeSet<String>,
    plans: Vec<PremiumPlan>,
}

impl PremiumService {
    /// Builds the service and precomputes both checkout links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the subscriptions base URL is not
    /// an absolute URL.
    pub fn new(catalog: PremiumCatalog) -> Result<Self, AppError> {
        let plans = [
            (BillingPeriod::Monthly, catalog.plan_id_monthly),
            (BillingPeriod::Yearly, catalog.plan_id_yearly),
        ]
        .into_iter()
        .map(|(period, plan_id)| {
            let subscribe_url =
                subscribe_url(&catalog.subscriptions_base_url, &catalog.product_id, &plan_id)?;
            Ok(PremiumPlan {
                period,
                plan_id,
                subscribe_url,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            premium_countries: catalog.premium_countries,
            plans,
        })
    }

    /// Premium data as seen from `country_code`.
    pub fn premium_countries(&self, country_code: &str) -> PremiumCountries {
        PremiumCountries {
            country_code: country_code.to_ascii_uppercase(),
            premium_countries: self.premium_countries.clone(),
            plans: self.plans.clone(),
        }
    }
}

/// `{base}/subscriptions/products/{product}?plan={plan}`
fn subscribe_url(base: &str, product_id: &str, plan_id: &str) -> Result<String, AppError> {
    let invalid = |reason: String| {
        AppError::bad_request(
            "Invalid subscriptions base URL",
            json!({ "url": base, "reason": reason }),
        )
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["subscriptions", "products", product_id]);

    url.query_pairs_mut().clear().append_pair("plan", plan_id);

    Ok(url.into())
}
