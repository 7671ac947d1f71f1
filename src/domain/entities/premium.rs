//! Premium availability data for the caller's country.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Subscription billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Yearly => "yearly",
        }
    }
}

/// A purchasable premium plan and its checkout link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPlan {
    pub period: BillingPeriod,
    pub plan_id: String,
    pub subscribe_url: String,
}

/// Where premium is sold, as seen from the caller's detected country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumCountries {
    /// ISO 3166-1 alpha-2, upper case.
    pub country_code: String,
    pub premium_countries: BTreeSet<String>,
    pub plans: Vec<PremiumPlan>,
}

impl PremiumCountries {
    /// Whether premium can be purchased from the caller's country.
    pub fn is_premium_available_in_country(&self) -> bool {
        self.premium_countries.contains(&self.country_code)
    }

    /// Checkout link for the given period, if premium is sold here.
    pub fn subscribe_link(&self, period: BillingPeriod) -> Option<&str> {
        if !self.is_premium_available_in_country() {
            return None;
        }

        self.plans
            .iter()
            .find(|plan| plan.period == period)
            .map(|plan| plan.subscribe_url.as_str())
    }
}
