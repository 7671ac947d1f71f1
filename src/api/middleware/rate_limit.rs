//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 2 requests per second, burst 100. Public pages such as login.
    Public,
    /// 1 request per second, burst 10. Authenticated API and dashboard.
    Secure,
}

impl Tier {
    fn quota(self) -> (u64, u32) {
        match self {
            Tier::Public => (2, 100),
            Tier::Secure => (1, 10),
        }
    }
}

/// Applies a per-client-IP rate limit to `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: socket peer address
/// - `behind_proxy = true`: `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
///   falling back to the peer address. Enable only behind a trusted proxy.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api::routes::protected_routes(), Tier::Secure, false);
/// ```
pub fn apply(router: Router<AppState>, tier: Tier, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer(tier, SmartIpKeyExtractor))
    } else {
        router.layer(layer(tier, PeerIpKeyExtractor))
    }
}

fn layer<K: KeyExtractor>(
    tier: Tier,
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let (per_second, burst) = tier.quota();

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_tier_is_stricter() {
        let (public_rate, public_burst) = Tier::Public.quota();
        let (secure_rate, secure_burst) = Tier::Secure.quota();

        assert!(secure_rate <= public_rate);
        assert!(secure_burst < public_burst);
    }
}
