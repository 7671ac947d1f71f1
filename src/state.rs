//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::l10n::Localizer;
use crate::application::services::{
    AliasLimits, AliasService, AuthService, DashboardService, DashboardSettings, PremiumCatalog,
    PremiumService, ProfileService, UserService,
};
use crate::config::Config;
use crate::domain::repositories::{
    DomainAliasRepository, ProfileRepository, RandomAliasRepository, TokenRepository,
    UserRepository,
};
use crate::domain::upgrade_event::UpgradeClickEvent;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Repository implementations the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub random_aliases: Arc<dyn RandomAliasRepository>,
    pub domain_aliases: Arc<dyn DomainAliasRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

/// Service settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub token_signing_secret: String,
    pub default_country: String,
    pub alias_limits: AliasLimits,
    pub premium_catalog: PremiumCatalog,
    pub dashboard: DashboardSettings,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            token_signing_secret: config.token_signing_secret.clone(),
            default_country: config.default_country.clone(),
            alias_limits: AliasLimits {
                max_free_aliases: config.max_num_free_aliases,
                max_created_per_day: config.max_address_creation_per_day,
            },
            premium_catalog: PremiumCatalog {
                premium_countries: config.premium_countries.clone(),
                subscriptions_base_url: config.subscriptions_base_url.clone(),
                product_id: config.premium_prod_id.clone(),
                plan_id_monthly: config.premium_plan_id_monthly.clone(),
                plan_id_yearly: config.premium_plan_id_yearly.clone(),
            },
            dashboard: DashboardSettings {
                mail_domain: config.mozmail_domain.clone(),
                email_size_limit: config.email_size_limit,
                email_size_limit_unit: config.email_size_limit_unit.clone(),
                max_free_aliases: config.max_num_free_aliases,
                source_timeout: Duration::from_millis(config.data_source_timeout_ms),
            },
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub profile_service: Arc<ProfileService>,
    pub alias_service: Arc<AliasService>,
    pub premium_service: Arc<PremiumService>,
    pub dashboard_service: Arc<DashboardService>,
    pub cache: Arc<dyn CacheService>,
    pub upgrade_sender: mpsc::Sender<UpgradeClickEvent>,
    pub default_country: Arc<str>,
    pub mail_domain: Arc<str>,
}

impl AppState {
    /// Wires services over the given repositories.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the premium catalog is malformed.
    pub fn new(
        repositories: Repositories,
        cache: Arc<dyn CacheService>,
        upgrade_sender: mpsc::Sender<UpgradeClickEvent>,
        settings: ServiceSettings,
    ) -> Result<Self, AppError> {
        let auth_service = Arc::new(AuthService::new(
            repositories.tokens,
            settings.token_signing_secret,
        ));
        let user_service = Arc::new(UserService::new(repositories.users));
        let profile_service = Arc::new(ProfileService::new(repositories.profiles.clone()));
        let alias_service = Arc::new(AliasService::new(
            repositories.random_aliases,
            repositories.domain_aliases,
            repositories.profiles,
            cache.clone(),
            settings.alias_limits,
        ));
        let premium_service = Arc::new(PremiumService::new(settings.premium_catalog)?);

        let mail_domain: Arc<str> = settings.dashboard.mail_domain.as_str().into();

        let dashboard_service = Arc::new(DashboardService::new(
            profile_service.clone(),
            user_service.clone(),
            alias_service.clone(),
            premium_service.clone(),
            Arc::new(Localizer::english()),
            settings.dashboard,
        ));

        Ok(Self {
            auth_service,
            user_service,
            profile_service,
            alias_service,
            premium_service,
            dashboard_service,
            cache,
            upgrade_sender,
            default_country: settings.default_country.into(),
            mail_domain,
        })
    }
}
