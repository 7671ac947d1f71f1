//! Dashboard view composition.
//!
//! Loads the four data sources behind the profile dashboard (profile, user,
//! alias pair, premium availability), then derives the page model from them:
//! one merged alias list, usage totals, the header variant, and the optional
//! upgrade banner. The composition step is pure; all I/O happens in
//! [`DashboardService::load`] and the mutation methods.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::application::l10n::Localizer;
use crate::application::services::{AliasService, PremiumService, ProfileService, UserService};
use crate::domain::entities::{
    Alias, AliasLists, AliasPatch, AliasRef, BillingPeriod, DomainAlias, PremiumCountries,
    Profile, RandomAlias, User,
};
use crate::domain::loadable::Loadable;
use crate::error::AppError;

/// Display settings injected at construction.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub mail_domain: String,
    pub email_size_limit: u64,
    pub email_size_limit_unit: String,
    pub max_free_aliases: i64,
    /// Deadline per data source; a source that misses it is still loading.
    pub source_timeout: Duration,
}

/// Usage figures shown to premium users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderStats {
    pub greeting: String,
    pub alias_count: usize,
    pub total_blocked: i64,
    pub total_forwarded: i64,
}

/// The two mutually exclusive header variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum DashboardHeader {
    Stats(HeaderStats),
    Greeting { greeting: String },
}

impl DashboardHeader {
    pub fn greeting(&self) -> &str {
        match self {
            DashboardHeader::Stats(stats) => &stats.greeting,
            DashboardHeader::Greeting { greeting } => greeting,
        }
    }

    pub fn stats(&self) -> Option<&HeaderStats> {
        match self {
            DashboardHeader::Stats(stats) => Some(stats),
            DashboardHeader::Greeting { .. } => None,
        }
    }
}

/// Upgrade promotion shown to free users in premium countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeBanner {
    pub headline: String,
    pub copy: String,
    pub cta_label: String,
    /// Click-tracked call-to-action; redirects to `subscribe_url`.
    pub cta_href: String,
    pub subscribe_url: String,
}

/// One row of the merged alias list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    #[serde(flatten)]
    pub alias: Alias,
    pub full_address: String,
}

impl AliasEntry {
    /// Path segment identifying the alias in dashboard form actions.
    pub fn action_path(&self) -> String {
        format!("{}/{}", self.alias.kind().as_str(), self.alias.id())
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub profile_id: i64,
    pub email: String,
    pub has_premium: bool,
    pub subdomain: Option<String>,
    pub header: DashboardHeader,
    pub upgrade_banner: Option<UpgradeBanner>,
    pub aliases: Vec<AliasEntry>,
    pub total_blocked: i64,
    pub total_forwarded: i64,
    pub size_limit_notice: String,
    pub alias_limit_notice: Option<String>,
    pub can_create_alias: bool,
    pub can_create_custom_alias: bool,
    pub can_claim_subdomain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
}

/// A one-shot toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self {
            kind: NotificationKind::Success,
            message,
        }
    }
}

/// Composes the dashboard and forwards its UI events to the owning services.
pub struct DashboardService {
    profiles: Arc<ProfileService>,
    users: Arc<UserService>,
    aliases: Arc<AliasService>,
    premium: Arc<PremiumService>,
    l10n: Arc<Localizer>,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(
        profiles: Arc<ProfileService>,
        users: Arc<UserService>,
        aliases: Arc<AliasService>,
        premium: Arc<PremiumService>,
        l10n: Arc<Localizer>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            profiles,
            users,
            aliases,
            premium,
            l10n,
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn localizer(&self) -> Arc<Localizer> {
        self.l10n.clone()
    }

    /// Loads all four sources concurrently and composes the view.
    ///
    /// Yields [`Loadable::Loading`] if any source missed its deadline and
    /// [`Loadable::Failed`] if any source failed; no partial view is built.
    pub async fn load(&self, user_id: i64, country_code: &str) -> Loadable<DashboardView> {
        let deadline = self.settings.source_timeout;

        let (profile, user, aliases, premium) = tokio::join!(
            Loadable::fetch(deadline, self.profiles.primary_profile(user_id)),
            Loadable::fetch(deadline, self.users.get_user(user_id)),
            Loadable::fetch(deadline, self.aliases.list_aliases(user_id)),
            Loadable::fetch(deadline, async {
                Ok::<_, AppError>(self.premium.premium_countries(country_code))
            }),
        );

        match Loadable::all4(profile, user, aliases, premium) {
            Loadable::Ready((profile, user, aliases, premium)) => {
                metrics::counter!("dashboard_views_total").increment(1);
                Loadable::Ready(self.compose(&profile, &user, aliases, &premium))
            }
            Loadable::Loading => {
                tracing::debug!(user_id, "Dashboard sources still loading");
                Loadable::Loading
            }
            Loadable::Failed(e) => {
                tracing::warn!(user_id, error = %e, "Dashboard source failed");
                Loadable::Failed(e)
            }
        }
    }

    /// Builds the view from resolved sources.
    pub fn compose(
        &self,
        profile: &Profile,
        user: &User,
        aliases: AliasLists,
        premium: &PremiumCountries,
    ) -> DashboardView {
        let random_count = aliases.random.len() as i64;
        let merged = aliases.merged();

        let total_blocked: i64 = merged.iter().map(Alias::num_blocked).sum();
        let total_forwarded: i64 = merged.iter().map(Alias::num_forwarded).sum();

        let greeting = self
            .l10n
            .format("profile-label-welcome-html", &[("email", user.email.as_str())]);

        let header = if profile.has_premium {
            DashboardHeader::Stats(HeaderStats {
                greeting,
                alias_count: merged.len(),
                total_blocked,
                total_forwarded,
            })
        } else {
            DashboardHeader::Greeting { greeting }
        };

        let upgrade_banner = if profile.has_premium {
            None
        } else {
            premium
                .subscribe_link(BillingPeriod::Monthly)
                .map(|subscribe_url| UpgradeBanner {
                    headline: self.l10n.get("banner-upgrade-headline"),
                    copy: self.l10n.get("banner-upgrade-copy"),
                    cta_label: self.l10n.get("banner-upgrade-cta"),
                    cta_href: format!(
                        "/dashboard/upgrade?period={}",
                        BillingPeriod::Monthly.as_str()
                    ),
                    subscribe_url: subscribe_url.to_string(),
                })
        };

        let subdomain = profile.subdomain.as_deref();
        let entries = merged
            .into_iter()
            .map(|alias| AliasEntry {
                full_address: alias.full_address(&self.settings.mail_domain, subdomain),
                alias,
            })
            .collect();

        let size = self.settings.email_size_limit.to_string();
        let size_limit_notice = self.l10n.format(
            "profile-promo-email-size-limit",
            &[
                ("size", size.as_str()),
                ("unit", self.settings.email_size_limit_unit.as_str()),
            ],
        );

        let alias_limit_notice = (!profile.has_premium).then(|| {
            let count = random_count.to_string();
            let limit = self.settings.max_free_aliases.to_string();
            self.l10n.format(
                "profile-label-alias-limit",
                &[("count", count.as_str()), ("limit", limit.as_str())],
            )
        });

        DashboardView {
            profile_id: profile.id,
            email: user.email.clone(),
            has_premium: profile.has_premium,
            subdomain: profile.subdomain.clone(),
            header,
            upgrade_banner,
            aliases: entries,
            total_blocked,
            total_forwarded,
            size_limit_notice,
            alias_limit_notice,
            can_create_alias: profile.has_premium
                || random_count < self.settings.max_free_aliases,
            can_create_custom_alias: profile.has_premium && profile.has_subdomain(),
            can_claim_subdomain: profile.has_premium && !profile.has_subdomain(),
        }
    }

    /// Whether the upgrade banner would be shown to this user from `country_code`.
    pub async fn upgrade_link(
        &self,
        user_id: i64,
        country_code: &str,
        period: BillingPeriod,
    ) -> Result<Option<String>, AppError> {
        let profile = self.profiles.primary_profile(user_id).await?;
        if profile.has_premium {
            return Ok(None);
        }

        Ok(self
            .premium
            .premium_countries(country_code)
            .subscribe_link(period)
            .map(str::to_string))
    }

    /// Creates a new random alias.
    pub async fn create_alias(&self, user_id: i64) -> Result<RandomAlias, AppError> {
        self.aliases.create_random(user_id, None).await
    }

    /// Creates a custom alias under the profile subdomain.
    ///
    /// Only offered when [`DashboardView::can_create_custom_alias`] is set;
    /// [`AliasService::create_custom`] enforces the same rule.
    pub async fn create_custom_alias(
        &self,
        user_id: i64,
        address: &str,
        description: Option<String>,
    ) -> Result<DomainAlias, AppError> {
        self.aliases.create_custom(user_id, address, description).await
    }

    /// Updates an alias, routed by its variant.
    pub async fn update_alias(
        &self,
        user_id: i64,
        alias_ref: AliasRef,
        patch: AliasPatch,
    ) -> Result<Alias, AppError> {
        self.aliases.update(user_id, alias_ref, patch).await
    }

    /// Deletes an alias, routed by its variant.
    pub async fn delete_alias(&self, user_id: i64, alias_ref: AliasRef) -> Result<(), AppError> {
        self.aliases.delete(user_id, alias_ref).await
    }

    /// Claims a subdomain for the profile.
    ///
    /// Returns exactly one success notification carrying the submitted
    /// subdomain when the update succeeds. A failed update is logged and
    /// produces no notification.
    pub async fn set_custom_subdomain(
        &self,
        user_id: i64,
        profile_id: i64,
        subdomain: &str,
    ) -> Option<Notification> {
        match self.profiles.set_subdomain(user_id, profile_id, subdomain).await {
            Ok(_) => Some(Notification::success(self.l10n.format(
                "modal-domain-register-success",
                &[("subdomain", subdomain)],
            ))),
            Err(e) => {
                tracing::warn!(user_id, profile_id, error = %e, "Subdomain update failed");
                None
            }
        }
    }
}
