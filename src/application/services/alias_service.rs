//! Alias creation, listing, and variant-routed mutation.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::{
    Alias, AliasKind, AliasLists, AliasPatch, AliasRef, DomainAlias, NewDomainAlias,
    NewRandomAlias, Profile, RandomAlias,
};
use crate::domain::repositories::{DomainAliasRepository, ProfileRepository, RandomAliasRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::address_generator::{generate_address, validate_custom_address};
use serde_json::json;

const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Alias creation limits.
#[derive(Debug, Clone, Copy)]
pub struct AliasLimits {
    /// Random aliases a free profile may hold.
    pub max_free_aliases: i64,
    /// Aliases (either kind) a profile may create per rolling 24 hours.
    pub max_created_per_day: i64,
}

/// Service owning both alias collections.
///
/// Update and delete are routed by [`AliasKind`]; list reads go through the
/// per-user cache, which every mutation invalidates.
pub struct AliasService {
    random_repository: Arc<dyn RandomAliasRepository>,
    domain_repository: Arc<dyn DomainAliasRepository>,
    profile_repository: Arc<dyn ProfileRepository>,
    cache: Arc<dyn CacheService>,
    limits: AliasLimits,
}

impl AliasService {
    pub fn new(
        random_repository: Arc<dyn RandomAliasRepository>,
        domain_repository: Arc<dyn DomainAliasRepository>,
        profile_repository: Arc<dyn ProfileRepository>,
        cache: Arc<dyn CacheService>,
        limits: AliasLimits,
    ) -> Self {
        Self {
            random_repository,
            domain_repository,
            profile_repository,
            cache,
            limits,
        }
    }

    /// Both alias collections of a user, cached.
    pub async fn list_aliases(&self, user_id: i64) -> Result<AliasLists, AppError> {
        match self.cache.get_aliases(user_id).await {
            Ok(Some(cached)) => {
                tracing::debug!(user_id, "Alias lists served from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, user_id, "Alias cache read failed"),
        }

        let (random, custom) = tokio::try_join!(
            self.random_repository.list_for_user(user_id),
            self.domain_repository.list_for_user(user_id),
        )?;
        let lists = AliasLists { random, custom };

        if let Err(e) = self.cache.set_aliases(user_id, &lists, None).await {
            tracing::warn!(error = %e, user_id, "Alias cache write failed");
        }

        Ok(lists)
    }

    pub async fn list_random(&self, user_id: i64) -> Result<Vec<RandomAlias>, AppError> {
        Ok(self.list_aliases(user_id).await?.random)
    }

    pub async fn list_custom(&self, user_id: i64) -> Result<Vec<DomainAlias>, AppError> {
        Ok(self.list_aliases(user_id).await?.custom)
    }

    /// Creates a random alias with a generated address.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if a free profile reached its alias limit
    /// - [`AppError::TooManyRequests`] if the daily creation limit is reached
    /// - [`AppError::Internal`] if no free address was found after retries
    pub async fn create_random(
        &self,
        user_id: i64,
        description: Option<String>,
    ) -> Result<RandomAlias, AppError> {
        let profile = self.profile_for(user_id).await?;

        if !profile.has_premium {
            let held = self.random_repository.count_for_user(user_id).await?;
            if held >= self.limits.max_free_aliases {
                return Err(AppError::forbidden(
                    "Free accounts are limited to a fixed number of aliases",
                    json!({ "limit": self.limits.max_free_aliases }),
                ));
            }
        }

        self.check_daily_limit(user_id).await?;

        let description = description.unwrap_or_default();

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let new_alias = NewRandomAlias {
                user_id,
                address: generate_address(),
                description: description.clone(),
            };

            match self.random_repository.create(new_alias).await {
                Ok(alias) => {
                    self.after_create(user_id, AliasKind::Random).await;
                    return Ok(alias);
                }
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique address",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Creates a custom alias under the profile subdomain.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if the profile is not premium or has no subdomain
    /// - [`AppError::Validation`] if the address is malformed
    /// - [`AppError::TooManyRequests`] if the daily creation limit is reached
    /// - [`AppError::Conflict`] if the user already has this address
    pub async fn create_custom(
        &self,
        user_id: i64,
        address: &str,
        description: Option<String>,
    ) -> Result<DomainAlias, AppError> {
        let profile = self.profile_for(user_id).await?;

        if !profile.has_premium || !profile.has_subdomain() {
            return Err(AppError::forbidden(
                "Custom aliases require premium and a subdomain",
                json!({ "has_premium": profile.has_premium, "has_subdomain": profile.has_subdomain() }),
            ));
        }

        let address = address.trim().to_ascii_lowercase();
        validate_custom_address(&address)?;

        self.check_daily_limit(user_id).await?;

        let alias = self
            .domain_repository
            .create(NewDomainAlias {
                user_id,
                address,
                description: description.unwrap_or_default(),
            })
            .await?;

        self.after_create(user_id, AliasKind::Custom).await;

        Ok(alias)
    }

    /// Applies a patch to the alias identified by `alias_ref`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the patch is empty
    /// - [`AppError::Forbidden`] if `block_list_emails` is set on a free profile
    /// - [`AppError::NotFound`] if the alias does not exist for this user
    pub async fn update(
        &self,
        user_id: i64,
        alias_ref: AliasRef,
        patch: AliasPatch,
    ) -> Result<Alias, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "fields": ["enabled", "description", "block_list_emails"] }),
            ));
        }

        if patch.block_list_emails.is_some() {
            let profile = self.profile_for(user_id).await?;
            if !profile.has_premium {
                return Err(AppError::forbidden(
                    "Promotional email blocking requires premium",
                    json!({ "field": "block_list_emails" }),
                ));
            }
        }

        let updated = match alias_ref.kind {
            AliasKind::Random => Alias::Random(
                self.random_repository
                    .update(user_id, alias_ref.id, patch)
                    .await?,
            ),
            AliasKind::Custom => Alias::Custom(
                self.domain_repository
                    .update(user_id, alias_ref.id, patch)
                    .await?,
            ),
        };

        self.invalidate(user_id).await;

        Ok(updated)
    }

    /// Deletes the alias identified by `alias_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist for this user.
    pub async fn delete(&self, user_id: i64, alias_ref: AliasRef) -> Result<(), AppError> {
        let deleted = match alias_ref.kind {
            AliasKind::Random => self.random_repository.delete(user_id, alias_ref.id).await?,
            AliasKind::Custom => self.domain_repository.delete(user_id, alias_ref.id).await?,
        };

        if !deleted {
            return Err(AppError::not_found(
                "Alias not found",
                json!({ "kind": alias_ref.kind.as_str(), "id": alias_ref.id }),
            ));
        }

        self.invalidate(user_id).await;
        tracing::info!(user_id, kind = alias_ref.kind.as_str(), id = alias_ref.id, "Alias deleted");

        Ok(())
    }

    async fn profile_for(&self, user_id: i64) -> Result<Profile, AppError> {
        self.profile_repository
            .list_for_user(user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("Profile not found", json!({ "user_id": user_id })))
    }

    async fn check_daily_limit(&self, user_id: i64) -> Result<(), AppError> {
        let since = Utc::now() - Duration::hours(24);

        let (random, custom) = tokio::try_join!(
            self.random_repository.count_created_since(user_id, since),
            self.domain_repository.count_created_since(user_id, since),
        )?;

        if random + custom >= self.limits.max_created_per_day {
            return Err(AppError::too_many_requests(
                "Daily alias creation limit reached",
                json!({ "limit": self.limits.max_created_per_day }),
            ));
        }

        Ok(())
    }

    async fn after_create(&self, user_id: i64, kind: AliasKind) {
        metrics::counter!("aliases_created_total", "kind" => kind.as_str()).increment(1);
        self.invalidate(user_id).await;
        tracing::info!(user_id, kind = kind.as_str(), "Alias created");
    }

    async fn invalidate(&self, user_id: i64) {
        if let Err(e) = self.cache.invalidate_aliases(user_id).await {
            tracing::warn!(error = %e, user_id, "Alias cache invalidation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockDomainAliasRepository, MockProfileRepository, MockRandomAliasRepository,
    };
    use crate::infrastructure::cache::NullCache;

    const LIMITS: AliasLimits = AliasLimits {
        max_free_aliases: 5,
        max_created_per_day: 100,
    };

    fn profile(has_premium: bool, subdomain: Option<&str>) -> Profile {
        Profile {
            id: 1,
            user_id: 1,
            has_premium,
            subdomain: subdomain.map(str::to_string),
            date_subscribed: None,
            created_at: Utc::now(),
        }
    }

    fn random_alias(id: i64, address: &str) -> RandomAlias {
        RandomAlias {
            id,
            user_id: 1,
            address: address.to_string(),
            description: String::new(),
            enabled: true,
            block_list_emails: false,
            num_blocked: 0,
            num_forwarded: 0,
            num_replied: 0,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    fn domain_alias(id: i64, address: &str) -> DomainAlias {
        DomainAlias {
            id,
            user_id: 1,
            address: address.to_string(),
            description: String::new(),
            enabled: true,
            block_list_emails: false,
            num_blocked: 0,
            num_forwarded: 0,
            num_replied: 0,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    fn profiles_returning(p: Profile) -> MockProfileRepository {
        let mut repo = MockProfileRepository::new();
        repo.expect_list_for_user()
            .returning(move |_| Ok(vec![p.clone()]));
        repo
    }

    fn service(
        random: MockRandomAliasRepository,
        custom: MockDomainAliasRepository,
        profiles: MockProfileRepository,
    ) -> AliasService {
        AliasService::new(
            Arc::new(random),
            Arc::new(custom),
            Arc::new(profiles),
            Arc::new(NullCache::new()),
            LIMITS,
        )
    }

    #[tokio::test]
    async fn test_update_routes_random_to_random_repository() {
        let mut random = MockRandomAliasRepository::new();
        random
            .expect_update()
            .withf(|user_id, id, patch| *user_id == 1 && *id == 7 && patch.enabled == Some(false))
            .times(1)
            .returning(|_, id, _| Ok(random_alias(id, "abc")));

        let mut custom = MockDomainAliasRepository::new();
        custom.expect_update().never();

        let svc = service(random, custom, MockProfileRepository::new());

        let patch = AliasPatch {
            enabled: Some(false),
            ..Default::default()
        };
        let updated = svc.update(1, AliasRef::random(7), patch).await.unwrap();

        assert_eq!(updated.reference(), AliasRef::random(7));
    }

    #[tokio::test]
    async fn test_update_routes_custom_to_domain_repository() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_update().never();

        let mut custom = MockDomainAliasRepository::new();
        custom
            .expect_update()
            .withf(|_, id, patch| *id == 7 && patch.description == Some(None))
            .times(1)
            .returning(|_, id, _| Ok(domain_alias(id, "shop")));

        let svc = service(random, custom, MockProfileRepository::new());

        let patch = AliasPatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = svc.update(1, AliasRef::custom(7), patch).await.unwrap();

        assert_eq!(updated.reference(), AliasRef::custom(7));
    }

    #[tokio::test]
    async fn test_delete_routes_by_kind() {
        let mut random = MockRandomAliasRepository::new();
        random
            .expect_delete()
            .withf(|_, id| *id == 3)
            .times(1)
            .returning(|_, _| Ok(true));

        let mut custom = MockDomainAliasRepository::new();
        custom
            .expect_delete()
            .withf(|_, id| *id == 4)
            .times(1)
            .returning(|_, _| Ok(true));

        let svc = service(random, custom, MockProfileRepository::new());

        svc.delete(1, AliasRef::random(3)).await.unwrap();
        svc.delete(1, AliasRef::custom(4)).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_alias() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_delete().returning(|_, _| Ok(false));

        let svc = service(random, MockDomainAliasRepository::new(), MockProfileRepository::new());

        let result = svc.delete(1, AliasRef::random(3)).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let svc = service(
            MockRandomAliasRepository::new(),
            MockDomainAliasRepository::new(),
            MockProfileRepository::new(),
        );

        let result = svc.update(1, AliasRef::random(1), AliasPatch::default()).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_block_list_requires_premium() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_update().never();

        let svc = service(
            random,
            MockDomainAliasRepository::new(),
            profiles_returning(profile(false, None)),
        );

        let patch = AliasPatch {
            block_list_emails: Some(true),
            ..Default::default()
        };
        let result = svc.update(1, AliasRef::random(1), patch).await;
        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_create_random_free_limit() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_count_for_user().returning(|_| Ok(5));
        random.expect_create().never();

        let svc = service(
            random,
            MockDomainAliasRepository::new(),
            profiles_returning(profile(false, None)),
        );

        let result = svc.create_random(1, None).await;
        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_create_random_premium_skips_free_limit() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_count_for_user().never();
        random.expect_count_created_since().returning(|_, _| Ok(0));
        random
            .expect_create()
            .times(1)
            .returning(|new_alias| Ok(random_alias(1, &new_alias.address)));

        let mut custom = MockDomainAliasRepository::new();
        custom.expect_count_created_since().returning(|_, _| Ok(0));

        let svc = service(random, custom, profiles_returning(profile(true, None)));

        let alias = svc.create_random(1, Some("news".to_string())).await.unwrap();
        assert_eq!(alias.address.len(), 9);
    }

    #[tokio::test]
    async fn test_create_random_daily_limit() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_count_for_user().returning(|_| Ok(0));
        random.expect_count_created_since().returning(|_, _| Ok(60));
        random.expect_create().never();

        let mut custom = MockDomainAliasRepository::new();
        custom.expect_count_created_since().returning(|_, _| Ok(40));

        let svc = service(random, custom, profiles_returning(profile(false, None)));

        let result = svc.create_random(1, None).await;
        assert!(matches!(result.unwrap_err(), AppError::TooManyRequests { .. }));
    }

    #[tokio::test]
    async fn test_create_random_retries_on_collision() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_count_for_user().returning(|_| Ok(0));
        random.expect_count_created_since().returning(|_, _| Ok(0));

        let mut seq = mockall::Sequence::new();
        random
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("Resource already exists", json!({}))));
        random
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_alias| Ok(random_alias(2, &new_alias.address)));

        let mut custom = MockDomainAliasRepository::new();
        custom.expect_count_created_since().returning(|_, _| Ok(0));

        let svc = service(random, custom, profiles_returning(profile(false, None)));

        let alias = svc.create_random(1, None).await.unwrap();
        assert_eq!(alias.id, 2);
    }

    #[tokio::test]
    async fn test_create_custom_requires_subdomain() {
        let mut custom = MockDomainAliasRepository::new();
        custom.expect_create().never();

        let svc = service(
            MockRandomAliasRepository::new(),
            custom,
            profiles_returning(profile(true, None)),
        );

        let result = svc.create_custom(1, "shop", None).await;
        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_create_custom_success() {
        let mut random = MockRandomAliasRepository::new();
        random.expect_count_created_since().returning(|_, _| Ok(0));

        let mut custom = MockDomainAliasRepository::new();
        custom.expect_count_created_since().returning(|_, _| Ok(0));
        custom
            .expect_create()
            .withf(|new_alias| new_alias.address == "shop.de")
            .times(1)
            .returning(|new_alias| Ok(domain_alias(5, &new_alias.address)));

        let svc = service(random, custom, profiles_returning(profile(true, Some("me"))));

        let alias = svc.create_custom(1, " Shop.DE ", None).await.unwrap();
        assert_eq!(alias.address, "shop.de");
    }

    #[tokio::test]
    async fn test_list_aliases_reads_both_collections() {
        let mut random = MockRandomAliasRepository::new();
        random
            .expect_list_for_user()
            .returning(|_| Ok(vec![random_alias(1, "a"), random_alias(2, "b")]));

        let mut custom = MockDomainAliasRepository::new();
        custom
            .expect_list_for_user()
            .returning(|_| Ok(vec![domain_alias(3, "c")]));

        let svc = service(random, custom, MockProfileRepository::new());

        let lists = svc.list_aliases(1).await.unwrap();
        assert_eq!(lists.random.len(), 2);
        assert_eq!(lists.custom.len(), 1);
    }
}
