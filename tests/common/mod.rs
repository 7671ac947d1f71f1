#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use relay_dashboard::application::services::auth_service::hash_token;
use relay_dashboard::application::services::{AliasLimits, DashboardSettings, PremiumCatalog};
use relay_dashboard::domain::entities::{
    AliasPatch, DomainAlias, NewDomainAlias, NewRandomAlias, Profile, RandomAlias, User,
};
use relay_dashboard::domain::repositories::{
    ApiToken, DomainAliasRepository, ProfileRepository, RandomAliasRepository, TokenRepository,
    TrackingRepository, UserRepository,
};
use relay_dashboard::domain::upgrade_event::UpgradeClickEvent;
use relay_dashboard::error::AppError;
use relay_dashboard::infrastructure::cache::NullCache;
use relay_dashboard::routes::base_router;
use relay_dashboard::state::{AppState, Repositories, ServiceSettings};

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "me@example.com";
pub const MAIL_DOMAIN: &str = "mozmail.com";
pub const SUBSCRIBE_MONTHLY: &str =
    "https://accounts.example.com/subscriptions/products/prod_test?plan=price_monthly";

#[derive(Default)]
struct Data {
    users: Vec<User>,
    profiles: Vec<Profile>,
    random: Vec<RandomAlias>,
    custom: Vec<DomainAlias>,
    tokens: Vec<ApiToken>,
    clicks: Vec<UpgradeClickEvent>,
}

/// In-memory store implementing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

fn patched_description(current: &str, patch: &AliasPatch) -> String {
    match &patch.description {
        None => current.to_string(),
        Some(None) => String::new(),
        Some(Some(d)) => d.clone(),
    }
}

impl MemoryStore {
    pub fn seed_user(&self, email: &str, has_premium: bool, subdomain: Option<&str>) -> (i64, i64) {
        let mut data = self.data.lock().unwrap();
        let user_id = next_id(data.users.len());
        let profile_id = 100 + user_id;

        data.users.push(User {
            id: user_id,
            email: email.to_string(),
            created_at: Utc::now(),
        });
        data.profiles.push(Profile {
            id: profile_id,
            user_id,
            has_premium,
            subdomain: subdomain.map(str::to_string),
            date_subscribed: has_premium.then(Utc::now),
            created_at: Utc::now(),
        });

        (user_id, profile_id)
    }

    pub fn seed_token(&self, user_id: i64, raw: &str) {
        let mut data = self.data.lock().unwrap();
        let id = next_id(data.tokens.len());
        data.tokens.push(ApiToken {
            id,
            user_id,
            name: format!("token-{id}"),
            token_hash: hash_token(SIGNING_SECRET, raw),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
    }

    pub fn seed_random(&self, user_id: i64, address: &str, blocked: i64, forwarded: i64) -> i64 {
        let mut data = self.data.lock().unwrap();
        let id = next_id(data.random.len());
        data.random.push(RandomAlias {
            id,
            user_id,
            address: address.to_string(),
            description: String::new(),
            enabled: true,
            block_list_emails: false,
            num_blocked: blocked,
            num_forwarded: forwarded,
            num_replied: 0,
            created_at: Utc::now(),
            last_used_at: None,
        });
        id
    }

    pub fn seed_custom(&self, user_id: i64, address: &str, blocked: i64, forwarded: i64) -> i64 {
        let mut data = self.data.lock().unwrap();
        let id = next_id(data.custom.len());
        data.custom.push(DomainAlias {
            id,
            user_id,
            address: address.to_string(),
            description: String::new(),
            enabled: true,
            block_list_emails: false,
            num_blocked: blocked,
            num_forwarded: forwarded,
            num_replied: 0,
            created_at: Utc::now(),
            last_used_at: None,
        });
        id
    }

    pub fn random_aliases(&self) -> Vec<RandomAlias> {
        self.data.lock().unwrap().random.clone()
    }

    pub fn custom_aliases(&self) -> Vec<DomainAlias> {
        self.data.lock().unwrap().custom.clone()
    }

    pub fn profile(&self, profile_id: i64) -> Option<Profile> {
        self.data
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.id == profile_id)
            .cloned()
    }

    pub fn clicks(&self) -> Vec<UpgradeClickEvent> {
        self.data.lock().unwrap().clicks.clone()
    }
}

fn alias_not_found(id: i64) -> AppError {
    AppError::not_found("Alias not found", json!({ "id": id }))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, email: &str) -> Result<User, AppError> {
        if UserRepository::find_by_email(self, email).await?.is_some() {
            return Err(AppError::conflict("Email already registered", json!({})));
        }
        let (user_id, _) = self.seed_user(email, false, None);
        UserRepository::find_by_id(self, user_id)
            .await?
            .ok_or_else(|| AppError::internal("Seeded user missing", json!({})))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.data.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.data.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Profile>, AppError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .profiles
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>, AppError> {
        Ok(self.profile(id))
    }

    async fn subdomain_taken(&self, subdomain: &str) -> Result<bool, AppError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .profiles
            .iter()
            .any(|p| p.subdomain.as_deref() == Some(subdomain)))
    }

    async fn set_subdomain(&self, id: i64, subdomain: &str) -> Result<Profile, AppError> {
        let mut data = self.data.lock().unwrap();
        let profile = data
            .profiles
            .iter_mut()
            .find(|p| p.id == id && p.subdomain.is_none())
            .ok_or_else(|| AppError::conflict("Profile already has a subdomain", json!({})))?;
        profile.subdomain = Some(subdomain.to_string());
        Ok(profile.clone())
    }

    async fn set_premium(&self, id: i64, has_premium: bool) -> Result<Profile, AppError> {
        let mut data = self.data.lock().unwrap();
        let profile = data
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Profile not found", json!({})))?;
        profile.has_premium = has_premium;
        Ok(profile.clone())
    }
}

#[async_trait]
impl RandomAliasRepository for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<RandomAlias>, AppError> {
        Ok(self
            .random_aliases()
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect())
    }

    async fn create(&self, new_alias: NewRandomAlias) -> Result<RandomAlias, AppError> {
        let id = self.seed_random(new_alias.user_id, &new_alias.address, 0, 0);
        let mut data = self.data.lock().unwrap();
        let alias = data
            .random
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| alias_not_found(id))?;
        alias.description = new_alias.description;
        Ok(alias.clone())
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        patch: AliasPatch,
    ) -> Result<RandomAlias, AppError> {
        let mut data = self.data.lock().unwrap();
        let alias = data
            .random
            .iter_mut()
            .find(|a| a.id == id && a.user_id == user_id)
            .ok_or_else(|| alias_not_found(id))?;
        alias.enabled = patch.enabled.unwrap_or(alias.enabled);
        alias.block_list_emails = patch.block_list_emails.unwrap_or(alias.block_list_emails);
        alias.description = patched_description(&alias.description, &patch);
        Ok(alias.clone())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        let before = data.random.len();
        data.random.retain(|a| !(a.id == id && a.user_id == user_id));
        Ok(data.random.len() < before)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        Ok(RandomAliasRepository::list_for_user(self, user_id).await?.len() as i64)
    }

    async fn count_created_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        Ok(self
            .random_aliases()
            .iter()
            .filter(|a| a.user_id == user_id && a.created_at >= since)
            .count() as i64)
    }
}

#[async_trait]
impl DomainAliasRepository for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<DomainAlias>, AppError> {
        Ok(self
            .custom_aliases()
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect())
    }

    async fn create(&self, new_alias: NewDomainAlias) -> Result<DomainAlias, AppError> {
        let exists = self
            .custom_aliases()
            .iter()
            .any(|a| a.user_id == new_alias.user_id && a.address == new_alias.address);
        if exists {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let id = self.seed_custom(new_alias.user_id, &new_alias.address, 0, 0);
        let mut data = self.data.lock().unwrap();
        let alias = data
            .custom
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| alias_not_found(id))?;
        alias.description = new_alias.description;
        Ok(alias.clone())
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        patch: AliasPatch,
    ) -> Result<DomainAlias, AppError> {
        let mut data = self.data.lock().unwrap();
        let alias = data
            .custom
            .iter_mut()
            .find(|a| a.id == id && a.user_id == user_id)
            .ok_or_else(|| alias_not_found(id))?;
        alias.enabled = patch.enabled.unwrap_or(alias.enabled);
        alias.block_list_emails = patch.block_list_emails.unwrap_or(alias.block_list_emails);
        alias.description = patched_description(&alias.description, &patch);
        Ok(alias.clone())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        let before = data.custom.len();
        data.custom.retain(|a| !(a.id == id && a.user_id == user_id));
        Ok(data.custom.len() < before)
    }

    async fn count_created_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        Ok(self
            .custom_aliases()
            .iter()
            .filter(|a| a.user_id == user_id && a.created_at >= since)
            .count() as i64)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn find_active_user(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| t.user_id))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        if let Some(token) = data.tokens.iter_mut().find(|t| t.token_hash == token_hash) {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut data = self.data.lock().unwrap();
        let token = ApiToken {
            id: next_id(data.tokens.len()),
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        data.tokens.push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.data.lock().unwrap().tokens.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self.data.lock().unwrap().tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .tokens
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        let token = data
            .tokens
            .iter_mut()
            .find(|t| t.id == id && t.revoked_at.is_none())
            .ok_or_else(|| AppError::not_found("Token not found or already revoked", json!({})))?;
        token.revoked_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl TrackingRepository for MemoryStore {
    async fn record_upgrade_click(&self, event: &UpgradeClickEvent) -> Result<(), AppError> {
        self.data.lock().unwrap().clicks.push(event.clone());
        Ok(())
    }

    async fn count_upgrade_clicks(&self) -> Result<i64, AppError> {
        Ok(self.data.lock().unwrap().clicks.len() as i64)
    }
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        token_signing_secret: SIGNING_SECRET.to_string(),
        default_country: "US".to_string(),
        alias_limits: AliasLimits {
            max_free_aliases: 5,
            max_created_per_day: 100,
        },
        premium_catalog: PremiumCatalog {
            premium_countries: ["DE", "FR", "US"].iter().map(|c| c.to_string()).collect(),
            subscriptions_base_url: "https://accounts.example.com".to_string(),
            product_id: "prod_test".to_string(),
            plan_id_monthly: "price_monthly".to_string(),
            plan_id_yearly: "price_yearly".to_string(),
        },
        dashboard: DashboardSettings {
            mail_domain: MAIL_DOMAIN.to_string(),
            email_size_limit: 150,
            email_size_limit_unit: "MB".to_string(),
            max_free_aliases: 5,
            source_timeout: Duration::from_secs(2),
        },
    }
}

pub fn create_test_state(
    store: Arc<MemoryStore>,
) -> (AppState, mpsc::Receiver<UpgradeClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    (create_test_state_with_sender(store, tx), rx)
}

/// Builds the state around a caller-owned upgrade queue.
pub fn create_test_state_with_sender(
    store: Arc<MemoryStore>,
    tx: mpsc::Sender<UpgradeClickEvent>,
) -> AppState {
    let repositories = Repositories {
        users: store.clone(),
        profiles: store.clone(),
        random_aliases: store.clone(),
        domain_aliases: store.clone(),
        tokens: store,
    };

    AppState::new(repositories, Arc::new(NullCache), tx, test_settings())
        .expect("test settings are valid")
}

/// A running test server over the full router (without rate limiting)
/// and the store behind it.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub user_id: i64,
    pub profile_id: i64,
    pub upgrade_rx: mpsc::Receiver<UpgradeClickEvent>,
}

/// Seeds one user with a valid [`TOKEN`] and starts the server.
pub fn spawn_app(has_premium: bool, subdomain: Option<&str>) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let (user_id, profile_id) = store.seed_user(EMAIL, has_premium, subdomain);
    store.seed_token(user_id, TOKEN);

    let (state, upgrade_rx) = create_test_state(store.clone());
    let server = TestServer::new(base_router(state)).unwrap();

    TestApp {
        server,
        store,
        user_id,
        profile_id,
        upgrade_rx,
    }
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

pub fn session_cookie() -> String {
    format!("auth_token={TOKEN}")
}
