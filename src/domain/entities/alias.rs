//! Alias entities: random (system-generated) and custom (subdomain) addresses.
//!
//! The two backing collections are kept as separate structs and unified by the
//! [`Alias`] sum type. Update and delete calls are routed by matching on
//! [`AliasKind`], never by inspecting field shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A system-generated alias under the shared mail domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomAlias {
    pub id: i64,
    pub user_id: i64,
    pub address: String,
    pub description: String,
    pub enabled: bool,
    pub block_list_emails: bool,
    pub num_blocked: i64,
    pub num_forwarded: i64,
    pub num_replied: i64,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// A user-chosen alias under the profile's custom subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainAlias {
    pub id: i64,
    pub user_id: i64,
    pub address: String,
    pub description: String,
    pub enabled: bool,
    pub block_list_emails: bool,
    pub num_blocked: i64,
    pub num_forwarded: i64,
    pub num_replied: i64,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Which backing collection an alias lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasKind {
    Random,
    Custom,
}

impl AliasKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AliasKind::Random => "random",
            AliasKind::Custom => "custom",
        }
    }
}

/// Identifies one alias for update/delete routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasRef {
    pub kind: AliasKind,
    pub id: i64,
}

impl AliasRef {
    pub fn random(id: i64) -> Self {
        Self {
            kind: AliasKind::Random,
            id,
        }
    }

    pub fn custom(id: i64) -> Self {
        Self {
            kind: AliasKind::Custom,
            id,
        }
    }
}

/// Either kind of alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Alias {
    Random(RandomAlias),
    Custom(DomainAlias),
}

impl Alias {
    pub fn kind(&self) -> AliasKind {
        match self {
            Alias::Random(_) => AliasKind::Random,
            Alias::Custom(_) => AliasKind::Custom,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Alias::Random(a) => a.id,
            Alias::Custom(a) => a.id,
        }
    }

    pub fn reference(&self) -> AliasRef {
        AliasRef {
            kind: self.kind(),
            id: self.id(),
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Alias::Random(a) => &a.address,
            Alias::Custom(a) => &a.address,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Alias::Random(a) => &a.description,
            Alias::Custom(a) => &a.description,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Alias::Random(a) => a.enabled,
            Alias::Custom(a) => a.enabled,
        }
    }

    pub fn num_blocked(&self) -> i64 {
        match self {
            Alias::Random(a) => a.num_blocked,
            Alias::Custom(a) => a.num_blocked,
        }
    }

    pub fn num_forwarded(&self) -> i64 {
        match self {
            Alias::Random(a) => a.num_forwarded,
            Alias::Custom(a) => a.num_forwarded,
        }
    }

    /// Full email address of the alias.
    ///
    /// Custom aliases without a subdomain (which should not exist) fall back to
    /// the shared mail domain.
    pub fn full_address(&self, mail_domain: &str, subdomain: Option<&str>) -> String {
        match (self, subdomain) {
            (Alias::Random(a), _) => format!("{}@{}", a.address, mail_domain),
            (Alias::Custom(a), Some(sub)) => format!("{}@{}.{}", a.address, sub, mail_domain),
            (Alias::Custom(a), None) => format!("{}@{}", a.address, mail_domain),
        }
    }
}

impl From<RandomAlias> for Alias {
    fn from(alias: RandomAlias) -> Self {
        Alias::Random(alias)
    }
}

impl From<DomainAlias> for Alias {
    fn from(alias: DomainAlias) -> Self {
        Alias::Custom(alias)
    }
}

/// Both alias collections of a user, in repository order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasLists {
    pub random: Vec<RandomAlias>,
    pub custom: Vec<DomainAlias>,
}

impl AliasLists {
    /// Merges both collections: random aliases first, then custom ones.
    ///
    /// Relative order within each collection is preserved.
    pub fn merged(self) -> Vec<Alias> {
        let mut merged = Vec::with_capacity(self.random.len() + self.custom.len());
        merged.extend(self.random.into_iter().map(Alias::Random));
        merged.extend(self.custom.into_iter().map(Alias::Custom));
        merged
    }
}

/// Input for creating a random alias.
#[derive(Debug, Clone)]
pub struct NewRandomAlias {
    pub user_id: i64,
    pub address: String,
    pub description: String,
}

/// Input for creating a custom alias.
#[derive(Debug, Clone)]
pub struct NewDomainAlias {
    pub user_id: i64,
    pub address: String,
    pub description: String,
}

/// Partial update applied to either kind of alias.
///
/// `None` fields are left unchanged. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasPatch {
    pub enabled: Option<bool>,
    pub description: Option<Option<String>>,
    pub block_list_emails: Option<bool>,
}

impl AliasPatch {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.description.is_none() && self.block_list_emails.is_none()
    }
}
