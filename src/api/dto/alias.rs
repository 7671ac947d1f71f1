//! DTOs for alias endpoints.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Alias, AliasPatch};

pub const MAX_DESCRIPTION_LENGTH: usize = 64;

/// An alias with its full email address.
#[derive(Debug, Serialize)]
pub struct AliasResponse {
    #[serde(flatten)]
    pub alias: Alias,
    pub full_address: String,
}

impl AliasResponse {
    pub fn new(alias: Alias, mail_domain: &str, subdomain: Option<&str>) -> Self {
        let full_address = alias.full_address(mail_domain, subdomain);
        Self {
            alias,
            full_address,
        }
    }
}

/// Request body for `POST /api/relayaddresses`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateRandomAliasRequest {
    #[validate(length(max = 64, message = "Description is limited to 64 characters"))]
    pub description: Option<String>,
}

/// Request body for `POST /api/domainaddresses`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDomainAliasRequest {
    #[validate(length(min = 1, max = 64, message = "Address must be 1-64 characters"))]
    pub address: String,

    #[validate(length(max = 64, message = "Description is limited to 64 characters"))]
    pub description: Option<String>,
}

/// Request body for alias `PATCH` endpoints.
///
/// # `description` semantics
///
/// - **Absent** → leave unchanged
/// - **`null`** → clear
/// - **String** → set
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAliasRequest {
    pub enabled: Option<bool>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(custom(function = "validate_description"))]
    pub description: Option<Option<String>>,

    pub block_list_emails: Option<bool>,
}

impl UpdateAliasRequest {
    /// Converts a validated body into a domain patch.
    pub fn into_patch(self) -> AliasPatch {
        AliasPatch {
            enabled: self.enabled,
            description: self.description,
            block_list_emails: self.block_list_emails,
        }
    }
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::new("description_too_long")
            .with_message("Description is limited to 64 characters".into()));
    }
    Ok(())
}
