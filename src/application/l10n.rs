//! Message catalogue and placeholder formatting for user-facing strings.
//!
//! Messages use `{ $name }` placeholders. An unknown key renders as the key
//! itself; a missing argument renders as the bare placeholder name.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*\$([A-Za-z0-9_-]+)\s*\}").expect("placeholder regex is valid")
});

const EN_US: &[(&str, &str)] = &[
    ("profile-label-welcome-html", "Welcome, { $email }"),
    ("profile-stat-label-aliases-used", "Email masks used"),
    ("profile-stat-label-blocked", "Emails blocked"),
    ("profile-stat-label-forwarded", "Emails forwarded"),
    ("profile-label-subdomain", "Your email domain:"),
    ("profile-label-subdomain-placeholder", "Choose your unique subdomain"),
    ("profile-label-subdomain-submit", "Register subdomain"),
    ("banner-upgrade-headline", "Upgrade to Relay Premium"),
    (
        "banner-upgrade-copy",
        "Get unlimited email masks and your own email domain with Relay Premium.",
    ),
    ("banner-upgrade-cta", "Upgrade to Premium"),
    (
        "modal-domain-register-success",
        "Success! You can now create custom email masks using { $subdomain }.",
    ),
    (
        "profile-promo-email-size-limit",
        "Relay forwards emails up to { $size }{ $unit } in size.",
    ),
    (
        "profile-label-alias-limit",
        "You have used { $count } of { $limit } free email masks.",
    ),
    ("profile-label-create-alias", "Generate new mask"),
    ("profile-label-create-custom-alias", "Create custom mask"),
    ("profile-label-custom-address-placeholder", "Mask name, e.g. shopping"),
    ("profile-label-no-aliases", "You have no email masks yet."),
    ("profile-label-loading", "Loading your dashboard…"),
    ("profile-label-load-failed", "Your dashboard could not be loaded."),
    ("alias-label-enabled", "Forwarding"),
    ("alias-label-disabled", "Blocking"),
    ("alias-label-delete", "Delete"),
    ("alias-label-save", "Save"),
    ("alias-label-enable", "Enable"),
    ("alias-label-disable", "Disable"),
    ("alias-stat-blocked", "{ $count } blocked"),
    ("alias-stat-forwarded", "{ $count } forwarded"),
];

/// Resolves message keys against a catalogue.
#[derive(Debug, Clone)]
pub struct Localizer {
    messages: HashMap<&'static str, &'static str>,
}

impl Localizer {
    /// The built-in English catalogue.
    pub fn english() -> Self {
        Self {
            messages: EN_US.iter().copied().collect(),
        }
    }

    /// Formats `key`, substituting `{ $name }` placeholders from `args`.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.messages.get(key) else {
            tracing::warn!(key, "Missing localisation key");
            return key.to_string();
        };

        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| {
                let name = &caps[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| (*value).to_string())
                    .unwrap_or_else(|| name.to_string())
            })
            .into_owned()
    }

    /// Formats a key whose only argument is `{ $count }`.
    pub fn count(&self, key: &str, count: i64) -> String {
        self.format(key, &[("count", &count.to_string())])
    }

    /// Formats a key that takes no arguments.
    pub fn get(&self, key: &str) -> String {
        self.format(key, &[])
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::english()
    }
}
