//! Organization naming rules: slug derivation, name normalization, and the
//! subscription plan catalogue.
//!
//! The write path in `vendorpo-db` calls [`normalize_name`] and
//! [`resolve_slug`] right before inserting a row, so every rule that shapes a
//! persisted organization lives here and can be tested without a database.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of an organization display name, in characters.
pub const MAX_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Subscription plans
// ---------------------------------------------------------------------------

/// Billing tier of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Free,
    Starter,
    #[default]
    Professional,
    Enterprise,
}

impl SubscriptionPlan {
    /// All plans, cheapest first.
    pub const ALL: [SubscriptionPlan; 4] = [
        SubscriptionPlan::Free,
        SubscriptionPlan::Starter,
        SubscriptionPlan::Professional,
        SubscriptionPlan::Enterprise,
    ];

    /// The value stored in `organizations.subscription_plan`.
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Starter => "starter",
            SubscriptionPlan::Professional => "professional",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid subscription plan '{s}'. Valid plans: free, starter, professional, enterprise"
                ))
            })
    }
}

impl TryFrom<String> for SubscriptionPlan {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Derive a URL-safe slug from an organization name.
///
/// Lowercases the name, turns every run of characters outside `[a-z0-9]` into
/// a single hyphen, and strips hyphens from both ends. A name without any
/// ASCII alphanumerics yields an empty string.
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Pick the slug to persist for a new organization.
///
/// An explicit, non-blank slug is kept verbatim; otherwise one is derived
/// from `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> String {
    match explicit.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => derive_slug(name),
    }
}

/// Validate an explicitly supplied slug (lowercase alphanumerics and hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field normalization
// ---------------------------------------------------------------------------

/// Trim a display name and reject empty or oversized values.
pub fn normalize_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Organization name is required".into(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Organization name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional free-text field, mapping blank values to `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trim an optional contact email and check its syntax.
pub fn normalize_email(email: Option<&str>) -> Result<Option<String>, CoreError> {
    match normalize_optional(email) {
        Some(addr) if !addr.validate_email() => Err(CoreError::Validation(format!(
            "Invalid contact email '{addr}'"
        ))),
        other => Ok(other),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
