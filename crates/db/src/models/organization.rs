//! Organization model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vendorpo_core::organization::SubscriptionPlan;
use vendorpo_core::types::{DbId, Timestamp};

/// A row from the `organizations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub industry: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[sqlx(try_from = "String")]
    pub subscription_plan: SubscriptionPlan,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning a new organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    /// Derived from `name` if `None` or blank.
    pub slug: Option<String>,
    pub industry: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Defaults to [`SubscriptionPlan::Professional`].
    pub subscription_plan: Option<SubscriptionPlan>,
}

/// DTO for admin updates. `None` fields are left unchanged.
///
/// Changing `name` never touches the slug; pass `slug` to rename it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub industry: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub subscription_plan: Option<SubscriptionPlan>,
}
