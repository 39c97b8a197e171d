//! Repository for the `organizations` table.
//!
//! The write path normalizes input and resolves the slug before the INSERT;
//! the slug is only ever derived on creation.

use sqlx::PgPool;
use vendorpo_core::organization::{
    normalize_email, normalize_name, normalize_optional, resolve_slug, validate_slug,
};
use vendorpo_core::types::DbId;

use crate::error::DbError;
use crate::models::organization::{CreateOrganization, Organization, UpdateOrganization};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, industry, address, phone, email, \
                       subscription_plan, is_active, created_at, updated_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Provision a new organization, deriving its slug from the name when
    /// none is supplied.
    ///
    /// A slug already taken by another organization yields
    /// [`DbError::Conflict`].
    pub async fn create(pool: &PgPool, input: &CreateOrganization) -> Result<Organization, DbError> {
        let name = normalize_name(&input.name)?;
        let explicit_slug = normalize_optional(input.slug.as_deref());
        if let Some(slug) = &explicit_slug {
            validate_slug(slug)?;
        }
        let slug = resolve_slug(explicit_slug.as_deref(), &name);
        let email = normalize_email(input.email.as_deref())?;
        let plan = input.subscription_plan.unwrap_or_default();

        let query = format!(
            "INSERT INTO organizations
                (name, slug, industry, address, phone, email, subscription_plan)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let org = sqlx::query_as::<_, Organization>(&query)
            .bind(&name)
            .bind(&slug)
            .bind(normalize_optional(input.industry.as_deref()))
            .bind(normalize_optional(input.address.as_deref()))
            .bind(normalize_optional(input.phone.as_deref()))
            .bind(email)
            .bind(plan.as_str())
            .fetch_one(pool)
            .await?;

        tracing::debug!(id = org.id, slug = %org.slug, "Organization created");
        Ok(org)
    }

    /// Find an organization by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an organization by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE slug = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List organizations ordered by name, optionally including disabled ones.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Organization>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organizations
             WHERE ($1 OR is_active = true)
             ORDER BY name ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin update. Returns `None` if no organization has `id`.
    ///
    /// The slug is only changed when `input.slug` is set; a new name alone
    /// leaves it untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganization,
    ) -> Result<Option<Organization>, DbError> {
        let name = input.name.as_deref().map(normalize_name).transpose()?;
        let slug = normalize_optional(input.slug.as_deref());
        if let Some(slug) = &slug {
            validate_slug(slug)?;
        }
        let email = normalize_email(input.email.as_deref())?;

        let query = format!(
            "UPDATE organizations SET
                name = COALESCE($1, name),
                slug = COALESCE($2, slug),
                industry = COALESCE($3, industry),
                address = COALESCE($4, address),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                subscription_plan = COALESCE($7, subscription_plan)
             WHERE id = $8
             RETURNING {COLUMNS}"
        );
        let org = sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .bind(slug)
            .bind(normalize_optional(input.industry.as_deref()))
            .bind(normalize_optional(input.address.as_deref()))
            .bind(normalize_optional(input.phone.as_deref()))
            .bind(email)
            .bind(input.subscription_plan.map(|p| p.as_str()))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(org)
    }

    /// Enable or soft-disable an organization. Returns `true` if a row changed.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE organizations SET is_active = $2 WHERE id = $1 AND is_active <> $2",
        )
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
