use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::users::models::{ProfileFields, SellerSummary, UserProfile};

/// Read-only lookup of sellers shown on listings.
#[async_trait]
pub trait SellerDirectory: Send + Sync {
    /// Summaries for the ids that still exist; missing ids are simply absent
    async fn find_many(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, SellerSummary>>;
}

/// The caller's own profile row.
#[async_trait]
pub trait UserProfileStore: Send + Sync {
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>>;

    /// Overwrites the editable columns; `None` when the account is gone
    async fn update_profile(&self, id: Uuid, fields: &ProfileFields)
        -> Result<Option<UserProfile>>;
}

const PROFILE_COLUMNS: &str = "id, name, email, phone, location, avatar, created_at, updated_at";

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SellerDirectory for PgUserDirectory {
    async fn find_many(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, SellerSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sellers = sqlx::query_as::<_, SellerSummary>(
            "SELECT id, name, email, phone FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(sellers.into_iter().map(|s| (s.id, s)).collect())
    }
}

#[async_trait]
impl UserProfileStore for PgUserDirectory {
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            r#"
            UPDATE users
            SET name = $2, phone = $3, location = $4, avatar = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.phone)
        .bind(&fields.location)
        .bind(&fields.avatar)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
