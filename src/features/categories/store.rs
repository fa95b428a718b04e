use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Read access to the category table.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Every category, active or not, in insertion order.
    async fn load_all(&self) -> Result<Vec<Category>>;
}

/// `seq` is the insertion order; `created_at` ties within a batch insert.
const LOAD_ALL_SQL: &str = r#"
    SELECT id, parent_id, name, slug, description, icon, color, display_order,
           kind, is_active, created_at, updated_at
    FROM categories
    ORDER BY seq
"#;

pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn load_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(LOAD_ALL_SQL)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load categories: {:?}", e);
            AppError::Database(e)
        })
    }
}
