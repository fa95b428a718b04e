use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{ListingPage, ListingStore};
use crate::core::error::Result;
use crate::features::listings::filter::{ListingFilter, StatusScope};
use crate::features::listings::models::{
    Contact, DetailBlock, ExpireIn, ListingContent, ListingRecord, ListingStatus, Location,
};
use crate::shared::validation::escape_like;

const LISTING_COLUMNS: &str = "id, title, description, price, category_id, city, state, zip_code, \
     images, seller_id, contact_email, contact_phone, details, expire_in, status, featured, \
     views, created_at, updated_at";

/// Must stay identical to the expression behind `idx_listings_search`
const SEARCH_DOCUMENT: &str = "to_tsvector('english', title || ' ' || description)";

#[derive(Debug, FromRow)]
struct ListingRow {
    id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    category_id: Uuid,
    city: String,
    state: String,
    zip_code: Option<String>,
    images: Vec<String>,
    seller_id: Uuid,
    contact_email: String,
    contact_phone: Option<String>,
    details: Json<DetailBlock>,
    expire_in: ExpireIn,
    status: ListingStatus,
    featured: bool,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListingRow> for ListingRecord {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category_id: row.category_id,
            location: Location {
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
            },
            images: row.images,
            seller_id: row.seller_id,
            contact: Contact {
                email: row.contact_email,
                phone: row.contact_phone,
            },
            details: row.details.0,
            expire_in: row.expire_in,
            status: row.status,
            featured: row.featured,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
    qb.push(" WHERE TRUE");

    if let StatusScope::Only(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(seller_id) = filter.seller_id {
        qb.push(" AND seller_id = ").push_bind(seller_id);
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(city) = &filter.city {
        qb.push(" AND city ILIKE ")
            .push_bind(format!("%{}%", escape_like(city)));
    }
    if let Some(state) = &filter.state {
        qb.push(" AND state ILIKE ")
            .push_bind(format!("%{}%", escape_like(state)));
    }
    if let Some(min) = filter.price.min {
        qb.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.price.max {
        qb.push(" AND price <= ").push_bind(max);
    }
    if !filter.search_terms.is_empty() {
        // Terms are alphanumeric only, so joining them cannot produce tsquery syntax
        qb.push(format!(" AND {} @@ to_tsquery('english', ", SEARCH_DOCUMENT))
            .push_bind(filter.search_terms.join(" | "))
            .push(")");
    }
}

fn count_query(filter: &ListingFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM listings");
    push_conditions(&mut qb, filter);
    qb
}

fn select_query(filter: &ListingFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM listings", LISTING_COLUMNS));
    push_conditions(&mut qb, filter);

    let direction = filter.sort.direction.as_sql();
    qb.push(format!(
        " ORDER BY {} {}, id {}",
        filter.sort.field.as_sql(),
        direction,
        direction
    ));
    qb.push(" LIMIT ")
        .push_bind(filter.page.limit)
        .push(" OFFSET ")
        .push_bind(filter.page.offset());
    qb
}

pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn insert(&self, seller_id: Uuid, content: &ListingContent) -> Result<ListingRecord> {
        let sql = format!(
            r#"
            INSERT INTO listings (
                id, title, description, price, category_id, city, state, zip_code, images,
                seller_id, contact_email, contact_phone, details, expire_in, status, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            LISTING_COLUMNS
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(&content.title)
            .bind(&content.description)
            .bind(content.price)
            .bind(content.category_id)
            .bind(&content.location.city)
            .bind(&content.location.state)
            .bind(&content.location.zip_code)
            .bind(&content.images)
            .bind(seller_id)
            .bind(&content.contact.email)
            .bind(&content.contact.phone)
            .bind(Json(&content.details))
            .bind(content.expire_in)
            .bind(ListingStatus::Active)
            .bind(content.featured)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ListingRecord>> {
        let sql = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<i64>> {
        let views = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE listings
            SET views = views + 1
            WHERE id = $1 AND status <> 'deleted'
            RETURNING views
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(views)
    }

    async fn update(
        &self,
        id: Uuid,
        content: &ListingContent,
        status: ListingStatus,
    ) -> Result<Option<ListingRecord>> {
        let sql = format!(
            r#"
            UPDATE listings
            SET title = $2, description = $3, price = $4, category_id = $5,
                city = $6, state = $7, zip_code = $8, images = $9,
                contact_email = $10, contact_phone = $11, details = $12,
                expire_in = $13, status = $14, featured = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            LISTING_COLUMNS
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .bind(&content.title)
            .bind(&content.description)
            .bind(content.price)
            .bind(content.category_id)
            .bind(&content.location.city)
            .bind(&content.location.state)
            .bind(&content.location.zip_code)
            .bind(&content.images)
            .bind(&content.contact.email)
            .bind(&content.contact.phone)
            .bind(Json(&content.details))
            .bind(content.expire_in)
            .bind(status)
            .bind(content.featured)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn set_status(&self, id: Uuid, status: ListingStatus) -> Result<Option<ListingRecord>> {
        let sql = format!(
            "UPDATE listings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            LISTING_COLUMNS
        );
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, filter: &ListingFilter) -> Result<ListingPage> {
        let total: i64 = count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<ListingRow> = select_query(filter)
            .build_query_as::<ListingRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(total, returned = rows.len(), "Listing query executed");

        Ok(ListingPage {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }
}
