use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ListingPage, ListingStore};
use crate::core::error::Result;
use crate::features::listings::filter::{ListingFilter, SortDirection, SortField, StatusScope};
use crate::features::listings::models::{ListingContent, ListingRecord, ListingStatus};
use crate::shared::validation::search_terms;

/// Listing store backed by a vector, mirroring the SQL semantics closely
/// enough for service and route tests.
#[derive(Default)]
pub struct InMemoryListingStore {
    rows: RwLock<Vec<ListingRecord>>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record, bypassing the service
    pub async fn seed(&self, record: ListingRecord) {
        self.rows.write().await.push(record);
    }

    pub async fn snapshot(&self, id: Uuid) -> Option<ListingRecord> {
        self.rows.read().await.iter().find(|r| r.id == id).cloned()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(record: &ListingRecord, filter: &ListingFilter) -> bool {
    if let StatusScope::Only(status) = filter.status {
        if record.status != status {
            return false;
        }
    }
    if filter.seller_id.is_some_and(|id| id != record.seller_id) {
        return false;
    }
    if filter.category_id.is_some_and(|id| id != record.category_id) {
        return false;
    }
    if let Some(city) = &filter.city {
        if !contains_ci(&record.location.city, city) {
            return false;
        }
    }
    if let Some(state) = &filter.state {
        if !contains_ci(&record.location.state, state) {
            return false;
        }
    }
    if !filter.price.contains(record.price) {
        return false;
    }
    if !filter.search_terms.is_empty() {
        let words = search_terms(&format!("{} {}", record.title, record.description));
        if !filter.search_terms.iter().any(|t| words.contains(t)) {
            return false;
        }
    }
    true
}

fn compare(a: &ListingRecord, b: &ListingRecord, field: SortField) -> Ordering {
    let primary = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Views => a.views.cmp(&b.views),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn insert(&self, seller_id: Uuid, content: &ListingContent) -> Result<ListingRecord> {
        let now = Utc::now();
        let record = ListingRecord {
            id: Uuid::now_v7(),
            title: content.title.clone(),
            description: content.description.clone(),
            price: content.price,
            category_id: content.category_id,
            location: content.location.clone(),
            images: content.images.clone(),
            seller_id,
            contact: content.contact.clone(),
            details: content.details.clone(),
            expire_in: content.expire_in,
            status: ListingStatus::Active,
            featured: content.featured,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ListingRecord>> {
        Ok(self.snapshot(id).await)
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<i64>> {
        let mut rows = self.rows.write().await;
        Ok(rows
            .iter_mut()
            .find(|r| r.id == id && r.status != ListingStatus::Deleted)
            .map(|r| {
                r.views += 1;
                r.views
            }))
    }

    async fn update(
        &self,
        id: Uuid,
        content: &ListingContent,
        status: ListingStatus,
    ) -> Result<Option<ListingRecord>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|r| r.id == id).map(|r| {
            r.title = content.title.clone();
            r.description = content.description.clone();
            r.price = content.price;
            r.category_id = content.category_id;
            r.location = content.location.clone();
            r.images = content.images.clone();
            r.contact = content.contact.clone();
            r.details = content.details.clone();
            r.expire_in = content.expire_in;
            r.featured = content.featured;
            r.status = status;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn set_status(&self, id: Uuid, status: ListingStatus) -> Result<Option<ListingRecord>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|r| r.id == id).map(|r| {
            r.status = status;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn query(&self, filter: &ListingFilter) -> Result<ListingPage> {
        let rows = self.rows.read().await;
        let mut matched: Vec<ListingRecord> =
            rows.iter().filter(|r| matches(r, filter)).cloned().collect();

        matched.sort_by(|a, b| {
            let ordering = compare(a, b, filter.sort.field);
            match filter.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = matched.len() as i64;
        let items = matched
            .into_iter()
            .skip(filter.page.offset() as usize)
            .take(filter.page.limit as usize)
            .collect();

        Ok(ListingPage { items, total })
    }
}
