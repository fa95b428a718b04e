//! Persistence seam for listings.

#[cfg(test)]
pub mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::listings::filter::ListingFilter;
use crate::features::listings::models::{ListingContent, ListingRecord, ListingStatus};

pub use postgres::PgListingStore;

/// One page of matches plus the total match count
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub items: Vec<ListingRecord>,
    pub total: i64,
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Persist a new active listing with zero views
    async fn insert(&self, seller_id: Uuid, content: &ListingContent) -> Result<ListingRecord>;

    /// Read a listing without side effects
    async fn fetch(&self, id: Uuid) -> Result<Option<ListingRecord>>;

    /// Atomically bump the view counter of a non-deleted listing and return
    /// the new count. `None` when there is no such listing.
    async fn record_view(&self, id: Uuid) -> Result<Option<i64>>;

    /// Overwrite content and status. Owner, views and `created_at` are untouched.
    async fn update(
        &self,
        id: Uuid,
        content: &ListingContent,
        status: ListingStatus,
    ) -> Result<Option<ListingRecord>>;

    async fn set_status(&self, id: Uuid, status: ListingStatus) -> Result<Option<ListingRecord>>;

    /// Remove the row; `false` when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn query(&self, filter: &ListingFilter) -> Result<ListingPage>;
}
