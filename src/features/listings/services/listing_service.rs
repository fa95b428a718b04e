use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{flatten_validation_errors, AppError, FieldError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::schema::{detail_kind, detail_kind_for, DetailKind};
use crate::features::categories::{CategoryService, CategoryTree};
use crate::features::listings::dtos::{
    CreateListingDto, DeleteMode, ListingPageDto, ListingQueryParams, ListingResponseDto,
    MyListingsQuery, UpdateListingDto,
};
use crate::features::listings::filter::{FilterEngine, ListingFilter};
use crate::features::listings::models::{ListingContent, ListingRecord, ListingStatus};
use crate::features::listings::store::ListingStore;
use crate::features::users::directory::SellerDirectory;
use crate::shared::reference::Reference;
use crate::shared::types::PageInfo;

/// How strictly a draft's category is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryCheck {
    /// Must exist and be active
    Active,
    /// Must exist; an inactive category already on the listing may stay
    Existing,
}

pub struct ListingService {
    store: Arc<dyn ListingStore>,
    categories: Arc<CategoryService>,
    sellers: Arc<dyn SellerDirectory>,
}

impl ListingService {
    pub fn new(
        store: Arc<dyn ListingStore>,
        categories: Arc<CategoryService>,
        sellers: Arc<dyn SellerDirectory>,
    ) -> Self {
        Self {
            store,
            categories,
            sellers,
        }
    }

    /// Validate a draft and resolve its category. Every failing field is reported at once.
    fn build_content(
        &self,
        draft: CreateListingDto,
        tree: &CategoryTree,
        check: CategoryCheck,
    ) -> Result<ListingContent> {
        let draft = draft.normalized();
        let mut errors = match draft.validate() {
            Ok(()) => Vec::new(),
            Err(e) => flatten_validation_errors(&e),
        };

        let category = match tree.resolve_ref(&draft.category) {
            Some(c) if c.is_active || check == CategoryCheck::Existing => Some(c),
            Some(_) => {
                errors.push(FieldError::new("category", "Category is not active"));
                None
            }
            None => {
                errors.push(FieldError::new("category", "Valid category is required"));
                None
            }
        };

        let (category, price) = match (category, draft.price) {
            (Some(category), Some(price)) if errors.is_empty() => (category, price),
            _ => {
                errors.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
                return Err(AppError::InvalidFields(errors));
            }
        };

        let expected = detail_kind(category, tree.topic_of(category.id));
        let sent = draft.details.kind();
        if sent != expected && sent != DetailKind::None {
            tracing::debug!(
                category = %category.slug,
                %expected,
                %sent,
                "Listing detail block does not match its category"
            );
        }

        Ok(ListingContent {
            location: draft.location(),
            contact: draft.contact(),
            title: draft.title,
            description: draft.description,
            price,
            category_id: category.id,
            images: draft.images,
            details: draft.details,
            expire_in: draft.expire_in,
            featured: draft.featured,
        })
    }

    /// Attach category and seller references to stored records
    async fn to_responses(
        &self,
        records: Vec<ListingRecord>,
        tree: &CategoryTree,
    ) -> Result<Vec<ListingResponseDto>> {
        let mut seller_ids: Vec<Uuid> = records.iter().map(|r| r.seller_id).collect();
        seller_ids.sort_unstable();
        seller_ids.dedup();
        let sellers = self.sellers.find_many(&seller_ids).await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let detail_schema = detail_kind_for(tree, record.category_id);
                let category_ref =
                    Reference::from_lookup(record.category_id, tree.get(record.category_id));
                let seller_ref = Reference::from_lookup(
                    record.seller_id,
                    sellers.get(&record.seller_id).cloned(),
                );
                if category_ref.is_dangling() || seller_ref.is_dangling() {
                    tracing::debug!(listing_id = %record.id, "Listing has a dangling reference");
                }

                ListingResponseDto::new(
                    record,
                    category_ref.into(),
                    seller_ref.into(),
                    detail_schema,
                )
            })
            .collect())
    }

    async fn to_response(&self, record: ListingRecord) -> Result<ListingResponseDto> {
        let tree = self.categories.tree().await?;
        let mut responses = self.to_responses(vec![record], &tree).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::Internal("Listing response was not built".to_string()))
    }

    async fn page(&self, filter: &ListingFilter, tree: &CategoryTree) -> Result<ListingPageDto> {
        let page = self.store.query(filter).await?;
        let ads = self.to_responses(page.items, tree).await?;
        Ok(ListingPageDto {
            ads,
            pagination: PageInfo::new(filter.page, page.total),
        })
    }

    /// Public listing search over active listings
    pub async fn browse(&self, params: &ListingQueryParams) -> Result<ListingPageDto> {
        let tree = self.categories.tree().await?;
        let filter = FilterEngine::browse(params, &tree)?;
        self.page(&filter, &tree).await
    }

    /// Listings owned by `owner`, newest first
    pub async fn list_by_owner(
        &self,
        owner: &AuthenticatedUser,
        params: &MyListingsQuery,
    ) -> Result<ListingPageDto> {
        let tree = self.categories.tree().await?;
        let filter = FilterEngine::owner(owner.user_id, params)?;
        self.page(&filter, &tree).await
    }

    pub async fn create(
        &self,
        owner: &AuthenticatedUser,
        draft: CreateListingDto,
    ) -> Result<ListingResponseDto> {
        let tree = self.categories.tree().await?;
        let content = self.build_content(draft, &tree, CategoryCheck::Active)?;
        let record = self.store.insert(owner.user_id, &content).await?;

        tracing::info!(listing_id = %record.id, seller_id = %owner.user_id, "Listing created");
        self.to_response(record).await
    }

    /// Stored listing in any status, with no side effects
    pub async fn fetch(&self, id: Uuid) -> Result<ListingRecord> {
        self.store
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ad not found".to_string()))
    }

    /// Count one view of a non-deleted listing and return the new total
    pub async fn record_view(&self, id: Uuid) -> Result<i64> {
        self.store
            .record_view(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ad not found".to_string()))
    }

    /// Public detail view. Soft-deleted listings are hidden and every
    /// successful read counts as a view.
    pub async fn get(&self, id: Uuid) -> Result<ListingResponseDto> {
        let mut record = self.fetch(id).await?;
        if record.status == ListingStatus::Deleted {
            return Err(AppError::NotFound("Ad not found".to_string()));
        }
        record.views = self.record_view(id).await?;
        self.to_response(record).await
    }

    fn ensure_owner(owner: &AuthenticatedUser, record: &ListingRecord, action: &str) -> Result<()> {
        if owner.owns(record.seller_id) {
            return Ok(());
        }
        tracing::warn!(
            listing_id = %record.id,
            user_id = %owner.user_id,
            "Rejected {} by non-owner",
            action
        );
        Err(AppError::Forbidden(format!("Not authorized to {} this ad", action)))
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner: &AuthenticatedUser,
        patch: UpdateListingDto,
    ) -> Result<ListingResponseDto> {
        let record = self.fetch(id).await?;
        Self::ensure_owner(owner, &record, "update")?;

        let check = match &patch.category {
            Some(_) => CategoryCheck::Active,
            None => CategoryCheck::Existing,
        };
        let status = patch.status.unwrap_or(record.status);
        let mut draft = CreateListingDto::from_record(&record);
        patch.apply_to(&mut draft);

        let tree = self.categories.tree().await?;
        let content = self.build_content(draft, &tree, check)?;
        let updated = self
            .store
            .update(id, &content, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Ad not found".to_string()))?;

        tracing::info!(listing_id = %id, "Listing updated");
        self.to_response(updated).await
    }

    pub async fn delete(&self, id: Uuid, owner: &AuthenticatedUser, mode: DeleteMode) -> Result<()> {
        let record = self.fetch(id).await?;
        Self::ensure_owner(owner, &record, "delete")?;

        let removed = match mode {
            DeleteMode::Hard => self.store.delete(id).await?,
            DeleteMode::Soft => self
                .store
                .set_status(id, ListingStatus::Deleted)
                .await?
                .is_some(),
        };
        if !removed {
            return Err(AppError::NotFound("Ad not found".to_string()));
        }

        tracing::info!(listing_id = %id, ?mode, "Listing deleted");
        Ok(())
    }
}
