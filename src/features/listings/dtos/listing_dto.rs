use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::categories::models::Category;
use crate::features::categories::schema::DetailKind;
use crate::features::listings::models::{
    validate_detail_block, Contact, DetailBlock, ExpireIn, ListingRecord, ListingStatus, Location,
};
use crate::features::users::models::SellerSummary;
use crate::shared::constants::{LISTING_PRICE_SCALE, MAX_LISTING_IMAGES, MAX_LISTING_PRICE};
use crate::shared::reference::Reference;
use crate::shared::types::PageInfo;

// =============================================================================
// REQUEST DTOS
// =============================================================================

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price").with_message("Price cannot be negative".into()));
    }
    if *price >= Decimal::from(MAX_LISTING_PRICE) {
        return Err(ValidationError::new("price")
            .with_message(format!("Price must be less than {}", MAX_LISTING_PRICE).into()));
    }
    // 1.50 and 1.500 are the same amount; 0.005 is not storable
    if price.normalize().scale() > LISTING_PRICE_SCALE {
        return Err(ValidationError::new("price").with_message(
            format!("Price must have at most {} decimal places", LISTING_PRICE_SCALE).into(),
        ));
    }
    Ok(())
}

fn validate_images(images: &Vec<String>) -> Result<(), ValidationError> {
    if images.len() > MAX_LISTING_IMAGES {
        return Err(ValidationError::new("images")
            .with_message(format!("At most {} images are allowed", MAX_LISTING_IMAGES).into()));
    }
    let all_urls = images.iter().all(|image| {
        let image = image.trim();
        (image.starts_with("http://") || image.starts_with("https://"))
            && image.len() > "https://".len()
            && !image.contains(char::is_whitespace)
    });
    if !all_urls {
        return Err(
            ValidationError::new("images").with_message("Images must be http(s) URLs".into())
        );
    }
    Ok(())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,
    #[validate(length(max = 20, message = "Zip code must be at most 20 characters"))]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactDto {
    #[serde(default)]
    #[validate(email(message = "Valid contact email is required"))]
    pub email: String,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
}

/// Request DTO for creating a listing
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingDto {
    #[serde(default)]
    #[validate(length(min = 5, max = 100, message = "Title must be 5-100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(
        min = 20,
        max = 1000,
        message = "Description must be 20-1000 characters"
    ))]
    pub description: String,
    #[validate(
        required(message = "Price is required"),
        custom(function = "validate_price")
    )]
    #[schema(value_type = Option<f64>, example = 18500)]
    pub price: Option<Decimal>,
    /// Category id, name or slug
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    #[validate(nested)]
    pub location: LocationDto,
    #[serde(default)]
    #[validate(custom(function = "validate_images"))]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub contact: ContactDto,
    #[serde(default)]
    #[validate(custom(function = "validate_detail_block"))]
    pub details: DetailBlock,
    #[serde(default)]
    pub expire_in: ExpireIn,
    #[serde(default)]
    pub featured: bool,
}

impl CreateListingDto {
    /// Trim free-text fields and drop blank optionals before validation
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.category = self.category.trim().to_string();
        self.location.city = self.location.city.trim().to_string();
        self.location.state = self.location.state.trim().to_string();
        self.location.zip_code = blank_to_none(self.location.zip_code);
        self.contact.email = self.contact.email.trim().to_string();
        self.contact.phone = blank_to_none(self.contact.phone);
        self.images = self.images.into_iter().map(|i| i.trim().to_string()).collect();
        self
    }

    /// Draft holding a stored listing's current content, used as the merge base for updates
    pub fn from_record(record: &ListingRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            price: Some(record.price),
            category: record.category_id.to_string(),
            location: LocationDto {
                city: record.location.city.clone(),
                state: record.location.state.clone(),
                zip_code: record.location.zip_code.clone(),
            },
            images: record.images.clone(),
            contact: ContactDto {
                email: record.contact.email.clone(),
                phone: record.contact.phone.clone(),
            },
            details: record.details.clone(),
            expire_in: record.expire_in,
            featured: record.featured,
        }
    }

    pub fn location(&self) -> Location {
        Location {
            city: self.location.city.clone(),
            state: self.location.state.clone(),
            zip_code: self.location.zip_code.clone(),
        }
    }

    pub fn contact(&self) -> Contact {
        Contact {
            email: self.contact.email.clone(),
            phone: self.contact.phone.clone(),
        }
    }
}

/// Request DTO for updating a listing. Absent fields keep their stored value;
/// `location` and `contact` are replaced as a whole.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub location: Option<LocationDto>,
    pub images: Option<Vec<String>>,
    pub contact: Option<ContactDto>,
    pub details: Option<DetailBlock>,
    pub expire_in: Option<ExpireIn>,
    pub status: Option<ListingStatus>,
    pub featured: Option<bool>,
}

impl UpdateListingDto {
    /// Overlay the patch onto `base`
    pub fn apply_to(self, base: &mut CreateListingDto) {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(description) = self.description {
            base.description = description;
        }
        if let Some(price) = self.price {
            base.price = Some(price);
        }
        if let Some(category) = self.category {
            base.category = category;
        }
        if let Some(location) = self.location {
            base.location = location;
        }
        if let Some(images) = self.images {
            base.images = images;
        }
        if let Some(contact) = self.contact {
            base.contact = contact;
        }
        if let Some(details) = self.details {
            base.details = details;
        }
        if let Some(expire_in) = self.expire_in {
            base.expire_in = expire_in;
        }
        if let Some(featured) = self.featured {
            base.featured = featured;
        }
    }
}

/// Raw browse query. Kept as strings so malformed numbers surface as field
/// errors instead of a generic query rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingQueryParams {
    /// Category id, name or slug
    pub category: Option<String>,
    /// Case-insensitive substring of the city
    pub city: Option<String>,
    /// Case-insensitive substring of the state
    pub state: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Full-text search over title and description
    pub search: Option<String>,
    /// createdAt, updatedAt, price, title or views (default createdAt)
    pub sort_by: Option<String>,
    /// asc or desc (default desc)
    pub sort_order: Option<String>,
    /// Page number (default 1)
    pub page: Option<String>,
    /// Page size (default 12, max 100)
    pub limit: Option<String>,
}

/// Query for the caller's own listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyListingsQuery {
    /// active, sold, expired, deleted or all (default active)
    pub status: Option<String>,
    /// Page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10, max 100)
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Remove the row
    #[default]
    Hard,
    /// Keep the row with status `deleted`
    Soft,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteListingQuery {
    #[serde(default)]
    #[param(inline)]
    pub mode: DeleteMode,
}

// =============================================================================
// RESPONSE DTOS
// =============================================================================

/// Category reference on a listing. `resolved` is false when the category no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRefDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub resolved: bool,
}

impl From<Reference<&Category>> for CategoryRefDto {
    fn from(reference: Reference<&Category>) -> Self {
        match reference {
            Reference::Resolved(c) => Self {
                id: c.id,
                name: Some(c.name.clone()),
                slug: Some(c.slug.clone()),
                resolved: true,
            },
            Reference::Dangling(id) => Self {
                id,
                name: None,
                slug: None,
                resolved: false,
            },
        }
    }
}

/// Seller reference on a listing. `resolved` is false when the account no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SellerRefDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resolved: bool,
}

impl From<Reference<SellerSummary>> for SellerRefDto {
    fn from(reference: Reference<SellerSummary>) -> Self {
        match reference {
            Reference::Resolved(s) => Self {
                id: s.id,
                name: Some(s.name),
                email: Some(s.email),
                phone: s.phone,
                resolved: true,
            },
            Reference::Dangling(id) => Self {
                id,
                name: None,
                email: None,
                phone: None,
                resolved: false,
            },
        }
    }
}

/// Response DTO for a listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: CategoryRefDto,
    pub location: Location,
    pub images: Vec<String>,
    pub seller: SellerRefDto,
    pub contact: Contact,
    pub details: DetailBlock,
    /// Detail block the listing's category expects
    pub detail_schema: DetailKind,
    pub expire_in: ExpireIn,
    pub status: ListingStatus,
    pub featured: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingResponseDto {
    pub fn new(
        record: ListingRecord,
        category: CategoryRefDto,
        seller: SellerRefDto,
        detail_schema: DetailKind,
    ) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            price: record.price,
            category,
            location: record.location,
            images: record.images,
            seller,
            contact: record.contact,
            details: record.details,
            detail_schema,
            expire_in: record.expire_in,
            status: record.status,
            featured: record.featured,
            views: record.views,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// One page of listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingPageDto {
    pub ads: Vec<ListingResponseDto>,
    pub pagination: PageInfo,
}
