use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::HeaderValue;
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::JwtValidator;
use crate::features::categories::models::Category;
use crate::features::categories::{CategoryService, CategoryStore};
use crate::features::listings::dtos::{ContactDto, CreateListingDto, LocationDto};
use crate::features::listings::models::{
    Contact, DetailBlock, ExpireIn, ListingRecord, ListingStatus, Location,
};
use crate::features::listings::store::memory::InMemoryListingStore;
use crate::features::listings::ListingService;
use crate::features::users::directory::{SellerDirectory, UserProfileStore};
use crate::features::users::models::{ProfileFields, SellerSummary, UserProfile};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

// =============================================================================
// CATEGORIES
// =============================================================================

pub fn category(name: &str, slug: &str, parent_id: Option<Uuid>, display_order: i32) -> Category {
    let now = Utc::now();
    Category {
        id: Uuid::new_v4(),
        parent_id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        icon: None,
        color: None,
        display_order,
        kind: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Five active topics with a handful of children each, plus one inactive
/// node under Electronics. No node carries a kind tag.
pub fn sample_categories() -> Vec<Category> {
    let vehicles = category("Vehicles", "vehicles", None, 1);
    let for_rent = category("For Rent", "for-rent", None, 2);
    let jobs = category("Jobs", "jobs", None, 3);
    let pets = category("Pets", "pets", None, 4);
    let electronics = category("Electronics", "electronics", None, 5);

    let mut archived = category("Archived", "archived", Some(electronics.id), 0);
    archived.is_active = false;

    let children = vec![
        category("Cars", "cars", Some(vehicles.id), 0),
        category("Motorcycles", "motorcycles", Some(vehicles.id), 0),
        category("Sedans", "sedans", Some(vehicles.id), 0),
        category("Trucks", "trucks", Some(vehicles.id), 0),
        category("Apartments", "apartments", Some(for_rent.id), 0),
        category("Houses", "houses", Some(for_rent.id), 0),
        category("Full-time", "full-time", Some(jobs.id), 0),
        category("Dogs", "dogs", Some(pets.id), 0),
        category("Cats", "cats", Some(pets.id), 0),
        category("Phones", "phones", Some(electronics.id), 0),
        archived,
    ];

    let mut all = vec![vehicles, for_rent, jobs, pets, electronics];
    all.extend(children);
    all
}

/// Category store over a fixed snapshot that counts its loads
pub struct StaticCategoryStore {
    categories: Vec<Category>,
    loads: AtomicUsize,
}

impl StaticCategoryStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryStore for StaticCategoryStore {
    async fn load_all(&self) -> Result<Vec<Category>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.categories.clone())
    }
}

pub fn category_service() -> Arc<CategoryService> {
    let store = Arc::new(StaticCategoryStore::new(sample_categories()));
    Arc::new(CategoryService::new(store, Duration::from_secs(300)))
}

// =============================================================================
// USERS
// =============================================================================

pub fn user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        email: Some(SafeEmail().fake()),
    }
}

pub fn seller(id: Uuid) -> SellerSummary {
    SellerSummary {
        id,
        name: Name().fake(),
        email: SafeEmail().fake(),
        phone: None,
    }
}

#[derive(Default)]
pub struct StaticSellerDirectory {
    sellers: HashMap<Uuid, SellerSummary>,
}

impl StaticSellerDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(sellers: Vec<SellerSummary>) -> Self {
        Self {
            sellers: sellers.into_iter().map(|s| (s.id, s)).collect(),
        }
    }
}

#[async_trait]
impl SellerDirectory for StaticSellerDirectory {
    async fn find_many(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, SellerSummary>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.sellers.get(id).map(|s| (*id, s.clone())))
            .collect())
    }
}

pub fn profile(id: Uuid) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id,
        name: Name().fake(),
        email: SafeEmail().fake(),
        phone: None,
        location: None,
        avatar: None,
        created_at: now,
        updated_at: now,
    }
}

/// Profile rows held in memory
#[derive(Default)]
pub struct InMemoryUserProfiles {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryUserProfiles {
    pub fn with(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles.into_iter().map(|p| (p.id, p)).collect()),
        }
    }
}

#[async_trait]
impl UserProfileStore for InMemoryUserProfiles {
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<UserProfile>> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&id).map(|p| {
            p.name = fields.name.clone();
            p.phone = fields.phone.clone();
            p.location = fields.location.clone();
            p.avatar = fields.avatar.clone();
            p.updated_at = Utc::now();
            p.clone()
        }))
    }
}

pub fn jwt_validator() -> Arc<JwtValidator> {
    Arc::new(JwtValidator::new(&AuthConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        issuer: None,
        jwt_leeway: Duration::from_secs(0),
    }))
}

/// `Authorization` header value carrying a signed token for `user_id`
pub fn bearer(user_id: Uuid) -> HeaderValue {
    let claims = serde_json::json!({
        "userId": user_id.to_string(),
        "exp": (Utc::now().timestamp() + 3600) as u64,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

// =============================================================================
// LISTINGS
// =============================================================================

pub fn listing_service(
    store: Arc<InMemoryListingStore>,
    sellers: StaticSellerDirectory,
) -> ListingService {
    ListingService::new(store, category_service(), Arc::new(sellers))
}

/// A draft that passes validation for the given category token
pub fn listing_draft(category: &str, price: i64) -> CreateListingDto {
    CreateListingDto {
        title: "Listing in good shape".to_string(),
        description: Sentence(6..10).fake::<String>() + " Pickup only, no trades.",
        price: Some(Decimal::from(price)),
        category: category.to_string(),
        location: LocationDto {
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: None,
        },
        images: vec!["https://cdn.example.com/listing.jpg".to_string()],
        contact: ContactDto {
            email: SafeEmail().fake(),
            phone: None,
        },
        details: DetailBlock::None,
        expire_in: ExpireIn::default(),
        featured: false,
    }
}

/// An active stored listing, for seeding a store directly
pub fn seeded_listing(category_id: Uuid, seller_id: Uuid, price: i64) -> ListingRecord {
    let now = Utc::now();
    ListingRecord {
        id: Uuid::now_v7(),
        title: format!("Listing priced {}", price),
        description: "Seeded listing used by tests, nothing to see here".to_string(),
        price: Decimal::from(price),
        category_id,
        location: Location {
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: None,
        },
        images: Vec::new(),
        seller_id,
        contact: Contact {
            email: "seller@example.com".to_string(),
            phone: None,
        },
        details: DetailBlock::None,
        expire_in: ExpireIn::default(),
        status: ListingStatus::Active,
        featured: false,
        views: 0,
        created_at: now,
        updated_at: now,
    }
}
