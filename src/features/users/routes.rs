use crate::features::listings::ListingService;
use crate::features::users::handlers;
use crate::features::users::services::UserProfileService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Per-user views. Callers must mount these behind the JWT middleware.
pub fn routes(listings: Arc<ListingService>, profiles: Arc<UserProfileService>) -> Router {
    let my_ads = Router::new()
        .route("/api/users/my-ads", get(handlers::list_my_ads))
        .with_state(listings);

    let profile = Router::new()
        .route(
            "/api/users/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .with_state(profiles);

    my_ads.merge(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::middleware;
    use crate::features::listings::models::ListingStatus;
    use crate::features::listings::store::memory::InMemoryListingStore;
    use crate::shared::test_helpers::{
        bearer, jwt_validator, listing_service, profile, seeded_listing, InMemoryUserProfiles,
        StaticSellerDirectory,
    };
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use serde_json::Value;
    use uuid::Uuid;

    fn server(listings: Arc<ListingService>, profiles: InMemoryUserProfiles) -> TestServer {
        let profiles = Arc::new(UserProfileService::new(Arc::new(profiles)));
        let router = routes(listings, profiles).route_layer(
            axum::middleware::from_fn_with_state(jwt_validator(), middleware::auth_middleware),
        );
        TestServer::new(router).unwrap()
    }

    async fn server_with_listings(owner: Uuid) -> TestServer {
        let store = Arc::new(InMemoryListingStore::new());
        let category = Uuid::new_v4();
        for price in [10, 20, 30] {
            store.seed(seeded_listing(category, owner, price)).await;
        }
        let mut sold = seeded_listing(category, owner, 40);
        sold.status = ListingStatus::Sold;
        store.seed(sold).await;
        store
            .seed(seeded_listing(category, Uuid::new_v4(), 50))
            .await;

        let service = Arc::new(listing_service(store, StaticSellerDirectory::empty()));
        server(service, InMemoryUserProfiles::default())
    }

    fn server_with_profile(owner: Uuid) -> TestServer {
        let listings = Arc::new(listing_service(
            Arc::new(InMemoryListingStore::new()),
            StaticSellerDirectory::empty(),
        ));
        server(listings, InMemoryUserProfiles::with(vec![profile(owner)]))
    }

    #[tokio::test]
    async fn test_my_ads_defaults_to_active() {
        let owner = Uuid::new_v4();
        let server = server_with_listings(owner).await;

        let body: Value = server
            .get("/api/users/my-ads")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .await
            .json();
        assert_eq!(body["data"]["pagination"]["total"], 3);
        assert!(body["data"]["ads"]
            .as_array()
            .unwrap()
            .iter()
            .all(|ad| ad["seller"]["id"] == owner.to_string()));
    }

    #[tokio::test]
    async fn test_my_ads_status_filter_and_paging() {
        let owner = Uuid::new_v4();
        let server = server_with_listings(owner).await;

        let sold: Value = server
            .get("/api/users/my-ads?status=sold")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .await
            .json();
        assert_eq!(sold["data"]["pagination"]["total"], 1);

        let all: Value = server
            .get("/api/users/my-ads?status=all&limit=2&page=2")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .await
            .json();
        assert_eq!(all["data"]["pagination"]["total"], 4);
        assert_eq!(all["data"]["pagination"]["pages"], 2);
        assert_eq!(all["data"]["ads"].as_array().unwrap().len(), 2);

        let unknown = server
            .get("/api/users/my-ads?status=archived")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .await;
        assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_my_ads_requires_token() {
        let server = server_with_listings(Uuid::new_v4()).await;
        let response = server.get("/api/users/my-ads").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_get_and_missing_account() {
        let owner = Uuid::new_v4();
        let server = server_with_profile(owner);

        let body: Value = server
            .get("/api/users/profile")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .await
            .json();
        assert_eq!(body["data"]["id"], owner.to_string());
        assert!(body["data"]["createdAt"].is_string());

        let stranger = server
            .get("/api/users/profile")
            .add_header(header::AUTHORIZATION, bearer(Uuid::new_v4()))
            .await;
        assert_eq!(stranger.status_code(), StatusCode::NOT_FOUND);

        let anonymous = server.get("/api/users/profile").await;
        assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_update() {
        let owner = Uuid::new_v4();
        let server = server_with_profile(owner);

        let response = server
            .put("/api/users/profile")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .json(&serde_json::json!({ "phone": "555-0142", "location": "Austin, TX" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Profile updated successfully");
        assert_eq!(body["data"]["phone"], "555-0142");
        assert_eq!(body["data"]["location"], "Austin, TX");

        let invalid = server
            .put("/api/users/profile")
            .add_header(header::AUTHORIZATION, bearer(owner))
            .json(&serde_json::json!({ "avatar": "not a url" }))
            .await;
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
