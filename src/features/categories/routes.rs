use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: This feature is public (no authentication required).
/// `{category}` is an id under `/subcategories` and a slug on its own; the
/// router needs one parameter name per segment.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/main", get(handlers::list_main_categories))
        .route(
            "/api/categories/{category}/subcategories",
            get(handlers::list_subcategories),
        )
        .route("/api/categories/{category}", get(handlers::get_category))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_categories, StaticCategoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::time::Duration;

    fn server() -> TestServer {
        let store = Arc::new(StaticCategoryStore::new(sample_categories()));
        let service = Arc::new(CategoryService::new(store, Duration::from_secs(300)));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_main_route_is_not_shadowed_by_slug() {
        let response = server().get("/api/categories/main").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Vehicles", "For Rent", "Jobs", "Pets", "Electronics"]);
    }

    #[tokio::test]
    async fn test_get_by_slug_and_missing_slug() {
        let server = server();

        let found: Value = server.get("/api/categories/cars").await.json();
        assert_eq!(found["data"]["name"], "Cars");
        assert_eq!(found["data"]["parent"]["slug"], "vehicles");
        assert_eq!(found["data"]["detailSchema"], "vehicle");

        let missing = server.get("/api/categories/unknown").await;
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_subcategories_route() {
        let server = server();
        let main: Value = server.get("/api/categories/main").await.json();
        let pets_id = main["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["slug"] == "pets")
            .unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();

        let subs: Value = server
            .get(&format!("/api/categories/{}/subcategories", pets_id))
            .await
            .json();
        let names: Vec<&str> = subs["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Cats", "Dogs"]);

        let bad = server.get("/api/categories/not-a-uuid/subcategories").await;
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_as_tree() {
        let body: Value = server().get("/api/categories?tree=true").await.json();
        let roots = body["data"].as_array().unwrap();
        assert_eq!(roots.len(), 5);
        assert!(roots[0]["children"].as_array().unwrap().len() >= 3);
    }
}
