use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::categories::dtos::{CategoryResponseDto, CategoryTreeDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Query params for listing categories
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

fn to_value<T: serde::Serialize>(value: T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize categories: {}", e)))
}

/// List all active categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let (value, total) = if query.tree {
        let tree: Vec<CategoryTreeDto> = service.list_tree().await?;
        let total = tree.len() as i64;
        (to_value(tree)?, total)
    } else {
        let categories = service.list().await?;
        let total = categories.len() as i64;
        (to_value(categories)?, total)
    };

    Ok(Json(ApiResponse::success(
        Some(value),
        None,
        Some(Meta { total }),
    )))
}

/// List top-level categories (topics)
#[utoipa::path(
    get,
    path = "/api/categories/main",
    responses(
        (status = 200, description = "Top-level categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_main_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let topics = service.topics().await?;
    Ok(Json(ApiResponse::success(Some(topics), None, None)))
}

/// List active subcategories of a category
#[utoipa::path(
    get,
    path = "/api/categories/{category}/subcategories",
    params(
        ("category" = Uuid, Path, description = "Parent category ID")
    ),
    responses(
        (status = 200, description = "Subcategories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Malformed category ID")
    ),
    tag = "categories"
)]
pub async fn list_subcategories(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let children = service.subcategories(id).await?;
    Ok(Json(ApiResponse::success(Some(children), None, None)))
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{category}",
    params(
        ("category" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}
