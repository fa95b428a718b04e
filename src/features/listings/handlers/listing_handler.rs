use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::listings::dtos::{
    CreateListingDto, DeleteListingQuery, ListingPageDto, ListingQueryParams, ListingResponseDto,
    UpdateListingDto,
};
use crate::features::listings::services::ListingService;
use crate::shared::types::ApiResponse;

/// Browse active listings
///
/// Filters combine with AND. `search` matches any of its words against
/// title and description.
#[utoipa::path(
    get,
    path = "/api/ads",
    params(ListingQueryParams),
    responses(
        (status = 200, description = "Page of listings", body = ApiResponse<ListingPageDto>),
        (status = 400, description = "Malformed number in query")
    ),
    tag = "ads"
)]
pub async fn list_listings(
    State(service): State<Arc<ListingService>>,
    AppQuery(params): AppQuery<ListingQueryParams>,
) -> Result<Json<ApiResponse<ListingPageDto>>> {
    let page = service.browse(&params).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}

/// Get a listing by ID
///
/// Counts as one view.
#[utoipa::path(
    get,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Listing found", body = ApiResponse<ListingResponseDto>),
        (status = 400, description = "Malformed listing ID"),
        (status = 404, description = "Listing not found")
    ),
    tag = "ads"
)]
pub async fn get_listing(
    State(service): State<Arc<ListingService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ListingResponseDto>>> {
    let listing = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(listing), None, None)))
}

/// Create a listing owned by the caller
#[utoipa::path(
    post,
    path = "/api/ads",
    request_body = CreateListingDto,
    responses(
        (status = 201, description = "Listing created", body = ApiResponse<ListingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "ads"
)]
pub async fn create_listing(
    user: AuthenticatedUser,
    State(service): State<Arc<ListingService>>,
    AppJson(dto): AppJson<CreateListingDto>,
) -> Result<(StatusCode, Json<ApiResponse<ListingResponseDto>>)> {
    let listing = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(listing),
            Some("Ad created successfully".to_string()),
            None,
        )),
    ))
}

/// Update one of the caller's listings
#[utoipa::path(
    put,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    request_body = UpdateListingDto,
    responses(
        (status = 200, description = "Listing updated", body = ApiResponse<ListingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own the listing"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ads"
)]
pub async fn update_listing(
    user: AuthenticatedUser,
    State(service): State<Arc<ListingService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateListingDto>,
) -> Result<Json<ApiResponse<ListingResponseDto>>> {
    let listing = service.update(id, &user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(listing),
        Some("Ad updated successfully".to_string()),
        None,
    )))
}

/// Delete one of the caller's listings
///
/// `mode=soft` keeps the row with status `deleted`.
#[utoipa::path(
    delete,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID"),
        DeleteListingQuery
    ),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own the listing"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ads"
)]
pub async fn delete_listing(
    user: AuthenticatedUser,
    State(service): State<Arc<ListingService>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<DeleteListingQuery>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user, query.mode).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Ad deleted successfully".to_string()),
        None,
    )))
}
