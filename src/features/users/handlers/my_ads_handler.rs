use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::listings::dtos::{ListingPageDto, MyListingsQuery};
use crate::features::listings::ListingService;
use crate::shared::types::ApiResponse;

/// List the caller's own listings
#[utoipa::path(
    get,
    path = "/api/users/my-ads",
    params(MyListingsQuery),
    responses(
        (status = 200, description = "Caller's listings", body = ApiResponse<ListingPageDto>),
        (status = 400, description = "Unknown status or malformed paging"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_ads(
    user: AuthenticatedUser,
    State(service): State<Arc<ListingService>>,
    AppQuery(query): AppQuery<MyListingsQuery>,
) -> Result<Json<ApiResponse<ListingPageDto>>> {
    let page = service.list_by_owner(&user, &query).await?;
    Ok(Json(ApiResponse::success(Some(page), None, None)))
}
