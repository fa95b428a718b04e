use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
    schema as categories_schema,
};
use crate::features::listings::{
    dtos as listings_dtos, handlers as listings_handlers, models as listings_models,
};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::types::{ApiResponse, Meta, PageInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Listings
        listings_handlers::list_listings,
        listings_handlers::get_listing,
        listings_handlers::create_listing,
        listings_handlers::update_listing,
        listings_handlers::delete_listing,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_main_categories,
        categories_handlers::list_subcategories,
        categories_handlers::get_category,
        // Users
        users_handlers::list_my_ads,
        users_handlers::get_profile,
        users_handlers::update_profile,
    ),
    components(
        schemas(
            Meta,
            PageInfo,
            // Listings
            listings_models::ListingStatus,
            listings_models::ExpireIn,
            listings_models::Location,
            listings_models::Contact,
            listings_models::DetailBlock,
            listings_models::VehicleDetails,
            listings_models::PropertyDetails,
            listings_models::JobDetails,
            listings_models::PetDetails,
            listings_dtos::CreateListingDto,
            listings_dtos::UpdateListingDto,
            listings_dtos::LocationDto,
            listings_dtos::ContactDto,
            listings_dtos::DeleteMode,
            listings_dtos::CategoryRefDto,
            listings_dtos::SellerRefDto,
            listings_dtos::ListingResponseDto,
            listings_dtos::ListingPageDto,
            ApiResponse<listings_dtos::ListingResponseDto>,
            ApiResponse<listings_dtos::ListingPageDto>,
            // Categories
            categories_models::CategoryKind,
            categories_schema::DetailKind,
            categories_dtos::CategorySummaryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Users
            users_models::SellerSummary,
            users_models::UserProfile,
            users_dtos::UpdateProfileDto,
            ApiResponse<users_models::UserProfile>,
        )
    ),
    tags(
        (name = "ads", description = "Classified listings"),
        (name = "categories", description = "Listing categories (public)"),
        (name = "users", description = "Per-user views"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Classifieds API",
        version = "0.1.0",
        description = "API documentation for the classifieds marketplace",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
