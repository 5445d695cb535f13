use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::ubigeo::{dtos as ubigeo_dtos, handlers as ubigeo_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::refresh_token,
        auth_handlers::logout,
        // Users
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::get_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Regions
        ubigeo_handlers::list_regions,
        ubigeo_handlers::create_region,
        ubigeo_handlers::get_region,
        ubigeo_handlers::update_region,
        ubigeo_handlers::delete_region,
        ubigeo_handlers::list_region_branches,
        // Provinces
        ubigeo_handlers::list_provinces,
        ubigeo_handlers::create_province,
        ubigeo_handlers::get_province,
        ubigeo_handlers::update_province,
        ubigeo_handlers::delete_province,
        ubigeo_handlers::list_province_branches,
        // Districts
        ubigeo_handlers::list_districts,
        ubigeo_handlers::create_district,
        ubigeo_handlers::get_district,
        ubigeo_handlers::update_district,
        ubigeo_handlers::delete_district,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::RefreshTokenRequestDto,
            auth_dtos::RefreshTokenResponseDto,
            auth_dtos::LogoutRequestDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            ApiResponse<auth_dtos::RefreshTokenResponseDto>,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Ubigeo
            ubigeo_dtos::RegionResponseDto,
            ubigeo_dtos::RegionRef,
            ubigeo_dtos::ProvinceResponseDto,
            ubigeo_dtos::ProvinceRef,
            ubigeo_dtos::DistrictResponseDto,
            ubigeo_dtos::CreateRegionDto,
            ubigeo_dtos::UpdateRegionDto,
            ubigeo_dtos::CreateProvinceDto,
            ubigeo_dtos::UpdateProvinceDto,
            ubigeo_dtos::CreateDistrictDto,
            ubigeo_dtos::UpdateDistrictDto,
            ApiResponse<ubigeo_dtos::RegionResponseDto>,
            ApiResponse<Vec<ubigeo_dtos::RegionResponseDto>>,
            ApiResponse<ubigeo_dtos::ProvinceResponseDto>,
            ApiResponse<Vec<ubigeo_dtos::ProvinceResponseDto>>,
            ApiResponse<ubigeo_dtos::DistrictResponseDto>,
            ApiResponse<Vec<ubigeo_dtos::DistrictResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Token issuance, refresh and revocation"),
        (name = "users", description = "User account management (internally trusted, unauthenticated)"),
        (name = "regions", description = "Regions, the root of the geographic hierarchy"),
        (name = "provinces", description = "Provinces, children of regions"),
        (name = "districts", description = "Districts, children of provinces"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Ubigeo API",
        version = "0.1.0",
        description = "REST API for the Region / Province / District hierarchy",
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
