use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::ubigeo::dtos::{
    CreateRegionDto, ProvinceResponseDto, RegionResponseDto, RepresentationMode, UpdateRegionDto,
};
use crate::features::ubigeo::services::UbigeoService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List all regions
#[utoipa::path(
    get,
    path = "/api/region",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of regions", body = ApiResponse<Vec<RegionResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn list_regions(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let (regions, total) = service.list_regions(&page).await?;
    let dtos: Vec<RegionResponseDto> = regions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Create a region
#[utoipa::path(
    post,
    path = "/api/region",
    request_body = CreateRegionDto,
    responses(
        (status = 201, description = "Region created successfully", body = ApiResponse<RegionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn create_region(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    AppJson(dto): AppJson<CreateRegionDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let region = service.create_region(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(region.into()), None, None)),
    ))
}

/// Get a region by code
#[utoipa::path(
    get,
    path = "/api/region/{id}",
    params(
        ("id" = String, Path, description = "Region code")
    ),
    responses(
        (status = 200, description = "Region details", body = ApiResponse<RegionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn get_region(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    let region = service.get_region(&id).await?;
    Ok(Json(ApiResponse::success(Some(region.into()), None, None)))
}

/// Update a region; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/region/{id}",
    params(
        ("id" = String, Path, description = "Region code")
    ),
    request_body = UpdateRegionDto,
    responses(
        (status = 200, description = "Region updated successfully", body = ApiResponse<RegionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn update_region(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateRegionDto>,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let region = service.update_region(&id, dto).await?;
    Ok(Json(ApiResponse::success(Some(region.into()), None, None)))
}

/// Delete a region, cascading to its provinces and their districts
#[utoipa::path(
    delete,
    path = "/api/region/{id}",
    params(
        ("id" = String, Path, description = "Region code")
    ),
    responses(
        (status = 200, description = "Region deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn delete_region(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_region(&id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// List the provinces of a region as lightweight child references
#[utoipa::path(
    get,
    path = "/api/region/{id}/branches",
    params(
        ("id" = String, Path, description = "Region code")
    ),
    responses(
        (status = 200, description = "Provinces of the region", body = ApiResponse<Vec<ProvinceResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn list_region_branches(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service.list_region_branches(&id).await?;
    // The listing parent is not re-embedded in every child row
    let dtos: Vec<ProvinceResponseDto> = provinces
        .into_iter()
        .map(|p| ProvinceResponseDto::from_record(p, RepresentationMode::ReferenceOnly))
        .collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}
