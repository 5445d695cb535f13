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
    CreateDistrictDto, DistrictFilterQuery, DistrictResponseDto, RepresentationMode,
    UpdateDistrictDto,
};
use crate::features::ubigeo::services::UbigeoService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List districts, optionally filtered by parent province name
#[utoipa::path(
    get,
    path = "/api/district",
    params(DistrictFilterQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of districts with embedded provinces", body = ApiResponse<Vec<DistrictResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "districts",
    security(("bearer_auth" = []))
)]
pub async fn list_districts(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Query(filter): Query<DistrictFilterQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<DistrictResponseDto>>>> {
    let (districts, total) = service
        .list_districts(filter.province.as_deref(), &page)
        .await?;
    let dtos: Vec<DistrictResponseDto> = districts
        .into_iter()
        .map(|d| DistrictResponseDto::from_record(d, RepresentationMode::Expanded))
        .collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Create a district under an existing province
#[utoipa::path(
    post,
    path = "/api/district",
    request_body = CreateDistrictDto,
    responses(
        (status = 201, description = "District created successfully", body = ApiResponse<DistrictResponseDto>),
        (status = 400, description = "Validation error or unknown parent province"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "districts",
    security(("bearer_auth" = []))
)]
pub async fn create_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    AppJson(dto): AppJson<CreateDistrictDto>,
) -> Result<(StatusCode, Json<ApiResponse<DistrictResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let district = service.create_district(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(DistrictResponseDto::from_record(
                district,
                RepresentationMode::Expanded,
            )),
            None,
            None,
        )),
    ))
}

/// Get a district by code
#[utoipa::path(
    get,
    path = "/api/district/{id}",
    params(
        ("id" = String, Path, description = "District code")
    ),
    responses(
        (status = 200, description = "District details with embedded province", body = ApiResponse<DistrictResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "District not found")
    ),
    tag = "districts",
    security(("bearer_auth" = []))
)]
pub async fn get_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DistrictResponseDto>>> {
    let district = service.get_district(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(DistrictResponseDto::from_record(
            district,
            RepresentationMode::Expanded,
        )),
        None,
        None,
    )))
}

/// Update a district; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/district/{id}",
    params(
        ("id" = String, Path, description = "District code")
    ),
    request_body = UpdateDistrictDto,
    responses(
        (status = 200, description = "District updated successfully", body = ApiResponse<DistrictResponseDto>),
        (status = 400, description = "Validation error or unknown parent province"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "District not found")
    ),
    tag = "districts",
    security(("bearer_auth" = []))
)]
pub async fn update_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateDistrictDto>,
) -> Result<Json<ApiResponse<DistrictResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let district = service.update_district(&id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(DistrictResponseDto::from_record(
            district,
            RepresentationMode::Expanded,
        )),
        None,
        None,
    )))
}

/// Delete a district
#[utoipa::path(
    delete,
    path = "/api/district/{id}",
    params(
        ("id" = String, Path, description = "District code")
    ),
    responses(
        (status = 200, description = "District deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "District not found")
    ),
    tag = "districts",
    security(("bearer_auth" = []))
)]
pub async fn delete_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_district(&id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
