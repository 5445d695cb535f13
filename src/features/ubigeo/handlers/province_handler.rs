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
    CreateProvinceDto, DistrictResponseDto, ProvinceFilterQuery, ProvinceResponseDto,
    RepresentationMode, UpdateProvinceDto,
};
use crate::features::ubigeo::services::UbigeoService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List provinces, optionally filtered by parent region name
#[utoipa::path(
    get,
    path = "/api/province",
    params(ProvinceFilterQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of provinces with embedded regions", body = ApiResponse<Vec<ProvinceResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn list_provinces(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Query(filter): Query<ProvinceFilterQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let (provinces, total) = service
        .list_provinces(filter.region.as_deref(), &page)
        .await?;
    let dtos: Vec<ProvinceResponseDto> = provinces
        .into_iter()
        .map(|p| ProvinceResponseDto::from_record(p, RepresentationMode::Expanded))
        .collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Create a province under an existing region
#[utoipa::path(
    post,
    path = "/api/province",
    request_body = CreateProvinceDto,
    responses(
        (status = 201, description = "Province created successfully", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error or unknown parent region"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn create_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    AppJson(dto): AppJson<CreateProvinceDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProvinceResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.create_province(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ProvinceResponseDto::from_record(
                province,
                RepresentationMode::Expanded,
            )),
            None,
            None,
        )),
    ))
}

/// Get a province by code
#[utoipa::path(
    get,
    path = "/api/province/{id}",
    params(
        ("id" = String, Path, description = "Province code")
    ),
    responses(
        (status = 200, description = "Province details with embedded region", body = ApiResponse<ProvinceResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn get_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get_province(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(ProvinceResponseDto::from_record(
            province,
            RepresentationMode::Expanded,
        )),
        None,
        None,
    )))
}

/// Update a province; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/province/{id}",
    params(
        ("id" = String, Path, description = "Province code")
    ),
    request_body = UpdateProvinceDto,
    responses(
        (status = 200, description = "Province updated successfully", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error or unknown parent region"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn update_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.update_province(&id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ProvinceResponseDto::from_record(
            province,
            RepresentationMode::Expanded,
        )),
        None,
        None,
    )))
}

/// Delete a province, cascading to its districts
#[utoipa::path(
    delete,
    path = "/api/province/{id}",
    params(
        ("id" = String, Path, description = "Province code")
    ),
    responses(
        (status = 200, description = "Province deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn delete_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_province(&id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// List the districts of a province as lightweight child references
#[utoipa::path(
    get,
    path = "/api/province/{id}/branches",
    params(
        ("id" = String, Path, description = "Province code")
    ),
    responses(
        (status = 200, description = "Districts of the province", body = ApiResponse<Vec<DistrictResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn list_province_branches(
    _user: AuthenticatedUser,
    State(service): State<Arc<UbigeoService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DistrictResponseDto>>>> {
    let districts = service.list_province_branches(&id).await?;
    let dtos: Vec<DistrictResponseDto> = districts
        .into_iter()
        .map(|d| DistrictResponseDto::from_record(d, RepresentationMode::ReferenceOnly))
        .collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}
