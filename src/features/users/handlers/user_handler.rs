use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List users
#[utoipa::path(
    get,
    path = "/api/user",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (users, total) = service.list(&page).await?;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Update a user; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
