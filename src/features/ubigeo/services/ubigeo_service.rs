use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::ubigeo::dtos::{
    CreateDistrictDto, CreateProvinceDto, CreateRegionDto, UpdateDistrictDto, UpdateProvinceDto,
    UpdateRegionDto,
};
use crate::features::ubigeo::models::{DistrictWithParents, ProvinceWithRegion, Region};
use crate::shared::types::PaginationQuery;

const PROVINCE_SELECT: &str = "SELECT p.id, p.name, p.region_id, r.name AS region_name \
     FROM provinces p \
     JOIN regions r ON r.id = p.region_id";

const DISTRICT_SELECT: &str =
    "SELECT d.id, d.name, d.province_id, p.name AS province_name, p.region_id, \
            r.name AS region_name \
     FROM districts d \
     JOIN provinces p ON p.id = d.province_id \
     JOIN regions r ON r.id = p.region_id";

/// Convert database errors on the hierarchy tables into client-facing errors
fn handle_db_error(entity: &str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Validation(format!("{} with this code already exists", entity));
        }
        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::Validation("Referenced parent record does not exist".to_string());
        }
    }

    AppError::Database(e)
}

/// Service for the region / province / district hierarchy.
///
/// Cascade deletes are enforced by the schema (`ON DELETE CASCADE`), so
/// removing a region takes its provinces and their districts with it in one
/// transactional statement.
pub struct UbigeoService {
    pool: PgPool,
}

impl UbigeoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Region Methods ====================

    /// List regions in insertion order
    pub async fn list_regions(&self, page: &PaginationQuery) -> Result<(Vec<Region>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM regions")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let regions: Vec<Region> = sqlx::query_as(
            "SELECT id, name, created_at, updated_at FROM regions \
             ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list regions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((regions, total))
    }

    /// Get a region by its code
    pub async fn get_region(&self, id: &str) -> Result<Region> {
        let region: Option<Region> =
            sqlx::query_as("SELECT id, name, created_at, updated_at FROM regions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch region {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        region.ok_or_else(|| AppError::NotFound(format!("Region with code '{}' not found", id)))
    }

    /// Create a region
    pub async fn create_region(&self, dto: CreateRegionDto) -> Result<Region> {
        let region: Region = sqlx::query_as(
            "INSERT INTO regions (id, name) VALUES ($1, $2) \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(dto.id)
        .bind(dto.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error("Region", e))?;

        tracing::info!("Region created: id={}", region.id);

        Ok(region)
    }

    /// Update a region; absent fields keep their current values
    pub async fn update_region(&self, id: &str, dto: UpdateRegionDto) -> Result<Region> {
        let region: Option<Region> = sqlx::query_as(
            "UPDATE regions SET name = COALESCE($1, name), updated_at = NOW() \
             WHERE id = $2 \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(dto.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error("Region", e))?;

        region.ok_or_else(|| AppError::NotFound(format!("Region with code '{}' not found", id)))
    }

    /// Delete a region; its provinces and their districts cascade with it
    pub async fn delete_region(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Region with code '{}' not found",
                id
            )));
        }

        tracing::info!("Region deleted (cascading to children): id={}", id);

        Ok(())
    }

    /// List the provinces of a region (its branches)
    pub async fn list_region_branches(&self, region_id: &str) -> Result<Vec<ProvinceWithRegion>> {
        // Verify the region exists so an unknown code is a 404, not an empty list
        self.get_region(region_id).await?;

        let sql = format!("{PROVINCE_SELECT} WHERE p.region_id = $1 ORDER BY p.created_at ASC");
        sqlx::query_as(&sql)
            .bind(region_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list branches of region {}: {:?}", region_id, e);
                AppError::Database(e)
            })
    }

    // ==================== Province Methods ====================

    /// List provinces, optionally filtered by the parent region's exact name
    pub async fn list_provinces(
        &self,
        region_name: Option<&str>,
        page: &PaginationQuery,
    ) -> Result<(Vec<ProvinceWithRegion>, i64)> {
        let provinces: Vec<ProvinceWithRegion> = match region_name {
            Some(name) => {
                let sql = format!(
                    "{PROVINCE_SELECT} WHERE r.name = $1 \
                     ORDER BY p.created_at ASC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as(&sql)
                    .bind(name)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql =
                    format!("{PROVINCE_SELECT} ORDER BY p.created_at ASC LIMIT $1 OFFSET $2");
                sqlx::query_as(&sql)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list provinces: {:?}", e);
            AppError::Database(e)
        })?;

        let total: i64 = match region_name {
            Some(name) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM provinces p \
                     JOIN regions r ON r.id = p.region_id WHERE r.name = $1",
                )
                .bind(name)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM provinces")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(AppError::Database)?;

        Ok((provinces, total))
    }

    /// Get a province by its code
    pub async fn get_province(&self, id: &str) -> Result<ProvinceWithRegion> {
        let sql = format!("{PROVINCE_SELECT} WHERE p.id = $1");
        let province: Option<ProvinceWithRegion> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch province {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        province.ok_or_else(|| AppError::NotFound(format!("Province with code '{}' not found", id)))
    }

    /// Create a province under an existing region
    pub async fn create_province(&self, dto: CreateProvinceDto) -> Result<ProvinceWithRegion> {
        self.ensure_region_exists(&dto.region).await?;

        sqlx::query("INSERT INTO provinces (id, name, region_id) VALUES ($1, $2, $3)")
            .bind(&dto.id)
            .bind(dto.name)
            .bind(dto.region)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_db_error("Province", e))?;

        tracing::info!("Province created: id={}", dto.id);

        self.get_province(&dto.id).await
    }

    /// Update a province; a new parent region is checked for existence
    pub async fn update_province(
        &self,
        id: &str,
        dto: UpdateProvinceDto,
    ) -> Result<ProvinceWithRegion> {
        if let Some(region_id) = dto.region.as_deref() {
            self.ensure_region_exists(region_id).await?;
        }

        let result = sqlx::query(
            "UPDATE provinces \
             SET name = COALESCE($1, name), region_id = COALESCE($2, region_id), \
                 updated_at = NOW() \
             WHERE id = $3",
        )
        .bind(dto.name)
        .bind(dto.region)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| handle_db_error("Province", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Province with code '{}' not found",
                id
            )));
        }

        self.get_province(id).await
    }

    /// Delete a province; its districts cascade with it
    pub async fn delete_province(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM provinces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Province with code '{}' not found",
                id
            )));
        }

        tracing::info!("Province deleted (cascading to children): id={}", id);

        Ok(())
    }

    /// List the districts of a province (its branches)
    pub async fn list_province_branches(
        &self,
        province_id: &str,
    ) -> Result<Vec<DistrictWithParents>> {
        self.get_province(province_id).await?;

        let sql = format!("{DISTRICT_SELECT} WHERE d.province_id = $1 ORDER BY d.created_at ASC");
        sqlx::query_as(&sql)
            .bind(province_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list branches of province {}: {:?}", province_id, e);
                AppError::Database(e)
            })
    }

    async fn ensure_region_exists(&self, region_id: &str) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM regions WHERE id = $1)")
            .bind(region_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::Validation(format!(
                "Region with code '{}' does not exist",
                region_id
            )));
        }

        Ok(())
    }

    // ==================== District Methods ====================

    /// List districts, optionally filtered by the parent province's exact name
    pub async fn list_districts(
        &self,
        province_name: Option<&str>,
        page: &PaginationQuery,
    ) -> Result<(Vec<DistrictWithParents>, i64)> {
        let districts: Vec<DistrictWithParents> = match province_name {
            Some(name) => {
                let sql = format!(
                    "{DISTRICT_SELECT} WHERE p.name = $1 \
                     ORDER BY d.created_at ASC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as(&sql)
                    .bind(name)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql =
                    format!("{DISTRICT_SELECT} ORDER BY d.created_at ASC LIMIT $1 OFFSET $2");
                sqlx::query_as(&sql)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list districts: {:?}", e);
            AppError::Database(e)
        })?;

        let total: i64 = match province_name {
            Some(name) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM districts d \
                     JOIN provinces p ON p.id = d.province_id WHERE p.name = $1",
                )
                .bind(name)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM districts")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(AppError::Database)?;

        Ok((districts, total))
    }

    /// Get a district by its code
    pub async fn get_district(&self, id: &str) -> Result<DistrictWithParents> {
        let sql = format!("{DISTRICT_SELECT} WHERE d.id = $1");
        let district: Option<DistrictWithParents> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch district {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        district.ok_or_else(|| AppError::NotFound(format!("District with code '{}' not found", id)))
    }

    /// Create a district under an existing province
    pub async fn create_district(&self, dto: CreateDistrictDto) -> Result<DistrictWithParents> {
        self.ensure_province_exists(&dto.province).await?;

        sqlx::query("INSERT INTO districts (id, name, province_id) VALUES ($1, $2, $3)")
            .bind(&dto.id)
            .bind(dto.name)
            .bind(dto.province)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_db_error("District", e))?;

        tracing::info!("District created: id={}", dto.id);

        self.get_district(&dto.id).await
    }

    /// Update a district; a new parent province is checked for existence
    pub async fn update_district(
        &self,
        id: &str,
        dto: UpdateDistrictDto,
    ) -> Result<DistrictWithParents> {
        if let Some(province_id) = dto.province.as_deref() {
            self.ensure_province_exists(province_id).await?;
        }

        let result = sqlx::query(
            "UPDATE districts \
             SET name = COALESCE($1, name), province_id = COALESCE($2, province_id), \
                 updated_at = NOW() \
             WHERE id = $3",
        )
        .bind(dto.name)
        .bind(dto.province)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| handle_db_error("District", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "District with code '{}' not found",
                id
            )));
        }

        self.get_district(id).await
    }

    /// Delete a district
    pub async fn delete_district(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM districts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "District with code '{}' not found",
                id
            )));
        }

        tracing::info!("District deleted: id={}", id);

        Ok(())
    }

    async fn ensure_province_exists(&self, province_id: &str) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM provinces WHERE id = $1)")
                .bind(province_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::Validation(format!(
                "Province with code '{}' does not exist",
                province_id
            )));
        }

        Ok(())
    }
}
