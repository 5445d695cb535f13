use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::ubigeo::models::{DistrictWithParents, ProvinceWithRegion, Region};
use crate::shared::validation::CODE_REGEX;

/// Controls how a parent link is serialized: as the full parent object
/// (the default), or as the bare parent code. Branches listings use
/// `ReferenceOnly` so a parent listing its own children does not re-embed
/// itself in every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepresentationMode {
    #[default]
    Expanded,
    ReferenceOnly,
}

// ==================== Response DTOs ====================

/// Response DTO for a region
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionResponseDto {
    pub id: String,
    pub name: String,
}

impl From<Region> for RegionResponseDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            name: region.name,
        }
    }
}

/// A province's parent: the embedded region object or its bare code
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RegionRef {
    Expanded(RegionResponseDto),
    Code(String),
}

/// Response DTO for a province
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinceResponseDto {
    pub id: String,
    pub name: String,
    pub region: RegionRef,
}

impl ProvinceResponseDto {
    pub fn from_record(record: ProvinceWithRegion, mode: RepresentationMode) -> Self {
        let region = match mode {
            RepresentationMode::Expanded => RegionRef::Expanded(RegionResponseDto {
                id: record.region_id,
                name: record.region_name,
            }),
            RepresentationMode::ReferenceOnly => RegionRef::Code(record.region_id),
        };

        Self {
            id: record.id,
            name: record.name,
            region,
        }
    }
}

/// A district's parent: the embedded province object (itself carrying an
/// expanded region) or its bare code
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProvinceRef {
    Expanded(ProvinceResponseDto),
    Code(String),
}

/// Response DTO for a district
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistrictResponseDto {
    pub id: String,
    pub name: String,
    pub province: ProvinceRef,
}

impl DistrictResponseDto {
    pub fn from_record(record: DistrictWithParents, mode: RepresentationMode) -> Self {
        let province = match mode {
            RepresentationMode::Expanded => ProvinceRef::Expanded(ProvinceResponseDto {
                id: record.province_id,
                name: record.province_name,
                // The embedded province expands its own parent in turn
                region: RegionRef::Expanded(RegionResponseDto {
                    id: record.region_id,
                    name: record.region_name,
                }),
            }),
            RepresentationMode::ReferenceOnly => ProvinceRef::Code(record.province_id),
        };

        Self {
            id: record.id,
            name: record.name,
            province,
        }
    }
}

// ==================== Request DTOs ====================

/// Request DTO for creating a region
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRegionDto {
    #[validate(regex(path = *CODE_REGEX, message = "Code must be 2 to 6 digits"))]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

/// Request DTO for updating a region
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRegionDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

/// Request DTO for creating a province
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProvinceDto {
    #[validate(regex(path = *CODE_REGEX, message = "Code must be 2 to 6 digits"))]
    pub id: String,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Code of the parent region
    #[validate(regex(path = *CODE_REGEX, message = "Region code must be 2 to 6 digits"))]
    pub region: String,
}

/// Request DTO for updating a province
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProvinceDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    /// Code of the new parent region
    #[validate(regex(path = *CODE_REGEX, message = "Region code must be 2 to 6 digits"))]
    pub region: Option<String>,
}

/// Request DTO for creating a district
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDistrictDto {
    #[validate(regex(path = *CODE_REGEX, message = "Code must be 2 to 6 digits"))]
    pub id: String,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Code of the parent province
    #[validate(regex(path = *CODE_REGEX, message = "Province code must be 2 to 6 digits"))]
    pub province: String,
}

/// Request DTO for updating a district
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDistrictDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    /// Code of the new parent province
    #[validate(regex(path = *CODE_REGEX, message = "Province code must be 2 to 6 digits"))]
    pub province: Option<String>,
}

// ==================== Query DTOs ====================

/// Query parameters for listing provinces
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProvinceFilterQuery {
    /// Exact, case-sensitive name of the parent region
    #[param(example = "Lima")]
    pub region: Option<String>,
}

/// Query parameters for listing districts
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DistrictFilterQuery {
    /// Exact, case-sensitive name of the parent province
    #[param(example = "Huarochiri")]
    pub province: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn province_record() -> ProvinceWithRegion {
        ProvinceWithRegion {
            id: "1501".to_string(),
            name: "Lima".to_string(),
            region_id: "15".to_string(),
            region_name: "Lima Region".to_string(),
        }
    }

    fn district_record() -> DistrictWithParents {
        DistrictWithParents {
            id: "150101".to_string(),
            name: "Lima Cercado".to_string(),
            province_id: "1501".to_string(),
            province_name: "Lima".to_string(),
            region_id: "15".to_string(),
            region_name: "Lima Region".to_string(),
        }
    }

    #[test]
    fn expanded_province_embeds_the_full_region() {
        let dto = ProvinceResponseDto::from_record(province_record(), RepresentationMode::Expanded);
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1501",
                "name": "Lima",
                "region": { "id": "15", "name": "Lima Region" }
            })
        );
    }

    #[test]
    fn reference_only_province_keeps_the_bare_code() {
        let dto =
            ProvinceResponseDto::from_record(province_record(), RepresentationMode::ReferenceOnly);
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1501",
                "name": "Lima",
                "region": "15"
            })
        );
    }

    #[test]
    fn expanded_district_recursively_expands_both_parents() {
        let dto = DistrictResponseDto::from_record(district_record(), RepresentationMode::Expanded);
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "150101",
                "name": "Lima Cercado",
                "province": {
                    "id": "1501",
                    "name": "Lima",
                    "region": { "id": "15", "name": "Lima Region" }
                }
            })
        );
    }

    #[test]
    fn reference_only_district_keeps_the_bare_code() {
        let dto =
            DistrictResponseDto::from_record(district_record(), RepresentationMode::ReferenceOnly);
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["province"], json!("1501"));
    }

    #[test]
    fn default_mode_is_expanded() {
        assert_eq!(RepresentationMode::default(), RepresentationMode::Expanded);
    }
}
