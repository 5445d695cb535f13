use sqlx::FromRow;

/// District row joined with both ancestors' names, enough to expand the
/// nested province (and its region) without further queries
#[derive(Debug, Clone, FromRow)]
pub struct DistrictWithParents {
    pub id: String,
    pub name: String,
    pub province_id: String,
    pub province_name: String,
    pub region_id: String,
    pub region_name: String,
}
