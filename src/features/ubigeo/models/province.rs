use sqlx::FromRow;

/// Province row joined with its parent region's name, the unit the
/// serializer works from in both representation modes
#[derive(Debug, Clone, FromRow)]
pub struct ProvinceWithRegion {
    pub id: String,
    pub name: String,
    pub region_id: String,
    pub region_name: String,
}
