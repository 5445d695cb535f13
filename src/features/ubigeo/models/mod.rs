mod district;
mod province;
mod region;

pub use district::DistrictWithParents;
pub use province::ProvinceWithRegion;
pub use region::Region;
