pub mod district_handler;
pub mod province_handler;
pub mod region_handler;

pub use district_handler::{
    __path_create_district, __path_delete_district, __path_get_district, __path_list_districts,
    __path_update_district, create_district, delete_district, get_district, list_districts,
    update_district,
};
pub use province_handler::{
    __path_create_province, __path_delete_province, __path_get_province,
    __path_list_province_branches, __path_list_provinces, __path_update_province, create_province,
    delete_province, get_province, list_province_branches, list_provinces, update_province,
};
pub use region_handler::{
    __path_create_region, __path_delete_region, __path_get_region, __path_list_region_branches,
    __path_list_regions, __path_update_region, create_region, delete_region, get_region,
    list_region_branches, list_regions, update_region,
};
