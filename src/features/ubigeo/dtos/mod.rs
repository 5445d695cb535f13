mod ubigeo_dto;

pub use ubigeo_dto::{
    CreateDistrictDto, CreateProvinceDto, CreateRegionDto, DistrictFilterQuery,
    DistrictResponseDto, ProvinceFilterQuery, ProvinceRef, ProvinceResponseDto, RegionRef,
    RegionResponseDto, RepresentationMode, UpdateDistrictDto, UpdateProvinceDto, UpdateRegionDto,
};
