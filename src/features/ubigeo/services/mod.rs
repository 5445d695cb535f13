mod ubigeo_service;

pub use ubigeo_service::UbigeoService;
