use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::ubigeo::handlers;
use crate::features::ubigeo::services::UbigeoService;

/// Create routes for the geographic hierarchy (all require authentication)
pub fn routes(service: Arc<UbigeoService>) -> Router {
    Router::new()
        // Region routes
        .route(
            "/api/region",
            get(handlers::list_regions).post(handlers::create_region),
        )
        .route(
            "/api/region/{id}",
            get(handlers::get_region)
                .put(handlers::update_region)
                .patch(handlers::update_region)
                .delete(handlers::delete_region),
        )
        .route(
            "/api/region/{id}/branches",
            get(handlers::list_region_branches),
        )
        // Province routes
        .route(
            "/api/province",
            get(handlers::list_provinces).post(handlers::create_province),
        )
        .route(
            "/api/province/{id}",
            get(handlers::get_province)
                .put(handlers::update_province)
                .patch(handlers::update_province)
                .delete(handlers::delete_province),
        )
        .route(
            "/api/province/{id}/branches",
            get(handlers::list_province_branches),
        )
        // District routes
        .route(
            "/api/district",
            get(handlers::list_districts).post(handlers::create_district),
        )
        .route(
            "/api/district/{id}",
            get(handlers::get_district)
                .put(handlers::update_district)
                .patch(handlers::update_district)
                .delete(handlers::delete_district),
        )
        .with_state(service)
}
