//! Geographic hierarchy feature (ubigeo codes).
//!
//! Three levels keyed by short numeric codes, each cascade-deleted with its
//! parent:
//!
//! - Level 1: Regions
//! - Level 2: Provinces
//! - Level 3: Districts
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET/POST | `/api/region` | List / create regions |
//! | GET/PUT/PATCH/DELETE | `/api/region/{id}` | Region by code |
//! | GET | `/api/region/{id}/branches` | Provinces of a region (reference-only) |
//! | GET/POST | `/api/province` | List (`?region=` name filter) / create provinces |
//! | GET/PUT/PATCH/DELETE | `/api/province/{id}` | Province by code |
//! | GET | `/api/province/{id}/branches` | Districts of a province (reference-only) |
//! | GET/POST | `/api/district` | List (`?province=` name filter) / create districts |
//! | GET/PUT/PATCH/DELETE | `/api/district/{id}` | District by code |
//!
//! Read representations embed the parent object by default; branches listings
//! keep the bare parent code instead.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UbigeoService;
