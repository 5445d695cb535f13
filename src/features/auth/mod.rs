//! Authentication feature: token issuance, refresh, and revocation.
//!
//! Login mints an HS256 access + refresh token pair carrying the user's id and
//! email. Access tokens gate every protected endpoint via the auth middleware;
//! refresh tokens mint new access tokens until they expire or are blacklisted
//! by logout.

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;
