pub mod auth;
pub mod ubigeo;
pub mod users;
