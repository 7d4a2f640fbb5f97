//! API endpoints.

pub mod admin;
pub mod companies;
pub mod properties;
pub mod upload;
