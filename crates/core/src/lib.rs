//! Core business logic for realty-rs.

pub mod domain;
pub mod services;

pub use domain::*;
pub use services::*;
