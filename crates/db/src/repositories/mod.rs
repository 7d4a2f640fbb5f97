//! Database repositories.

mod company;
mod property;
mod property_image;

pub use company::{CompanyRepository, CompanyWithListings};
pub use property::{PropertyRepository, PropertyWithRelations};
pub use property_image::PropertyImageRepository;
