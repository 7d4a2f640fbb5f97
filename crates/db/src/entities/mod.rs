//! Database entities.

pub mod company;
pub mod property;
pub mod property_image;

pub use company::Entity as Company;
pub use property::Entity as Property;
pub use property_image::Entity as PropertyImage;
