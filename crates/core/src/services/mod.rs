//! Business services.

#![allow(missing_docs)]

pub mod company;
pub mod media;
pub mod property;
pub mod session;

pub use company::{CompanyService, CreateCompanyInput, UpdateCompanyInput};
pub use media::{FailedUpload, MediaService, UploadReport, UploadedImage};
pub use property::{CreatePropertyInput, NewPropertyImage, PropertyService, UpdatePropertyInput};
pub use session::SessionService;
