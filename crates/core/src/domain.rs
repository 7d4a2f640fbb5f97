//! Public-facing domain model and the storage-to-domain mapper.
//!
//! Storage rows keep enumerations upper-case underscore-separated
//! (`FOR_SALE`) and list fields JSON-encoded in text columns. The mapper
//! converts fully joined records into the normalized shapes the
//! presentation layer consumes: kebab-case enums, decoded lists, nested
//! contact/stats blocks, images in display order. Conversions are pure and
//! perform no I/O.

use realty_common::{AppError, AppResult};
use realty_db::entities::{company, property, property_image};
use serde::{Deserialize, Serialize};

/// Kind of listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Commercial,
    Land,
}

impl PropertyType {
    /// Parse a type from user or storage input.
    ///
    /// Case-insensitive; hyphens and underscores are interchangeable.
    /// Values outside the enumeration are a validation error, never a
    /// silent default.
    pub fn parse(input: &str) -> AppResult<Self> {
        match input.trim().to_lowercase().replace('_', "-").as_str() {
            "apartment" => Ok(Self::Apartment),
            "house" => Ok(Self::House),
            "villa" => Ok(Self::Villa),
            "commercial" => Ok(Self::Commercial),
            "land" => Ok(Self::Land),
            other => Err(AppError::Validation(format!(
                "Unknown property type: {other}"
            ))),
        }
    }

    /// Storage representation (upper-case, underscore-separated).
    #[must_use]
    pub const fn as_storage(self) -> &'static str {
        match self {
            Self::Apartment => "APARTMENT",
            Self::House => "HOUSE",
            Self::Villa => "VILLA",
            Self::Commercial => "COMMERCIAL",
            Self::Land => "LAND",
        }
    }

    /// Public representation (lower-case, hyphen-separated).
    #[must_use]
    pub const fn as_public(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Villa => "villa",
            Self::Commercial => "commercial",
            Self::Land => "land",
        }
    }
}

/// Listing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyStatus {
    ForSale,
    ForRent,
    Sold,
    Rented,
}

impl PropertyStatus {
    /// Parse a status from user or storage input.
    ///
    /// Same normalization rules as [`PropertyType::parse`].
    pub fn parse(input: &str) -> AppResult<Self> {
        match input.trim().to_lowercase().replace('_', "-").as_str() {
            "for-sale" => Ok(Self::ForSale),
            "for-rent" => Ok(Self::ForRent),
            "sold" => Ok(Self::Sold),
            "rented" => Ok(Self::Rented),
            other => Err(AppError::Validation(format!(
                "Unknown property status: {other}"
            ))),
        }
    }

    /// Storage representation (upper-case, underscore-separated).
    #[must_use]
    pub const fn as_storage(self) -> &'static str {
        match self {
            Self::ForSale => "FOR_SALE",
            Self::ForRent => "FOR_RENT",
            Self::Sold => "SOLD",
            Self::Rented => "RENTED",
        }
    }

    /// Public representation (lower-case, hyphen-separated).
    #[must_use]
    pub const fn as_public(self) -> &'static str {
        match self {
            Self::ForSale => "for-sale",
            Self::ForRent => "for-rent",
            Self::Sold => "sold",
            Self::Rented => "rented",
        }
    }
}

/// Decode a JSON-encoded list column.
///
/// Malformed or absent data becomes an empty list rather than an error.
#[must_use]
pub fn decode_list(encoded: &str) -> Vec<String> {
    serde_json::from_str(encoded).unwrap_or_default()
}

/// Encode an ordered string list for a text column.
#[must_use]
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Company contact block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
}

/// Company statistics block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub total_sales: i32,
    pub average_price: String,
    pub client_satisfaction: i32,
}

/// One image of a property, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id: String,
    pub url: String,
    pub description: String,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl From<property_image::Model> for PropertyImage {
    fn from(m: property_image::Model) -> Self {
        Self {
            id: m.id,
            url: m.url,
            description: m.description,
            order: m.order,
            hash: m.pin_hash,
        }
    }
}

/// Owning-company summary nested inside a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub contact_info: ContactInfo,
}

/// A single listing in its public shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<i32>,
    pub area: i32,
    pub description: String,
    pub features: Vec<String>,
    pub status: PropertyStatus,
    pub images: Vec<PropertyImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanySummary>,
}

impl Property {
    /// Map a joined storage record into the public shape.
    ///
    /// Images must already be loaded in display order and the company, when
    /// requested, joined in; this function performs no I/O.
    pub fn from_record(
        model: property::Model,
        images: Vec<property_image::Model>,
        owner: Option<&company::Model>,
    ) -> AppResult<Self> {
        let property_type = PropertyType::parse(&model.property_type)
            .map_err(|_| AppError::Internal(format!("Corrupt property type: {}", model.property_type)))?;
        let status = PropertyStatus::parse(&model.status)
            .map_err(|_| AppError::Internal(format!("Corrupt property status: {}", model.status)))?;

        Ok(Self {
            id: model.id,
            title: model.title,
            price: model.price,
            location: model.location,
            property_type,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            area: model.area,
            description: model.description,
            features: decode_list(&model.features),
            status,
            images: images.into_iter().map(Into::into).collect(),
            company: owner.map(|c| CompanySummary {
                id: c.id.clone(),
                name: c.name.clone(),
                logo: c.logo.clone(),
                contact_info: ContactInfo {
                    phone: c.contact_phone.clone(),
                    email: c.contact_email.clone(),
                    website: c.contact_website.clone(),
                    address: c.contact_address.clone(),
                },
            }),
        })
    }
}

/// A real-estate company in its public shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_hash: Option<String>,
    pub cover_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_hash: Option<String>,
    pub location: String,
    pub established: i32,
    pub properties_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub specialties: Vec<String>,
    pub featured: bool,
    pub contact_info: ContactInfo,
    pub stats: CompanyStats,
    pub properties: Vec<Property>,
}

impl Company {
    /// Map a joined storage record into the public shape.
    ///
    /// `listings` carries the company's properties with their images
    /// already loaded in display order.
    pub fn from_record(
        model: company::Model,
        listings: Vec<(property::Model, Vec<property_image::Model>)>,
    ) -> AppResult<Self> {
        let properties = listings
            .into_iter()
            .map(|(p, images)| Property::from_record(p, images, None))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            id: model.id,
            name: model.name,
            description: model.description,
            logo: model.logo,
            logo_hash: model.logo_pin_hash,
            cover_image: model.cover_image,
            cover_image_hash: model.cover_image_pin_hash,
            location: model.location,
            established: model.established,
            properties_count: model.properties_count,
            rating: model.rating,
            specialties: decode_list(&model.specialties),
            featured: model.featured,
            contact_info: ContactInfo {
                phone: model.contact_phone,
                email: model.contact_email,
                website: model.contact_website,
                address: model.contact_address,
            },
            stats: CompanyStats {
                total_sales: model.total_sales,
                average_price: model.average_price,
                client_satisfaction: model.client_satisfaction,
            },
            properties,
        })
    }
}
