//! Property service.

use std::sync::Arc;

use chrono::Utc;
use realty_common::{AppError, AppResult, IdGenerator};
use realty_db::entities::{property, property_image};
use realty_db::repositories::{CompanyRepository, PropertyRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{Property, PropertyStatus, PropertyType, encode_list};

/// One image in a create or replace request. Display order is the position
/// in the request list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPropertyImage {
    #[validate(length(min = 1, message = "image url is required"))]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hash: Option<String>,
}

/// Input for creating a property.
///
/// `type` and `status` accept either the public or the storage spelling;
/// anything outside the enumerations is a validation error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyInput {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub price: f64,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    pub area: i32,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub status: String,
    #[validate(length(min = 1, message = "companyId is required"))]
    pub company_id: String,
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<NewPropertyImage>,
}

/// Input for updating a property. Absent fields stay untouched; a present
/// `images` list replaces the full image set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<i32>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub status: Option<String>,
    #[validate(nested)]
    pub images: Option<Vec<NewPropertyImage>>,
}

/// Service for property operations.
#[derive(Clone)]
pub struct PropertyService {
    properties: Arc<PropertyRepository>,
    companies: Arc<CompanyRepository>,
    id_gen: IdGenerator,
}

impl PropertyService {
    /// Create a new property service.
    #[must_use]
    pub const fn new(
        properties: Arc<PropertyRepository>,
        companies: Arc<CompanyRepository>,
        id_gen: IdGenerator,
    ) -> Self {
        Self {
            properties,
            companies,
            id_gen,
        }
    }

    /// List all properties with images and owning companies.
    pub async fn list(&self) -> AppResult<Vec<Property>> {
        self.properties
            .find_all_with_relations()
            .await?
            .into_iter()
            .map(|(model, images, owner)| Property::from_record(model, images, owner.as_ref()))
            .collect()
    }

    /// Get one property with its images and owning company.
    pub async fn get(&self, id: &str) -> AppResult<Property> {
        let (model, images, owner) = self
            .properties
            .find_with_relations(id)
            .await?
            .ok_or_else(|| AppError::PropertyNotFound(id.to_string()))?;

        Property::from_record(model, images, owner.as_ref())
    }

    /// Create a property with its images.
    ///
    /// The owning company must exist; the create runs in one transaction
    /// together with the image inserts and the company counter increment.
    pub async fn create(&self, input: CreatePropertyInput) -> AppResult<Property> {
        input.validate()?;

        let property_type = PropertyType::parse(&input.property_type)?;
        let status = PropertyStatus::parse(&input.status)?;

        self.companies.get_by_id(&input.company_id).await?;

        let now = Utc::now();
        let property_id = self.id_gen.generate();

        let images = self.image_rows(&property_id, &input.images);

        let model = property::ActiveModel {
            id: Set(property_id.clone()),
            title: Set(input.title),
            price: Set(input.price),
            location: Set(input.location),
            property_type: Set(property_type.as_storage().to_string()),
            bedrooms: Set(input.bedrooms),
            bathrooms: Set(input.bathrooms),
            area: Set(input.area),
            description: Set(input.description),
            features: Set(encode_list(&input.features)),
            status: Set(status.as_storage().to_string()),
            company_id: Set(input.company_id),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        self.properties.create_with_images(model, images).await?;

        tracing::info!(property_id = %property_id, "Property created");

        self.get(&property_id).await
    }

    /// Update a property; a present `images` list replaces all images.
    pub async fn update(&self, id: &str, input: UpdatePropertyInput) -> AppResult<Property> {
        input.validate()?;
        let existing = self.properties.get_by_id(id).await?;

        let mut model = property::ActiveModel {
            id: Set(existing.id.clone()),
            ..Default::default()
        };

        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(price) = input.price {
            model.price = Set(price);
        }
        if let Some(location) = input.location {
            model.location = Set(location);
        }
        if let Some(property_type) = input.property_type {
            model.property_type = Set(PropertyType::parse(&property_type)?.as_storage().to_string());
        }
        if let Some(bedrooms) = input.bedrooms {
            model.bedrooms = Set(Some(bedrooms));
        }
        if let Some(bathrooms) = input.bathrooms {
            model.bathrooms = Set(Some(bathrooms));
        }
        if let Some(area) = input.area {
            model.area = Set(area);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(features) = input.features {
            model.features = Set(encode_list(&features));
        }
        if let Some(status) = input.status {
            model.status = Set(PropertyStatus::parse(&status)?.as_storage().to_string());
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.properties.update(model).await?;

        if let Some(images) = input.images {
            let rows = self.image_rows(id, &images);
            self.properties.replace_images(id, rows).await?;
        }

        self.get(id).await
    }

    /// Delete a property and its images, returning its last state.
    ///
    /// The owning company's denormalized count is left as-is here;
    /// [`crate::CompanyService::recount_properties`] reconciles drift.
    pub async fn delete(&self, id: &str) -> AppResult<Property> {
        let property = self.get(id).await?;

        self.properties.delete_cascade(id).await?;

        tracing::info!(property_id = %id, "Property deleted");

        Ok(property)
    }

    fn image_rows(
        &self,
        property_id: &str,
        images: &[NewPropertyImage],
    ) -> Vec<property_image::ActiveModel> {
        let now = Utc::now();
        images
            .iter()
            .enumerate()
            .map(|(order, image)| property_image::ActiveModel {
                id: Set(self.id_gen.generate()),
                url: Set(image.url.clone()),
                description: Set(image.description.clone()),
                order: Set(order as i32),
                pin_hash: Set(image.hash.clone()),
                property_id: Set(property_id.to_string()),
                created_at: Set(now.into()),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use realty_db::entities::company;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    fn service(db: DatabaseConnection) -> PropertyService {
        let db = Arc::new(db);
        PropertyService::new(
            Arc::new(PropertyRepository::new(db.clone())),
            Arc::new(CompanyRepository::new(db)),
            IdGenerator::new(),
        )
    }

    fn create_input(company_id: &str) -> CreatePropertyInput {
        CreatePropertyInput {
            title: "Sunny loft".to_string(),
            price: 500_000.0,
            location: "Stockholm".to_string(),
            property_type: "apartment".to_string(),
            bedrooms: Some(2),
            bathrooms: Some(1),
            area: 1000,
            description: "Bright corner unit".to_string(),
            features: vec!["Balcony".to_string()],
            status: "for-sale".to_string(),
            company_id: company_id.to_string(),
            images: vec![NewPropertyImage {
                url: "https://gateway.example/Qm1".to_string(),
                description: String::new(),
                hash: Some("Qm1".to_string()),
            }],
        }
    }

    fn stored_company(id: &str) -> company::Model {
        company::Model {
            id: id.to_string(),
            name: "Acme Realty".to_string(),
            description: "d".to_string(),
            logo: String::new(),
            logo_pin_hash: None,
            cover_image: String::new(),
            cover_image_pin_hash: None,
            location: "Stockholm".to_string(),
            established: 1995,
            properties_count: 1,
            rating: None,
            specialties: "[]".to_string(),
            featured: false,
            contact_phone: String::new(),
            contact_email: String::new(),
            contact_website: String::new(),
            contact_address: String::new(),
            total_sales: 0,
            average_price: "$0".to_string(),
            client_satisfaction: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn stored_property(id: &str, company_id: &str) -> property::Model {
        property::Model {
            id: id.to_string(),
            title: "Sunny loft".to_string(),
            price: 500_000.0,
            location: "Stockholm".to_string(),
            property_type: "APARTMENT".to_string(),
            bedrooms: Some(2),
            bathrooms: Some(1),
            area: 1000,
            description: "Bright corner unit".to_string(),
            features: r#"["Balcony"]"#.to_string(),
            status: "FOR_SALE".to_string(),
            company_id: company_id.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn stored_image(id: &str, property_id: &str, order: i32) -> property_image::Model {
        property_image::Model {
            id: id.to_string(),
            url: format!("https://gateway.example/{id}"),
            description: String::new(),
            order,
            pin_hash: Some(id.to_string()),
            property_id: property_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let properties = service(db);

        let mut input = create_input("c1");
        input.property_type = "castle".to_string();

        let result = properties.create(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_for_missing_company_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<company::Model>::new()])
            .into_connection();
        let properties = service(db);

        let result = properties.create(create_input("ghost")).await;
        assert!(matches!(result, Err(AppError::CompanyNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_returns_joined_property() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // owning company existence check
            .append_query_results([[stored_company("c1")]])
            // property insert returning
            .append_query_results([[stored_property("p1", "c1")]])
            // re-fetch: property, images, company
            .append_query_results([[stored_property("p1", "c1")]])
            .append_query_results([[stored_image("Qm1", "p1", 0)]])
            .append_query_results([[stored_company("c1")]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let properties = service(db);

        let property = properties.create(create_input("c1")).await.unwrap();

        assert_eq!(property.id, "p1");
        assert_eq!(property.property_type, PropertyType::Apartment);
        assert_eq!(property.status, PropertyStatus::ForSale);
        assert_eq!(property.images.len(), 1);
        assert_eq!(property.images[0].order, 0);
        assert_eq!(property.company.unwrap().id, "c1");
    }

    #[tokio::test]
    async fn test_update_missing_property_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<property::Model>::new()])
            .into_connection();
        let properties = service(db);

        let result = properties
            .update("ghost", UpdatePropertyInput::default())
            .await;
        assert!(matches!(result, Err(AppError::PropertyNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_last_state() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // joined fetch before the delete
            .append_query_results([[stored_property("p1", "c1")]])
            .append_query_results([[stored_image("Qm1", "p1", 0)]])
            .append_query_results([[stored_company("c1")]])
            .append_exec_results([
                // image delete, property delete
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let properties = service(db);

        let deleted = properties.delete("p1").await.unwrap();
        assert_eq!(deleted.id, "p1");
        assert_eq!(deleted.images.len(), 1);
    }
}
