//! Company service.

use std::sync::Arc;

use chrono::Utc;
use realty_db::entities::company;
use realty_db::repositories::CompanyRepository;
use realty_common::{AppError, AppResult, IdGenerator};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{Company, CompanyStats, ContactInfo, encode_list};

/// Input for creating a company.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub logo_hash: Option<String>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub cover_image_hash: Option<String>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    pub established: i32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub stats: Option<CompanyStats>,
}

/// Input for updating a company. Absent fields stay untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub logo: Option<String>,
    pub logo_hash: Option<String>,
    pub cover_image: Option<String>,
    pub cover_image_hash: Option<String>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    pub established: Option<i32>,
    pub rating: Option<f64>,
    pub specialties: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub contact_info: Option<ContactInfo>,
    pub stats: Option<CompanyStats>,
}

/// Service for company operations.
#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<CompanyRepository>,
    id_gen: IdGenerator,
}

impl CompanyService {
    /// Create a new company service.
    #[must_use]
    pub const fn new(companies: Arc<CompanyRepository>, id_gen: IdGenerator) -> Self {
        Self { companies, id_gen }
    }

    /// List all companies with their listings.
    pub async fn list(&self) -> AppResult<Vec<Company>> {
        self.companies
            .find_all_with_listings()
            .await?
            .into_iter()
            .map(|(model, listings)| Company::from_record(model, listings))
            .collect()
    }

    /// Get one company with its listings.
    pub async fn get(&self, id: &str) -> AppResult<Company> {
        let (model, listings) = self
            .companies
            .find_with_listings(id)
            .await?
            .ok_or_else(|| AppError::CompanyNotFound(id.to_string()))?;

        Company::from_record(model, listings)
    }

    /// Create a company.
    pub async fn create(&self, input: CreateCompanyInput) -> AppResult<Company> {
        input.validate()?;

        let contact = input.contact_info.unwrap_or_default();
        let stats = input.stats.unwrap_or(CompanyStats {
            total_sales: 0,
            average_price: "$0".to_string(),
            client_satisfaction: 0,
        });

        let model = company::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            description: Set(input.description),
            logo: Set(input.logo),
            logo_pin_hash: Set(input.logo_hash),
            cover_image: Set(input.cover_image),
            cover_image_pin_hash: Set(input.cover_image_hash),
            location: Set(input.location),
            established: Set(input.established),
            properties_count: Set(0),
            rating: Set(input.rating),
            specialties: Set(encode_list(&input.specialties)),
            featured: Set(input.featured),
            contact_phone: Set(contact.phone),
            contact_email: Set(contact.email),
            contact_website: Set(contact.website),
            contact_address: Set(contact.address),
            total_sales: Set(stats.total_sales),
            average_price: Set(stats.average_price),
            client_satisfaction: Set(stats.client_satisfaction),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let created = self.companies.create(model).await?;

        tracing::info!(company_id = %created.id, name = %created.name, "Company created");

        Company::from_record(created, vec![])
    }

    /// Update a company; absent fields keep their stored values.
    pub async fn update(&self, id: &str, input: UpdateCompanyInput) -> AppResult<Company> {
        input.validate()?;
        self.companies.get_by_id(id).await?;

        let mut model = company::ActiveModel {
            id: Set(id.to_string()),
            ..Default::default()
        };

        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(logo) = input.logo {
            model.logo = Set(logo);
        }
        if let Some(hash) = input.logo_hash {
            model.logo_pin_hash = Set(Some(hash));
        }
        if let Some(cover_image) = input.cover_image {
            model.cover_image = Set(cover_image);
        }
        if let Some(hash) = input.cover_image_hash {
            model.cover_image_pin_hash = Set(Some(hash));
        }
        if let Some(location) = input.location {
            model.location = Set(location);
        }
        if let Some(established) = input.established {
            model.established = Set(established);
        }
        if let Some(rating) = input.rating {
            model.rating = Set(Some(rating));
        }
        if let Some(specialties) = input.specialties {
            model.specialties = Set(encode_list(&specialties));
        }
        if let Some(featured) = input.featured {
            model.featured = Set(featured);
        }
        if let Some(contact) = input.contact_info {
            model.contact_phone = Set(contact.phone);
            model.contact_email = Set(contact.email);
            model.contact_website = Set(contact.website);
            model.contact_address = Set(contact.address);
        }
        if let Some(stats) = input.stats {
            model.total_sales = Set(stats.total_sales);
            model.average_price = Set(stats.average_price);
            model.client_satisfaction = Set(stats.client_satisfaction);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.companies.update(model).await?;

        self.get(id).await
    }

    /// Delete a company and everything it owns, returning its last state.
    pub async fn delete(&self, id: &str) -> AppResult<Company> {
        let company = self.get(id).await?;

        self.companies.delete_cascade(id).await?;

        tracing::info!(company_id = %id, "Company deleted with all listings");

        Ok(company)
    }

    /// Reconcile the denormalized properties count from a live count.
    pub async fn recount_properties(&self, id: &str) -> AppResult<i32> {
        self.companies.get_by_id(id).await?;
        self.companies.recount_properties(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use realty_db::entities::{property, property_image};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    fn service(db: DatabaseConnection) -> CompanyService {
        CompanyService::new(
            Arc::new(CompanyRepository::new(Arc::new(db))),
            IdGenerator::new(),
        )
    }

    fn create_input(name: &str) -> CreateCompanyInput {
        CreateCompanyInput {
            name: name.to_string(),
            description: "A test agency".to_string(),
            logo: String::new(),
            logo_hash: None,
            cover_image: String::new(),
            cover_image_hash: None,
            location: "Stockholm".to_string(),
            established: 1995,
            rating: None,
            specialties: vec!["Luxury Homes".to_string()],
            featured: false,
            contact_info: None,
            stats: None,
        }
    }

    fn stored_company(id: &str) -> company::Model {
        company::Model {
            id: id.to_string(),
            name: "Acme Realty".to_string(),
            description: "A test agency".to_string(),
            logo: String::new(),
            logo_pin_hash: None,
            cover_image: String::new(),
            cover_image_pin_hash: None,
            location: "Stockholm".to_string(),
            established: 1995,
            properties_count: 0,
            rating: None,
            specialties: r#"["Luxury Homes"]"#.to_string(),
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

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let companies = service(db);

        let result = companies.create(create_input("")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_returns_decoded_company() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_company("c1")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let companies = service(db);

        let company = companies.create(create_input("Acme Realty")).await.unwrap();

        assert_eq!(company.name, "Acme Realty");
        assert_eq!(company.specialties, vec!["Luxury Homes"]);
        assert_eq!(company.stats.average_price, "$0");
        assert!(company.properties.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_company_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<company::Model>::new()])
            .into_connection();
        let companies = service(db);

        let result = companies.get("missing").await;
        assert!(matches!(result, Err(AppError::CompanyNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_last_state() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // joined fetch before the delete
            .append_query_results([[stored_company("c1")]])
            .append_query_results([Vec::<property::Model>::new()])
            .append_query_results([Vec::<property_image::Model>::new()])
            // owned property ids inside the delete transaction
            .append_query_results([Vec::<property::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let companies = service(db);

        let deleted = companies.delete("c1").await.unwrap();
        assert_eq!(deleted.id, "c1");
    }
}
