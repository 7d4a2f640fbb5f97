//! Company repository.

use std::sync::Arc;

use crate::entities::{Company, Property, PropertyImage, company, property, property_image};
use realty_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

/// A company joined with its properties and their ordered images.
pub type CompanyWithListings = (
    company::Model,
    Vec<(property::Model, Vec<property_image::Model>)>,
);

/// Company repository for database operations.
#[derive(Clone)]
pub struct CompanyRepository {
    db: Arc<DatabaseConnection>,
}

impl CompanyRepository {
    /// Create a new company repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a company by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<company::Model>> {
        Company::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a company by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<company::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::CompanyNotFound(id.to_string()))
    }

    /// Find a company with its properties and their images joined in.
    ///
    /// Images come back ordered by `order` ascending.
    pub async fn find_with_listings(&self, id: &str) -> AppResult<Option<CompanyWithListings>> {
        let Some(company) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let properties = self.load_listings(std::slice::from_ref(&company)).await?;
        let listings = properties.into_iter().next().unwrap_or_default();

        Ok(Some((company, listings)))
    }

    /// Find all companies with their properties and images joined in.
    pub async fn find_all_with_listings(&self) -> AppResult<Vec<CompanyWithListings>> {
        let companies = Company::find()
            .order_by_asc(company::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let listings = self.load_listings(&companies).await?;

        Ok(companies.into_iter().zip(listings).collect())
    }

    /// Load properties (with ordered images) for each given company, in
    /// company order.
    async fn load_listings(
        &self,
        companies: &[company::Model],
    ) -> AppResult<Vec<Vec<(property::Model, Vec<property_image::Model>)>>> {
        let company_ids: Vec<String> = companies.iter().map(|c| c.id.clone()).collect();

        let properties = Property::find()
            .filter(property::Column::CompanyId.is_in(company_ids))
            .order_by_asc(property::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let property_ids: Vec<String> = properties.iter().map(|p| p.id.clone()).collect();

        let images = PropertyImage::find()
            .filter(property_image::Column::PropertyId.is_in(property_ids))
            .order_by_asc(property_image::Column::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut result: Vec<Vec<(property::Model, Vec<property_image::Model>)>> =
            companies.iter().map(|_| Vec::new()).collect();

        for property in properties {
            let own_images: Vec<property_image::Model> = images
                .iter()
                .filter(|img| img.property_id == property.id)
                .cloned()
                .collect();

            if let Some(pos) = companies.iter().position(|c| c.id == property.company_id) {
                result[pos].push((property, own_images));
            }
        }

        Ok(result)
    }

    /// Create a new company.
    pub async fn create(&self, model: company::ActiveModel) -> AppResult<company::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a company.
    pub async fn update(&self, model: company::ActiveModel) -> AppResult<company::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a company and everything it owns.
    ///
    /// Children go first: images of each owned property, then the
    /// properties, then the company row, all in one transaction.
    pub async fn delete_cascade(&self, id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let property_ids: Vec<String> = Property::find()
            .filter(property::Column::CompanyId.eq(id))
            .all(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if !property_ids.is_empty() {
            PropertyImage::delete_many()
                .filter(property_image::Column::PropertyId.is_in(property_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            Property::delete_many()
                .filter(property::Column::Id.is_in(property_ids))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        Company::delete_many()
            .filter(company::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment the denormalized properties count atomically (single
    /// UPDATE query, no fetch).
    pub async fn increment_properties_count(&self, company_id: &str) -> AppResult<()> {
        Company::update_many()
            .col_expr(
                company::Column::PropertiesCount,
                Expr::col(company::Column::PropertiesCount).add(1),
            )
            .filter(company::Column::Id.eq(company_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement the denormalized properties count atomically, never going
    /// below zero.
    pub async fn decrement_properties_count(&self, company_id: &str) -> AppResult<()> {
        Company::update_many()
            .col_expr(
                company::Column::PropertiesCount,
                Expr::cust("GREATEST(properties_count - 1, 0)"),
            )
            .filter(company::Column::Id.eq(company_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Reconcile the denormalized properties count from a live COUNT.
    ///
    /// Maintenance operation for counter drift; returns the fresh count.
    pub async fn recount_properties(&self, company_id: &str) -> AppResult<i32> {
        let count = Property::find()
            .filter(property::Column::CompanyId.eq(company_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))? as i32;

        Company::update_many()
            .col_expr(company::Column::PropertiesCount, Expr::value(count))
            .filter(company::Column::Id.eq(company_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_company(id: &str, name: &str) -> company::Model {
        company::Model {
            id: id.to_string(),
            name: name.to_string(),
            description: "A test agency".to_string(),
            logo: String::new(),
            logo_pin_hash: None,
            cover_image: String::new(),
            cover_image_pin_hash: None,
            location: "Stockholm".to_string(),
            established: 1995,
            properties_count: 0,
            rating: Some(4.5),
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

    #[tokio::test]
    async fn test_find_by_id_found() {
        let company = create_test_company("c1", "Acme Realty");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[company.clone()]])
                .into_connection(),
        );

        let repo = CompanyRepository::new(db);
        let result = repo.find_by_id("c1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().name, "Acme Realty");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<company::Model>::new()])
                .into_connection(),
        );

        let repo = CompanyRepository::new(db);
        let result = repo.find_by_id("nonexistent").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<company::Model>::new()])
                .into_connection(),
        );

        let repo = CompanyRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        match result {
            Err(AppError::CompanyNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected CompanyNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_increment_properties_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CompanyRepository::new(db);
        assert!(repo.increment_properties_count("c1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_cascade_removes_children_first() {
        // One owned property: images deleted, then properties, then company
        let property = property::Model {
            id: "p1".to_string(),
            title: "Loft".to_string(),
            price: 500_000.0,
            location: "X".to_string(),
            property_type: "APARTMENT".to_string(),
            bedrooms: None,
            bathrooms: None,
            area: 1000,
            description: "d".to_string(),
            features: "[]".to_string(),
            status: "FOR_SALE".to_string(),
            company_id: "c1".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[property]])
                .append_exec_results([
                    // delete images
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 2,
                    },
                    // delete properties
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    // delete company
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = CompanyRepository::new(db);
        assert!(repo.delete_cascade("c1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_cascade_without_properties() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<property::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CompanyRepository::new(db);
        assert!(repo.delete_cascade("c1").await.is_ok());
    }
}
