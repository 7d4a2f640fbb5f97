//! Property repository.

use std::sync::Arc;

use crate::entities::{Company, Property, PropertyImage, company, property, property_image};
use realty_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

/// A property joined with its ordered images and owning company.
pub type PropertyWithRelations = (
    property::Model,
    Vec<property_image::Model>,
    Option<company::Model>,
);

/// Property repository for database operations.
#[derive(Clone)]
pub struct PropertyRepository {
    db: Arc<DatabaseConnection>,
}

impl PropertyRepository {
    /// Create a new property repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a property by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<property::Model>> {
        Property::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a property by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<property::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PropertyNotFound(id.to_string()))
    }

    /// Find a property with its ordered images and owning company joined in.
    pub async fn find_with_relations(&self, id: &str) -> AppResult<Option<PropertyWithRelations>> {
        let Some(property) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let images = self.find_images(id).await?;

        let owner = Company::find_by_id(&property.company_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Some((property, images, owner)))
    }

    /// Find all properties with their ordered images and owning companies.
    pub async fn find_all_with_relations(&self) -> AppResult<Vec<PropertyWithRelations>> {
        let properties = Property::find()
            .order_by_asc(property::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let property_ids: Vec<String> = properties.iter().map(|p| p.id.clone()).collect();
        let company_ids: Vec<String> = properties.iter().map(|p| p.company_id.clone()).collect();

        let images = PropertyImage::find()
            .filter(property_image::Column::PropertyId.is_in(property_ids))
            .order_by_asc(property_image::Column::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let companies = Company::find()
            .filter(company::Column::Id.is_in(company_ids))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(properties
            .into_iter()
            .map(|p| {
                let own_images = images
                    .iter()
                    .filter(|img| img.property_id == p.id)
                    .cloned()
                    .collect();
                let owner = companies.iter().find(|c| c.id == p.company_id).cloned();
                (p, own_images, owner)
            })
            .collect())
    }

    /// Images for one property, ordered by `order` ascending.
    pub async fn find_images(&self, property_id: &str) -> AppResult<Vec<property_image::Model>> {
        PropertyImage::find()
            .filter(property_image::Column::PropertyId.eq(property_id))
            .order_by_asc(property_image::Column::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a property together with its images, incrementing the owning
    /// company's denormalized count.
    ///
    /// Runs in one transaction: property row, image rows in list order,
    /// counter increment.
    pub async fn create_with_images(
        &self,
        model: property::ActiveModel,
        images: Vec<property_image::ActiveModel>,
    ) -> AppResult<property::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !images.is_empty() {
            PropertyImage::insert_many(images)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        Company::update_many()
            .col_expr(
                company::Column::PropertiesCount,
                Expr::col(company::Column::PropertiesCount).add(1),
            )
            .filter(company::Column::Id.eq(created.company_id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Update a property.
    pub async fn update(&self, model: property::ActiveModel) -> AppResult<property::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace the full image set of a property.
    ///
    /// Delete-all-then-recreate semantics: every existing image row for the
    /// property is removed and the provided rows are inserted, in one
    /// transaction.
    pub async fn replace_images(
        &self,
        property_id: &str,
        images: Vec<property_image::ActiveModel>,
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        PropertyImage::delete_many()
            .filter(property_image::Column::PropertyId.eq(property_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !images.is_empty() {
            PropertyImage::insert_many(images)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a property and its images.
    ///
    /// Children first, then the property row, in one transaction. The
    /// owning company's properties count is left untouched here.
    pub async fn delete_cascade(&self, id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        PropertyImage::delete_many()
            .filter(property_image::Column::PropertyId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Property::delete_many()
            .filter(property::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_property(id: &str, company_id: &str) -> property::Model {
        property::Model {
            id: id.to_string(),
            title: "Loft".to_string(),
            price: 500_000.0,
            location: "X".to_string(),
            property_type: "APARTMENT".to_string(),
            bedrooms: Some(2),
            bathrooms: Some(1),
            area: 1000,
            description: "d".to_string(),
            features: "[]".to_string(),
            status: "FOR_SALE".to_string(),
            company_id: company_id.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_image(id: &str, property_id: &str, order: i32) -> property_image::Model {
        property_image::Model {
            id: id.to_string(),
            url: format!("https://gateway.example/{id}"),
            description: String::new(),
            order,
            pin_hash: None,
            property_id: property_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<property::Model>::new()])
                .into_connection(),
        );

        let repo = PropertyRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        match result {
            Err(AppError::PropertyNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected PropertyNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_images_preserves_order() {
        let images = vec![
            create_test_image("i1", "p1", 0),
            create_test_image("i2", "p1", 1),
            create_test_image("i3", "p1", 2),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([images])
                .into_connection(),
        );

        let repo = PropertyRepository::new(db);
        let found = repo.find_images("p1").await.unwrap();

        let orders: Vec<i32> = found.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(found[0].id, "i1");
    }

    #[tokio::test]
    async fn test_create_with_images_commits_all_steps() {
        let created = create_test_property("p1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // insert property returns the created row
                .append_query_results([[created.clone()]])
                .append_exec_results([
                    // property insert
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    // image insert_many
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    // counter increment
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = PropertyRepository::new(db);

        let model = property::ActiveModel {
            id: Set("p1".to_string()),
            title: Set("Loft".to_string()),
            price: Set(500_000.0),
            location: Set("X".to_string()),
            property_type: Set("APARTMENT".to_string()),
            bedrooms: Set(Some(2)),
            bathrooms: Set(Some(1)),
            area: Set(1000),
            description: Set("d".to_string()),
            features: Set("[]".to_string()),
            status: Set("FOR_SALE".to_string()),
            company_id: Set("c1".to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let image = property_image::ActiveModel {
            id: Set("i1".to_string()),
            url: Set("https://gateway.example/i1".to_string()),
            description: Set(String::new()),
            order: Set(0),
            pin_hash: Set(None),
            property_id: Set("p1".to_string()),
            created_at: Set(Utc::now().into()),
        };

        let result = repo.create_with_images(model, vec![image]).await.unwrap();
        assert_eq!(result.id, "p1");
        assert_eq!(result.company_id, "c1");
    }

    #[tokio::test]
    async fn test_replace_images_with_empty_set() {
        // Replacing with an empty list only issues the delete
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                }])
                .into_connection(),
        );

        let repo = PropertyRepository::new(db);
        assert!(repo.replace_images("p1", vec![]).await.is_ok());
    }
}
