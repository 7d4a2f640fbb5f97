//! Property image repository.

use std::sync::Arc;

use crate::entities::{PropertyImage, property_image};
use realty_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Property image repository for database operations.
#[derive(Clone)]
pub struct PropertyImageRepository {
    db: Arc<DatabaseConnection>,
}

impl PropertyImageRepository {
    /// Create a new property image repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an image by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<property_image::Model>> {
        PropertyImage::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an image by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<property_image::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("PropertyImage: {id}")))
    }

    /// Images of one property, ordered by `order` ascending.
    pub async fn find_by_property(
        &self,
        property_id: &str,
    ) -> AppResult<Vec<property_image::Model>> {
        PropertyImage::find()
            .filter(property_image::Column::PropertyId.eq(property_id))
            .order_by_asc(property_image::Column::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an image by its content hash in the pinning service.
    pub async fn find_by_pin_hash(&self, hash: &str) -> AppResult<Option<property_image::Model>> {
        PropertyImage::find()
            .filter(property_image::Column::PinHash.eq(hash))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a single image row.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        PropertyImage::delete_many()
            .filter(property_image::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
