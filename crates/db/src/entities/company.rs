//! Company entity (real-estate agency/brand).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Logo retrieval URL
    pub logo: String,

    /// Content hash of the logo in the pinning service
    #[sea_orm(nullable)]
    pub logo_pin_hash: Option<String>,

    /// Cover image retrieval URL
    pub cover_image: String,

    /// Content hash of the cover image in the pinning service
    #[sea_orm(nullable)]
    pub cover_image_pin_hash: Option<String>,

    pub location: String,

    /// Year the company was established
    pub established: i32,

    /// Denormalized count of owned properties
    #[sea_orm(default_value = 0)]
    pub properties_count: i32,

    /// Rating in the 0-5 range
    #[sea_orm(nullable)]
    pub rating: Option<f64>,

    /// JSON-encoded ordered list of specialty strings
    #[sea_orm(column_type = "Text")]
    pub specialties: String,

    #[sea_orm(default_value = false)]
    pub featured: bool,

    pub contact_phone: String,
    pub contact_email: String,
    pub contact_website: String,
    pub contact_address: String,

    pub total_sales: i32,
    pub average_price: String,
    pub client_satisfaction: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::property::Entity")]
    Property,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
