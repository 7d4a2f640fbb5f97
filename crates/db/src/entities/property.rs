//! Property entity (a single listing).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    pub price: f64,

    pub location: String,

    /// Storage representation of the property type (e.g. `APARTMENT`)
    #[sea_orm(column_name = "type")]
    pub property_type: String,

    #[sea_orm(nullable)]
    pub bedrooms: Option<i32>,

    #[sea_orm(nullable)]
    pub bathrooms: Option<i32>,

    /// Area in area units
    pub area: i32,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// JSON-encoded ordered list of feature strings
    #[sea_orm(column_type = "Text")]
    pub features: String,

    /// Storage representation of the listing status (e.g. `FOR_SALE`)
    pub status: String,

    /// Owning company ID
    pub company_id: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Restrict"
    )]
    Company,

    #[sea_orm(has_many = "super::property_image::Entity")]
    Image,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::property_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
