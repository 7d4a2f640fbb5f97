//! Create `property_image` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertyImage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyImage::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::Url)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::Description)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(PropertyImage::Order).integer().not_null())
                    .col(ColumnDef::new(PropertyImage::PinHash).string_len(128))
                    .col(
                        ColumnDef::new(PropertyImage::PropertyId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_image_property")
                            .from(PropertyImage::Table, PropertyImage::PropertyId)
                            .to(Property::Table, Property::Id)
                            // Cascades run explicitly in application transactions
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (property_id, order) for ordered image reads
        manager
            .create_index(
                Index::create()
                    .name("idx_property_image_property_id_order")
                    .table(PropertyImage::Table)
                    .col(PropertyImage::PropertyId)
                    .col(PropertyImage::Order)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyImage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PropertyImage {
    Table,
    Id,
    Url,
    Description,
    Order,
    PinHash,
    PropertyId,
    CreatedAt,
}

#[derive(Iden)]
enum Property {
    Table,
    Id,
}
