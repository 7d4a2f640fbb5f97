//! Create `property` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Property::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Property::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Property::Price).double().not_null())
                    .col(ColumnDef::new(Property::Location).string_len(256).not_null())
                    .col(ColumnDef::new(Property::Type).string_len(32).not_null())
                    .col(ColumnDef::new(Property::Bedrooms).integer())
                    .col(ColumnDef::new(Property::Bathrooms).integer())
                    .col(ColumnDef::new(Property::Area).integer().not_null())
                    .col(ColumnDef::new(Property::Description).text().not_null())
                    .col(
                        ColumnDef::new(Property::Features)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Property::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Property::CompanyId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Property::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Property::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_company")
                            .from(Property::Table, Property::CompanyId)
                            .to(Company::Table, Company::Id)
                            // Cascades run explicitly in application transactions
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: company_id (for listing a company's properties)
        manager
            .create_index(
                Index::create()
                    .name("idx_property_company_id")
                    .table(Property::Table)
                    .col(Property::CompanyId)
                    .to_owned(),
            )
            .await?;

        // Index: status (for status-filtered reads)
        manager
            .create_index(
                Index::create()
                    .name("idx_property_status")
                    .table(Property::Table)
                    .col(Property::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Property::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Property {
    Table,
    Id,
    Title,
    Price,
    Location,
    Type,
    Bedrooms,
    Bathrooms,
    Area,
    Description,
    Features,
    Status,
    CompanyId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Company {
    Table,
    Id,
}
