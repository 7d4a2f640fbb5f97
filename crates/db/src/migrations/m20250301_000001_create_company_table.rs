//! Create `company` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Company::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Company::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Company::Description).text().not_null())
                    .col(
                        ColumnDef::new(Company::Logo)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Company::LogoPinHash).string_len(128))
                    .col(
                        ColumnDef::new(Company::CoverImage)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Company::CoverImagePinHash).string_len(128))
                    .col(ColumnDef::new(Company::Location).string_len(256).not_null())
                    .col(ColumnDef::new(Company::Established).integer().not_null())
                    .col(
                        ColumnDef::new(Company::PropertiesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Company::Rating).double())
                    .col(
                        ColumnDef::new(Company::Specialties)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Company::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Company::ContactPhone)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Company::ContactEmail)
                            .string_len(256)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Company::ContactWebsite)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Company::ContactAddress)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Company::TotalSales)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Company::AveragePrice)
                            .string_len(64)
                            .not_null()
                            .default("$0"),
                    )
                    .col(
                        ColumnDef::new(Company::ClientSatisfaction)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Company::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Company::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: featured (for featured-company reads)
        manager
            .create_index(
                Index::create()
                    .name("idx_company_featured")
                    .table(Company::Table)
                    .col(Company::Featured)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Company::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Company {
    Table,
    Id,
    Name,
    Description,
    Logo,
    LogoPinHash,
    CoverImage,
    CoverImagePinHash,
    Location,
    Established,
    PropertiesCount,
    Rating,
    Specialties,
    Featured,
    ContactPhone,
    ContactEmail,
    ContactWebsite,
    ContactAddress,
    TotalSales,
    AveragePrice,
    ClientSatisfaction,
    CreatedAt,
    UpdatedAt,
}
