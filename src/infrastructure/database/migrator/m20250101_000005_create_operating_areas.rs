//! Create operating_areas table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OperatingAreas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperatingAreas::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OperatingAreas::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OperatingAreas::Status)
                            .string_len(10)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(OperatingAreas::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OperatingAreas::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OperatingAreas::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum OperatingAreas {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
    UpdatedAt,
}
