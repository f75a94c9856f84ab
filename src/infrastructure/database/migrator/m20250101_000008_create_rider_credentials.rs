//! Create rider_credentials table

use sea_orm_migration::prelude::*;

use super::m20250101_000003_create_riders::Riders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RiderCredentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RiderCredentials::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::RiderId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::Nin)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::DriverLicense)
                            .string_len(30)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::PlateNumber)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::Status)
                            .string_len(10)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiderCredentials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rider_credentials_rider")
                            .from(RiderCredentials::Table, RiderCredentials::RiderId)
                            .to(Riders::Table, Riders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rider_credentials_rider")
                    .table(RiderCredentials::Table)
                    .col(RiderCredentials::RiderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RiderCredentials::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RiderCredentials {
    Table,
    Id,
    RiderId,
    Nin,
    DriverLicense,
    PlateNumber,
    Status,
    CreatedAt,
    UpdatedAt,
}
