//! Create deliveries table

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_users::Users;
use super::m20250101_000003_create_riders::Riders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deliveries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deliveries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deliveries::UserId).string().not_null())
                    .col(ColumnDef::new(Deliveries::RiderId).string().null())
                    .col(
                        ColumnDef::new(Deliveries::PickupCoordinate)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deliveries::DeliveryCoordinate)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deliveries::DeliveryCode)
                            .string_len(12)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Deliveries::IsPickedup)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Deliveries::IsDelivered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Deliveries::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Deliveries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deliveries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deliveries_user")
                            .from(Deliveries::Table, Deliveries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deliveries_rider")
                            .from(Deliveries::Table, Deliveries::RiderId)
                            .to(Riders::Table, Riders::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Relation loads batch by these FKs
        manager
            .create_index(
                Index::create()
                    .name("idx_deliveries_user")
                    .table(Deliveries::Table)
                    .col(Deliveries::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deliveries_rider")
                    .table(Deliveries::Table)
                    .col(Deliveries::RiderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deliveries_status")
                    .table(Deliveries::Table)
                    .col(Deliveries::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deliveries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Deliveries {
    Table,
    Id,
    UserId,
    RiderId,
    PickupCoordinate,
    DeliveryCoordinate,
    DeliveryCode,
    IsPickedup,
    IsDelivered,
    Status,
    CreatedAt,
    UpdatedAt,
}
