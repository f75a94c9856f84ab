//! Create riders table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Riders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Riders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Riders::Fullname).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Riders::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Riders::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Riders::Phone)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Riders::Password).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Riders::AvgRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Riders::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Riders::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Riders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Riders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Dispatch screens filter riders by account state
        manager
            .create_index(
                Index::create()
                    .name("idx_riders_status")
                    .table(Riders::Table)
                    .col(Riders::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Riders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Riders {
    Table,
    Id,
    Fullname,
    Username,
    Email,
    Phone,
    Password,
    AvgRating,
    Status,
    IsVerified,
    CreatedAt,
    UpdatedAt,
}
