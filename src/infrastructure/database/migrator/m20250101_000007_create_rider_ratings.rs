//! Create rider_ratings table

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
                    .table(RiderRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RiderRatings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RiderRatings::RiderId).string().not_null())
                    .col(ColumnDef::new(RiderRatings::UserId).string().not_null())
                    .col(ColumnDef::new(RiderRatings::Rating).integer().not_null())
                    .col(ColumnDef::new(RiderRatings::Review).text().null())
                    .col(
                        ColumnDef::new(RiderRatings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiderRatings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rider_ratings_rider")
                            .from(RiderRatings::Table, RiderRatings::RiderId)
                            .to(Riders::Table, Riders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rider_ratings_user")
                            .from(RiderRatings::Table, RiderRatings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rider_ratings_rider")
                    .table(RiderRatings::Table)
                    .col(RiderRatings::RiderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rider_ratings_user")
                    .table(RiderRatings::Table)
                    .col(RiderRatings::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RiderRatings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RiderRatings {
    Table,
    Id,
    RiderId,
    UserId,
    Rating,
    Review,
    CreatedAt,
    UpdatedAt,
}
