//! Create bank_details table

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
                    .table(BankDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BankDetails::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    // one payout account per rider
                    .col(
                        ColumnDef::new(BankDetails::RiderId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(BankDetails::BankName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankDetails::AccountNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankDetails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankDetails::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_details_rider")
                            .from(BankDetails::Table, BankDetails::RiderId)
                            .to(Riders::Table, Riders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BankDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BankDetails {
    Table,
    Id,
    RiderId,
    BankName,
    AccountNumber,
    CreatedAt,
    UpdatedAt,
}
