use sea_orm_migration::prelude::*;

use super::m20240101_000001_accounts::{Client, Lawyer};

#[derive(DeriveIden)]
enum Negotiation {
    Table,
    Id,
    Title,
    CostType,
    AmountCents,
    InitialAmountCents,
    BudgetCents,
    IsAccepted,
    IsChangeable,
    LawyerId,
    ClientId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Negotiation::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Negotiation::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Negotiation::Title).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Negotiation::CostType)
                            .string_len(1)
                            .not_null()
                            .default("P"),
                    )
                    .col(
                        ColumnDef::new(Negotiation::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Negotiation::InitialAmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Negotiation::BudgetCents)
                            .big_integer()
                            .not_null()
                            .default(10_000),
                    )
                    .col(
                        ColumnDef::new(Negotiation::IsAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Negotiation::IsChangeable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Negotiation::LawyerId).uuid().not_null())
                    .col(ColumnDef::new(Negotiation::ClientId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_negotiation_lawyer")
                            .from(Negotiation::Table, Negotiation::LawyerId)
                            .to(Lawyer::Table, Lawyer::AccountId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_negotiation_client")
                            .from(Negotiation::Table, Negotiation::ClientId)
                            .to(Client::Table, Client::AccountId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_negotiation_title")
                    .table(Negotiation::Table)
                    .col(Negotiation::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Negotiation::Table).if_exists().to_owned())
            .await
    }
}
