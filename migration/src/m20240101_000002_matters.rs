use sea_orm_migration::prelude::*;

use super::m20240101_000001_accounts::{Client, Lawyer, Location};

#[derive(DeriveIden)]
enum Matter {
    Table,
    Id,
    Title,
    Description,
    CostType,
    AmountCents,
    EstimatedHoursHundredths,
    LoggedHoursHundredths,
    StartDate,
    DueDate,
    HasClientPermission,
    HasExternalServices,
    HasClientPreTasks,
    HasRelatedArticles,
    IsChangeable,
    IsActive,
    LawyerId,
    ClientId,
}

#[derive(DeriveIden)]
enum Pretask {
    Table,
    Id,
    Title,
    Description,
    IsComplete,
    IsActive,
    MatterId,
}

#[derive(DeriveIden)]
enum Contact {
    Table,
    Id,
    FirstName,
    LastName,
    Company,
    Email,
    Phone,
    Website,
    AddressId,
}

#[derive(DeriveIden)]
enum MatterContact {
    Table,
    ContactId,
    MatterId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matter::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matter::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Matter::Title).string_len(64).not_null())
                    .col(ColumnDef::new(Matter::Description).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Matter::CostType)
                            .string_len(1)
                            .not_null()
                            .default("P"),
                    )
                    .col(
                        ColumnDef::new(Matter::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matter::EstimatedHoursHundredths)
                            .big_integer()
                            .not_null()
                            .default(500),
                    )
                    .col(
                        ColumnDef::new(Matter::LoggedHoursHundredths)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Matter::StartDate).date().not_null())
                    .col(ColumnDef::new(Matter::DueDate).date())
                    .col(&mut flag(Matter::HasClientPermission, false))
                    .col(&mut flag(Matter::HasExternalServices, false))
                    .col(&mut flag(Matter::HasClientPreTasks, false))
                    .col(&mut flag(Matter::HasRelatedArticles, false))
                    .col(&mut flag(Matter::IsChangeable, false))
                    .col(&mut flag(Matter::IsActive, true))
                    .col(ColumnDef::new(Matter::LawyerId).uuid().not_null())
                    .col(ColumnDef::new(Matter::ClientId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matter_lawyer")
                            .from(Matter::Table, Matter::LawyerId)
                            .to(Lawyer::Table, Lawyer::AccountId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matter_client")
                            .from(Matter::Table, Matter::ClientId)
                            .to(Client::Table, Client::AccountId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_matter_title", Matter::Title),
            ("idx_matter_lawyer", Matter::LawyerId),
            ("idx_matter_client", Matter::ClientId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Matter::Table)
                        .col(column)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Pretask::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pretask::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Pretask::Title).string_len(32).not_null())
                    .col(ColumnDef::new(Pretask::Description).string_len(256).not_null())
                    .col(&mut flag(Pretask::IsComplete, false))
                    .col(&mut flag(Pretask::IsActive, true))
                    .col(ColumnDef::new(Pretask::MatterId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pretask_matter")
                            .from(Pretask::Table, Pretask::MatterId)
                            .to(Matter::Table, Matter::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pretask_matter")
                    .table(Pretask::Table)
                    .col(Pretask::MatterId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contact::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Contact::FirstName).string_len(32).not_null())
                    .col(ColumnDef::new(Contact::LastName).string_len(32).not_null())
                    .col(ColumnDef::new(Contact::Company).string_len(64))
                    .col(ColumnDef::new(Contact::Email).string_len(254))
                    .col(ColumnDef::new(Contact::Phone).string_len(64))
                    .col(ColumnDef::new(Contact::Website).string_len(128))
                    .col(ColumnDef::new(Contact::AddressId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_address")
                            .from(Contact::Table, Contact::AddressId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MatterContact::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MatterContact::ContactId).uuid().not_null())
                    .col(ColumnDef::new(MatterContact::MatterId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(MatterContact::ContactId)
                            .col(MatterContact::MatterId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matter_contact_contact")
                            .from(MatterContact::Table, MatterContact::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matter_contact_matter")
                            .from(MatterContact::Table, MatterContact::MatterId)
                            .to(Matter::Table, Matter::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matter_contact_matter")
                    .table(MatterContact::Table)
                    .col(MatterContact::MatterId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatterContact::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contact::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pretask::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matter::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

fn flag(column: impl IntoIden, default: bool) -> ColumnDef {
    ColumnDef::new(column)
        .boolean()
        .not_null()
        .default(default)
        .to_owned()
}
