use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Location {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    UserId,
    UserType,
    Company,
    Email,
    Phone,
    Website,
    AddressId,
}

#[derive(DeriveIden)]
pub(crate) enum Lawyer {
    Table,
    AccountId,
}

#[derive(DeriveIden)]
pub(crate) enum Client {
    Table,
    AccountId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Location::Id).uuid().not_null().primary_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Account::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Account::UserId).uuid().not_null().unique_key())
                    .col(
                        ColumnDef::new(Account::UserType)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(ColumnDef::new(Account::Company).string_len(64))
                    .col(ColumnDef::new(Account::Email).string_len(254).unique_key())
                    .col(ColumnDef::new(Account::Phone).string_len(64).unique_key())
                    .col(ColumnDef::new(Account::Website).string_len(128))
                    .col(ColumnDef::new(Account::AddressId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_address")
                            .from(Account::Table, Account::AddressId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_address")
                    .table(Account::Table)
                    .col(Account::AddressId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Lawyer::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lawyer::AccountId).uuid().not_null().primary_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lawyer_account")
                            .from(Lawyer::Table, Lawyer::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Client::AccountId).uuid().not_null().primary_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_account")
                            .from(Client::Table, Client::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Client::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lawyer::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Location::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
