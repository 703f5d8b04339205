use super::Customers;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::FullName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Customers::BirthDate).date().not_null())
                    .col(
                        ColumnDef::new(Customers::RegistrationDate)
                            .date()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on birth_date for the birthday lookup
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customers_birth_date")
                    .table(Customers::Table)
                    .col(Customers::BirthDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}
