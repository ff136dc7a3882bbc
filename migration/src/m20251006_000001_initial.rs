use sea_orm_migration::prelude::*;

/// Staff and admin accounts
#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FullName,
    IsApproved,
    Role,
    ProfileColor,
    CreatedAt,
}

/// One row per reported batch of sales
#[derive(DeriveIden)]
enum SalesRecords {
    Table,
    Id,
    UserId,
    SaleDate,
    Amount,
    RlsCount,
    Notes,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(255).null())
                    .col(ColumnDef::new(Users::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Users::FullName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(16)
                            .not_null()
                            .default("staff"),
                    )
                    .col(
                        ColumnDef::new(Users::ProfileColor)
                            .string_len(7)
                            .not_null()
                            .default("#3B82F6"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // sales are immutable; removing an employee removes their history with them
        manager
            .create_table(
                Table::create()
                    .table(SalesRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalesRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SalesRecords::UserId).big_integer().not_null())
                    .col(ColumnDef::new(SalesRecords::SaleDate).date().not_null())
                    .col(ColumnDef::new(SalesRecords::Amount).integer().not_null())
                    .col(
                        ColumnDef::new(SalesRecords::RlsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SalesRecords::Notes).text().null())
                    .col(ColumnDef::new(SalesRecords::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(SalesRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_records_user")
                            .from(SalesRecords::Table, SalesRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_records_created_by")
                            .from(SalesRecords::Table, SalesRecords::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ranking scans one month of one user at a time
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_records_user_date")
                    .table(SalesRecords::Table)
                    .col(SalesRecords::UserId)
                    .col(SalesRecords::SaleDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(SalesRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
