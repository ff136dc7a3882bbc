use sea_orm_migration::prelude::*;

use super::m20251006_000001_initial::Users;

/// Prize definitions for the balloon game
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    NameDe,
    NameTr,
    ValueCents,
    Glyph,
    Weight,
    IsActive,
    Category,
    CreatedAt,
}

/// Draw outcomes
#[derive(DeriveIden)]
enum PrizeWins {
    Table,
    Id,
    UserId,
    PrizeId,
    PrizeNameDe,
    PrizeNameTr,
    ValueCents,
    Glyph,
    PeriodType,
    PeriodYear,
    PeriodMonth,
    WonAt,
}

/// Monthly champion grants
#[derive(DeriveIden)]
enum PeriodChampions {
    Table,
    Id,
    UserId,
    Year,
    Month,
    WinnerType,
    DrawConsumed,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `weight` is a relative draw weight, not a percentage; only active prizes
/// take part in a draw and the weights are compared against their sum.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::NameDe).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::NameTr).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Prizes::ValueCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::Glyph)
                            .string_len(16)
                            .not_null()
                            .default("🎁"),
                    )
                    .col(
                        ColumnDef::new(Prizes::Weight)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(Prizes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prizes::Category)
                            .string_len(16)
                            .not_null()
                            .default("monthly"),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // prize name/value/glyph are copied onto the win so history survives prize deletion
        manager
            .create_table(
                Table::create()
                    .table(PrizeWins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrizeWins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrizeWins::UserId).big_integer().not_null())
                    .col(ColumnDef::new(PrizeWins::PrizeId).big_integer().null())
                    .col(ColumnDef::new(PrizeWins::PrizeNameDe).string_len(255).not_null())
                    .col(ColumnDef::new(PrizeWins::PrizeNameTr).string_len(255).not_null())
                    .col(
                        ColumnDef::new(PrizeWins::ValueCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(PrizeWins::Glyph).string_len(16).not_null())
                    .col(
                        ColumnDef::new(PrizeWins::PeriodType)
                            .string_len(16)
                            .not_null()
                            .default("monthly"),
                    )
                    .col(ColumnDef::new(PrizeWins::PeriodYear).integer().not_null())
                    .col(ColumnDef::new(PrizeWins::PeriodMonth).integer().not_null())
                    .col(
                        ColumnDef::new(PrizeWins::WonAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prize_wins_user")
                            .from(PrizeWins::Table, PrizeWins::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prize_wins_prize")
                            .from(PrizeWins::Table, PrizeWins::PrizeId)
                            .to(Prizes::Table, Prizes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prize_wins_user")
                    .table(PrizeWins::Table)
                    .col(PrizeWins::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PeriodChampions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PeriodChampions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PeriodChampions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PeriodChampions::Year).integer().not_null())
                    .col(ColumnDef::new(PeriodChampions::Month).integer().not_null())
                    .col(
                        ColumnDef::new(PeriodChampions::WinnerType)
                            .string_len(32)
                            .not_null()
                            .default("sales"),
                    )
                    .col(
                        ColumnDef::new(PeriodChampions::DrawConsumed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PeriodChampions::CreatedAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_period_champions_user")
                            .from(PeriodChampions::Table, PeriodChampions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one grant per (user, year, month)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_period_champions_user_period")
                    .table(PeriodChampions::Table)
                    .col(PeriodChampions::UserId)
                    .col(PeriodChampions::Year)
                    .col(PeriodChampions::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // wins -> champions -> prizes
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PrizeWins::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PeriodChampions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}
