use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000000_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(pk_uuid(Trips::Id))
                    .col(uuid(Trips::UserId))
                    .col(double(Trips::KilometersDriven))
                    .col(double(Trips::DieselLitersUsed))
                    .col(double(Trips::DieselCost))
                    .col(double(Trips::MaintenanceCost))
                    .col(double(Trips::ProfitMarginPercentage))
                    .col(double(Trips::ProfitAmount))
                    .col(double(Trips::GrandTotal))
                    .col(
                        timestamp_with_time_zone(Trips::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_user_id")
                            .from(Trips::Table, Trips::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Analytics and listings filter and sort on created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_trips_created_at")
                    .table(Trips::Table)
                    .col(Trips::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trips_user_id")
                    .table(Trips::Table)
                    .col(Trips::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Trips {
    Table,
    Id,
    UserId,
    KilometersDriven,
    DieselLitersUsed,
    DieselCost,
    MaintenanceCost,
    ProfitMarginPercentage,
    ProfitAmount,
    GrandTotal,
    CreatedAt,
}
