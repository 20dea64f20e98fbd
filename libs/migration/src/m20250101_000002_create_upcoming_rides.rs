use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_trips::Trips;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UpcomingRides::Table)
                    .if_not_exists()
                    .col(pk_uuid(UpcomingRides::Id))
                    .col(timestamp_with_time_zone(UpcomingRides::RideDate))
                    .col(string(UpcomingRides::ClientName))
                    .col(string(UpcomingRides::ClientPhone))
                    .col(string_null(UpcomingRides::ClientEmail))
                    .col(uuid_null(UpcomingRides::TripId))
                    .col(text_null(UpcomingRides::Notes))
                    .col(string(UpcomingRides::Status).default("scheduled"))
                    .col(
                        timestamp_with_time_zone(UpcomingRides::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upcoming_rides_trip_id")
                            .from(UpcomingRides::Table, UpcomingRides::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_upcoming_rides_ride_date")
                    .table(UpcomingRides::Table)
                    .col(UpcomingRides::RideDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UpcomingRides::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UpcomingRides {
    Table,
    Id,
    RideDate,
    ClientName,
    ClientPhone,
    ClientEmail,
    TripId,
    Notes,
    Status,
    CreatedAt,
}
