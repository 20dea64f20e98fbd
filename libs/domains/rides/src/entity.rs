use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Ride, RideStatus};

/// Sea-ORM Entity for the upcoming_rides table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "upcoming_rides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ride_date: DateTimeWithTimeZone,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub trip_id: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub status: RideStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_trips::entity::Entity",
        from = "Column::TripId",
        to = "domain_trips::entity::Column::Id",
        on_delete = "SetNull"
    )]
    Trip,
}

impl Related<domain_trips::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Ride {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            ride_date: model.ride_date.into(),
            client_name: model.client_name,
            client_phone: model.client_phone,
            client_email: model.client_email,
            trip_id: model.trip_id,
            notes: model.notes,
            status: model.status,
            created_at: model.created_at.into(),
        }
    }
}

impl From<Ride> for ActiveModel {
    fn from(ride: Ride) -> Self {
        ActiveModel {
            id: Set(ride.id),
            ride_date: Set(ride.ride_date.into()),
            client_name: Set(ride.client_name),
            client_phone: Set(ride.client_phone),
            client_email: Set(ride.client_email),
            trip_id: Set(ride.trip_id),
            notes: Set(ride.notes),
            status: Set(ride.status),
            created_at: Set(ride.created_at.into()),
        }
    }
}
