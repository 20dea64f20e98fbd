use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{TripBreakdown, TripRecord};

/// Sea-ORM Entity for the trips table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kilometers_driven: f64,
    pub diesel_liters_used: f64,
    pub diesel_cost: f64,
    pub maintenance_cost: f64,
    pub profit_margin_percentage: f64,
    pub profit_amount: f64,
    pub grand_total: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_users::entity::Entity",
        from = "Column::UserId",
        to = "domain_users::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<domain_users::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TripRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.user_id,
            breakdown: TripBreakdown {
                distance_km: model.kilometers_driven,
                liters_required: model.diesel_liters_used,
                fuel_cost: model.diesel_cost,
                maintenance_cost: model.maintenance_cost,
                profit_amount: model.profit_amount,
                grand_total: model.grand_total,
                profit_margin_percent: model.profit_margin_percentage,
            },
            created_at: model.created_at.into(),
        }
    }
}

impl From<TripRecord> for ActiveModel {
    fn from(record: TripRecord) -> Self {
        let b = record.breakdown;
        ActiveModel {
            id: Set(record.id),
            user_id: Set(record.owner_id),
            kilometers_driven: Set(b.distance_km),
            diesel_liters_used: Set(b.liters_required),
            diesel_cost: Set(b.fuel_cost),
            maintenance_cost: Set(b.maintenance_cost),
            profit_margin_percentage: Set(b.profit_margin_percent),
            profit_amount: Set(b.profit_amount),
            grand_total: Set(b.grand_total),
            created_at: Set(record.created_at.into()),
        }
    }
}
