use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{RideError, RideResult},
    models::{Ride, RideView},
    repository::RideRepository,
};

#[derive(Clone)]
pub struct PgRideRepository {
    db: DatabaseConnection,
}

impl PgRideRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn create(&self, ride: Ride) -> RideResult<Ride> {
        let active_model: entity::ActiveModel = ride.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| RideError::Store(format!("Database error: {}", e)))?;

        tracing::info!(ride_id = %model.id, "Created ride");
        Ok(model.into())
    }

    async fn list_with_trip_totals(&self) -> RideResult<Vec<RideView>> {
        let rows = entity::Entity::find()
            .find_also_related(domain_trips::entity::Entity)
            .order_by_asc(entity::Column::RideDate)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RideError::Store(format!("Database error: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(ride, trip)| RideView {
                ride: ride.into(),
                trip_total: trip.map(|t| t.grand_total),
            })
            .collect())
    }
}
