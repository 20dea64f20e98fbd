use domain_trips::TripRepository;
use std::sync::Arc;
use validator::Validate;

use crate::error::{RideError, RideResult};
use crate::models::{CreateRide, Ride, RideView};
use crate::repository::RideRepository;

/// Service layer for booking and listing rides
#[derive(Clone)]
pub struct RideService<R: RideRepository, T: TripRepository> {
    rides: Arc<R>,
    trips: Arc<T>,
}

impl<R: RideRepository, T: TripRepository> RideService<R, T> {
    pub fn new(rides: R, trips: T) -> Self {
        Self {
            rides: Arc::new(rides),
            trips: Arc::new(trips),
        }
    }

    /// Book a ride. Status always starts as `scheduled`.
    pub async fn create_ride(&self, input: CreateRide) -> RideResult<Ride> {
        input
            .validate()
            .map_err(|e| RideError::Validation(e.to_string()))?;

        if input.client_name.trim().is_empty() {
            return Err(RideError::Validation("client_name is required".to_string()));
        }
        if input.client_phone.trim().is_empty() {
            return Err(RideError::Validation(
                "client_phone is required".to_string(),
            ));
        }

        if let Some(trip_id) = input.trip_id {
            if self.trips.get_by_id(trip_id).await?.is_none() {
                return Err(RideError::Validation(format!(
                    "trip {} does not exist",
                    trip_id
                )));
            }
        }

        self.rides.create(Ride::new(input)).await
    }

    /// Every ride, soonest first
    pub async fn list_rides(&self) -> RideResult<Vec<RideView>> {
        self.rides.list_with_trip_totals().await
    }
}
