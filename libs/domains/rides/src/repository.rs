use async_trait::async_trait;
use domain_trips::{InMemoryTripRepository, TripRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RideResult;
use crate::models::{Ride, RideView};

/// Repository trait for ride persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Store a new ride
    async fn create(&self, ride: Ride) -> RideResult<Ride>;

    /// All rides ordered by ride date, soonest first, each with its linked trip total
    async fn list_with_trip_totals(&self) -> RideResult<Vec<RideView>>;
}

/// In-memory implementation of RideRepository (for development/testing)
///
/// Trip totals are looked up in the trip repository it was built with.
#[derive(Debug, Clone)]
pub struct InMemoryRideRepository {
    rides: Arc<RwLock<HashMap<Uuid, Ride>>>,
    trips: InMemoryTripRepository,
}

impl InMemoryRideRepository {
    pub fn new(trips: InMemoryTripRepository) -> Self {
        Self {
            rides: Arc::new(RwLock::new(HashMap::new())),
            trips,
        }
    }
}

#[async_trait]
impl RideRepository for InMemoryRideRepository {
    async fn create(&self, ride: Ride) -> RideResult<Ride> {
        self.rides.write().await.insert(ride.id, ride.clone());

        tracing::info!(ride_id = %ride.id, "Created ride");
        Ok(ride)
    }

    async fn list_with_trip_totals(&self) -> RideResult<Vec<RideView>> {
        let mut rides: Vec<Ride> = self.rides.read().await.values().cloned().collect();
        rides.sort_by(|a, b| a.ride_date.cmp(&b.ride_date).then(a.id.cmp(&b.id)));

        let mut views = Vec::with_capacity(rides.len());
        for ride in rides {
            let trip_total = match ride.trip_id {
                Some(trip_id) => self
                    .trips
                    .get_by_id(trip_id)
                    .await?
                    .map(|trip| trip.breakdown.grand_total),
                None => None,
            };
            views.push(RideView { ride, trip_total });
        }

        Ok(views)
    }
}
