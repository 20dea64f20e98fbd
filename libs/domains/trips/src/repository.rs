use async_trait::async_trait;
use domain_users::InMemoryUserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TripResult;
use crate::models::{TripBreakdown, TripFilter, TripListing, TripRecord};
use crate::window::TimeRange;

/// Repository trait for trip persistence
///
/// Trips are immutable once inserted; the only mutation after insert is removal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Persist a priced trip for `owner_id`, assigning id and creation time
    async fn insert(&self, owner_id: Uuid, breakdown: TripBreakdown) -> TripResult<TripRecord>;

    /// Get a trip by ID
    async fn get_by_id(&self, id: Uuid) -> TripResult<Option<TripRecord>>;

    /// All trips created inside `range`, oldest first
    async fn list_by_window(&self, range: TimeRange) -> TripResult<Vec<TripRecord>>;

    /// All trips of one owner, newest first
    async fn list_by_owner(&self, owner_id: Uuid) -> TripResult<Vec<TripRecord>>;

    /// One slice of the trips matching `filter`, newest first, each with its owner's username
    async fn list_page(
        &self,
        filter: TripFilter,
        limit: u64,
        offset: u64,
    ) -> TripResult<Vec<TripListing>>;

    /// Number of trips matching `filter`
    async fn count_matching(&self, filter: TripFilter) -> TripResult<u64>;

    /// Remove a trip. Returns false when nothing was removed.
    async fn delete_by_id(&self, id: Uuid) -> TripResult<bool>;
}

/// In-memory implementation of TripRepository (for development/testing)
///
/// Owner usernames are looked up in the user repository given to
/// [`InMemoryTripRepository::with_users`]; without one they are left empty.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTripRepository {
    trips: Arc<RwLock<HashMap<Uuid, TripRecord>>>,
    users: Option<InMemoryUserRepository>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self {
            trips: Arc::new(RwLock::new(HashMap::new())),
            users: None,
        }
    }

    pub fn with_users(users: InMemoryUserRepository) -> Self {
        Self {
            trips: Arc::new(RwLock::new(HashMap::new())),
            users: Some(users),
        }
    }

    /// Store a fully formed record as-is, keeping its id and timestamp.
    pub async fn seed(&self, record: TripRecord) {
        self.trips.write().await.insert(record.id, record);
    }

    async fn matching(&self, filter: TripFilter) -> Vec<TripRecord> {
        let trips = self.trips.read().await;
        trips.values().filter(|t| filter.matches(t)).cloned().collect()
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn insert(&self, owner_id: Uuid, breakdown: TripBreakdown) -> TripResult<TripRecord> {
        let record = TripRecord::new(owner_id, breakdown);
        self.trips.write().await.insert(record.id, record.clone());

        tracing::info!(trip_id = %record.id, "Created trip");
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> TripResult<Option<TripRecord>> {
        let trips = self.trips.read().await;
        Ok(trips.get(&id).cloned())
    }

    async fn list_by_window(&self, range: TimeRange) -> TripResult<Vec<TripRecord>> {
        let mut result = self
            .matching(TripFilter {
                owner_id: None,
                range,
            })
            .await;
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> TripResult<Vec<TripRecord>> {
        let mut result = self
            .matching(TripFilter {
                owner_id: Some(owner_id),
                range: TimeRange::unbounded(),
            })
            .await;
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    async fn list_page(
        &self,
        filter: TripFilter,
        limit: u64,
        offset: u64,
    ) -> TripResult<Vec<TripListing>> {
        let mut result = self.matching(filter).await;

        // Sort by created_at descending (newest first)
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let mut page = Vec::new();
        for trip in result.into_iter().skip(offset as usize).take(limit as usize) {
            let owner_username = match &self.users {
                Some(users) => users.username_of(trip.owner_id).await,
                None => None,
            };
            page.push(TripListing::new(trip, owner_username));
        }
        Ok(page)
    }

    async fn count_matching(&self, filter: TripFilter) -> TripResult<u64> {
        let trips = self.trips.read().await;
        Ok(trips.values().filter(|t| filter.matches(t)).count() as u64)
    }

    async fn delete_by_id(&self, id: Uuid) -> TripResult<bool> {
        let removed = self.trips.write().await.remove(&id).is_some();

        if removed {
            tracing::info!(trip_id = %id, "Deleted trip");
        }
        Ok(removed)
    }
}
