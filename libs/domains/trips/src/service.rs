use std::sync::Arc;
use uuid::Uuid;

use crate::error::{TripError, TripResult};
use crate::models::{TripBreakdown, TripFilter, TripInput, TripPage, TripRecord};
use crate::pagination::{PageInfo, PageRequest};
use crate::pricing::PricingEngine;
use crate::repository::TripRepository;
use crate::window::TimeRange;

/// Service layer for trip pricing and history
#[derive(Clone)]
pub struct TripService<R: TripRepository> {
    repository: Arc<R>,
}

impl<R: TripRepository> TripService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    /// Price a trip without saving it. Amounts are rounded for display.
    pub fn quote(&self, input: &TripInput) -> TripResult<TripBreakdown> {
        Ok(PricingEngine::calculate(input)?.rounded())
    }

    /// Price and persist a trip at full precision
    pub async fn create_trip(&self, owner_id: Uuid, input: &TripInput) -> TripResult<TripRecord> {
        let breakdown = PricingEngine::calculate(input)?;
        self.repository.insert(owner_id, breakdown).await
    }

    /// Trips created by `owner_id`, newest first
    pub async fn list_own_trips(&self, owner_id: Uuid) -> TripResult<Vec<TripRecord>> {
        self.repository.list_by_owner(owner_id).await
    }

    /// One page of all trips inside `range`, newest first, labelled with owner usernames.
    ///
    /// A page past the end comes back empty with accurate counts.
    pub async fn list_trips_page(
        &self,
        range: TimeRange,
        request: PageRequest,
    ) -> TripResult<TripPage> {
        let filter = TripFilter {
            owner_id: None,
            range,
        };

        let total = self.repository.count_matching(filter).await?;
        let trips = if request.offset() >= total {
            Vec::new()
        } else {
            self.repository
                .list_page(filter, request.page_size(), request.offset())
                .await?
        };

        Ok(TripPage {
            trips,
            pagination: PageInfo::new(request, total),
        })
    }

    /// Delete a trip owned by `requester`
    pub async fn delete_trip(&self, id: Uuid, requester: Uuid) -> TripResult<()> {
        let trip = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(TripError::NotFound(id))?;

        if trip.owner_id != requester {
            return Err(TripError::Forbidden(id));
        }

        // A concurrent delete may have won since the lookup
        if !self.repository.delete_by_id(id).await? {
            return Err(TripError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryTripRepository, MockTripRepository};
    use mockall::predicate;

    fn record(owner_id: Uuid) -> TripRecord {
        TripRecord::new(
            owner_id,
            PricingEngine::calculate(&TripInput::new(100.0, 30.0, 600.0)).unwrap(),
        )
    }

    #[test]
    fn test_quote_is_rounded() {
        let service = TripService::new(MockTripRepository::new());

        let quote = service.quote(&TripInput::new(100.0, 30.0, 600.0)).unwrap();

        assert_eq!(quote.grand_total, 2117.65);
        assert_eq!(quote.liters_required, 9.80);
    }

    #[tokio::test]
    async fn test_create_trip_stores_full_precision() {
        let owner = Uuid::now_v7();
        let mut mock_repo = MockTripRepository::new();

        mock_repo
            .expect_insert()
            .withf(move |o, b| *o == owner && b.liters_required == 100.0 / 10.2)
            .times(1)
            .returning(|o, b| Ok(TripRecord::new(o, b)));

        let service = TripService::new(mock_repo);
        let trip = service
            .create_trip(owner, &TripInput::new(100.0, 30.0, 600.0))
            .await
            .unwrap();

        assert_eq!(trip.owner_id, owner);
    }

    #[tokio::test]
    async fn test_create_trip_rejects_invalid_input_before_storing() {
        let mut mock_repo = MockTripRepository::new();
        mock_repo.expect_insert().never();

        let service = TripService::new(mock_repo);
        let result = service
            .create_trip(Uuid::now_v7(), &TripInput::new(100.0, 30.0, 50.0))
            .await;

        assert!(matches!(result, Err(TripError::Validation(_))));
    }

    #[tokio::test]
    async fn test_page_past_the_end_skips_the_listing() {
        let mut mock_repo = MockTripRepository::new();
        mock_repo.expect_count_matching().returning(|_| Ok(25));
        mock_repo.expect_list_page().never();

        let service = TripService::new(mock_repo);
        let page = service
            .list_trips_page(TimeRange::unbounded(), PageRequest::new(4, 10).unwrap())
            .await
            .unwrap();

        assert!(page.trips.is_empty());
        assert_eq!(page.pagination.total_count, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_next_page);
    }

    #[tokio::test]
    async fn test_third_page_of_twenty_five() {
        let repo = InMemoryTripRepository::new();
        for _ in 0..25 {
            repo.insert(Uuid::now_v7(), record(Uuid::nil()).breakdown)
                .await
                .unwrap();
        }

        let service = TripService::new(repo);
        let page = service
            .list_trips_page(TimeRange::unbounded(), PageRequest::new(3, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.trips.len(), 5);
        assert_eq!(page.pagination.current_page, 3);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[tokio::test]
    async fn test_delete_missing_trip_is_not_found() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockTripRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(predicate::eq(id))
            .returning(|_| Ok(None));
        mock_repo.expect_delete_by_id().never();

        let service = TripService::new(mock_repo);
        let result = service.delete_trip(id, Uuid::now_v7()).await;

        assert!(matches!(result, Err(TripError::NotFound(found)) if found == id));
    }

    #[tokio::test]
    async fn test_delete_someone_elses_trip_is_forbidden() {
        let trip = record(Uuid::now_v7());
        let id = trip.id;
        let mut mock_repo = MockTripRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(predicate::eq(id))
            .returning(move |_| Ok(Some(trip.clone())));
        mock_repo.expect_delete_by_id().never();

        let service = TripService::new(mock_repo);
        let result = service.delete_trip(id, Uuid::now_v7()).await;

        assert!(matches!(result, Err(TripError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_lost_to_a_concurrent_delete_is_not_found() {
        let owner = Uuid::now_v7();
        let trip = record(owner);
        let id = trip.id;
        let mut mock_repo = MockTripRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(trip.clone())));
        mock_repo
            .expect_delete_by_id()
            .with(predicate::eq(id))
            .returning(|_| Ok(false));

        let service = TripService::new(mock_repo);
        let result = service.delete_trip(id, owner).await;

        assert!(matches!(result, Err(TripError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_deletes_have_exactly_one_winner() {
        let owner = Uuid::now_v7();
        let repo = InMemoryTripRepository::new();
        let trip = repo.insert(owner, record(owner).breakdown).await.unwrap();
        let service = TripService::new(repo);

        let (a, b) = tokio::join!(
            service.delete_trip(trip.id, owner),
            service.delete_trip(trip.id, owner)
        );

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|r| matches!(r, Err(TripError::NotFound(_))))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let mut mock_repo = MockTripRepository::new();
        mock_repo
            .expect_list_by_owner()
            .returning(|_| Err(TripError::Store("connection reset".to_string())));

        let service = TripService::new(mock_repo);
        let result = service.list_own_trips(Uuid::now_v7()).await;

        assert!(matches!(result, Err(TripError::Store(_))));
    }
}
