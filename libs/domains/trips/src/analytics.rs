use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::aggregation::{self, AnalyticsReport, DailyAggregate, SummaryAggregate, TopDay};
use crate::error::TripResult;
use crate::models::TripRecord;
use crate::repository::TripRepository;
use crate::window::{TimeRange, TimeWindow};

/// Default trailing window for analytics, in days.
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Read-only revenue statistics over a time window
#[derive(Clone)]
pub struct AggregationService<R: TripRepository> {
    repository: Arc<R>,
}

impl<R: TripRepository> AggregationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn load(
        &self,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> TripResult<(TimeRange, Vec<TripRecord>)> {
        let range = window.resolve(now)?;
        let trips = self.repository.list_by_window(range).await?;
        Ok((range, trips))
    }

    /// Per-day totals, oldest day first
    pub async fn daily(
        &self,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> TripResult<Vec<DailyAggregate>> {
        let (_, trips) = self.load(window, now).await?;
        Ok(aggregation::daily(&trips))
    }

    /// Window totals; zero-valued when the window holds no trips
    pub async fn summary(
        &self,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> TripResult<SummaryAggregate> {
        let (_, trips) = self.load(window, now).await?;
        Ok(aggregation::summary(&trips))
    }

    /// Up to `limit` best days by revenue
    pub async fn top_days(
        &self,
        window: TimeWindow,
        now: DateTime<Utc>,
        limit: usize,
    ) -> TripResult<Vec<TopDay>> {
        let (_, trips) = self.load(window, now).await?;
        Ok(aggregation::top_days(&aggregation::daily(&trips), limit))
    }

    /// Summary, daily breakdown and top days from a single read
    pub async fn report(
        &self,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> TripResult<AnalyticsReport> {
        let (range, trips) = self.load(window, now).await?;

        tracing::debug!(trip_count = trips.len(), "Building analytics report");
        Ok(AnalyticsReport::build(range, &trips))
    }
}
