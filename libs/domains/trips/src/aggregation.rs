//! Per-day, summary and top-day statistics over a set of trips.
//!
//! Everything here is pure. Days are UTC calendar dates of `created_at`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::{TripBreakdown, TripRecord};
use crate::window::TimeRange;

/// How many days the top-days ranking returns at most.
pub const TOP_DAYS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub trip_count: u64,
    pub total_kilometers: f64,
    pub total_liters: f64,
    pub total_diesel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_profit: f64,
    pub total_revenue: f64,
    pub avg_profit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryAggregate {
    pub trip_count: u64,
    pub total_kilometers: f64,
    pub total_liters: f64,
    pub total_diesel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_profit: f64,
    pub total_revenue: f64,
    pub avg_profit_margin: f64,
    /// Largest single `grand_total`, 0 for an empty window
    pub max_trip_value: f64,
    /// Smallest single `grand_total`, 0 for an empty window
    pub min_trip_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopDay {
    pub date: NaiveDate,
    pub trip_count: u64,
    pub daily_revenue: f64,
    pub daily_profit: f64,
}

/// Everything the analytics page shows for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsReport {
    pub window_start: Option<chrono::DateTime<chrono::Utc>>,
    pub window_end: Option<chrono::DateTime<chrono::Utc>>,
    pub summary: SummaryAggregate,
    pub daily_stats: Vec<DailyAggregate>,
    pub top_days: Vec<TopDay>,
}

impl AnalyticsReport {
    pub fn build(range: TimeRange, trips: &[TripRecord]) -> Self {
        let daily_stats = daily(trips);
        Self {
            window_start: range.start,
            window_end: range.end,
            summary: summary(trips),
            top_days: top_days(&daily_stats, TOP_DAYS_LIMIT),
            daily_stats,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    count: u64,
    kilometers: f64,
    liters: f64,
    diesel: f64,
    maintenance: f64,
    profit: f64,
    revenue: f64,
    margin_sum: f64,
}

impl Totals {
    fn add(&mut self, trip: &TripBreakdown) {
        self.count += 1;
        self.kilometers += trip.distance_km;
        self.liters += trip.liters_required;
        self.diesel += trip.fuel_cost;
        self.maintenance += trip.maintenance_cost;
        self.profit += trip.profit_amount;
        self.revenue += trip.grand_total;
        self.margin_sum += trip.profit_margin_percent;
    }

    fn avg_margin(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.margin_sum / self.count as f64
        }
    }
}

/// One aggregate per day that has trips, oldest day first.
pub fn daily(trips: &[TripRecord]) -> Vec<DailyAggregate> {
    let mut by_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for trip in trips {
        by_day.entry(trip.date()).or_default().add(&trip.breakdown);
    }

    by_day
        .into_iter()
        .map(|(date, t)| DailyAggregate {
            date,
            trip_count: t.count,
            total_kilometers: t.kilometers,
            total_liters: t.liters,
            total_diesel_cost: t.diesel,
            total_maintenance_cost: t.maintenance,
            total_profit: t.profit,
            total_revenue: t.revenue,
            avg_profit_margin: t.avg_margin(),
        })
        .collect()
}

/// Window totals. An empty slice yields an all-zero summary.
pub fn summary(trips: &[TripRecord]) -> SummaryAggregate {
    let mut totals = Totals::default();
    let mut max_trip_value: Option<f64> = None;
    let mut min_trip_value: Option<f64> = None;

    for trip in trips {
        let value = trip.breakdown.grand_total;
        totals.add(&trip.breakdown);
        max_trip_value = Some(max_trip_value.map_or(value, |m| m.max(value)));
        min_trip_value = Some(min_trip_value.map_or(value, |m| m.min(value)));
    }

    SummaryAggregate {
        trip_count: totals.count,
        total_kilometers: totals.kilometers,
        total_liters: totals.liters,
        total_diesel_cost: totals.diesel,
        total_maintenance_cost: totals.maintenance,
        total_profit: totals.profit,
        total_revenue: totals.revenue,
        avg_profit_margin: totals.avg_margin(),
        max_trip_value: max_trip_value.unwrap_or(0.0),
        min_trip_value: min_trip_value.unwrap_or(0.0),
    }
}

/// Highest-revenue days first; equal revenue goes to the earlier date. No padding.
pub fn top_days(daily: &[DailyAggregate], limit: usize) -> Vec<TopDay> {
    let mut ranked: Vec<&DailyAggregate> = daily.iter().collect();
    ranked.sort_by(|a, b| {
        b.total_revenue
            .total_cmp(&a.total_revenue)
            .then_with(|| a.date.cmp(&b.date))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|day| TopDay {
            date: day.date,
            trip_count: day.trip_count,
            daily_revenue: day.total_revenue,
            daily_profit: day.total_profit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripInput;
    use crate::pricing::PricingEngine;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn trip_on(day: u32, hour: u32, km: f64, margin: f64) -> TripRecord {
        let breakdown = PricingEngine::calculate(&TripInput::new(km, 30.0, margin)).unwrap();
        TripRecord {
            id: Uuid::now_v7(),
            owner_id: Uuid::nil(),
            breakdown,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_empty_window_has_zero_summary() {
        let summary = summary(&[]);

        assert_eq!(summary.trip_count, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.max_trip_value, 0.0);
        assert_eq!(summary.min_trip_value, 0.0);
        assert_eq!(summary.avg_profit_margin, 0.0);
    }

    #[test]
    fn test_daily_groups_by_utc_date_in_ascending_order() {
        let trips = vec![
            trip_on(3, 9, 100.0, 200.0),
            trip_on(1, 23, 50.0, 400.0),
            trip_on(3, 0, 20.0, 600.0),
        ];

        let days = daily(&trips);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(1));
        assert_eq!(days[1].date, date(3));
        assert_eq!(days[1].trip_count, 2);
        assert_eq!(days[1].total_kilometers, 120.0);
        assert_eq!(days[1].avg_profit_margin, 400.0);
        assert_eq!(
            days[1].total_revenue,
            trips[0].breakdown.grand_total + trips[2].breakdown.grand_total
        );
    }

    #[test]
    fn test_summary_totals_and_extremes() {
        let trips = vec![trip_on(1, 8, 100.0, 100.0), trip_on(2, 8, 10.0, 1000.0)];

        let summary = summary(&trips);

        assert_eq!(summary.trip_count, 2);
        assert_eq!(summary.total_kilometers, 110.0);
        assert_eq!(summary.avg_profit_margin, 550.0);
        assert_eq!(summary.max_trip_value, trips[0].breakdown.grand_total);
        assert_eq!(summary.min_trip_value, trips[1].breakdown.grand_total);
    }

    #[test]
    fn test_top_days_ranks_by_revenue_and_breaks_ties_by_date() {
        let trips: Vec<_> = [
            (1, 10.0),
            (2, 80.0),
            (3, 40.0),
            (4, 80.0),
            (5, 20.0),
            (6, 60.0),
            (7, 30.0),
        ]
        .into_iter()
        .map(|(day, km)| trip_on(day, 12, km, 300.0))
        .collect();

        let top = top_days(&daily(&trips), TOP_DAYS_LIMIT);
        let dates: Vec<_> = top.iter().map(|d| d.date).collect();

        assert_eq!(dates, vec![date(2), date(4), date(6), date(3), date(7)]);
    }

    #[test]
    fn test_top_days_does_not_pad() {
        let trips = vec![trip_on(1, 8, 10.0, 300.0), trip_on(2, 8, 20.0, 300.0)];

        let top = top_days(&daily(&trips), TOP_DAYS_LIMIT);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].date, date(2));
    }

    #[test]
    fn test_report_of_empty_window() {
        let report = AnalyticsReport::build(TimeRange::unbounded(), &[]);

        assert_eq!(report.summary.trip_count, 0);
        assert!(report.daily_stats.is_empty());
        assert!(report.top_days.is_empty());
    }
}
