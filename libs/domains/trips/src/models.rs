use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::pagination::PageInfo;
use crate::window::TimeRange;

/// Raw calculator input.
///
/// Every field is optional at the wire level so that a missing value is
/// reported by the pricing engine as a validation error rather than a
/// deserialization failure. Numeric strings such as `"30.5"` are accepted;
/// any other non-numeric value becomes NaN and is rejected the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TripInput {
    #[serde(default, deserialize_with = "lenient_number")]
    #[schema(value_type = Option<f64>, example = 100.0)]
    pub distance_km: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    #[schema(value_type = Option<f64>, example = 30.0)]
    pub diesel_price_per_liter: Option<f64>,

    /// Percent, not fraction: 600 means 600%
    #[serde(default, deserialize_with = "lenient_number")]
    #[schema(value_type = Option<f64>, example = 600.0)]
    pub profit_margin_percent: Option<f64>,
}

impl TripInput {
    pub fn new(distance_km: f64, diesel_price_per_liter: f64, profit_margin_percent: f64) -> Self {
        Self {
            distance_km: Some(distance_km),
            diesel_price_per_liter: Some(diesel_price_per_liter),
            profit_margin_percent: Some(profit_margin_percent),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// Full-precision cost breakdown of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TripBreakdown {
    pub distance_km: f64,
    pub liters_required: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub profit_amount: f64,
    pub grand_total: f64,
    pub profit_margin_percent: f64,
}

impl TripBreakdown {
    /// Copy with every amount rounded half away from zero to 2 decimals, for display.
    pub fn rounded(&self) -> Self {
        Self {
            distance_km: round2(self.distance_km),
            liters_required: round2(self.liters_required),
            fuel_cost: round2(self.fuel_cost),
            maintenance_cost: round2(self.maintenance_cost),
            profit_amount: round2(self.profit_amount),
            grand_total: round2(self.grand_total),
            profit_margin_percent: round2(self.profit_margin_percent),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A persisted trip. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TripRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub breakdown: TripBreakdown,
    pub created_at: DateTime<Utc>,
}

impl TripRecord {
    pub fn new(owner_id: Uuid, breakdown: TripBreakdown) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id,
            breakdown,
            created_at: Utc::now(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Selection criteria shared by listing and counting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripFilter {
    pub owner_id: Option<Uuid>,
    pub range: TimeRange,
}

impl TripFilter {
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.owner_id.is_none_or(|owner| trip.owner_id == owner) && self.range.contains(trip.created_at)
    }
}

/// A trip as shown in the all-trips listing, labelled with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TripListing {
    #[serde(flatten)]
    pub trip: TripRecord,
    /// `None` when the owner is unknown to the store
    pub owner_username: Option<String>,
}

impl TripListing {
    pub fn new(trip: TripRecord, owner_username: Option<String>) -> Self {
        Self {
            trip,
            owner_username,
        }
    }
}

/// One page of the all-trips listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TripPage {
    pub trips: Vec<TripListing>,
    pub pagination: PageInfo,
}

/// Query for `GET /trips/all`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAllTripsQuery {
    /// 1-based page number (default 1)
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    /// Page size (default 10, max 100)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound through 23:59:59, `YYYY-MM-DD`
    pub end_date: Option<NaiveDate>,
}

/// Query for `GET /analytics`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Trailing window in days, used when no explicit range is given (default 30)
    #[validate(range(min = 1, max = 3650))]
    pub period: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
