use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a booked ride
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RideStatus {
    /// Every new ride starts here
    #[default]
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// A booked ride
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ride {
    pub id: Uuid,
    pub ride_date: DateTime<Utc>,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub trip_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: RideStatus,
    pub created_at: DateTime<Utc>,
}

impl Ride {
    pub fn new(input: CreateRide) -> Self {
        Self {
            id: Uuid::now_v7(),
            ride_date: input.ride_date,
            client_name: input.client_name.trim().to_string(),
            client_phone: input.client_phone.trim().to_string(),
            client_email: non_blank(input.client_email),
            trip_id: input.trip_id,
            notes: non_blank(input.notes),
            status: RideStatus::Scheduled,
            created_at: Utc::now(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A ride as listed, with the linked trip's total when there is one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RideView {
    #[serde(flatten)]
    pub ride: Ride,
    pub trip_total: Option<f64>,
}

/// Input for booking a ride
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRide {
    pub ride_date: DateTime<Utc>,
    #[validate(length(max = 200))]
    pub client_name: String,
    #[validate(length(max = 50))]
    pub client_phone: String,
    #[validate(email)]
    pub client_email: Option<String>,
    pub trip_id: Option<Uuid>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_ride_is_scheduled_and_trimmed() {
        let ride = Ride::new(CreateRide {
            ride_date: Utc::now(),
            client_name: "  Ana Torres ".to_string(),
            client_phone: " 555-0100".to_string(),
            client_email: Some("   ".to_string()),
            trip_id: None,
            notes: Some(" airport pickup ".to_string()),
        });

        assert_eq!(ride.status, RideStatus::Scheduled);
        assert_eq!(ride.client_name, "Ana Torres");
        assert_eq!(ride.client_phone, "555-0100");
        assert_eq!(ride.client_email, None);
        assert_eq!(ride.notes.as_deref(), Some("airport pickup"));
    }

    #[test]
    fn test_status_text_form() {
        assert_eq!(RideStatus::Scheduled.to_string(), "scheduled");
        assert_eq!(RideStatus::from_str("cancelled").unwrap(), RideStatus::Cancelled);
        assert_eq!(
            serde_json::to_value(RideStatus::Completed).unwrap(),
            serde_json::json!("completed")
        );
    }

    #[test]
    fn test_view_flattens_ride() {
        let view = RideView {
            ride: Ride::new(CreateRide {
                ride_date: Utc::now(),
                client_name: "Ana".to_string(),
                client_phone: "555".to_string(),
                client_email: None,
                trip_id: None,
                notes: None,
            }),
            trip_total: Some(2117.65),
        };

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["client_name"], "Ana");
        assert_eq!(value["status"], "scheduled");
        assert_eq!(value["trip_total"], 2117.65);
    }
}
