//! Trip cost formula.
//!
//! ```text
//! liters      = distance_km / 10.2
//! fuel        = liters * diesel_price_per_liter
//! maintenance = fuel * 0.20
//! profit      = fuel * margin / 100
//! total       = fuel + maintenance + profit
//! ```

use crate::error::{TripError, TripResult};
use crate::models::{TripBreakdown, TripInput};

/// Kilometers driven per liter of diesel.
pub const FUEL_ECONOMY_KM_PER_LITER: f64 = 10.2;
/// Maintenance cost as a fraction of fuel cost.
pub const MAINTENANCE_RATE: f64 = 0.20;
pub const MIN_PROFIT_MARGIN_PERCENT: f64 = 100.0;
pub const MAX_PROFIT_MARGIN_PERCENT: f64 = 1000.0;

/// Stateless pricing calculator.
pub struct PricingEngine;

impl PricingEngine {
    /// Validate `input` and compute its full-precision breakdown.
    pub fn calculate(input: &TripInput) -> TripResult<TripBreakdown> {
        let distance_km = required(input.distance_km, "distance_km")?;
        let price = required(input.diesel_price_per_liter, "diesel_price_per_liter")?;
        let margin = required(input.profit_margin_percent, "profit_margin_percent")?;

        if distance_km <= 0.0 {
            return Err(TripError::Validation(
                "distance_km must be greater than 0".to_string(),
            ));
        }
        if price <= 0.0 {
            return Err(TripError::Validation(
                "diesel_price_per_liter must be greater than 0".to_string(),
            ));
        }
        if !(MIN_PROFIT_MARGIN_PERCENT..=MAX_PROFIT_MARGIN_PERCENT).contains(&margin) {
            return Err(TripError::Validation(format!(
                "profit_margin_percent must be between {} and {}",
                MIN_PROFIT_MARGIN_PERCENT, MAX_PROFIT_MARGIN_PERCENT
            )));
        }

        let liters_required = distance_km / FUEL_ECONOMY_KM_PER_LITER;
        let fuel_cost = liters_required * price;
        let maintenance_cost = fuel_cost * MAINTENANCE_RATE;
        let profit_amount = fuel_cost * (margin / 100.0);
        let grand_total = fuel_cost + maintenance_cost + profit_amount;

        if !grand_total.is_finite() {
            return Err(TripError::Validation(
                "trip cost is too large to compute; reduce distance_km or diesel_price_per_liter"
                    .to_string(),
            ));
        }

        Ok(TripBreakdown {
            distance_km,
            liters_required,
            fuel_cost,
            maintenance_cost,
            profit_amount,
            grand_total,
            profit_margin_percent: margin,
        })
    }
}

fn required(value: Option<f64>, field: &str) -> TripResult<f64> {
    match value {
        None => Err(TripError::Validation(format!("{} is required", field))),
        Some(v) if !v.is_finite() => {
            Err(TripError::Validation(format!("{} must be a number", field)))
        }
        Some(v) => Ok(v),
    }
}
