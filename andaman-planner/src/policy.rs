//! Tunable planning heuristics and fare tables.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BICYCLE_DAY_RATE, BOAT_BASE_FARE, FERRY_BASE_FARE, FERRY_MULT_DELUXE, FERRY_MULT_ECONOMY,
    FERRY_MULT_LUXURY, FULL_DAY_CAB_MIN_STOPS, LEG_TIME_WINDOW, MAX_HOURS_PER_DAY,
    MAX_STOPS_PER_DAY, P2P_RATE_PER_HOP, SCOOTER_DAY_RATE,
};
use crate::island::Island;
use crate::trip::FerryClass;

/// Errors raised when planner policy invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("{field} must be a positive finite number (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: usize,
        value: usize,
    },
    #[error("{field} must not be negative (got {value})")]
    NegativeRate { field: &'static str, value: i64 },
    #[error("ferry class multiplier for {class} must be finite and at least 1 (got {value})")]
    ClassMultiplier { class: FerryClass, value: f64 },
    #[error("policy JSON invalid: {0}")]
    Json(String),
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Ferry fare multipliers per class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FerryClassMultipliers {
    #[serde(default = "FerryClassMultipliers::default_economy")]
    pub economy: f64,
    #[serde(default = "FerryClassMultipliers::default_deluxe")]
    pub deluxe: f64,
    #[serde(default = "FerryClassMultipliers::default_luxury")]
    pub luxury: f64,
}

impl FerryClassMultipliers {
    const fn default_economy() -> f64 {
        FERRY_MULT_ECONOMY
    }

    const fn default_deluxe() -> f64 {
        FERRY_MULT_DELUXE
    }

    const fn default_luxury() -> f64 {
        FERRY_MULT_LUXURY
    }

    #[must_use]
    pub const fn for_class(&self, class: FerryClass) -> f64 {
        match class {
            FerryClass::Economy => self.economy,
            FerryClass::Deluxe => self.deluxe,
            FerryClass::Luxury => self.luxury,
        }
    }
}

impl Default for FerryClassMultipliers {
    fn default() -> Self {
        Self {
            economy: Self::default_economy(),
            deluxe: Self::default_deluxe(),
            luxury: Self::default_luxury(),
        }
    }
}

/// Day-packing rules and fares used to synthesize and price a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerPolicy {
    /// Advisory hour budget per sightseeing day.
    #[serde(default = "PlannerPolicy::default_max_hours_per_day")]
    pub max_hours_per_day: f64,
    #[serde(default = "PlannerPolicy::default_max_stops_per_day")]
    pub max_stops_per_day: usize,
    /// Days with at least this many stops get a full-day cab.
    #[serde(default = "PlannerPolicy::default_full_day_cab_min_stops")]
    pub full_day_cab_min_stops: usize,
    /// Islands compact enough to tour by scooter.
    #[serde(default = "PlannerPolicy::default_scooter_islands")]
    pub scooter_islands: Vec<Island>,
    #[serde(default = "PlannerPolicy::default_leg_time_window")]
    pub leg_time_window: String,
    #[serde(default = "PlannerPolicy::default_ferry_base_fare")]
    pub ferry_base_fare: i64,
    #[serde(default)]
    pub ferry_class_multipliers: FerryClassMultipliers,
    #[serde(default = "PlannerPolicy::default_boat_base_fare")]
    pub boat_base_fare: i64,
    #[serde(default = "PlannerPolicy::default_p2p_rate_per_hop")]
    pub p2p_rate_per_hop: i64,
    #[serde(default = "PlannerPolicy::default_scooter_day_rate")]
    pub scooter_day_rate: i64,
    #[serde(default = "PlannerPolicy::default_bicycle_day_rate")]
    pub bicycle_day_rate: i64,
}

impl PlannerPolicy {
    const fn default_max_hours_per_day() -> f64 {
        MAX_HOURS_PER_DAY
    }

    const fn default_max_stops_per_day() -> usize {
        MAX_STOPS_PER_DAY
    }

    const fn default_full_day_cab_min_stops() -> usize {
        FULL_DAY_CAB_MIN_STOPS
    }

    fn default_scooter_islands() -> Vec<Island> {
        vec![Island::Havelock, Island::Neil]
    }

    fn default_leg_time_window() -> String {
        LEG_TIME_WINDOW.to_string()
    }

    const fn default_ferry_base_fare() -> i64 {
        FERRY_BASE_FARE
    }

    const fn default_boat_base_fare() -> i64 {
        BOAT_BASE_FARE
    }

    const fn default_p2p_rate_per_hop() -> i64 {
        P2P_RATE_PER_HOP
    }

    const fn default_scooter_day_rate() -> i64 {
        SCOOTER_DAY_RATE
    }

    const fn default_bicycle_day_rate() -> i64 {
        BICYCLE_DAY_RATE
    }

    /// Parse a policy overlay; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that every budget is usable and every fare non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.max_hours_per_day.is_finite() || self.max_hours_per_day <= 0.0 {
            return Err(PolicyError::NonPositive {
                field: "maxHoursPerDay",
                value: self.max_hours_per_day,
            });
        }
        if self.max_stops_per_day < 1 {
            return Err(PolicyError::MinViolation {
                field: "maxStopsPerDay",
                min: 1,
                value: self.max_stops_per_day,
            });
        }
        if self.full_day_cab_min_stops < 1 {
            return Err(PolicyError::MinViolation {
                field: "fullDayCabMinStops",
                min: 1,
                value: self.full_day_cab_min_stops,
            });
        }
        for (field, value) in [
            ("ferryBaseFare", self.ferry_base_fare),
            ("boatBaseFare", self.boat_base_fare),
            ("p2pRatePerHop", self.p2p_rate_per_hop),
            ("scooterDayRate", self.scooter_day_rate),
            ("bicycleDayRate", self.bicycle_day_rate),
        ] {
            if value < 0 {
                return Err(PolicyError::NegativeRate { field, value });
            }
        }
        for class in FerryClass::ALL {
            let value = self.ferry_class_multipliers.for_class(class);
            if !value.is_finite() || value < 1.0 {
                return Err(PolicyError::ClassMultiplier { class, value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_scooter_island(&self, island: &Island) -> bool {
        self.scooter_islands.contains(island)
    }
}

impl Default for PlannerPolicy {
    fn default() -> Self {
        Self {
            max_hours_per_day: Self::default_max_hours_per_day(),
            max_stops_per_day: Self::default_max_stops_per_day(),
            full_day_cab_min_stops: Self::default_full_day_cab_min_stops(),
            scooter_islands: Self::default_scooter_islands(),
            leg_time_window: Self::default_leg_time_window(),
            ferry_base_fare: Self::default_ferry_base_fare(),
            ferry_class_multipliers: FerryClassMultipliers::default(),
            boat_base_fare: Self::default_boat_base_fare(),
            p2p_rate_per_hop: Self::default_p2p_rate_per_hop(),
            scooter_day_rate: Self::default_scooter_day_rate(),
            bicycle_day_rate: Self::default_bicycle_day_rate(),
        }
    }
}
