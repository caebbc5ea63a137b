//! Centralized planning and pricing constants for the Andaman trip planner.
//!
//! These values are the defaults behind [`crate::policy::PlannerPolicy`].

// Home island fixtures -----------------------------------------------------
pub(crate) const ARRIVAL_LABEL: &str = "Arrival - Veer Savarkar Intl. Airport (IXZ)";
pub(crate) const ARRIVAL_TRANSFER_LABEL: &str = "Airport → Hotel (Port Blair)";
pub(crate) const DEPARTURE_LABEL: &str = "Airport Departure (IXZ) — Fly Out";

// Location defaults --------------------------------------------------------
pub(crate) const DEFAULT_DURATION_HRS: f64 = 2.0;
pub(crate) const UNNAMED_LOCATION: &str = "Unnamed spot";
pub(crate) const DEFAULT_ACTIVITY_CATEGORY: &str = "Adventure";
pub(crate) const NEARBY_LIMIT: usize = 6;

// Mood inference thresholds (hours) ----------------------------------------
pub(crate) const MOOD_RELAXED_MAX_HRS: f64 = 2.0;
pub(crate) const MOOD_BALANCED_MIN_HRS: f64 = 3.0;
pub(crate) const MOOD_ACTIVE_MIN_HRS: f64 = 4.0;

// Day bucketing ------------------------------------------------------------
pub(crate) const MAX_HOURS_PER_DAY: f64 = 7.0;
pub(crate) const MAX_STOPS_PER_DAY: usize = 5;
pub(crate) const FULL_DAY_CAB_MIN_STOPS: usize = 3;
pub(crate) const LEG_TIME_WINDOW: &str = "08:00–09:30";

// Pricing (whole rupees) ---------------------------------------------------
pub(crate) const FERRY_BASE_FARE: i64 = 1_500;
pub(crate) const FERRY_MULT_ECONOMY: f64 = 1.0;
pub(crate) const FERRY_MULT_DELUXE: f64 = 1.4;
pub(crate) const FERRY_MULT_LUXURY: f64 = 1.9;
pub(crate) const BOAT_BASE_FARE: i64 = 1_200;
pub(crate) const P2P_RATE_PER_HOP: i64 = 500;
pub(crate) const SCOOTER_DAY_RATE: i64 = 800;
pub(crate) const BICYCLE_DAY_RATE: i64 = 400;

// Trip selection defaults --------------------------------------------------
pub(crate) const DEFAULT_ADULTS: u32 = 2;
pub(crate) const DEFAULT_CAB_MODEL: &str = "suv";
