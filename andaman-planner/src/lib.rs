//! Andaman Planner Engine
//!
//! Platform-agnostic core for planning Andaman island-hopping trips: reference-data
//! normalization, day-by-day itinerary synthesis and cost estimation.
//! This crate has no UI or I/O dependencies; loaders live behind the `async` feature.

pub mod bucket;
pub mod catalog;
pub(crate) mod constants;
pub mod cost;
pub mod day;
pub mod island;
pub mod itinerary;
#[cfg(feature = "async")]
pub mod loader;
pub mod location;
pub mod numbers;
pub mod policy;
pub mod session;
pub mod trip;

// Re-export commonly used types
pub use bucket::{bucket_locations, island_days, order_by_best_time, transport_for};
pub use catalog::{
    Activity, CabCatalog, CabModel, Hotel, HotelCatalog, IslandHotels, LocationActivities,
    LocationDetail, ReferenceData,
};
pub use cost::{CostBreakdown, PriceTables, compute_costs, nights_by_island};
pub use day::{Day, Item, Leg, ParseLabelError, TransportMode, Visit};
pub use island::{Island, LegKind};
pub use itinerary::{Itinerary, MoveDirection, visiting_order};
#[cfg(feature = "async")]
pub use loader::{DataSource, Dataset, LoadError, load_reference_data};
pub use location::{Location, Mood, TimeOfDay, infer_moods};
pub use policy::{FerryClassMultipliers, PlannerPolicy, PolicyError};
pub use session::{LoadTicket, PlannerSession};
pub use trip::{FerryClass, TripSelection};

/// One-shot planning: generate the itinerary for `selection` and price it.
#[must_use]
pub fn plan_trip(
    reference: &ReferenceData,
    selection: &TripSelection,
    policy: &PlannerPolicy,
) -> (Itinerary, CostBreakdown) {
    let mut session = PlannerSession::new(reference.clone(), policy.clone());
    session.apply_selection(selection.clone());
    let costs = session.cost();
    (session.dated_itinerary(), costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_trip_prices_generated_days() {
        let reference = ReferenceData::from_values(
            &json!([{ "id": "n1", "name": "Natural Bridge", "island": "Neil", "durationHrs": 1.5 }]),
            &json!([]),
            &json!([]),
            &json!([]),
        );
        let selection = TripSelection::new()
            .with_location_toggled("n1")
            .with_ferry_class(FerryClass::Economy)
            .with_travellers(1, 0)
            .with_start_date(chrono::NaiveDate::from_ymd_opt(2026, 3, 1));
        let (itinerary, costs) = plan_trip(&reference, &selection, &PlannerPolicy::default());
        assert_eq!(itinerary.len(), 5);
        assert_eq!(
            itinerary.days[4].date,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 5)
        );
        assert_eq!(costs.ferry_total, 3000);
        assert_eq!(costs.pax, 1);
    }
}
