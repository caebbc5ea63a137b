//! Price roll-up over an assembled itinerary.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Activity, CabCatalog, HotelCatalog};
use crate::day::{Day, TransportMode};
use crate::island::{Island, LegKind};
use crate::itinerary::Itinerary;
use crate::numbers::{count_to_i64, i64_to_f64, round_f64_to_i64};
use crate::policy::PlannerPolicy;
use crate::trip::TripSelection;

/// Per-category price breakdown in whole rupees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub nights_by_island: BTreeMap<Island, u32>,
    pub ferry_legs: usize,
    pub boat_legs: usize,
    pub hotels_total: i64,
    pub addons_total: i64,
    pub ferry_total: i64,
    pub boat_total: i64,
    pub ground_total: i64,
    pub grand_total: i64,
    pub pax: u32,
}

impl CostBreakdown {
    /// Islands with at least one counted night, for hotel selection.
    #[must_use]
    pub fn hotel_islands(&self) -> Vec<Island> {
        self.nights_by_island
            .iter()
            .filter(|(_, nights)| **nights > 0)
            .map(|(island, _)| island.clone())
            .collect()
    }
}

/// Price tables the aggregator reads from.
#[derive(Debug, Clone, Copy)]
pub struct PriceTables<'a> {
    pub hotels: &'a HotelCatalog,
    pub cabs: &'a CabCatalog,
    pub activities: &'a [Activity],
    pub policy: &'a PlannerPolicy,
}

/// Nights per island: every day that is neither a transfer nor the fly-out.
#[must_use]
pub fn nights_by_island(days: &[Day]) -> BTreeMap<Island, u32> {
    let mut nights = BTreeMap::new();
    for day in days.iter().filter(|day| day.counts_as_night()) {
        *nights.entry(day.island.clone()).or_insert(0) += 1;
    }
    nights
}

#[must_use]
pub fn hotels_total(
    nights: &BTreeMap<Island, u32>,
    chosen: &BTreeMap<Island, String>,
    hotels: &HotelCatalog,
) -> i64 {
    nights
        .iter()
        .filter_map(|(island, count)| {
            let hotel = hotels.find(island, chosen.get(island)?)?;
            Some(hotel.sell_price.max(0).saturating_mul(i64::from(*count)))
        })
        .sum()
}

/// Sum of base prices of the selected add-ons; unknown ids add nothing.
#[must_use]
pub fn addons_total(selected: &[String], activities: &[Activity]) -> i64 {
    selected
        .iter()
        .filter_map(|id| activities.iter().find(|activity| activity.id == *id))
        .map(|activity| activity.base_price.max(0))
        .sum()
}

/// Ferry fare: legs × base × class multiplier × paying adults (at least one).
#[must_use]
pub fn ferry_total(legs: usize, selection: &TripSelection, policy: &PlannerPolicy) -> i64 {
    let multiplier = policy
        .ferry_class_multipliers
        .for_class(selection.ferry_class);
    let fare = i64_to_f64(count_to_i64(legs))
        * i64_to_f64(policy.ferry_base_fare)
        * multiplier
        * f64::from(selection.adults.max(1));
    round_f64_to_i64(fare).max(0)
}

/// Boat fare: legs × base × paying adults (at least one); no class multiplier.
#[must_use]
pub fn boat_total(legs: usize, selection: &TripSelection, policy: &PlannerPolicy) -> i64 {
    count_to_i64(legs)
        .saturating_mul(policy.boat_base_fare.max(0))
        .saturating_mul(i64::from(selection.adults.max(1)))
}

/// Local transport for one sightseeing day. Leg and departure days cost nothing here.
#[must_use]
pub fn ground_cost_for_day(
    day: &Day,
    selection: &TripSelection,
    cab_day_rate: i64,
    policy: &PlannerPolicy,
) -> i64 {
    if !day.counts_as_night() {
        return 0;
    }
    if selection.scooter_islands.contains(&day.island) {
        return policy.scooter_day_rate;
    }
    if selection.bicycle_islands.contains(&day.island) {
        return policy.bicycle_day_rate;
    }
    match day.transport {
        mode if mode.is_cab() => cab_day_rate,
        TransportMode::Scooter => policy.scooter_day_rate,
        _ => {
            // A day with zero or one stop still pays the baseline transfer.
            let hops = day.stop_count().saturating_sub(1).max(1);
            count_to_i64(hops).saturating_mul(policy.p2p_rate_per_hop)
        }
    }
}

/// Recompute every price component from scratch.
#[must_use]
pub fn compute_costs(
    itinerary: &Itinerary,
    selection: &TripSelection,
    tables: PriceTables<'_>,
) -> CostBreakdown {
    let days = itinerary.days.as_slice();
    let nights_by_island = nights_by_island(days);
    let ferry_legs = itinerary.leg_count(LegKind::Ferry);
    let boat_legs = itinerary.leg_count(LegKind::Boat);
    let cab_day_rate = tables.cabs.day_rate(&selection.cab_model);

    let hotels_total = hotels_total(&nights_by_island, &selection.hotels, tables.hotels);
    let addons_total = addons_total(&selection.activity_ids, tables.activities);
    let ferry_total = ferry_total(ferry_legs, selection, tables.policy);
    let boat_total = boat_total(boat_legs, selection, tables.policy);
    let ground_total = days
        .iter()
        .map(|day| ground_cost_for_day(day, selection, cab_day_rate, tables.policy))
        .sum::<i64>();
    let grand_total = [hotels_total, addons_total, ferry_total, boat_total, ground_total]
        .into_iter()
        .fold(0_i64, i64::saturating_add);

    CostBreakdown {
        nights_by_island,
        ferry_legs,
        boat_legs,
        hotels_total,
        addons_total,
        ferry_total,
        boat_total,
        ground_total,
        grand_total,
        pax: selection.pax(),
    }
}
