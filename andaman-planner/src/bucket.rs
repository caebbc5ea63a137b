//! Greedy packing of one island's locations into sightseeing days.
use crate::day::{Day, Item, TransportMode, Visit};
use crate::island::Island;
use crate::location::Location;
use crate::policy::PlannerPolicy;

/// Order locations by preferred time of day; ties keep their input order.
#[must_use]
pub fn order_by_best_time<'a>(locations: &[&'a Location]) -> Vec<&'a Location> {
    let mut sorted = locations.to_vec();
    sorted.sort_by_key(|location| location.time_rank());
    sorted
}

/// Pack locations into day buckets under the hour budget and stop cap.
///
/// A location is never split: one that alone exceeds the hour budget still
/// gets a bucket of its own.
#[must_use]
pub fn bucket_locations<'a>(
    locations: &[&'a Location],
    policy: &PlannerPolicy,
) -> Vec<Vec<&'a Location>> {
    let mut buckets = Vec::new();
    let mut bucket: Vec<&Location> = Vec::new();
    let mut hours_used = 0.0;

    for location in order_by_best_time(locations) {
        let hours = location.duration_hrs;
        let over_cap = bucket.len() >= policy.max_stops_per_day;
        let over_budget = hours_used + hours > policy.max_hours_per_day;
        if !bucket.is_empty() && (over_cap || over_budget) {
            buckets.push(std::mem::take(&mut bucket));
            hours_used = 0.0;
        }
        bucket.push(location);
        hours_used += hours;
    }
    if !bucket.is_empty() {
        buckets.push(bucket);
    }
    buckets
}

/// Transport suggestion for a sightseeing day on `island` with `stops` visits.
#[must_use]
pub fn transport_for(island: &Island, stops: usize, policy: &PlannerPolicy) -> TransportMode {
    if stops >= policy.full_day_cab_min_stops {
        TransportMode::FullDayCab
    } else if policy.is_scooter_island(island) {
        TransportMode::Scooter
    } else {
        TransportMode::PointToPoint
    }
}

/// Build the sightseeing days for one island's selected locations.
#[must_use]
pub fn island_days(island: &Island, locations: &[&Location], policy: &PlannerPolicy) -> Vec<Day> {
    bucket_locations(locations, policy)
        .into_iter()
        .map(|bucket| {
            let transport = transport_for(island, bucket.len(), policy);
            let items = bucket
                .into_iter()
                .map(|location| Item::Location(Visit::from(location)))
                .collect();
            Day::new(island.clone(), items, transport)
        })
        .collect()
}
