//! Itinerary assembly: island ordering, transfer legs and the arrival/departure bracket.
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::bucket::island_days;
use crate::constants::{ARRIVAL_LABEL, ARRIVAL_TRANSFER_LABEL, DEPARTURE_LABEL};
use crate::day::{Day, Item, Leg, TransportMode};
use crate::island::{Island, LegKind};
use crate::location::Location;
use crate::policy::PlannerPolicy;

/// Direction for moving an item to a neighbouring day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Previous,
    Next,
}

/// An ordered list of days, always bracketed by arrival and departure when generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    pub days: Vec<Day>,
}

/// Visiting order for a set of islands.
///
/// Canonical islands sort by rank; pass-through islands follow in encounter
/// order. With `start_from_home` the home island is forced to the front.
#[must_use]
pub fn visiting_order(islands: &[Island], start_from_home: bool) -> Vec<Island> {
    let mut order: Vec<Island> = Vec::new();
    for island in islands {
        if !order.contains(island) {
            order.push(island.clone());
        }
    }
    if order.is_empty() {
        order.push(Island::HOME);
    }
    order.sort_by_key(|island| island.rank().unwrap_or(usize::MAX));
    if start_from_home {
        order.retain(|island| !island.is_home());
        order.insert(0, Island::HOME);
    }
    order
}

fn arrival_day() -> Day {
    Day::new(
        Island::HOME,
        vec![
            Item::Arrival {
                name: ARRIVAL_LABEL.to_string(),
            },
            Item::Transfer {
                name: ARRIVAL_TRANSFER_LABEL.to_string(),
            },
        ],
        TransportMode::PointToPoint,
    )
}

fn departure_day() -> Day {
    Day::new(
        Island::HOME,
        vec![Item::Departure {
            name: DEPARTURE_LABEL.to_string(),
        }],
        TransportMode::NotApplicable,
    )
}

fn leg_day(kind: LegKind, from: &Island, to: &Island, time: Option<String>) -> Day {
    Day::new(
        from.clone(),
        vec![Item::leg(kind, Leg::new(kind, from, to, time))],
        TransportMode::NotApplicable,
    )
}

impl Itinerary {
    /// Synthesize the day list for a selection.
    ///
    /// `activity_islands` are islands implied by chosen add-ons; they are
    /// visited even when no location there is selected.
    #[must_use]
    pub fn generate(
        locations: &[&Location],
        activity_islands: &[Island],
        start_from_home: bool,
        policy: &PlannerPolicy,
    ) -> Self {
        let mut days = vec![arrival_day()];

        if locations.is_empty() && activity_islands.is_empty() {
            days.push(departure_day());
            return Self { days };
        }

        let mut by_island: HashMap<&Island, Vec<&Location>> = HashMap::new();
        for location in locations.iter().copied() {
            by_island.entry(&location.island).or_default().push(location);
        }
        let encountered: Vec<Island> = locations
            .iter()
            .map(|location| location.island.clone())
            .chain(activity_islands.iter().cloned())
            .collect();
        let order = visiting_order(&encountered, start_from_home);
        log::debug!(
            "visiting order: {}",
            order
                .iter()
                .map(Island::name)
                .collect::<Vec<_>>()
                .join(" → ")
        );

        for (idx, island) in order.iter().enumerate() {
            if let Some(island_locations) = by_island.get(island) {
                days.extend(island_days(island, island_locations, policy));
            }
            if let Some(next) = order.get(idx + 1)
                && let Some(kind) = Island::leg_kind(island, next)
            {
                days.push(leg_day(
                    kind,
                    island,
                    next,
                    Some(policy.leg_time_window.clone()),
                ));
            }
        }

        if let Some(last) = order.last()
            && let Some(kind) = Island::leg_kind(last, &Island::HOME)
        {
            days.push(leg_day(kind, last, &Island::HOME, None));
        }

        days.push(departure_day());
        Self { days }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of ferry or boat legs across every day.
    #[must_use]
    pub fn leg_count(&self, kind: LegKind) -> usize {
        self.days.iter().map(|day| day.leg_count(kind)).sum()
    }

    /// Copy of the days with calendar dates filled from `start`.
    #[must_use]
    pub fn dated(&self, start: Option<NaiveDate>) -> Self {
        let days = self
            .days
            .iter()
            .enumerate()
            .map(|(index, day)| Day {
                date: start.and_then(|date| {
                    u64::try_from(index)
                        .ok()
                        .and_then(|offset| date.checked_add_days(Days::new(offset)))
                }),
                ..day.clone()
            })
            .collect();
        Self { days }
    }

    /// Insert an empty sightseeing day after `index`, on the same island.
    ///
    /// Out-of-range indices append a day at the home island.
    pub fn insert_empty_day_after(&mut self, index: usize) {
        let island = self
            .days
            .get(index)
            .map_or(Island::HOME, |day| day.island.clone());
        let at = index.saturating_add(1).min(self.days.len());
        self.days
            .insert(at, Day::new(island, Vec::new(), TransportMode::PointToPoint));
    }

    /// Remove a day. Refused when it is the only day left or `index` is out of range.
    pub fn delete_day(&mut self, index: usize) -> bool {
        if self.days.len() <= 1 || index >= self.days.len() {
            return false;
        }
        self.days.remove(index);
        true
    }

    /// Move one item to the neighbouring day. Refused when either end is out of range.
    pub fn move_item(&mut self, day: usize, item: usize, direction: MoveDirection) -> bool {
        if day >= self.days.len() {
            return false;
        }
        let target = match direction {
            MoveDirection::Previous => day.checked_sub(1),
            MoveDirection::Next => day.checked_add(1),
        };
        let Some(target) = target.filter(|target| *target < self.days.len()) else {
            return false;
        };
        if item >= self.days[day].items.len() {
            return false;
        }
        let moved = self.days[day].items.remove(item);
        self.days[target].items.push(moved);
        true
    }

    /// Override the transport label for one day.
    pub fn set_transport(&mut self, index: usize, transport: TransportMode) -> bool {
        match self.days.get_mut(index) {
            Some(day) => {
                day.transport = transport;
                true
            }
            None => false,
        }
    }

    /// Structural fingerprint of the day list; equal itineraries hash equal.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let canonical = serde_json::to_vec(&self.days).unwrap_or_default();
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(&canonical);
        hasher.finish()
    }
}
