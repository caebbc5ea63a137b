//! Immutable trip-selection snapshots and their transitions.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ADULTS, DEFAULT_CAB_MODEL};
use crate::day::ParseLabelError;
use crate::island::Island;

/// Ferry seating class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FerryClass {
    Economy,
    #[default]
    Deluxe,
    Luxury,
}

impl FerryClass {
    pub const ALL: [Self; 3] = [Self::Economy, Self::Deluxe, Self::Luxury];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Deluxe => "Deluxe",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for FerryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FerryClass {
    type Err = ParseLabelError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| ParseLabelError {
                kind: "ferry class",
                label: label.to_string(),
                expected: "Economy, Deluxe, Luxury",
            })
    }
}

/// Everything the traveller has chosen so far.
///
/// Each `with_*` method is a transition returning a fresh snapshot; the
/// itinerary and price are always recomputed from the snapshot as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSelection {
    #[serde(default)]
    pub location_ids: Vec<String>,
    #[serde(default)]
    pub activity_ids: Vec<String>,
    #[serde(default)]
    pub hotels: BTreeMap<Island, String>,
    #[serde(default)]
    pub scooter_islands: BTreeSet<Island>,
    #[serde(default)]
    pub bicycle_islands: BTreeSet<Island>,
    #[serde(default)]
    pub ferry_class: FerryClass,
    #[serde(default = "TripSelection::default_cab_model")]
    pub cab_model: String,
    #[serde(default = "TripSelection::default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "TripSelection::default_start_from_home")]
    pub start_from_home: bool,
}

impl Default for TripSelection {
    fn default() -> Self {
        Self {
            location_ids: Vec::new(),
            activity_ids: Vec::new(),
            hotels: BTreeMap::new(),
            scooter_islands: BTreeSet::new(),
            bicycle_islands: BTreeSet::new(),
            ferry_class: FerryClass::default(),
            cab_model: Self::default_cab_model(),
            adults: Self::default_adults(),
            infants: 0,
            start_date: None,
            start_from_home: Self::default_start_from_home(),
        }
    }
}

fn toggled(ids: &[String], id: &str) -> Vec<String> {
    if ids.iter().any(|existing| existing == id) {
        ids.iter().filter(|existing| *existing != id).cloned().collect()
    } else {
        let mut next = ids.to_vec();
        next.push(id.to_string());
        next
    }
}

impl TripSelection {
    fn default_cab_model() -> String {
        DEFAULT_CAB_MODEL.to_string()
    }

    const fn default_adults() -> u32 {
        DEFAULT_ADULTS
    }

    const fn default_start_from_home() -> bool {
        true
    }

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total travellers; infants ride free but still count.
    #[must_use]
    pub const fn pax(&self) -> u32 {
        self.adults.saturating_add(self.infants)
    }

    #[must_use]
    pub fn is_location_selected(&self, id: &str) -> bool {
        self.location_ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn is_activity_selected(&self, id: &str) -> bool {
        self.activity_ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn with_location_toggled(&self, id: &str) -> Self {
        Self {
            location_ids: toggled(&self.location_ids, id),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_locations<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut location_ids: Vec<String> = Vec::new();
        for id in ids.into_iter().map(Into::into) {
            if !location_ids.contains(&id) {
                location_ids.push(id);
            }
        }
        Self {
            location_ids,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_activity_toggled(&self, id: &str) -> Self {
        Self {
            activity_ids: toggled(&self.activity_ids, id),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_hotel(&self, island: Island, hotel_id: &str) -> Self {
        let mut hotels = self.hotels.clone();
        hotels.insert(island, hotel_id.to_string());
        Self {
            hotels,
            ..self.clone()
        }
    }

    /// Toggle the scooter override, or force it with `Some(enabled)`.
    #[must_use]
    pub fn with_scooter(&self, island: Island, enabled: Option<bool>) -> Self {
        let mut scooter_islands = self.scooter_islands.clone();
        let enable = enabled.unwrap_or_else(|| !scooter_islands.contains(&island));
        if enable {
            scooter_islands.insert(island);
        } else {
            scooter_islands.remove(&island);
        }
        Self {
            scooter_islands,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_bicycle_toggled(&self, island: Island) -> Self {
        let mut bicycle_islands = self.bicycle_islands.clone();
        if !bicycle_islands.remove(&island) {
            bicycle_islands.insert(island);
        }
        Self {
            bicycle_islands,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_ferry_class(&self, ferry_class: FerryClass) -> Self {
        Self {
            ferry_class,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_cab_model(&self, cab_model: &str) -> Self {
        Self {
            cab_model: cab_model.to_string(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_travellers(&self, adults: u32, infants: u32) -> Self {
        Self {
            adults,
            infants,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_start_date(&self, start_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_start_from_home(&self, start_from_home: bool) -> Self {
        Self {
            start_from_home,
            ..self.clone()
        }
    }

    /// Whether moving from `self` to `next` changes the generated day list.
    ///
    /// Only locations, activities and the start flag feed the assembler; hotel,
    /// transport and traveller choices only change the price.
    #[must_use]
    pub fn requires_regeneration(&self, next: &Self) -> bool {
        self.location_ids != next.location_ids
            || self.activity_ids != next.activity_ids
            || self.start_from_home != next.start_from_home
    }
}
